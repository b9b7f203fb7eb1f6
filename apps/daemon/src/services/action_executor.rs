use notifier_codec::{encode, ActionFrame, Frame};
use notifier_model::ActionState;
use tracing::{error, instrument, warn};

use crate::state::action_state::set_with_auto_revert;
use crate::state::AppState;

/// Runs the action-click contract for one popup's button:
///
/// 1. mark the action `Loading`
/// 2. if the notification is exclusive, defer to the originating broker by
///    sending an `action` frame up the relevant connection and let the
///    broker's `resolved` frame settle the outcome
/// 3. otherwise, execute the action locally (HTTP call, or open a URL)
/// 4. mark the action `Success`/`Error` with its hold duration
#[instrument(skip(state))]
pub async fn execute(state: &AppState, local_id: u64, action_index: usize) {
    state.action_states.set(local_id, action_index, ActionState::Loading);

    let Some((notification, origin_server)) = state.popups.get(local_id) else {
        warn!(local_id, "action click on a popup that no longer exists");
        return;
    };

    let action = match notification.action_at(action_index) {
        Ok(a) => a.clone(),
        Err(e) => {
            warn!(error = %e, "action index out of range");
            set_with_auto_revert(state.action_states.clone(), local_id, action_index, ActionState::Error);
            return;
        }
    };

    if notification.exclusive {
        let Some(server_id) = notification.id.clone() else {
            set_with_auto_revert(state.action_states.clone(), local_id, action_index, ActionState::Error);
            return;
        };

        let frame = Frame::Action(ActionFrame {
            id: server_id,
            action_index,
        });
        match encode(&frame) {
            Ok(payload) if state.uplinks.send(&origin_server, payload.clone()) => {
                // resolution arrives asynchronously as a `resolved` frame;
                // the ingress pipeline clears this popup's action state then.
            }
            _ => {
                error!(origin_server, "failed to send action to broker");
                set_with_auto_revert(state.action_states.clone(), local_id, action_index, ActionState::Error);
            }
        }
        return;
    }

    let outcome = run_action(state, &action).await;
    let final_state = if outcome { ActionState::Success } else { ActionState::Error };
    set_with_auto_revert(state.action_states.clone(), local_id, action_index, final_state);
}

async fn run_action(state: &AppState, action: &notifier_model::Action) -> bool {
    if action.open {
        open_url_detached(&action.url);
        return true;
    }

    send_action_request(&state.http_client, action).await
}

/// Builds and sends the HTTP request described by an action's
/// `method`/`headers`/`body`, reporting success as a 2xx response.
async fn send_action_request(client: &reqwest::Client, action: &notifier_model::Action) -> bool {
    let method = reqwest::Method::from_bytes(action.method.to_uppercase().as_bytes()).unwrap_or(reqwest::Method::GET);
    let mut request = client.request(method, &action.url);
    for (key, value) in &action.headers {
        request = request.header(key, value);
    }
    if let Some(body) = &action.body {
        request = request.body(body.clone());
    }

    request
        .send()
        .await
        .map(|r| r.status().is_success())
        .unwrap_or(false)
}

/// Opens `target` with the desktop's URL handler without waiting for it to
/// exit. Linux-only for now: this workspace's daemon core targets a
/// headless Linux host, with no Windows/macOS build in this pack to ground
/// a platform-specific handler against.
pub fn open_url_detached(target: &str) {
    let target = target.to_string();
    tokio::spawn(async move {
        if let Err(e) = tokio::process::Command::new("xdg-open").arg(&target).spawn() {
            error!(error = %e, target, "failed to launch xdg-open");
        }
    });
}
