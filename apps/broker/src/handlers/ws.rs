use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use notifier_codec::{encode, Frame, ResolvedFrame};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info, instrument, warn};

use crate::state::pending::ResolveOutcome;
use crate::state::AppState;

const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(25);
const COMMAND_BUFFER_CAPACITY: usize = 32;

/// `GET /ws` — upgrades to a WebSocket uplink for one daemon.
#[instrument(skip(upgrade, state, headers))]
pub async fn establish_uplink(
    upgrade: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let client_name = headers
        .get("X-Client-Name")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    upgrade.on_upgrade(move |socket| handle_session(socket, state, client_name))
}

async fn handle_session(socket: WebSocket, state: AppState, client_name: String) {
    let (mut sender, mut receiver) = socket.split();
    let (connection_id, mut fanout_receiver) = state.registry.register(client_name.clone()).await;

    info!(client_name, %connection_id, "daemon uplink established");

    let (command_tx, mut command_rx) = mpsc::channel::<String>(COMMAND_BUFFER_CAPACITY);

    // Internal worker: resolves action frames sent up by this daemon.
    let worker_state = state.clone();
    let worker_client_name = client_name.clone();
    let mut worker_task = tokio::spawn(async move {
        while let Some(raw) = command_rx.recv().await {
            if let Err(e) = dispatch_inbound(&worker_state, &worker_client_name, &raw).await {
                error!(error = %e, "failed to dispatch inbound frame");
            }
        }
    });

    // Downstream: broadcast fan-out plus keepalive pings.
    let mut sender_task = tokio::spawn(async move {
        let mut keepalive = interval(KEEPALIVE_INTERVAL);
        loop {
            tokio::select! {
                _ = keepalive.tick() => {
                    if sender.send(Message::Ping(vec![])).await.is_err() {
                        break;
                    }
                }
                frame = fanout_receiver.recv() => {
                    match frame {
                        Ok(payload) => {
                            if sender.send(Message::Text(payload)).await.is_err() {
                                break;
                            }
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                            warn!(missed, "daemon uplink fell behind fan-out");
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        }
    });

    // Upstream: forward text frames into the internal worker.
    let mut receiver_task = tokio::spawn(async move {
        while let Some(message) = receiver.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    if command_tx.send(text).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    error!(error = %e, "uplink read error");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut sender_task => {
            receiver_task.abort();
            worker_task.abort();
        }
        _ = &mut receiver_task => {
            sender_task.abort();
            worker_task.abort();
        }
        _ = &mut worker_task => {
            sender_task.abort();
            receiver_task.abort();
        }
    }

    state.registry.unregister(connection_id).await;
    debug!(%connection_id, "daemon uplink closed");
}

async fn dispatch_inbound(state: &AppState, client_name: &str, raw: &str) -> Result<(), notifier_codec::CodecError> {
    let Some(frame) = notifier_codec::decode(raw)? else {
        return Ok(());
    };

    if let Frame::Action(action_frame) = frame {
        let resolved = match state.pending.resolve(&action_frame.id, action_frame.action_index) {
            ResolveOutcome::Resolved(action) => {
                let success = if action.open {
                    true
                } else {
                    execute_action(&state.http_client, &action).await
                };
                ResolvedFrame {
                    id: action_frame.id,
                    resolved_by: client_name.to_string(),
                    success,
                    error: None,
                    action: Some(action),
                }
            }
            ResolveOutcome::InvalidIndex => ResolvedFrame {
                id: action_frame.id,
                resolved_by: client_name.to_string(),
                success: false,
                error: Some("invalid action index".into()),
                action: None,
            },
            ResolveOutcome::AlreadyResolved => {
                debug!(id = action_frame.id, client_name, "action click on an already-resolved notification, dropping");
                return Ok(());
            }
        };

        let payload = encode(&Frame::Resolved(resolved))?;
        state.registry.broadcast(payload);
    }

    Ok(())
}

/// Executes a resolved action's request (`open` false means the broker, not
/// a daemon, is responsible for the side effect), reporting success as a
/// 2xx response.
async fn execute_action(client: &reqwest::Client, action: &notifier_model::Action) -> bool {
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
