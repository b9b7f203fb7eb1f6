use futures_util::{SinkExt, StreamExt};
use notifier_codec::Frame;
use notifier_model::ServerEntry;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info, instrument, warn};

use crate::services::ingress::IngressPipeline;
use crate::state::AppState;

const MIN_RECONNECT_DELAY: std::time::Duration = std::time::Duration::from_secs(1);
const MAX_RECONNECT_DELAY: std::time::Duration = std::time::Duration::from_secs(30);

/// Owns one daemon-to-broker WebSocket connection, including its own
/// reconnect-with-backoff loop. Dropping the returned `JoinHandle` (via
/// `.abort()`) is how a config reload tears this connection down.
pub struct BrokerConnection;

impl BrokerConnection {
    /// Spawns the connect/read/reconnect loop for `server` as a background
    /// task.
    pub fn spawn(server: ServerEntry, state: AppState) -> JoinHandle<()> {
        tokio::spawn(async move { Self::run(server, state).await })
    }

    async fn run(server: ServerEntry, state: AppState) {
        let mut delay = MIN_RECONNECT_DELAY;
        loop {
            info!(server = %server.name, url = %server.url, "connecting to broker");
            match Self::connect_and_serve(&server, &state).await {
                Ok(()) => {
                    delay = MIN_RECONNECT_DELAY;
                }
                Err(e) => {
                    warn!(server = %server.name, error = %e, "broker connection failed");
                }
            }
            state.uplinks.unregister(&server.name);
            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(MAX_RECONNECT_DELAY);
        }
    }

    #[instrument(skip(server, state))]
    async fn connect_and_serve(server: &ServerEntry, state: &AppState) -> Result<(), ConnectionError> {
        let mut request = server.url.clone().into_client_request().map_err(ConnectionError::InvalidUrl)?;
        request.headers_mut().insert(
            "X-Client-Name",
            server.name.parse().map_err(|_| ConnectionError::InvalidHeader)?,
        );
        request.headers_mut().insert(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", server.secret)
                .parse()
                .map_err(|_| ConnectionError::InvalidHeader)?,
        );

        let (stream, _response) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(ConnectionError::Handshake)?;
        info!(server = %server.name, "broker connection established");

        let (mut sink, mut source) = stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        state.uplinks.register(server.name.clone(), outbound_tx);

        let writer = tokio::spawn(async move {
            while let Some(payload) = outbound_rx.recv().await {
                if sink.send(Message::Text(payload)).await.is_err() {
                    break;
                }
            }
        });

        let server_name = server.name.clone();
        let reader_state = state.clone();
        let reader = tokio::spawn(async move {
            while let Some(message) = source.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        Self::dispatch(&reader_state, &server_name, &text).await;
                    }
                    Ok(Message::Close(_)) => break,
                    Err(e) => {
                        error!(server = %server_name, error = %e, "read error");
                        break;
                    }
                    _ => {}
                }
            }
        });

        tokio::select! {
            _ = writer => {}
            _ = reader => {}
        }

        Ok(())
    }

    async fn dispatch(state: &AppState, server_name: &str, raw: &str) {
        let frame = match notifier_codec::decode(raw) {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "failed to decode frame from broker");
                return;
            }
        };

        let pipeline = IngressPipeline::new(state);
        match frame {
            Frame::Notification(notification) => pipeline.handle_inbound(server_name, notification).await,
            Frame::Resolved(resolved) => pipeline.dispatch_resolved(resolved).await,
            Frame::Action(_) => {} // the daemon never receives action frames; only the broker does
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ConnectionError {
    #[error("invalid broker url: {0}")]
    InvalidUrl(#[source] tokio_tungstenite::tungstenite::Error),
    #[error("invalid client name or secret header value")]
    InvalidHeader,
    #[error("websocket handshake failed: {0}")]
    Handshake(#[source] tokio_tungstenite::tungstenite::Error),
}
