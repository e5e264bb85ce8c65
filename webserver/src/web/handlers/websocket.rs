//! WebSocket handler
//!
//! Every socket gets its own game: a reader loop turning client messages
//! into player signals, a writer task serializing game events, and the
//! round orchestrator running in between.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use classifier::Classifier;
use orchestrator::{GameEvent, OrchestratorError, PlayerSignal, Presenter, RoundOrchestrator};
use shared::session_info;

use crate::services::WebSocketPlayer;
use crate::state::AppState;
use crate::types::ClientMessage;

/// Buffered events per socket
const EVENT_BUFFER: usize = 64;
/// Buffered player signals per socket
const SIGNAL_BUFFER: usize = 16;

/// `GET /ws`
pub async fn websocket_handler<C>(ws: WebSocketUpgrade, State(state): State<AppState<C>>) -> impl IntoResponse
where
    C: Classifier + 'static,
{
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket<C>(socket: WebSocket, state: AppState<C>)
where
    C: Classifier + 'static,
{
    let (mut sender, mut receiver) = socket.split();
    let (event_tx, mut event_rx) = mpsc::channel::<GameEvent>(EVENT_BUFFER);
    let (signal_tx, signal_rx) = mpsc::channel::<PlayerSignal>(SIGNAL_BUFFER);
    let player = WebSocketPlayer::new(event_tx);

    // Spawn task to handle outgoing events
    let outgoing_task = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Failed to serialize game event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    });

    let orchestrator = match RoundOrchestrator::create(
        state.config.game,
        state.catalog.as_ref(),
        state.classifier.clone(),
        player.clone(),
        player.clone(),
        signal_rx,
    )
    .await
    {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            warn!("❌ Could not start a game: {}", e);
            player
                .present(GameEvent::SessionFailed { message: e.to_string() })
                .await;
            drop(player);
            let _ = outgoing_task.await;
            return;
        }
    };

    let session = orchestrator.session_id();
    let guard = state.track_session();
    session_info!(session, "🔗 Player connected ({} active)", state.active_sessions());

    let game_task = tokio::spawn(orchestrator.run());

    // Handle incoming messages
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                debug!("WebSocket error for session {}: {}", session, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Ready) => {
                    if signal_tx.send(PlayerSignal::Ready).await.is_err() {
                        debug!("Session {} is over, ignoring ready", session);
                    }
                }
                Ok(ClientMessage::Submit { image }) => {
                    player.store_image(image).await;
                    if signal_tx.send(PlayerSignal::Submitted).await.is_err() {
                        debug!("Session {} is over, ignoring submission", session);
                    }
                }
                Err(e) => warn!("Unparseable message from session {}: {}", session, e),
            },
            Message::Binary(_) => {
                warn!("Received binary message from session {} - not supported", session);
            }
            Message::Close(_) => break,
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    // Closing the signal channel ends an unfinished game
    drop(signal_tx);
    match game_task.await {
        Ok(Ok(_)) | Ok(Err(OrchestratorError::Disconnected)) => {}
        Ok(Err(e)) => warn!("Session {} ended with error: {}", session, e),
        Err(e) => warn!("Session {} task failed: {}", session, e),
    }

    drop(player);
    outgoing_task.abort();
    drop(guard);
    info!("👋 WebSocket connection closed: {}", session);
}
