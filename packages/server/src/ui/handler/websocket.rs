//! WebSocket connection handlers.
//!
//! One task pair per connection: a receive loop that dispatches inbound events
//! strictly one at a time, and a pusher loop that forwards outbound frames.
//! Whichever ends first stops the other, and the connection is then removed
//! from presence and every room exactly once.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use duet_shared::time::timestamp_to_rfc3339;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, MessageText, PusherChannel, RoomToken, UserId},
    infrastructure::dto::websocket::{
        CanvasUpdateIn, CanvasUpdateOut, ClientEvent, ErrorPayload, SendMessageIn, ServerEvent,
        StoredMessageDto,
    },
    ui::state::AppState,
    usecase::SendOrigin,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    let connected_at = state
        .connect_client_usecase
        .execute(connection_id.clone(), tx.clone())
        .await;
    tracing::info!(
        "Connection '{}' opened at {}",
        connection_id,
        timestamp_to_rfc3339(connected_at.value())
    );

    let conn = connection_id.clone();
    let state_clone = state.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", conn, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match ClientEvent::parse(&text) {
                    Ok(event) => dispatch(&state_clone, &conn, &tx, event).await,
                    Err(e) => {
                        tracing::warn!("Malformed event from '{}': {}", conn, e);
                        reply_error(&tx, format!("Malformed event: {}", e));
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", conn);
                    break;
                }
                _ => {}
            }
        }
    });

    let send_task = pusher_loop(rx, sender);
    stop_together(recv_task, send_task).await;

    let report = state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
    tracing::info!(
        "Connection '{}' closed (users: {}, rooms: {})",
        connection_id,
        report.users.len(),
        report.rooms.len()
    );
}

/// Waits for either task to finish, then aborts the other and waits until it
/// has actually stopped. No event dispatch can outlive this call.
async fn stop_together(mut recv_task: JoinHandle<()>, mut send_task: JoinHandle<()>) {
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    }
}

/// Handles a single inbound event. Rejected input is answered with an `error`
/// event on the same connection; the connection stays open.
async fn dispatch(
    state: &AppState,
    connection_id: &ConnectionId,
    reply: &PusherChannel,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinRoom(room) => match RoomToken::try_from(room) {
            Ok(room) => {
                state
                    .join_room_usecase
                    .execute(connection_id.clone(), room)
                    .await
            }
            Err(e) => reply_error(reply, format!("joinRoom: {}", e)),
        },
        ClientEvent::CanvasUpdate(CanvasUpdateIn { room_id, lines }) => {
            let room = match room_id.filter(|r| !r.is_empty()).map(RoomToken::try_from) {
                None => None,
                Some(Ok(room)) => Some(room),
                Some(Err(e)) => {
                    reply_error(reply, format!("canvasUpdate: {}", e));
                    return;
                }
            };
            let payload = match ServerEvent::CanvasUpdate(CanvasUpdateOut { lines }).to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("Failed to encode canvas update: {}", e);
                    return;
                }
            };
            state
                .broadcast_canvas_usecase
                .execute(connection_id, room.as_ref(), &payload)
                .await;
        }
        ClientEvent::Register(user) => match UserId::try_from(user) {
            Ok(user) => {
                state
                    .register_presence_usecase
                    .execute(user, connection_id.clone())
                    .await
            }
            Err(e) => reply_error(reply, format!("register: {}", e)),
        },
        ClientEvent::SendMessage(SendMessageIn { from, to, text }) => {
            let (from, to) = match (UserId::try_from(from), UserId::try_from(to)) {
                (Ok(from), Ok(to)) => (from, to),
                (Err(e), _) | (_, Err(e)) => {
                    reply_error(reply, format!("sendMessage: {}", e));
                    return;
                }
            };
            match state
                .send_message_usecase
                .execute(from, to, MessageText::new(text), SendOrigin::Socket)
                .await
            {
                Ok(outcome) => {
                    tracing::debug!(
                        "Message '{}' stored (pushed to recipient: {})",
                        outcome.message.id.as_str(),
                        outcome.pushed
                    );
                    send_event(
                        reply,
                        ServerEvent::MessageSent(StoredMessageDto::from(outcome.message)),
                    )
                }
                Err(e) => reply_error(reply, e.to_string()),
            }
        }
    }
}

fn reply_error(reply: &PusherChannel, message: String) {
    send_event(reply, ServerEvent::Error(ErrorPayload { message }));
}

fn send_event(reply: &PusherChannel, event: ServerEvent) {
    match event.to_json() {
        Ok(json) => {
            if reply.send(json).is_err() {
                tracing::debug!("Reply dropped, connection already closing");
            }
        }
        Err(e) => tracing::warn!("Failed to encode reply: {}", e),
    }
}
