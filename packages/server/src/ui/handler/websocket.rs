//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, DocumentContent, DocumentId},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionIdFactory::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events addressed to this
/// connection (via rx channel) are written to its WebSocket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .connect_client_usecase
        .execute(connection_id.clone(), tx)
        .await;
    tracing::info!("Client '{}' connected", connection_id);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let client_msg = match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(msg) => msg,
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring unparseable message from '{}': {}",
                                connection_id_clone,
                                e
                            );
                            continue;
                        }
                    };
                    dispatch(&state_clone, &connection_id_clone, client_msg).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push events to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            recv_task.abort();
            // 実行中の dispatch が終わるまで待ち、切断処理の後に join されないようにする
            let _ = recv_task.await;
        }
    };

    let left = state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
    tracing::info!(
        "Client '{}' disconnected (left {} room(s))",
        connection_id,
        left.len()
    );
}

/// Route one client message to its use case
async fn dispatch(state: &Arc<AppState>, connection_id: &ConnectionId, msg: ClientMessage) {
    match msg {
        ClientMessage::JoinDoc { doc_id } => {
            let document_id = DocumentId::new(doc_id);
            match state
                .join_document_usecase
                .execute(connection_id, &document_id)
                .await
            {
                Ok(count) => tracing::info!(
                    "Client '{}' joined '{}' ({} active)",
                    connection_id,
                    document_id,
                    count
                ),
                Err(e) => tracing::error!("{}", e),
            }
        }
        ClientMessage::SendChanges { doc_id, content } => {
            let document_id = DocumentId::new(doc_id);
            let targets = state
                .relay_edit_usecase
                .execute(connection_id, &document_id, DocumentContent::new(content))
                .await;
            tracing::debug!(
                "Relayed changes on '{}' from '{}' to {} client(s)",
                document_id,
                connection_id,
                targets.len()
            );
        }
        ClientMessage::SaveDoc { doc_id, content } => {
            // 保存は別タスクで実行し、同じ接続の後続イベントを待たせない
            let usecase = state.save_document_usecase.clone();
            let connection_id = connection_id.clone();
            tokio::spawn(async move {
                let document_id = DocumentId::new(doc_id);
                match usecase
                    .execute(&connection_id, &document_id, DocumentContent::new(content))
                    .await
                {
                    Ok(_) => tracing::debug!("Saved '{}'", document_id),
                    Err(e) => tracing::error!("{}", e),
                }
            });
        }
        ClientMessage::LeaveDoc { doc_id } => {
            let document_id = DocumentId::new(doc_id);
            if let Some(count) = state
                .leave_document_usecase
                .execute(connection_id, &document_id)
                .await
            {
                tracing::info!(
                    "Client '{}' left '{}' ({} active)",
                    connection_id,
                    document_id,
                    count
                );
            }
        }
    }
}
