//! WebSocket client session management.

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::{
    net::TcpStream,
    sync::{Mutex, mpsc},
    time::{Instant, Interval, MissedTickBehavior},
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use tsuzuri_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};

use crate::{
    buffer::{DocumentBuffer, InputCommand},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Everything a session needs, shared across reconnects
pub struct SessionContext {
    pub ws_url: String,
    pub doc_id: String,
    /// `None` disables autosave
    pub autosave: Option<Duration>,
    pub buffer: Arc<Mutex<DocumentBuffer>>,
}

/// Run one WebSocket session until the user quits or the connection drops
///
/// Returns `Ok(())` when the user quits.
pub async fn run_client_session(
    ctx: &SessionContext,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (ws_stream, _response) = connect_async(ctx.ws_url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to document server!");

    let (mut write, mut read) = ws_stream.split();

    send(
        &mut write,
        &ClientMessage::JoinDoc {
            doc_id: ctx.doc_id.clone(),
        },
    )
    .await?;

    // Signals that unsaved local edits survived a load-doc and must be pushed
    let (resync_tx, mut resync_rx) = mpsc::unbounded_channel::<()>();

    // Spawn a task to handle incoming messages
    let buffer = ctx.buffer.clone();
    let doc_id = ctx.doc_id.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(msg) => {
                            let applied = apply_server_message(&buffer, msg).await;
                            if applied.resync {
                                resync_tx.send(()).ok();
                            }
                            applied.display
                        }
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&doc_id);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    let mut autosave = ctx.autosave.map(autosave_interval);

    let result = loop {
        tokio::select! {
            _ = &mut read_task => {
                break Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
            line = input_rx.recv() => {
                // Input closed (Ctrl+C / Ctrl+D)
                let Some(line) = line else {
                    break Ok(());
                };
                match handle_input(ctx, &mut write, InputCommand::parse(&line)).await {
                    Ok(true) => {}
                    Ok(false) => break Ok(()),
                    Err(e) => break Err(e),
                }
                redisplay_prompt(&ctx.doc_id);
            }
            Some(()) = resync_rx.recv() => {
                let content = ctx.buffer.lock().await.force_save();
                tracing::info!("Pushing unsaved local edits to '{}'", ctx.doc_id);
                if let Err(e) = send(&mut write, &changes_message(ctx, content.clone())).await {
                    break Err(e);
                }
                if let Err(e) = send(&mut write, &save_message(ctx, content)).await {
                    break Err(e);
                }
            }
            _ = next_autosave(&mut autosave) => {
                let pending = ctx.buffer.lock().await.take_save();
                if let Some(content) = pending {
                    tracing::debug!("Autosaving '{}'", ctx.doc_id);
                    if let Err(e) = send(&mut write, &save_message(ctx, content)).await {
                        break Err(e);
                    }
                }
            }
        }
    };

    read_task.abort();
    if result.is_ok() {
        // Save what is left before leaving
        let pending = ctx.buffer.lock().await.take_save();
        if let Some(content) = pending {
            send(&mut write, &save_message(ctx, content)).await.ok();
        }
        write.close().await.ok();
    }

    result.map_err(Into::into)
}

/// Outcome of applying one server message
struct Applied {
    /// Text to print
    display: String,
    /// Local edits were kept over a load-doc and must be sent to the room
    resync: bool,
}

impl Applied {
    fn show(display: String) -> Self {
        Self {
            display,
            resync: false,
        }
    }
}

/// Update the buffer from a server message
async fn apply_server_message(buffer: &Mutex<DocumentBuffer>, msg: ServerMessage) -> Applied {
    match msg {
        ServerMessage::LoadDoc { content } => {
            let mut buffer = buffer.lock().await;
            if buffer.apply_loaded(content) {
                return Applied {
                    display: MessageFormatter::format_kept_local_edits(),
                    resync: true,
                };
            }
            Applied::show(MessageFormatter::format_loaded(buffer.content()))
        }
        ServerMessage::ActiveUsers { count } => {
            Applied::show(MessageFormatter::format_active_users(count))
        }
        ServerMessage::ReceiveChanges { content } => {
            let formatted = MessageFormatter::format_remote_changes(&content);
            buffer.lock().await.apply_remote(content);
            Applied::show(formatted)
        }
        ServerMessage::DocSaved { saved_at } => {
            Applied::show(MessageFormatter::format_saved(&saved_at))
        }
    }
}

/// Handle one input line. Returns `Ok(false)` when the user asked to quit.
async fn handle_input(
    ctx: &SessionContext,
    write: &mut WsSink,
    command: InputCommand,
) -> Result<bool, ClientError> {
    match command {
        InputCommand::Text(line) => {
            let content = ctx.buffer.lock().await.append_line(&line).to_string();
            send(write, &changes_message(ctx, content)).await?;
        }
        InputCommand::Clear => {
            let content = ctx.buffer.lock().await.clear().to_string();
            send(write, &changes_message(ctx, content)).await?;
        }
        InputCommand::Save => {
            let content = ctx.buffer.lock().await.force_save();
            send(write, &save_message(ctx, content)).await?;
        }
        InputCommand::Show => {
            let buffer = ctx.buffer.lock().await;
            println!("{}", MessageFormatter::format_document(buffer.content()));
        }
        InputCommand::Stats => {
            let buffer = ctx.buffer.lock().await;
            print!(
                "{}",
                MessageFormatter::format_stats(buffer.word_count(), buffer.char_count())
            );
        }
        InputCommand::Export => {
            let content = ctx.buffer.lock().await.content().to_string();
            let path = format!("{}.txt", ctx.doc_id);
            match tokio::fs::write(&path, content).await {
                Ok(()) => println!("Exported to {}", path),
                Err(e) => tracing::error!("Failed to export to {}: {}", path, e),
            }
        }
        InputCommand::Help => print!("{}", MessageFormatter::format_help()),
        InputCommand::Quit => return Ok(false),
        InputCommand::Unknown(cmd) => println!("Unknown command: {} (try /help)", cmd),
    }
    Ok(true)
}

fn changes_message(ctx: &SessionContext, content: String) -> ClientMessage {
    ClientMessage::SendChanges {
        doc_id: ctx.doc_id.clone(),
        content,
    }
}

fn save_message(ctx: &SessionContext, content: String) -> ClientMessage {
    ClientMessage::SaveDoc {
        doc_id: ctx.doc_id.clone(),
        content,
    }
}

async fn send(write: &mut WsSink, msg: &ClientMessage) -> Result<(), ClientError> {
    let json =
        serde_json::to_string(msg).map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

fn autosave_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_autosave(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
