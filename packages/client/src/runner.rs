//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    api::{DocumentApi, ws_url_from_server},
    buffer::DocumentBuffer,
    error::ClientError,
};

use super::{
    formatter::MessageFormatter,
    session::{SessionContext, run_client_session},
    ui::spawn_readline,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP base URL of the server (e.g. `http://127.0.0.1:5000`)
    pub server: String,
    /// Document to open; a new one is created when `None`
    pub doc_id: Option<String>,
    /// Autosave period; `None` disables autosave
    pub autosave: Option<Duration>,
}

/// Check if the client should attempt to reconnect.
fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}

/// Run the document client with reconnection logic
pub async fn run_client(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api = DocumentApi::new(&config.server);

    let doc_id = match config.doc_id {
        Some(id) => id,
        None => api.create_or_fallback().await,
    };
    print!("{}", MessageFormatter::format_opened(&doc_id));

    let buffer = Arc::new(Mutex::new(DocumentBuffer::new()));
    match api.fetch_document(&doc_id).await {
        Ok(Some(content)) => buffer.lock().await.apply_remote(content),
        Ok(None) => tracing::debug!("Document '{}' has no saved content yet", doc_id),
        Err(e) => tracing::warn!("Failed to fetch document: {}", e),
    }

    let ctx = SessionContext {
        ws_url: ws_url_from_server(&config.server),
        doc_id,
        autosave: config.autosave,
        buffer,
    };
    let mut input_rx = spawn_readline(&ctx.doc_id);
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            ctx.ws_url,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&ctx, &mut input_rx).await {
            Ok(_) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    return Err(Box::new(ClientError::ReconnectExhausted(
                        MAX_RECONNECT_ATTEMPTS,
                    )));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
