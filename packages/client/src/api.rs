//! HTTP API access (`POST /create`, `GET /doc/{id}`).

use reqwest::StatusCode;

use tsuzuri_server::infrastructure::dto::http::{CreateDocumentResponse, DocumentDto};

use crate::error::ClientError;

/// Derive the WebSocket endpoint from the HTTP base URL of the server
///
/// `http://host:5000` → `ws://host:5000/ws`, `https://…` → `wss://…/ws`
pub fn ws_url_from_server(server: &str) -> String {
    let base = server.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };
    format!("{}/ws", base)
}

/// Client for the document HTTP API
#[derive(Debug, Clone)]
pub struct DocumentApi {
    http: reqwest::Client,
    base_url: String,
}

impl DocumentApi {
    pub fn new(server: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: server.trim_end_matches('/').to_string(),
        }
    }

    /// Ask the server to create a new document
    pub async fn create_document(&self) -> Result<CreateDocumentResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/create", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Create a document, falling back to a locally generated id when the server cannot be reached
    ///
    /// A locally generated id is still usable: the document comes into
    /// existence on its first successful save.
    pub async fn create_or_fallback(&self) -> String {
        match self.create_document().await {
            Ok(created) => {
                if let Some(warning) = created.warning {
                    tracing::warn!("Document '{}' created with warning: {}", created.id, warning);
                }
                created.id
            }
            Err(e) => {
                let id = uuid::Uuid::new_v4().to_string();
                tracing::warn!("{}. Using locally generated id '{}'", e, id);
                id
            }
        }
    }

    /// Fetch the saved content of a document (`None` if it has never been saved)
    pub async fn fetch_document(&self, id: &str) -> Result<Option<String>, ClientError> {
        let response = self
            .http
            .get(format!("{}/doc/{}", self.base_url, id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document: DocumentDto = response.error_for_status()?.json().await?;
        Ok(Some(document.content))
    }
}
