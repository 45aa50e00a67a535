//! UseCase: ドキュメント取得（HTTP `GET /doc/{id}`）

use std::sync::Arc;

use crate::domain::{Document, DocumentId, DocumentStore};

use super::error::FetchDocumentError;

pub struct FetchDocumentUseCase {
    store: Arc<dyn DocumentStore>,
}

impl FetchDocumentUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, id: &DocumentId) -> Result<Document, FetchDocumentError> {
        self.store
            .get(id)
            .await
            .map_err(|e| FetchDocumentError::StoreUnavailable(e.to_string()))?
            .ok_or_else(|| FetchDocumentError::NotFound(id.as_str().to_string()))
    }
}
