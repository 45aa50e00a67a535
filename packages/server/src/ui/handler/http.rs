//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::DocumentId,
    infrastructure::dto::http::{
        CreateDocumentResponse, DocumentDto, ErrorResponse, PERSIST_FAILED_WARNING,
        RoomDetailDto,
    },
    ui::state::AppState,
    usecase::FetchDocumentError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a new empty document
///
/// The id is returned even when persistence fails; the response is then
/// `200` with a `persist_failed` warning instead of `201`.
pub async fn create_document(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<CreateDocumentResponse>) {
    let created = state.create_document_usecase.execute().await;
    let id = created.id.as_str().to_string();

    match created.persisted {
        Ok(()) => {
            tracing::info!("Created document '{}'", id);
            (
                StatusCode::CREATED,
                Json(CreateDocumentResponse { id, warning: None }),
            )
        }
        Err(e) => {
            tracing::error!("Failed to persist new document '{}': {}", id, e);
            (
                StatusCode::OK,
                Json(CreateDocumentResponse {
                    id,
                    warning: Some(PERSIST_FAILED_WARNING.to_string()),
                }),
            )
        }
    }
}

/// Get a document by ID
pub async fn fetch_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DocumentDto>, (StatusCode, Json<ErrorResponse>)> {
    let document_id = DocumentId::new(id);

    match state.fetch_document_usecase.execute(&document_id).await {
        // Domain Model から DTO への変換
        Ok(document) => Ok(Json(DocumentDto::from(document))),
        Err(FetchDocumentError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Document not found")),
        )),
        Err(e @ FetchDocumentError::StoreUnavailable(_)) => {
            tracing::error!("{}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to get document")),
            ))
        }
    }
}

/// Get the number of active users in a document room
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Json<RoomDetailDto> {
    let document_id = DocumentId::new(document_id);
    let active_users = state.get_room_detail_usecase.execute(&document_id).await;

    Json(RoomDetailDto {
        document_id: document_id.into_string(),
        active_users,
    })
}
