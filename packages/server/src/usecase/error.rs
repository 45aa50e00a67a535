//! UseCase errors

use thiserror::Error;

/// ドキュメント取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchDocumentError {
    #[error("Document '{0}' not found")]
    NotFound(String),

    #[error("Failed to get document: {0}")]
    StoreUnavailable(String),
}

/// Room 参加時のエラー
///
/// メンバー登録と人数のブロードキャストは完了している。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinDocumentError {
    #[error("Failed to load document '{document_id}': {reason}")]
    LoadFailed { document_id: String, reason: String },
}

/// 保存時のエラー（ログにのみ使われ、クライアントには通知しない）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveDocumentError {
    #[error("Failed to persist document '{document_id}': {reason}")]
    PersistFailed { document_id: String, reason: String },
}
