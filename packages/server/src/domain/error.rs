//! Domain errors

use thiserror::Error;

/// DocumentStore のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `create` で既に同じ ID のドキュメントが存在する
    #[error("Document '{0}' already exists")]
    AlreadyExists(String),

    /// `update` で対象のドキュメントが存在しない
    #[error("Document '{0}' not found")]
    NotFound(String),

    /// ストレージが利用できない（I/O エラー、ロック取得失敗など）
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
