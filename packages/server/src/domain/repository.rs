//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, Document, DocumentContent, DocumentId, StoreError};

/// Document Store trait
///
/// `(DocumentId → content)` の永続化。履歴は持たず、1 つの ID に対して
/// 保持される本文は常に 1 つだけ。
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 新規作成。既に存在する場合は `StoreError::AlreadyExists`
    async fn create(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError>;

    /// 存在しなければ作成、存在すれば上書き。重複キーで失敗しない
    async fn upsert(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError>;

    /// 取得。存在しない場合は `Ok(None)`（エラーではない）
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, StoreError>;

    /// 既存のドキュメントのみ上書き。存在しない場合は `StoreError::NotFound`
    async fn update(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError>;
}

/// Session Registry trait
///
/// Room（ドキュメント ID）ごとのメンバー接続を管理する。
/// Room は最初の join で作られ、メンバーが 0 になった時点で存在しないものとして扱う。
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Room に接続を追加。既に参加済みなら `false`（集合は変わらない）
    async fn join(&self, room_id: &DocumentId, connection_id: &ConnectionId) -> bool;

    /// 1 つの Room から接続を削除。参加していなければ `false`
    async fn leave(&self, room_id: &DocumentId, connection_id: &ConnectionId) -> bool;

    /// 接続を参加中の全 Room から削除し、抜けた Room の一覧を返す
    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<DocumentId>;

    /// Room の現在のメンバー（存在しない Room は空）
    async fn members(&self, room_id: &DocumentId) -> Vec<ConnectionId>;

    /// Room の現在のメンバー数（存在しない Room は 0）
    async fn member_count(&self, room_id: &DocumentId) -> usize;
}
