//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, SyncEvent};

/// クライアントごとの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定のクライアントにイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &SyncEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントにイベントを送信
    ///
    /// 一部の宛先への送信失敗は許容する（ログのみ）。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &SyncEvent,
    ) -> Result<(), MessagePushError>;
}
