//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - `SyncEvent` を JSON（`ServerMessage`）に変換してクライアントへ送信
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われ、
//! ここでは生成された sender を受け取って送信にだけ使用します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, SyncEvent},
    infrastructure::dto::websocket::ServerMessage,
};

fn encode(event: &SyncEvent) -> Result<String, MessagePushError> {
    serde_json::to_string(&ServerMessage::from(event))
        .map_err(|e| MessagePushError::PushFailed(e.to_string()))
}

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    /// 登録中のクライアント数
    #[cfg(test)]
    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &SyncEvent,
    ) -> Result<(), MessagePushError> {
        let payload = encode(event)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(payload)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &SyncEvent,
    ) -> Result<(), MessagePushError> {
        let payload = encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(payload.clone()) {
                        tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                    } else {
                        tracing::debug!("Broadcasted message to connection '{}'", target);
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentContent;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定の接続への送信（JSON 形式）
    // - broadcast: 複数接続への送信、一部の宛先が存在しない場合
    // ========================================

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    fn changed(content: &str) -> SyncEvent {
        SyncEvent::ContentChanged {
            content: DocumentContent::from(content),
        }
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続に JSON メッセージを送信できる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::from("alice");
        pusher.register_client(alice.clone(), tx).await;

        // when (操作):
        let result = pusher
            .push_to(&alice, &SyncEvent::ActiveUsers { count: 1 })
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.recv().await,
            Some(r#"{"type":"active-users","count":1}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 登録されていない接続への送信はエラーを返す
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();

        // when (操作):
        let result = pusher
            .push_to(&ConnectionId::from("nobody"), &changed("x"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound("nobody".to_string()))
        );
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 一部の宛先が存在しなくてもブロードキャストは成功する
        // given (前提条件):
        let (pusher, clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::from("alice");
        clients.lock().await.insert(alice.clone(), tx);

        // when (操作):
        let result = pusher
            .broadcast(vec![alice, ConnectionId::from("ghost")], &changed("hi"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.recv().await,
            Some(r#"{"type":"receive-changes","content":"hi"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_unregister_client() {
        // テスト項目: 登録解除したクライアントには送信されない
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, _rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::from("alice");
        pusher.register_client(alice.clone(), tx).await;

        // when (操作):
        pusher.unregister_client(&alice).await;

        // then (期待する結果):
        assert_eq!(pusher.client_count().await, 0);
        assert!(pusher.push_to(&alice, &changed("x")).await.is_err());
    }
}
