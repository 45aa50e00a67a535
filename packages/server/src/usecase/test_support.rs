//! UseCase テスト用の共通ヘルパー

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{
        ConnectionId, Document, DocumentContent, DocumentId, DocumentStore, MessagePusher,
        StoreError,
    },
    infrastructure::{
        dto::websocket::ServerMessage, message_pusher::WebSocketMessagePusher,
        repository::InMemorySessionRegistry,
    },
};

mock! {
    pub Store {}

    #[async_trait]
    impl DocumentStore for Store {
        async fn create(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError>;
        async fn upsert(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError>;
        async fn get(&self, id: &DocumentId) -> Result<Option<Document>, StoreError>;
        async fn update(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError>;
    }
}

pub fn unavailable() -> StoreError {
    StoreError::Unavailable("database is locked".to_string())
}

pub fn create_test_registry() -> Arc<InMemorySessionRegistry> {
    Arc::new(InMemorySessionRegistry::new())
}

pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))))
}

/// クライアントを MessagePusher に登録し、受信側を返す
pub async fn connect(
    pusher: &WebSocketMessagePusher,
    id: &str,
) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = ConnectionId::from(id);
    pusher.register_client(connection_id.clone(), tx).await;
    (connection_id, rx)
}

/// これまでに受信したメッセージを全て取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(raw) = rx.try_recv() {
        messages.push(serde_json::from_str(&raw).expect("server message should be valid JSON"));
    }
    messages
}
