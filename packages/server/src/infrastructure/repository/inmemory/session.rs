//! InMemory Session Registry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! `DocumentId → Room` の HashMap をプロセス内で保持します。
//!
//! Room は最初の join で遅延生成し、メンバーが 0 になったら map から取り除きます。
//! 存在しない Room への操作は全て安全な no-op です。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, DocumentId, Room, SessionRegistry};

/// インメモリ Session Registry 実装
#[derive(Default)]
pub struct InMemorySessionRegistry {
    /// Room ID → Room（空の Room は保持しない）
    rooms: Mutex<HashMap<DocumentId, Room>>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在存在する（メンバーが 1 人以上いる）Room の数
    #[cfg(test)]
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn join(&self, room_id: &DocumentId, connection_id: &ConnectionId) -> bool {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone()));
        let joined = room.join(connection_id.clone());
        tracing::debug!(
            "Connection '{}' joined room '{}' (members: {})",
            connection_id,
            room_id,
            room.member_count()
        );
        joined
    }

    async fn leave(&self, room_id: &DocumentId, connection_id: &ConnectionId) -> bool {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get_mut(room_id) else {
            return false;
        };
        let removed = room.leave(connection_id);
        if room.is_empty() {
            rooms.remove(room_id);
            tracing::debug!("Room '{}' is now empty", room_id);
        }
        removed
    }

    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<DocumentId> {
        let mut rooms = self.rooms.lock().await;
        let mut left: Vec<DocumentId> = rooms
            .values_mut()
            .filter_map(|room| room.leave(connection_id).then(|| room.id.clone()))
            .collect();
        rooms.retain(|_, room| !room.is_empty());
        left.sort();
        left
    }

    async fn members(&self, room_id: &DocumentId) -> Vec<ConnectionId> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(Room::members).unwrap_or_default()
    }

    async fn member_count(&self, room_id: &DocumentId) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(Room::member_count).unwrap_or(0)
    }
}
