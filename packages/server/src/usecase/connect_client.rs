//! UseCase: クライアント接続処理
//!
//! WebSocket 接続ごとの送信チャンネルを MessagePusher に登録する。
//! Room への参加は `join-doc` イベントで別途行う。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
    }
}
