//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 参加中の全ての Room からの削除と、残りのメンバーへの人数通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人の Room から 1 人が切断
//! - エッジケース：最後のメンバーの切断（通知対象なし、Room は消える）
//! - エッジケース：複数の Room に参加していた接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, DocumentId, MessagePusher, SessionRegistry};

use super::leave_document::notify_remaining;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    registry: Arc<dyn SessionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 抜けた Room と、その Room の残りメンバー数のリスト
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<(DocumentId, usize)> {
        let rooms = self.registry.leave_all(connection_id).await;

        let mut remaining = Vec::with_capacity(rooms.len());
        for room in rooms {
            let count = notify_remaining(&*self.registry, &*self.message_pusher, &room).await;
            remaining.push((room, count));
        }

        self.message_pusher.unregister_client(connection_id).await;
        remaining
    }
}
