//! UseCase: Room からの退出（`leave-doc`）
//!
//! 接続は維持したまま 1 つの Room からだけ抜け、残りのメンバーに新しい人数を通知する。

use std::sync::Arc;

use crate::domain::{ConnectionId, DocumentId, MessagePusher, SessionRegistry, SyncEvent};

pub struct LeaveDocumentUseCase {
    registry: Arc<dyn SessionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveDocumentUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// # Returns
    ///
    /// * `Some(usize)` - 退出後の残りメンバー数
    /// * `None` - もともと参加していなかった（何もしない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        document_id: &DocumentId,
    ) -> Option<usize> {
        if !self.registry.leave(document_id, connection_id).await {
            return None;
        }
        Some(notify_remaining(&*self.registry, &*self.message_pusher, document_id).await)
    }
}

/// 残りのメンバーに現在の人数をブロードキャストし、その人数を返す
pub(super) async fn notify_remaining(
    registry: &dyn SessionRegistry,
    message_pusher: &dyn MessagePusher,
    document_id: &DocumentId,
) -> usize {
    let remaining = registry.members(document_id).await;
    let count = remaining.len();
    if count == 0 {
        return 0;
    }
    if let Err(e) = message_pusher
        .broadcast(remaining, &SyncEvent::ActiveUsers { count })
        .await
    {
        tracing::warn!("Failed to broadcast active users for '{}': {}", document_id, e);
    }
    count
}
