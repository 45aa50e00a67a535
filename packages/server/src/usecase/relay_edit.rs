//! UseCase: 編集の中継（`send-changes`）
//!
//! 送信者以外の Room メンバー全員に本文のスナップショットをそのまま中継する。
//! 永続化もマージも行わない。受信側では最後に届いたものが勝つ。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DocumentContent, DocumentId, MessagePusher, SessionRegistry, SyncEvent,
};

pub struct RelayEditUseCase {
    registry: Arc<dyn SessionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayEditUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 編集の中継を実行
    ///
    /// # Returns
    ///
    /// 中継先の接続 ID リスト（送信者は含まない。メンバーがいなければ空）
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        document_id: &DocumentId,
        content: DocumentContent,
    ) -> Vec<ConnectionId> {
        let targets = self.get_relay_targets(sender, document_id).await;
        if targets.is_empty() {
            return targets;
        }

        if let Err(e) = self
            .message_pusher
            .broadcast(targets.clone(), &SyncEvent::ContentChanged { content })
            .await
        {
            tracing::warn!("Failed to relay changes for '{}': {}", document_id, e);
        }
        targets
    }

    /// 送信者以外の全てのメンバーを返す
    async fn get_relay_targets(
        &self,
        exclude: &ConnectionId,
        document_id: &DocumentId,
    ) -> Vec<ConnectionId> {
        self.registry
            .members(document_id)
            .await
            .into_iter()
            .filter(|id| id != exclude)
            .collect()
    }
}
