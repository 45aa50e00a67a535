//! UseCase: ドキュメント保存（`save-doc`）
//!
//! upsert で永続化し、成功した場合のみ保存時刻を Room の全員にブロードキャストする。
//! 失敗はクライアントへは通知せず、呼び出し側がログに残すだけ（リトライしない）。
//!
//! 同じドキュメントへの保存が並行した場合、最後に完了した書き込みが残る。

use std::sync::Arc;

use tsuzuri_shared::time::Clock;

use crate::domain::{
    ConnectionId, DocumentContent, DocumentId, DocumentStore, MessagePusher, SessionRegistry,
    SyncEvent, Timestamp,
};

use super::error::SaveDocumentError;

pub struct SaveDocumentUseCase {
    registry: Arc<dyn SessionRegistry>,
    store: Arc<dyn DocumentStore>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SaveDocumentUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        store: Arc<dyn DocumentStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            store,
            message_pusher,
            clock,
        }
    }

    /// 保存を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 保存時刻（Room の全員に通知済み）
    /// * `Err(SaveDocumentError)` - 永続化に失敗（通知なし）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        document_id: &DocumentId,
        content: DocumentContent,
    ) -> Result<Timestamp, SaveDocumentError> {
        self.store
            .upsert(document_id, &content)
            .await
            .map_err(|e| SaveDocumentError::PersistFailed {
                document_id: document_id.as_str().to_string(),
                reason: e.to_string(),
            })?;

        let saved_at = Timestamp::new(self.clock.now_millis());
        tracing::debug!(
            "Document '{}' saved by '{}' at {}",
            document_id,
            connection_id,
            saved_at.value()
        );

        // 保存中に切断した接続は既に Room にいないので自然に宛先から外れる
        let members = self.registry.members(document_id).await;
        if let Err(e) = self
            .message_pusher
            .broadcast(members, &SyncEvent::DocumentSaved { saved_at })
            .await
        {
            tracing::warn!("Failed to broadcast save for '{}': {}", document_id, e);
        }

        Ok(saved_at)
    }
}
