//! UseCase: Room 参加（`join-doc`）
//!
//! 1. Room にメンバー登録（同じ接続の再 join は集合を変えない）
//! 2. ドキュメントを読み込み、参加した接続にだけ本文を返す（未保存なら空文字列）
//! 3. 更新後のメンバー数を参加者自身を含む全員にブロードキャスト
//!
//! 読み込みと人数のブロードキャストは join の呼び出しごとに必ず行う。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DocumentId, DocumentStore, MessagePusher, SessionRegistry, SyncEvent,
};

use super::error::JoinDocumentError;

pub struct JoinDocumentUseCase {
    registry: Arc<dyn SessionRegistry>,
    store: Arc<dyn DocumentStore>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinDocumentUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        store: Arc<dyn DocumentStore>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            store,
            message_pusher,
        }
    }

    /// Room 参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 参加後のメンバー数
    /// * `Err(JoinDocumentError)` - 本文の読み込みに失敗（メンバー登録と人数通知は完了済み）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        document_id: &DocumentId,
    ) -> Result<usize, JoinDocumentError> {
        // 1. メンバー登録
        self.registry.join(document_id, connection_id).await;

        // 2. 本文を読み込んで参加者にだけ返す
        let load_result = match self.store.get(document_id).await {
            Ok(document) => {
                let content = document.map(|d| d.content).unwrap_or_default();
                if let Err(e) = self
                    .message_pusher
                    .push_to(connection_id, &SyncEvent::DocumentLoaded { content })
                    .await
                {
                    tracing::warn!("Failed to send content to '{}': {}", connection_id, e);
                }
                Ok(())
            }
            Err(e) => Err(JoinDocumentError::LoadFailed {
                document_id: document_id.as_str().to_string(),
                reason: e.to_string(),
            }),
        };

        // 3. メンバー数を全員にブロードキャスト
        let members = self.registry.members(document_id).await;
        let count = members.len();
        if let Err(e) = self
            .message_pusher
            .broadcast(members, &SyncEvent::ActiveUsers { count })
            .await
        {
            tracing::warn!("Failed to broadcast active users for '{}': {}", document_id, e);
        }

        load_result.map(|_| count)
    }
}
