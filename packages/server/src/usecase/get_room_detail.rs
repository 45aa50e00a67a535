//! UseCase: Room 詳細（現在のメンバー数）取得

use std::sync::Arc;

use crate::domain::{DocumentId, SessionRegistry};

pub struct GetRoomDetailUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 存在しない Room は 0 人として扱う
    pub async fn execute(&self, document_id: &DocumentId) -> usize {
        self.registry.member_count(document_id).await
    }
}
