//! UseCase: ドキュメント作成
//!
//! ID を生成して空のドキュメントを upsert する。
//! 永続化に失敗しても ID は必ず返す（呼び出し側は警告付きで続行できる）。

use std::sync::Arc;

use crate::domain::{DocumentContent, DocumentId, DocumentIdFactory, DocumentStore, StoreError};

/// 作成結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedDocument {
    pub id: DocumentId,
    /// 永続化の結果。失敗していても `id` は利用できる
    pub persisted: Result<(), StoreError>,
}

impl CreatedDocument {
    pub fn is_persisted(&self) -> bool {
        self.persisted.is_ok()
    }
}

pub struct CreateDocumentUseCase {
    store: Arc<dyn DocumentStore>,
}

impl CreateDocumentUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> CreatedDocument {
        let id = DocumentIdFactory::generate();
        // create ではなく upsert: 重複キーで失敗させない
        let persisted = self.store.upsert(&id, &DocumentContent::empty()).await;
        CreatedDocument { id, persisted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure::repository::InMemoryDocumentStore,
        usecase::test_support::{MockStore, unavailable},
    };

    #[tokio::test]
    async fn test_create_document_persists_empty_content() {
        // テスト項目: 作成したドキュメントは空の本文で保存される
        // given (前提条件):
        let store = Arc::new(InMemoryDocumentStore::new());
        let usecase = CreateDocumentUseCase::new(store.clone());

        // when (操作):
        let created = usecase.execute().await;

        // then (期待する結果):
        assert!(created.is_persisted());
        let stored = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.content.as_str(), "");
    }

    #[tokio::test]
    async fn test_create_document_returns_id_when_store_unavailable() {
        // テスト項目: ストアが使えなくても ID は返り、失敗が結果に含まれる
        // given (前提条件):
        let mut store = MockStore::new();
        store
            .expect_upsert()
            .times(1)
            .returning(|_, _| Err(unavailable()));
        let usecase = CreateDocumentUseCase::new(Arc::new(store));

        // when (操作):
        let created = usecase.execute().await;

        // then (期待する結果):
        assert!(!created.is_persisted());
        assert!(!created.id.as_str().is_empty());
    }

    #[tokio::test]
    async fn test_create_document_generates_distinct_ids() {
        // テスト項目: 作成のたびに異なる ID が払い出される
        // given (前提条件):
        let usecase = CreateDocumentUseCase::new(Arc::new(InMemoryDocumentStore::new()));

        // when (操作):
        let first = usecase.execute().await;
        let second = usecase.execute().await;

        // then (期待する結果):
        assert_ne!(first.id, second.id);
    }
}
