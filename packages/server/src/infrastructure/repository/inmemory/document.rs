//! InMemory Document Store 実装
//!
//! プロセス内の HashMap に本文を保持する。`--in-memory` 起動時とテストで使用。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Document, DocumentContent, DocumentId, DocumentStore, StoreError};

#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<HashMap<DocumentId, DocumentContent>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されているドキュメント数
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().await;
        if documents.contains_key(id) {
            return Err(StoreError::AlreadyExists(id.as_str().to_string()));
        }
        documents.insert(id.clone(), content.clone());
        Ok(())
    }

    async fn upsert(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().await;
        documents.insert(id.clone(), content.clone());
        Ok(())
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        let documents = self.documents.lock().await;
        Ok(documents
            .get(id)
            .map(|content| Document::new(id.clone(), content.clone())))
    }

    async fn update(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().await;
        match documents.get_mut(id) {
            Some(existing) => {
                *existing = content.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(id.as_str().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str) -> DocumentId {
        DocumentId::from(id)
    }

    #[tokio::test]
    async fn test_upsert_then_get_returns_content() {
        // テスト項目: upsert した本文が get でそのまま返る
        // given (前提条件):
        let store = InMemoryDocumentStore::new();

        // when (操作):
        store
            .upsert(&doc("doc1"), &DocumentContent::from("hello"))
            .await
            .unwrap();
        let result = store.get(&doc("doc1")).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            result,
            Some(Document::new(doc("doc1"), DocumentContent::from("hello")))
        );
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing() {
        // テスト項目: 2 回目の upsert は上書きし、失敗しない
        // given (前提条件):
        let store = InMemoryDocumentStore::new();
        store
            .upsert(&doc("doc1"), &DocumentContent::from("v1"))
            .await
            .unwrap();

        // when (操作):
        let result = store.upsert(&doc("doc1"), &DocumentContent::from("v2")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let stored = store.get(&doc("doc1")).await.unwrap().unwrap();
        assert_eq!(stored.content.as_str(), "v2");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        // テスト項目: 存在しない ID の get はエラーではなく None
        // given (前提条件):
        let store = InMemoryDocumentStore::new();

        // when (操作):
        let result = store.get(&doc("missing")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        // テスト項目: 既存 ID への create は AlreadyExists
        // given (前提条件):
        let store = InMemoryDocumentStore::new();
        store
            .create(&doc("doc1"), &DocumentContent::empty())
            .await
            .unwrap();

        // when (操作):
        let result = store.create(&doc("doc1"), &DocumentContent::from("x")).await;

        // then (期待する結果):
        assert_eq!(result, Err(StoreError::AlreadyExists("doc1".to_string())));
        let stored = store.get(&doc("doc1")).await.unwrap().unwrap();
        assert_eq!(stored.content.as_str(), "");
    }

    #[tokio::test]
    async fn test_update_requires_existing_document() {
        // テスト項目: update は存在するドキュメントのみ上書きする
        // given (前提条件):
        let store = InMemoryDocumentStore::new();

        // when (操作):
        let missing = store.update(&doc("doc1"), &DocumentContent::from("x")).await;
        store
            .create(&doc("doc1"), &DocumentContent::empty())
            .await
            .unwrap();
        let existing = store.update(&doc("doc1"), &DocumentContent::from("y")).await;

        // then (期待する結果):
        assert_eq!(missing, Err(StoreError::NotFound("doc1".to_string())));
        assert!(existing.is_ok());
        let stored = store.get(&doc("doc1")).await.unwrap().unwrap();
        assert_eq!(stored.content.as_str(), "y");
    }
}
