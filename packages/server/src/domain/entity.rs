//! Entities

use std::collections::HashSet;

use serde::Serialize;

use super::value_object::{ConnectionId, DocumentContent, DocumentId};

/// 永続化されたドキュメント
///
/// 履歴やメタデータは持たない。後からの書き込みが常に上書きする（last-writer-wins）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub content: DocumentContent,
}

impl Document {
    pub fn new(id: DocumentId, content: DocumentContent) -> Self {
        Self { id, content }
    }
}

/// Room（1 つのドキュメントを共同編集している接続の集合）
///
/// メンバーが 1 人以上いる間だけ存在する。空になった Room は
/// `SessionRegistry` から取り除かれ、明示的な破棄処理は持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: DocumentId,
    members: HashSet<ConnectionId>,
}

impl Room {
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            members: HashSet::new(),
        }
    }

    /// メンバーを追加する。既に参加済みなら集合は変わらず `false` を返す。
    pub fn join(&mut self, connection_id: ConnectionId) -> bool {
        self.members.insert(connection_id)
    }

    /// メンバーを削除する。参加していなければ `false` を返す。
    pub fn leave(&mut self, connection_id: &ConnectionId) -> bool {
        self.members.remove(connection_id)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members.contains(connection_id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// メンバー一覧（順序は不定）
    pub fn members(&self) -> Vec<ConnectionId> {
        self.members.iter().cloned().collect()
    }
}
