//! 同期エンジンがクライアントへ送るイベント
//!
//! ワイヤーフォーマットへの変換は Infrastructure 層（DTO）が担当します。

use super::value_object::{DocumentContent, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// join した接続にだけ返す現在の本文
    DocumentLoaded { content: DocumentContent },
    /// Room の現在のメンバー数
    ActiveUsers { count: usize },
    /// 他のメンバーから中継された本文（全文スナップショット）
    ContentChanged { content: DocumentContent },
    /// 保存完了の通知
    DocumentSaved { saved_at: Timestamp },
}
