//! Realtime synchronization over WebSocket.

mod common;

use std::{sync::Arc, time::Duration};

use common::{TestClient, TestServer};
use tsuzuri_server::{
    domain::{DocumentId, DocumentStore},
    infrastructure::{
        dto::{
            http::RoomDetailDto,
            websocket::{ClientMessage, ServerMessage},
        },
        repository::InMemoryDocumentStore,
    },
};

#[tokio::test]
async fn test_two_clients_edit_save_and_disconnect() {
    // テスト項目: 2 クライアントでの参加・編集・保存・切断の一連の流れ
    // given (前提条件):
    let store = Arc::new(InMemoryDocumentStore::new());
    let server = TestServer::start(store.clone()).await;
    let mut client1 = TestClient::connect(&server).await;
    let mut client2 = TestClient::connect(&server).await;

    // when (操作): 1 人目が参加
    client1.join("doc1").await;

    // then (期待する結果): 空の本文と人数 1
    assert_eq!(
        client1.recv().await,
        ServerMessage::LoadDoc {
            content: String::new()
        }
    );
    assert_eq!(client1.recv().await, ServerMessage::ActiveUsers { count: 1 });

    // when (操作): 2 人目が参加
    client2.join("doc1").await;

    // then (期待する結果): 両者に人数 2
    assert_eq!(
        client2.recv().await,
        ServerMessage::LoadDoc {
            content: String::new()
        }
    );
    assert_eq!(client2.recv().await, ServerMessage::ActiveUsers { count: 2 });
    assert_eq!(client1.recv().await, ServerMessage::ActiveUsers { count: 2 });

    // when (操作): 1 人目が編集
    client1
        .send(&ClientMessage::SendChanges {
            doc_id: "doc1".to_string(),
            content: "hello".to_string(),
        })
        .await;

    // then (期待する結果): 2 人目にだけ中継される
    assert_eq!(
        client2.recv().await,
        ServerMessage::ReceiveChanges {
            content: "hello".to_string()
        }
    );
    client1.expect_silence().await;

    // when (操作): 2 人目が保存
    client2
        .send(&ClientMessage::SaveDoc {
            doc_id: "doc1".to_string(),
            content: "hello".to_string(),
        })
        .await;

    // then (期待する結果): 両者に保存通知、ストアに本文が入る
    let saved = ServerMessage::DocSaved {
        saved_at: "2024-01-01T00:00:00.000Z".to_string(),
    };
    assert_eq!(client1.recv().await, saved);
    assert_eq!(client2.recv().await, saved);
    let document = store
        .get(&DocumentId::from("doc1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(document.content.as_str(), "hello");

    // when (操作): 2 人目が切断
    client2.close().await;

    // then (期待する結果): 残った 1 人目に人数 1
    assert_eq!(client1.recv().await, ServerMessage::ActiveUsers { count: 1 });
}

#[tokio::test]
async fn test_join_loads_saved_content() {
    // テスト項目: 保存済みのドキュメントに参加すると本文が返る
    // given (前提条件):
    let store = Arc::new(InMemoryDocumentStore::new());
    let server = TestServer::start(store).await;
    let mut writer = TestClient::connect(&server).await;
    writer.join("doc1").await;
    writer.recv().await;
    writer.recv().await;
    writer
        .send(&ClientMessage::SaveDoc {
            doc_id: "doc1".to_string(),
            content: "# Title".to_string(),
        })
        .await;
    writer.recv().await;

    // when (操作):
    let mut reader = TestClient::connect(&server).await;
    reader.join("doc1").await;

    // then (期待する結果):
    assert_eq!(
        reader.recv().await,
        ServerMessage::LoadDoc {
            content: "# Title".to_string()
        }
    );
    assert_eq!(reader.recv().await, ServerMessage::ActiveUsers { count: 2 });
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    // テスト項目: 別のドキュメントの Room には編集が届かない
    // given (前提条件):
    let server = TestServer::start(Arc::new(InMemoryDocumentStore::new())).await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;
    alice.join("doc1").await;
    alice.recv().await;
    alice.recv().await;
    bob.join("doc2").await;
    bob.recv().await;
    assert_eq!(bob.recv().await, ServerMessage::ActiveUsers { count: 1 });

    // when (操作):
    alice
        .send(&ClientMessage::SendChanges {
            doc_id: "doc1".to_string(),
            content: "only doc1".to_string(),
        })
        .await;

    // then (期待する結果):
    bob.expect_silence().await;
}

#[tokio::test]
async fn test_leave_doc_notifies_remaining_members() {
    // テスト項目: leave-doc で Room を抜けると残りのメンバーに人数が通知される
    // given (前提条件):
    let server = TestServer::start(Arc::new(InMemoryDocumentStore::new())).await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;
    alice.join("doc1").await;
    alice.recv().await;
    alice.recv().await;
    bob.join("doc1").await;
    bob.recv().await;
    bob.recv().await;
    alice.recv().await;

    // when (操作):
    bob.send(&ClientMessage::LeaveDoc {
        doc_id: "doc1".to_string(),
    })
    .await;

    // then (期待する結果):
    assert_eq!(alice.recv().await, ServerMessage::ActiveUsers { count: 1 });
    bob.expect_silence().await;
}

#[tokio::test]
async fn test_unparseable_frame_keeps_connection_open() {
    // テスト項目: 解釈できないメッセージは無視され、接続は維持される
    // given (前提条件):
    let server = TestServer::start(Arc::new(InMemoryDocumentStore::new())).await;
    let mut client = TestClient::connect(&server).await;

    // when (操作):
    client.send_raw(r#"{"type":"unknown"}"#).await;
    client.join("doc1").await;

    // then (期待する結果):
    assert_eq!(
        client.recv().await,
        ServerMessage::LoadDoc {
            content: String::new()
        }
    );
}

#[tokio::test]
async fn test_disconnect_right_after_join_leaves_no_member() {
    // テスト項目: join 直後に切断しても Room にメンバーが残らない
    // given (前提条件):
    let server = TestServer::start(Arc::new(InMemoryDocumentStore::new())).await;
    let mut client = TestClient::connect(&server).await;

    // when (操作):
    client.join("doc1").await;
    client.close().await;

    // then (期待する結果):
    let mut active_users = None;
    for _ in 0..20 {
        let detail: RoomDetailDto = reqwest::get(server.http_url("/api/rooms/doc1"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        active_users = Some(detail.active_users);
        if detail.active_users == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(active_users, Some(0));
}
