//! Server state.

use std::sync::Arc;

use tsuzuri_shared::time::Clock;

use crate::{
    domain::{DocumentStore, MessagePusher, SessionRegistry},
    usecase::{
        ConnectClientUseCase, CreateDocumentUseCase, DisconnectClientUseCase,
        FetchDocumentUseCase, GetRoomDetailUseCase, JoinDocumentUseCase, LeaveDocumentUseCase,
        RelayEditUseCase, SaveDocumentUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続の登録）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（切断時の全 Room からの退出）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// JoinDocumentUseCase（Room 参加）
    pub join_document_usecase: Arc<JoinDocumentUseCase>,
    /// LeaveDocumentUseCase（Room 退出）
    pub leave_document_usecase: Arc<LeaveDocumentUseCase>,
    /// RelayEditUseCase（編集の中継）
    pub relay_edit_usecase: Arc<RelayEditUseCase>,
    /// SaveDocumentUseCase（保存）
    pub save_document_usecase: Arc<SaveDocumentUseCase>,
    /// CreateDocumentUseCase（ドキュメント作成）
    pub create_document_usecase: Arc<CreateDocumentUseCase>,
    /// FetchDocumentUseCase（ドキュメント取得）
    pub fetch_document_usecase: Arc<FetchDocumentUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl AppState {
    /// Wire every use case from the injected registry, store, pusher and clock.
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        store: Arc<dyn DocumentStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            join_document_usecase: Arc::new(JoinDocumentUseCase::new(
                registry.clone(),
                store.clone(),
                message_pusher.clone(),
            )),
            leave_document_usecase: Arc::new(LeaveDocumentUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            relay_edit_usecase: Arc::new(RelayEditUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            save_document_usecase: Arc::new(SaveDocumentUseCase::new(
                registry.clone(),
                store.clone(),
                message_pusher,
                clock,
            )),
            create_document_usecase: Arc::new(CreateDocumentUseCase::new(store.clone())),
            fetch_document_usecase: Arc::new(FetchDocumentUseCase::new(store)),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(registry)),
        }
    }
}
