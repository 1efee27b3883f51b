//! Server state shared by every handler.

use std::{sync::Arc, time::Duration};

use duet_shared::time::Clock;

use crate::{
    domain::{
        CollaborationRequestRepository, IdentityVerifier, MessagePusher, MessageStore,
        PresenceRegistry, RoomRegistry, UserDirectory,
    },
    usecase::{
        BroadcastCanvasUseCase, ConnectClientUseCase, CreateCollaborationRequestUseCase,
        DisconnectClientUseCase, GetHistoryUseCase, JoinRoomUseCase, ListReceivedRequestsUseCase,
        RegisterPresenceUseCase, RespondCollaborationRequestUseCase, SendMessageUseCase,
    },
};

/// Collaborators the use cases are built from
pub struct Dependencies {
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pub message_store: Arc<dyn MessageStore>,
    pub collaboration_requests: Arc<dyn CollaborationRequestRepository>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub presence: Arc<dyn PresenceRegistry>,
    pub rooms: Arc<dyn RoomRegistry>,
    pub message_pusher: Arc<dyn MessagePusher>,
    pub clock: Arc<dyn Clock>,
    pub store_timeout: Duration,
}

/// Shared application state
pub struct AppState {
    /// IdentityVerifier（Bearer トークンの検証）
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub register_presence_usecase: Arc<RegisterPresenceUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub broadcast_canvas_usecase: Arc<BroadcastCanvasUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    pub create_collaboration_request_usecase: Arc<CreateCollaborationRequestUseCase>,
    pub list_received_requests_usecase: Arc<ListReceivedRequestsUseCase>,
    pub respond_collaboration_request_usecase: Arc<RespondCollaborationRequestUseCase>,
}

impl AppState {
    pub fn new(deps: Dependencies) -> Self {
        let Dependencies {
            identity_verifier,
            message_store,
            collaboration_requests,
            user_directory,
            presence,
            rooms,
            message_pusher,
            clock,
            store_timeout,
        } = deps;

        Self {
            identity_verifier,
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(
                message_pusher.clone(),
                clock.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                presence.clone(),
                rooms.clone(),
                message_pusher.clone(),
            )),
            register_presence_usecase: Arc::new(RegisterPresenceUseCase::new(presence.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(rooms.clone())),
            broadcast_canvas_usecase: Arc::new(BroadcastCanvasUseCase::new(
                rooms,
                message_pusher.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                message_store.clone(),
                presence,
                message_pusher,
                clock,
                store_timeout,
            )),
            get_history_usecase: Arc::new(GetHistoryUseCase::new(message_store, store_timeout)),
            create_collaboration_request_usecase: Arc::new(
                CreateCollaborationRequestUseCase::new(
                    collaboration_requests.clone(),
                    store_timeout,
                ),
            ),
            list_received_requests_usecase: Arc::new(ListReceivedRequestsUseCase::new(
                collaboration_requests.clone(),
                user_directory,
                store_timeout,
            )),
            respond_collaboration_request_usecase: Arc::new(
                RespondCollaborationRequestUseCase::new(collaboration_requests, store_timeout),
            ),
        }
    }
}
