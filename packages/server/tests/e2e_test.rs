//! End-to-end tests: the real router on an ephemeral port, driven over
//! WebSocket and HTTP.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use duet_server::{
    domain::{PresenceRegistry, UserId, UserProfile},
    infrastructure::{
        identity::{Claims, JwtIdentityVerifier},
        message_pusher::WebSocketMessagePusher,
        registry::{InMemoryPresenceRegistry, InMemoryRoomRegistry},
        repository::{
            InMemoryCollaborationRequestRepository, InMemoryMessageStore, InMemoryUserDirectory,
        },
    },
    ui::{AppState, Dependencies, Server},
};
use duet_shared::time::{SystemClock, get_timestamp};
use futures_util::{SinkExt, StreamExt};
use jsonwebtoken::{EncodingKey, Header, encode};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const SECRET: &str = "e2e-secret";

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Helper struct to manage an in-process server
struct TestServer {
    addr: SocketAddr,
    presence: Arc<InMemoryPresenceRegistry>,
    rooms: Arc<InMemoryRoomRegistry>,
    handle: JoinHandle<()>,
    http: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        let alice = UserProfile {
            id: UserId::new("alice".to_string()).unwrap(),
            display_name: "Alice".to_string(),
            handle: "alice".to_string(),
            avatar_url: Some("https://example.com/alice.png".to_string()),
        };
        let presence = Arc::new(InMemoryPresenceRegistry::new());
        let rooms = Arc::new(InMemoryRoomRegistry::new());
        let state = AppState::new(Dependencies {
            identity_verifier: Arc::new(JwtIdentityVerifier::new(SECRET)),
            message_store: Arc::new(InMemoryMessageStore::new()),
            collaboration_requests: Arc::new(InMemoryCollaborationRequestRepository::new()),
            user_directory: Arc::new(InMemoryUserDirectory::with_profiles([alice])),
            presence: presence.clone(),
            rooms: rooms.clone(),
            message_pusher: Arc::new(WebSocketMessagePusher::new()),
            clock: Arc::new(SystemClock),
            store_timeout: Duration::from_secs(1),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let _ = Server::new(state)
                .serve(listener, std::future::pending())
                .await;
        });

        TestServer {
            addr,
            presence,
            rooms,
            handle,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn connect(&self) -> Socket {
        let (socket, _) = connect_async(format!("ws://{}/ws", self.addr))
            .await
            .expect("Failed to connect");
        socket
    }

    async fn post(&self, user: &str, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token(user))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn get(&self, user: &str, path: &str) -> (StatusCode, Value) {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token(user))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn token(user: &str) -> String {
    let claims = Claims {
        id: user.to_string(),
        exp: (get_timestamp() / 1000) as u64 + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn send(socket: &mut Socket, event: Value) {
    socket
        .send(Message::Text(event.to_string().into()))
        .await
        .unwrap();
}

/// Waits for the next text frame as JSON
async fn next_event(socket: &mut Socket) -> Value {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            match socket.next().await {
                Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
                Some(Ok(_)) => continue,
                other => panic!("Socket ended unexpectedly: {:?}", other),
            }
        }
    })
    .await
    .expect("Timed out waiting for an event")
}

/// Asserts that no text frame arrives for a short while
async fn expect_silence(socket: &mut Socket) {
    let result = tokio::time::timeout(Duration::from_millis(200), socket.next()).await;
    assert!(result.is_err(), "Unexpected frame: {:?}", result);
}

/// Sends an unknown event and waits for its error reply. Events on one
/// connection are handled in order, so everything sent before is done.
async fn barrier(socket: &mut Socket) {
    send(socket, json!({"event": "ping"})).await;
    let reply = next_event(socket).await;
    assert_eq!(reply["event"], "error");
}

#[tokio::test]
async fn test_collaboration_handshake_then_room_scoped_canvas() {
    // テスト項目: リクエスト作成 → 一覧 → 承認 → 同じ Room に参加 → Room 内だけに配信
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作): alice が bob にリクエストを送る
    let (status, created) = server
        .post("alice", "/api/collaborate/request", json!({"targetUserId": "bob"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["message"], "Collaboration request sent successfully");
    let room = created["roomId"].as_str().unwrap().to_string();
    let request_id = created["requestId"].as_str().unwrap().to_string();
    assert!(room.starts_with("collab_"));

    // then (期待する結果): bob の一覧に 1 件、Room トークンは含まれない
    let (status, received) = server.get("bob", "/api/collaborate/received").await;
    assert_eq!(status, StatusCode::OK);
    let requests = received["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["id"], request_id.as_str());
    assert_eq!(requests[0]["status"], "pending");
    assert_eq!(requests[0]["sender"]["id"], "alice");
    assert_eq!(requests[0]["sender"]["displayName"], "Alice");
    assert!(!requests[0].to_string().contains(&room));

    // when (操作): bob が承認する
    let (status, accepted) = server
        .post("bob", "/api/collaborate/accept", json!({"requestId": request_id}))
        .await;

    // then (期待する結果): 作成時と同じ Room トークン
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["message"], "Collaboration request accepted");
    assert_eq!(accepted["roomId"], room.as_str());

    // when (操作): 2 人が Room に参加し、alice がキャンバスを更新
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    let mut outsider = server.connect().await;
    send(&mut a, json!({"event": "joinRoom", "data": room})).await;
    send(&mut b, json!({"event": "joinRoom", "data": room})).await;
    barrier(&mut a).await;
    barrier(&mut b).await;
    barrier(&mut outsider).await;
    send(
        &mut a,
        json!({"event": "canvasUpdate", "data": {"roomId": room, "lines": [[1, 2], [3, 4]]}}),
    )
    .await;

    // then (期待する結果): bob だけが受け取る
    assert_eq!(
        next_event(&mut b).await,
        json!({"event": "canvasUpdate", "data": {"lines": [[1, 2], [3, 4]]}})
    );
    expect_silence(&mut a).await;
    expect_silence(&mut outsider).await;
}

#[tokio::test]
async fn test_direct_message_to_registered_user() {
    // テスト項目: 登録済みの alice に bob が送ると、receiveMessage と messageSent が同じ内容になる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    send(&mut alice, json!({"event": "register", "data": "alice"})).await;
    barrier(&mut alice).await;
    let sent_at = get_timestamp();

    // when (操作):
    send(
        &mut bob,
        json!({"event": "sendMessage", "data": {"from": "bob", "to": "alice", "text": "hi"}}),
    )
    .await;

    // then (期待する結果):
    let ack = next_event(&mut bob).await;
    let delivered = next_event(&mut alice).await;
    assert_eq!(ack["event"], "messageSent");
    assert_eq!(delivered["event"], "receiveMessage");
    assert_eq!(ack["data"], delivered["data"]);
    assert_eq!(delivered["data"]["text"], "hi");
    assert_eq!(delivered["data"]["from"], "bob");
    assert!(delivered["data"]["timestamp"].as_i64().unwrap() >= sent_at);

    let (status, history) = server.get("alice", "/api/messages/bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["chatHistory"], json!([ack["data"].clone()]));
}

#[tokio::test]
async fn test_http_send_pushes_to_online_contact() {
    // テスト項目: HTTP で送ったメッセージは 201 で返り、オンラインの相手に push される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut bob = server.connect().await;
    send(&mut bob, json!({"event": "register", "data": "bob"})).await;
    barrier(&mut bob).await;

    // when (操作):
    let (status, body) = server
        .post("alice", "/api/messages/bob", json!({"message": "hello"}))
        .await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Message sent");
    let pushed = next_event(&mut bob).await;
    assert_eq!(pushed["event"], "receiveMessage");
    assert_eq!(pushed["data"], body["messageData"]);
}

#[tokio::test]
async fn test_http_send_rejects_empty_text() {
    // テスト項目: HTTP 経路の空メッセージは 400
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (empty_status, empty) = server
        .post("alice", "/api/messages/bob", json!({"message": ""}))
        .await;
    let (missing_status, _) = server.post("alice", "/api/messages/bob", json!({})).await;

    // then (期待する結果):
    assert_eq!(empty_status, StatusCode::BAD_REQUEST);
    assert!(empty["error"].is_string());
    assert_eq!(missing_status, StatusCode::BAD_REQUEST);
    let (_, history) = server.get("alice", "/api/messages/bob").await;
    assert_eq!(history["chatHistory"], json!([]));
}

#[tokio::test]
async fn test_workflow_precondition_errors() {
    // テスト項目: 自分宛て・重複は 400、受信者以外は 403、解決済みは 400、不明な ID は 404
    // given (前提条件):
    let server = TestServer::start().await;
    let (_, created) = server
        .post("alice", "/api/collaborate/request", json!({"targetUserId": "bob"}))
        .await;
    let request_id = created["requestId"].as_str().unwrap().to_string();

    // when (操作):
    let (self_status, self_body) = server
        .post("alice", "/api/collaborate/request", json!({"targetUserId": "alice"}))
        .await;
    let (dup_status, dup_body) = server
        .post("alice", "/api/collaborate/request", json!({"targetUserId": "bob"}))
        .await;
    let (forbidden_status, _) = server
        .post("carol", "/api/collaborate/accept", json!({"requestId": request_id}))
        .await;
    let (reject_status, rejected) = server
        .post("bob", "/api/collaborate/reject", json!({"requestId": request_id}))
        .await;
    let (again_status, _) = server
        .post("bob", "/api/collaborate/accept", json!({"requestId": request_id}))
        .await;
    let (missing_status, _) = server
        .post("bob", "/api/collaborate/accept", json!({"requestId": "no-such-request"}))
        .await;
    let (retry_status, _) = server
        .post("alice", "/api/collaborate/request", json!({"targetUserId": "bob"}))
        .await;

    // then (期待する結果):
    assert_eq!(self_status, StatusCode::BAD_REQUEST);
    assert_eq!(
        self_body["error"],
        "Cannot send collaboration request to yourself"
    );
    assert_eq!(dup_status, StatusCode::BAD_REQUEST);
    assert_eq!(dup_body["error"], "Collaboration request already sent");
    assert_eq!(forbidden_status, StatusCode::FORBIDDEN);
    assert_eq!(reject_status, StatusCode::OK);
    assert_eq!(rejected["request"]["status"], "rejected");
    assert_eq!(again_status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(retry_status, StatusCode::OK);
}

#[tokio::test]
async fn test_new_request_allowed_after_acceptance() {
    // テスト項目: 承認後は同じ組み合わせで再びリクエストを作成できる
    // given (前提条件):
    let server = TestServer::start().await;
    let (_, created) = server
        .post("alice", "/api/collaborate/request", json!({"targetUserId": "bob"}))
        .await;
    let (accept_status, _) = server
        .post(
            "bob",
            "/api/collaborate/accept",
            json!({"requestId": created["requestId"]}),
        )
        .await;

    // when (操作):
    let (status, again) = server
        .post("alice", "/api/collaborate/request", json!({"targetUserId": "bob"}))
        .await;

    // then (期待する結果):
    assert_eq!(accept_status, StatusCode::OK);
    assert_eq!(status, StatusCode::OK);
    assert_ne!(again["roomId"], created["roomId"]);
}

#[tokio::test]
async fn test_requests_without_valid_token_are_unauthorized() {
    // テスト項目: トークンなし・不正なトークンは 401
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let missing = server
        .http
        .get(server.url("/api/collaborate/received"))
        .send()
        .await
        .unwrap();
    let forged = server
        .http
        .get(server.url("/api/messages/bob"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
    let body: Value = forged.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() {
    // テスト項目: JSON として不正なボディは 400
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = server
        .http
        .post(server.url("/api/collaborate/request"))
        .bearer_auth(token("alice"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_canvas_without_room_reaches_every_other_connection() {
    // テスト項目: roomId なしの canvasUpdate は送信者以外の全接続に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    let mut c = server.connect().await;
    barrier(&mut a).await;
    barrier(&mut b).await;
    barrier(&mut c).await;

    // when (操作):
    send(
        &mut a,
        json!({"event": "canvasUpdate", "data": {"roomId": "", "lines": ["x"]}}),
    )
    .await;

    // then (期待する結果):
    let expected = json!({"event": "canvasUpdate", "data": {"lines": ["x"]}});
    assert_eq!(next_event(&mut b).await, expected);
    assert_eq!(next_event(&mut c).await, expected);
    expect_silence(&mut a).await;
}

#[tokio::test]
async fn test_malformed_frame_keeps_connection_open() {
    // テスト項目: 不正なフレームには error が返り、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut socket = server.connect().await;

    // when (操作):
    socket
        .send(Message::Text("definitely not json".into()))
        .await
        .unwrap();
    let reply = next_event(&mut socket).await;
    send(
        &mut socket,
        json!({"event": "sendMessage", "data": {"from": "a", "to": "b", "text": ""}}),
    )
    .await;

    // then (期待する結果): 空の本文でも WebSocket 経路では受け付けられる
    assert_eq!(reply["event"], "error");
    let ack = next_event(&mut socket).await;
    assert_eq!(ack["event"], "messageSent");
    assert_eq!(ack["data"]["text"], "");
}

#[tokio::test]
async fn test_disconnected_room_member_is_skipped() {
    // テスト項目: Room に参加後に切断した接続は配信対象から外れる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    let mut c = server.connect().await;
    for socket in [&mut a, &mut b, &mut c] {
        send(socket, json!({"event": "joinRoom", "data": "collab_r"})).await;
        barrier(socket).await;
    }
    c.close(None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // when (操作):
    send(
        &mut a,
        json!({"event": "canvasUpdate", "data": {"roomId": "collab_r", "lines": 1}}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(
        next_event(&mut b).await,
        json!({"event": "canvasUpdate", "data": {"lines": 1}})
    );
    expect_silence(&mut a).await;
}

#[tokio::test]
async fn test_dropped_transport_cleans_presence_and_rooms() {
    // テスト項目: Close フレームなしで接続が切れても Presence と Room から取り除かれる
    // given (前提条件):
    let server = TestServer::start().await;
    let alice = UserId::new("alice".to_string()).unwrap();
    let mut socket = server.connect().await;
    send(&mut socket, json!({"event": "register", "data": "alice"})).await;
    send(&mut socket, json!({"event": "joinRoom", "data": "collab_r"})).await;
    barrier(&mut socket).await;
    assert!(server.presence.lookup(&alice).await.is_some());
    assert_eq!(server.rooms.room_count().await, 1);

    // when (操作): Close フレームを送らずに TCP 接続ごと破棄する
    drop(socket);

    // then (期待する結果):
    let cleaned = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if server.presence.lookup(&alice).await.is_none()
                && server.rooms.room_count().await == 0
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(cleaned.is_ok(), "connection was not cleaned up");
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックは認証なしで 200
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = server.http.get(server.url("/api/health")).send().await.unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}
