use super::*;
use crate::element::{Element, ElementKind, Style};
use crate::routes;

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite;

fn element(id: i64) -> Element {
    Element::new(0.0, 0.0, 10.0, 10.0, ElementKind::Rectangle, Style::default(), id)
}

fn channel() -> (mpsc::Sender<ServerEvent>, mpsc::Receiver<ServerEvent>) {
    mpsc::channel(CLIENT_CHANNEL_CAPACITY)
}

// =============================================================
// DISPATCH
// =============================================================

#[tokio::test]
async fn invalid_frames_are_dropped_without_reply() {
    let state = AppState::new();
    let mut room = None;
    let (tx, _rx) = channel();

    let replies = dispatch_event(&state, &mut room, Uuid::new_v4(), &tx, "not json").await;

    assert!(replies.is_empty());
    assert_eq!(room, None);
    assert!(state.rooms.read().await.is_empty());
}

#[tokio::test]
async fn join_replies_with_the_room_history() {
    let state = AppState::new();
    services::room::commit(&state, "r1", vec![element(1)]).await;

    let mut room = None;
    let (tx, _rx) = channel();
    let replies = dispatch_event(
        &state,
        &mut room,
        Uuid::new_v4(),
        &tx,
        r#"{"event":"join-room","room_id":"r1"}"#,
    )
    .await;

    assert_eq!(replies, vec![ServerEvent::History { elements: vec![element(1)], index: 1 }]);
    assert_eq!(room.as_deref(), Some("r1"));
}

#[tokio::test]
async fn rejoining_moves_the_connection_between_rooms() {
    let state = AppState::new();
    let client = Uuid::new_v4();
    let mut room = None;
    let (tx, _rx) = channel();

    dispatch_event(&state, &mut room, client, &tx, r#"{"event":"join-room","room_id":"r1"}"#).await;
    dispatch_event(&state, &mut room, client, &tx, r#"{"event":"join-room","room_id":"r2"}"#).await;

    assert_eq!(room.as_deref(), Some("r2"));
    let rooms = state.rooms.read().await;
    assert!(rooms.get("r1").unwrap().clients.is_empty());
    assert!(rooms.get("r2").unwrap().clients.contains_key(&client));
}

#[tokio::test]
async fn draw_broadcasts_to_peers_but_not_the_committer() {
    let state = AppState::new();
    let committer = Uuid::new_v4();
    let mut committer_room = None;
    let (committer_tx, mut committer_rx) = channel();
    dispatch_event(
        &state,
        &mut committer_room,
        committer,
        &committer_tx,
        r#"{"event":"join-room","room_id":"r1"}"#,
    )
    .await;

    let (peer_tx, mut peer_rx) = channel();
    services::room::join_room(&state, "r1", Uuid::new_v4(), peer_tx).await;

    let draw = serde_json::to_string(&ClientEvent::Draw {
        room_id: "r1".into(),
        elements: vec![element(7)],
    })
    .unwrap();
    let replies = dispatch_event(&state, &mut committer_room, committer, &committer_tx, &draw).await;

    assert!(replies.is_empty());
    assert_eq!(
        peer_rx.recv().await,
        Some(ServerEvent::Draw { elements: vec![element(7)], index: 1 })
    );
    assert!(committer_rx.try_recv().is_err());
}

#[tokio::test]
async fn undo_reaches_the_requester_through_its_own_channel() {
    let state = AppState::new();
    let client = Uuid::new_v4();
    let mut room = None;
    let (tx, mut rx) = channel();
    dispatch_event(&state, &mut room, client, &tx, r#"{"event":"join-room","room_id":"r1"}"#).await;
    rx.try_recv().ok();

    let draw = serde_json::to_string(&ClientEvent::Draw {
        room_id: "r1".into(),
        elements: vec![element(1)],
    })
    .unwrap();
    dispatch_event(&state, &mut room, client, &tx, &draw).await;

    dispatch_event(&state, &mut room, client, &tx, r#"{"event":"undo","room_id":"r1"}"#).await;

    assert_eq!(rx.recv().await, Some(ServerEvent::Undo { elements: Vec::new(), index: 0 }));
}

#[tokio::test]
async fn undo_with_no_past_broadcasts_nothing() {
    let state = AppState::new();
    let client = Uuid::new_v4();
    let mut room = None;
    let (tx, mut rx) = channel();
    dispatch_event(&state, &mut room, client, &tx, r#"{"event":"join-room","room_id":"r1"}"#).await;

    dispatch_event(&state, &mut room, client, &tx, r#"{"event":"undo","room_id":"r1"}"#).await;
    dispatch_event(&state, &mut room, client, &tx, r#"{"event":"redo","room_id":"r1"}"#).await;

    assert!(rx.try_recv().is_err());
}

// =============================================================
// END TO END
// =============================================================

type WsClient = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn spawn_server() -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = routes::app(AppState::new());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn connect(addr: std::net::SocketAddr) -> WsClient {
    let (socket, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
        .await
        .unwrap();
    socket
}

async fn send(socket: &mut WsClient, event: &ClientEvent) {
    let text = serde_json::to_string(event).unwrap();
    socket.send(tungstenite::Message::Text(text.into())).await.unwrap();
}

async fn recv(socket: &mut WsClient) -> ServerEvent {
    loop {
        let msg = socket.next().await.unwrap().unwrap();
        if let tungstenite::Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

#[tokio::test]
async fn two_clients_share_a_room_end_to_end() {
    let addr = spawn_server().await;

    let mut alice = connect(addr).await;
    send(&mut alice, &ClientEvent::JoinRoom { room_id: "e2e".into() }).await;
    assert_eq!(recv(&mut alice).await, ServerEvent::History { elements: Vec::new(), index: 0 });

    let mut bob = connect(addr).await;
    send(&mut bob, &ClientEvent::JoinRoom { room_id: "e2e".into() }).await;
    assert_eq!(recv(&mut bob).await, ServerEvent::History { elements: Vec::new(), index: 0 });

    // Alice commits; Bob receives the broadcast.
    send(
        &mut alice,
        &ClientEvent::Draw { room_id: "e2e".into(), elements: vec![element(1)] },
    )
    .await;
    assert_eq!(
        recv(&mut bob).await,
        ServerEvent::Draw { elements: vec![element(1)], index: 1 }
    );

    // Bob undoes; both clients receive the room-wide undo.
    send(&mut bob, &ClientEvent::Undo { room_id: "e2e".into() }).await;
    assert_eq!(recv(&mut alice).await, ServerEvent::Undo { elements: Vec::new(), index: 0 });
    assert_eq!(recv(&mut bob).await, ServerEvent::Undo { elements: Vec::new(), index: 0 });

    // Alice redoes; the committed snapshot comes back to both.
    send(&mut alice, &ClientEvent::Redo { room_id: "e2e".into() }).await;
    assert_eq!(
        recv(&mut alice).await,
        ServerEvent::Redo { elements: vec![element(1)], index: 1 }
    );
    assert_eq!(
        recv(&mut bob).await,
        ServerEvent::Redo { elements: vec![element(1)], index: 1 }
    );
}

#[tokio::test]
async fn late_joiner_receives_the_current_snapshot() {
    let addr = spawn_server().await;

    let mut alice = connect(addr).await;
    send(&mut alice, &ClientEvent::JoinRoom { room_id: "late".into() }).await;
    recv(&mut alice).await;
    send(
        &mut alice,
        &ClientEvent::Draw { room_id: "late".into(), elements: vec![element(1), element(2)] },
    )
    .await;

    // Let the commit land before the second client joins.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let mut bob = connect(addr).await;
    send(&mut bob, &ClientEvent::JoinRoom { room_id: "late".into() }).await;
    assert_eq!(
        recv(&mut bob).await,
        ServerEvent::History { elements: vec![element(1), element(2)], index: 1 }
    );
}

#[tokio::test]
async fn rooms_are_isolated_end_to_end() {
    let addr = spawn_server().await;

    let mut alice = connect(addr).await;
    send(&mut alice, &ClientEvent::JoinRoom { room_id: "iso-a".into() }).await;
    recv(&mut alice).await;

    let mut bob = connect(addr).await;
    send(&mut bob, &ClientEvent::JoinRoom { room_id: "iso-b".into() }).await;
    recv(&mut bob).await;

    send(
        &mut alice,
        &ClientEvent::Draw { room_id: "iso-a".into(), elements: vec![element(1)] },
    )
    .await;
    send(&mut bob, &ClientEvent::Undo { room_id: "iso-b".into() }).await;

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    // Bob saw nothing: the draw was in another room and his undo had no past.
    let pending = tokio::time::timeout(std::time::Duration::from_millis(50), bob.next()).await;
    assert!(pending.is_err());
}
