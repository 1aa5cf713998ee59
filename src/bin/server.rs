//! Unified server binary: wires the process-wide [`RoomManager`] (spec
//! §4.8) to a single WebSocket endpoint implementing §6's `{event, data}`
//! transport. Mirrors the teacher's `hosting::Server`/`Casino::bridge`
//! shape — one actix-ws session per connection, forwarding inbound frames
//! into the target room's serialized actor and draining its outbox back
//! onto the socket — generalized from "one room per socket" to "the
//! socket rebinds to whichever room `join-room` names", since this
//! platform hosts many concurrent rooms per lobby rather than one fixed
//! opponent match.

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use futures::StreamExt;
use tokio::sync::mpsc;
use uuid::Uuid;

use pokerhall::gameplay::config::RoomConfig;
use pokerhall::gameplay::variant::GameVariant;
use pokerhall::session::protocol::{ClientEvent, ServerEvent};
use pokerhall::session::{RoomHandle, RoomManager};

/// Preset, un-deletable public rooms seeded at startup (spec §3 "preset
/// marker", §4.8). One per headline variant at a friendly 1/2 stake.
fn preset_rooms() -> Vec<(String, GameVariant, RoomConfig)> {
    let variants = [
        ("NLHOLD1", GameVariant::Nlh),
        ("PLOMAHA1", GameVariant::Plo),
        ("PLO8HIL1", GameVariant::Plo8),
        ("STUD7HI1", GameVariant::SevenCardStud),
        ("STUD7LO1", GameVariant::SevenCardStud8),
        ("RAZZTBL1", GameVariant::Razz),
        ("DEUCE271", GameVariant::TripleDraw27),
        ("BADUGI01", GameVariant::Badugi),
        ("OFCPINE1", GameVariant::Ofc),
    ];
    variants.into_iter().map(|(id, v)| (id.to_string(), v, RoomConfig::new(1, 2))).collect()
}

async fn get_room_list(manager: web::Data<RoomManager>) -> impl Responder {
    HttpResponse::Ok().json(manager.list().await)
}

/// One connection's view of which room (if any) it is currently bound to,
/// since a socket isn't pinned to a room at upgrade time the way the
/// teacher's demo match is — `join-room`/`leave-room` rebind it.
struct ConnectionState {
    current: Option<RoomHandle>,
}

async fn ws_entry(
    manager: web::Data<RoomManager>,
    body: web::Payload,
    req: HttpRequest,
) -> actix_web::Result<HttpResponse> {
    let (response, mut session, mut stream) = actix_ws::handle(&req, body)?;
    let conn_id = Uuid::new_v4().to_string();
    let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<ServerEvent>();
    let manager = manager.into_inner();

    actix_web::rt::spawn(async move {
        let mut state = ConnectionState { current: None };
        let player_id = conn_id.clone();

        loop {
            tokio::select! {
                biased;
                outbound = outbox_rx.recv() => match outbound {
                    Some(event) => {
                        let json = serde_json::to_string(&event).unwrap_or_default();
                        if session.text(json).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                },
                frame = stream.next() => match frame {
                    Some(Ok(actix_ws::Message::Text(text))) => {
                        match serde_json::from_str::<ClientEvent>(&text) {
                            Ok(event) => {
                                handle_event(&manager, &mut state, &conn_id, &player_id, &outbox_tx, event).await;
                            }
                            Err(e) => {
                                let _ = outbox_tx.send(ServerEvent::Error { message: format!("bad message: {e}") });
                            }
                        }
                    }
                    Some(Ok(actix_ws::Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => continue,
                },
            }
        }
        if let Some(room) = state.current.take() {
            room.disconnect(conn_id.clone());
        }
        let _ = session.close(None).await;
    });

    Ok(response)
}

async fn handle_event(
    manager: &RoomManager,
    state: &mut ConnectionState,
    conn_id: &str,
    player_id: &str,
    outbox: &mpsc::UnboundedSender<ServerEvent>,
    event: ClientEvent,
) {
    match event {
        ClientEvent::GetRoomList => {
            let _ = outbox.send(ServerEvent::Error { message: "use GET /rooms for the lobby listing".into() });
        }
        ClientEvent::JoinRoom { ref room_id, .. } => {
            let room_id = room_id.clone();
            match manager.get(&room_id).await {
                Some(handle) => {
                    handle.connect(conn_id.to_string(), player_id.to_string(), outbox.clone());
                    handle.dispatch(conn_id.to_string(), player_id.to_string(), event);
                    state.current = Some(handle);
                }
                None => {
                    let _ = outbox.send(ServerEvent::Error { message: "no such room".into() });
                }
            }
        }
        ClientEvent::CreatePrivateRoom(ref data) => {
            let cfg = data.config.apply(&RoomConfig::new(1, 2));
            match manager
                .create_room(Some(player_id.to_string()), GameVariant::Nlh, cfg, data.custom_room_id.clone(), true)
                .await
            {
                Ok(room_id) => {
                    if let Some(handle) = manager.get(&room_id).await {
                        handle.connect(conn_id.to_string(), player_id.to_string(), outbox.clone());
                        state.current = Some(handle);
                    }
                }
                Err(e) => {
                    let _ = outbox.send(ServerEvent::Error { message: e.to_string() });
                }
            }
        }
        ClientEvent::JoinPrivateRoom { ref room_id, .. } => {
            let room_id = room_id.clone();
            match manager.get(&room_id).await {
                Some(handle) => {
                    handle.connect(conn_id.to_string(), player_id.to_string(), outbox.clone());
                    state.current = Some(handle);
                }
                None => {
                    let _ = outbox.send(ServerEvent::Error { message: "no such room".into() });
                }
            }
        }
        ClientEvent::LeaveRoom => {
            if let Some(room) = state.current.take() {
                room.dispatch(conn_id.to_string(), player_id.to_string(), ClientEvent::LeaveRoom);
                room.disconnect(conn_id.to_string());
            }
        }
        other => {
            if let Some(room) = state.current.as_ref() {
                room.dispatch(conn_id.to_string(), player_id.to_string(), other);
            } else {
                let _ = outbox.send(ServerEvent::Error { message: "join a room first".into() });
            }
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let manager = RoomManager::shared();
    manager.seed_presets(preset_rooms()).await;
    let manager: web::Data<RoomManager> = web::Data::from(manager);

    log::info!("starting pokerhall server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header())
            .app_data(manager.clone())
            .route("/rooms", web::get().to(get_room_list))
            .route("/ws", web::get().to(ws_entry))
    })
    .workers(4)
    .bind(std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()))?
    .run()
    .await
}
