//! §4.9/§5/§6: the async concurrency envelope around the synchronous
//! `gameplay` core. A room is one [`controller::RoomActor`] consuming a
//! serialized inbox; the [`manager::RoomManager`] is the process-wide
//! registry that creates, looks up and deletes rooms (spec §4.8); the
//! remaining submodules are the concerns each actor owns alongside its
//! `Room`: action tokens, rate limiting, turn timers, sanitized broadcast
//! views, and the wire protocol that binds it all to the transport layer.
//!
//! Only compiled with the `server` feature — this is the one part of the
//! crate that needs an async runtime and a transport; `gameplay` and
//! `cards` are runtime-agnostic pure logic.

pub mod controller;
pub mod manager;
pub mod protocol;
pub mod ratelimit;
pub mod sanitize;
pub mod timer;
pub mod token;

pub use controller::{ConnectionId, RoomHandle};
pub use manager::{RoomManager, RoomSummary, SharedRoomManager};
pub use protocol::{ClientEvent, ServerEvent};
