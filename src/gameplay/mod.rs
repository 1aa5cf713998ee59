//! §2-§4: the hand-lifecycle engine. Every submodule here is a pure value
//! type or a plain synchronous function — no I/O, no timers, no async.
//! The concurrency envelope that drives this module from client events and
//! wall-clock time lives one layer up, in `crate::session`.

pub mod action;
pub mod betting;
pub mod config;
pub mod dealer;
pub mod engine;
pub mod ofc;
pub mod pot;
pub mod room;
pub mod rotation;
pub mod seat;
pub mod showdown;
pub mod state;
pub mod variant;

pub use action::ActionKind;
pub use config::RoomConfig;
pub use engine::Effect;
pub use room::{Room, RoomId};
pub use seat::{Chips, PlayerId, Seat, SeatStatus};
pub use state::{GameState, Status};
pub use variant::GameVariant;
