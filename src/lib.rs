//! Hand-lifecycle engine and per-room concurrency envelope for a
//! multi-variant online poker platform (see `README`/`SPEC_FULL.md`).
//!
//! - [`cards`] — hand evaluation: ranking, comparison, lowball, Badugi,
//!   wildcard resolution (spec §4.1).
//! - [`gameplay`] — the synchronous core: dealer, pot manager, action
//!   validator, betting engine, showdown, OFC, room data model (spec
//!   §3-§4, §4.7-§4.8).
//! - [`session`] — the async concurrency envelope: per-room serialization,
//!   action tokens, rate limiting, turn timers, reconnection, the
//!   wire protocol, and the process-wide room registry (spec §4.9, §5,
//!   §6). Only built with the `server` feature, since it is the one part
//!   of this crate that needs a runtime.
pub mod cards;
pub mod errors;
pub mod gameplay;

#[cfg(feature = "server")]
pub mod session;
