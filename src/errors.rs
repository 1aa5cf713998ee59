//! §7 error taxonomy: validation/authorization errors surface to the
//! offending client as `action-invalid` (gameplay) or `error` (lifecycle);
//! integrity violations abort the hand; state errors are lifecycle `error`s.
//! None of these ever propagate out of a room's serialized actor loop —
//! `session::actor` catches them at the boundary and turns them into the
//! matching outbound event instead of poisoning the room.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{action} is not a legal action right now")]
    IllegalAction { action: String },
    #[error("amount {amount} is out of bounds [{min}, {max}]")]
    AmountOutOfBounds { amount: u64, min: u64, max: u64 },
    #[error("discard index {0} is out of range")]
    DiscardIndexOutOfRange(usize),
    #[error("cannot draw outside of a draw phase")]
    DrawOutsideDrawPhase,
    #[error("cannot act while the room is waiting for a hand to start")]
    ActionWhileWaiting,
    #[error("it is not this seat's turn to act")]
    NotSeatsTurn,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("action token does not match the issued token")]
    TokenMismatch,
    #[error("action token has expired")]
    TokenExpired,
    #[error("rate limit exceeded")]
    RateLimitExceeded,
    #[error("only the host may change room configuration")]
    NotHost,
    #[error("incorrect room password")]
    WrongPassword,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("player already has an active session in this room")]
    DuplicateSession,
    #[error("room is full")]
    RoomFull,
    #[error("a room with this id already exists")]
    DuplicateRoomId,
    #[error("deck underflow: needed {needed} cards, {available} remain")]
    DeckUnderflow { needed: usize, available: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("no active game in this room")]
    NoActiveGame,
    #[error("cannot rebuy mid-hand")]
    CannotRebuyInHand,
    #[error("cannot change variant mid-hand")]
    CannotChangeVariantInHand,
    #[error("not seated in a room")]
    LeaveWithNoRoom,
    #[error("at least 2 startable seats are required to start a hand")]
    NotEnoughPlayers,
}

/// Umbrella error a room action can fail with. `Validation`/`Authorization`
/// map to `action-invalid`; `Integrity` aborts the hand and is logged at
/// `error` severity; `State` surfaces as a lifecycle `error` event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    #[error(transparent)]
    State(#[from] StateError),
}

impl RoomError {
    /// Whether this error should abort the current hand rather than just
    /// reject the offending action (spec §7 propagation policy).
    pub fn aborts_hand(&self) -> bool {
        matches!(self, RoomError::Integrity(_))
    }
}
