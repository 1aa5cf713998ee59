use super::config::RoomConfig;
use super::ofc::state::OFCState;
use super::rotation::RotationState;
use super::seat::{PlayerId, Seat};
use super::state::GameState;
use super::variant::GameVariant;
use crate::cards::Deck;
use crate::errors::{IntegrityError, StateError};

pub type RoomId = String;

/// A table, long-lived across hands (spec §3). Seats are a fixed-length
/// array with `None` for an empty chair — indices stay stable whether or
/// not anyone currently sits there, because clients reference seats by
/// index in every event.
pub struct Room {
    pub id: RoomId,
    pub config: RoomConfig,
    pub pending_config: Option<RoomConfig>,
    pub variant: GameVariant,
    pub seats: Vec<Option<Seat>>,
    pub button_index: usize,
    pub state: GameState,
    pub ofc_state: Option<OFCState>,
    pub host_seat_id: Option<PlayerId>,
    pub is_preset: bool,
    pub rotation: Option<RotationState>,
}

impl Room {
    pub fn new(id: RoomId, seat_count: usize, variant: GameVariant, config: RoomConfig, is_preset: bool) -> Self {
        Self {
            id,
            config,
            pending_config: None,
            variant,
            seats: (0..seat_count).map(|_| None).collect(),
            button_index: 0,
            state: GameState::waiting(Deck::standard()),
            ofc_state: None,
            host_seat_id: None,
            is_preset,
            rotation: None,
        }
    }

    pub fn occupied_seat_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn startable_seat_count(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|s| s.is_startable())
            .count()
    }

    pub fn is_hand_in_progress(&self) -> bool {
        !matches!(self.state.status, super::state::Status::Waiting)
    }

    pub fn find_seat_by_player(&self, player_id: &str) -> Option<usize> {
        self.seats
            .iter()
            .position(|s| s.as_ref().map(|s| s.player_id == player_id).unwrap_or(false))
    }

    /// §4.8 `sitDown`: seat must be empty and the player must not already
    /// hold another seat in this room.
    pub fn sit_down(
        &mut self,
        seat_index: usize,
        player_id: PlayerId,
        display_name: String,
        buy_in: u64,
    ) -> Result<(), IntegrityError> {
        if self.find_seat_by_player(&player_id).is_some() {
            return Err(IntegrityError::DuplicateSession);
        }
        if seat_index >= self.seats.len() || self.seats[seat_index].is_some() {
            return Err(IntegrityError::RoomFull);
        }
        let mut seat = Seat::new(player_id, display_name, buy_in);
        if self.is_hand_in_progress() {
            seat.status = super::seat::SeatStatus::SitOut;
            seat.pending_join = true;
            seat.waiting_for_bb = self.variant.profile().has_button;
        }
        if self.host_seat_id.is_none() {
            self.host_seat_id = Some(seat.player_id.clone());
        }
        self.seats[seat_index] = Some(seat);
        Ok(())
    }

    /// §4.8 `standUp`: removes the seat; transfers host if needed; the
    /// caller (Room Manager) is responsible for deleting a non-preset room
    /// whose last seat just emptied.
    pub fn stand_up(&mut self, player_id: &str) -> Result<(), StateError> {
        let idx = self.find_seat_by_player(player_id).ok_or(StateError::LeaveWithNoRoom)?;
        self.seats[idx] = None;
        if self.host_seat_id.as_deref() == Some(player_id) {
            self.host_seat_id = self
                .seats
                .iter()
                .flatten()
                .next()
                .map(|s| s.player_id.clone());
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.seats.iter().all(|s| s.is_none())
    }

    /// §4.8 `applyPendingConfig`: a deferred config change (private-room
    /// host edited settings mid-hand) takes effect once the hand ends.
    pub fn apply_pending_config(&mut self) {
        if let Some(cfg) = self.pending_config.take() {
            self.config = cfg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sit_down_rejects_duplicate_player_in_same_room() {
        let mut room = Room::new("ABC123".into(), 6, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.sit_down(0, "p1".into(), "Alice".into(), 1000).unwrap();
        let err = room.sit_down(1, "p1".into(), "Alice".into(), 1000).unwrap_err();
        assert_eq!(err, IntegrityError::DuplicateSession);
    }

    #[test]
    fn sit_down_mid_hand_marks_pending_join() {
        let mut room = Room::new("ABC123".into(), 6, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.state.status = super::super::state::Status::Playing;
        room.sit_down(0, "p1".into(), "Alice".into(), 1000).unwrap();
        let seat = room.seats[0].as_ref().unwrap();
        assert!(seat.pending_join);
        assert!(seat.waiting_for_bb);
        assert_eq!(seat.status, super::super::seat::SeatStatus::SitOut);
    }

    #[test]
    fn host_transfers_to_next_seat_on_leave() {
        let mut room = Room::new("ABC123".into(), 6, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.sit_down(0, "p1".into(), "Alice".into(), 1000).unwrap();
        room.sit_down(1, "p2".into(), "Bob".into(), 1000).unwrap();
        assert_eq!(room.host_seat_id.as_deref(), Some("p1"));
        room.stand_up("p1").unwrap();
        assert_eq!(room.host_seat_id.as_deref(), Some("p2"));
    }

    #[test]
    fn room_empties_when_last_seat_leaves() {
        let mut room = Room::new("ABC123".into(), 6, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.sit_down(0, "p1".into(), "Alice".into(), 1000).unwrap();
        room.stand_up("p1").unwrap();
        assert!(room.is_empty());
        assert!(room.host_seat_id.is_none());
    }
}
