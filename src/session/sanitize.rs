use serde::Serialize;

use crate::cards::{Card, Street};
use crate::gameplay::pot::Pot;
use crate::gameplay::room::{Room, RoomId};
use crate::gameplay::rotation::RotationState;
use crate::gameplay::seat::{Chips, LastAction, PlayerId, SeatStatus};
use crate::gameplay::state::Status;
use crate::gameplay::variant::GameVariant;

/// §4.9 "State broadcast & sanitization": the per-viewer projection of a
/// [`Room`]. Every connected seat gets its own copy — other seats' `hand`
/// is always null, the room's password is stripped unless the viewer is
/// host, and (spec's documented oddity, preserved rather than "fixed")
/// position 1 of every *other* seat's Stud up-cards is hidden.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub player_id: PlayerId,
    pub display_name: String,
    pub stack: Chips,
    pub bet: Chips,
    pub total_bet: Chips,
    pub status: SeatStatus,
    /// Only populated for the seat the view belongs to.
    pub hand: Option<Vec<Card>>,
    /// `None` entries are positions hidden from this viewer.
    pub up_cards: Vec<Option<Card>>,
    pub last_action: Option<LastAction>,
    pub pending_join: bool,
    pub waiting_for_bb: bool,
    pub pending_sit_out: bool,
    pub pending_leave: bool,
    pub disconnected: bool,
    pub time_bank_chips: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConfigView {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub buy_in_min: Chips,
    pub buy_in_max: Chips,
    pub allowed_games: Option<Vec<GameVariant>>,
    pub time_limit: Option<u64>,
    pub stud_ante: Chips,
    /// Only present for the host; stripped for everyone else.
    pub has_password: bool,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub id: RoomId,
    pub config: RoomConfigView,
    pub variant: GameVariant,
    pub seats: Vec<Option<SeatView>>,
    pub button_index: usize,
    pub host_seat_id: Option<PlayerId>,
    pub is_preset: bool,
    pub status: Status,
    pub street: Street,
    pub pot: Pot,
    pub board: Vec<Card>,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub raises_this_round: u32,
    pub hand_number: u64,
    pub active_player_index: Option<usize>,
    pub is_draw_phase: bool,
    pub is_runout: bool,
    pub rotation: Option<RotationView>,
}

/// Sanitized projection of [`RotationState`] (§4.10): games list, how many
/// hands remain until the next rotation, the orbit count, and (only while
/// the meta-game is on) who's still alive in the Stand-Up side-game.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationView {
    pub games_list: Vec<GameVariant>,
    pub current_index: usize,
    pub hands_per_rotation: u32,
    pub hands_since_rotation: u32,
    pub orbit_count: u32,
    pub meta_game_enabled: bool,
    pub stand_up_remaining: Option<Vec<PlayerId>>,
}

fn rotation_view(rotation: &RotationState) -> RotationView {
    RotationView {
        games_list: rotation.games_list.clone(),
        current_index: rotation.current_index,
        hands_per_rotation: rotation.hands_per_rotation,
        hands_since_rotation: rotation.hands_since_rotation,
        orbit_count: rotation.orbit_count,
        meta_game_enabled: rotation.meta_game_enabled,
        stand_up_remaining: rotation.stand_up.as_ref().map(|s| s.remaining.clone()),
    }
}

/// Position hidden from spectators in a seat's up-cards array (spec §4.9,
/// §9 "Observed ambiguities": unusual, but this preserves the source
/// behavior rather than guessing at intent). The owning seat's own hand
/// view is unaffected — only `hand` (hole cards) ever needs that
/// protection; up-cards are otherwise public.
const HIDDEN_UPCARD_INDEX: usize = 1;

fn up_cards_for_viewer(up_cards: &[Card], is_owner: bool) -> Vec<Option<Card>> {
    up_cards
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if !is_owner && i == HIDDEN_UPCARD_INDEX {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}

/// Builds the sanitized view of `room` as seen by `viewer_player_id` (`None`
/// for an unauthenticated/spectator connection, or a non-host observer).
pub fn build_view(room: &Room, viewer_player_id: Option<&str>) -> RoomView {
    let is_host = viewer_player_id.is_some() && viewer_player_id == room.host_seat_id.as_deref();

    let seats = room
        .seats
        .iter()
        .map(|seat| {
            seat.as_ref().map(|s| {
                let is_owner = viewer_player_id == Some(s.player_id.as_str());
                SeatView {
                    player_id: s.player_id.clone(),
                    display_name: s.display_name.clone(),
                    stack: s.stack,
                    bet: s.bet,
                    total_bet: s.total_bet,
                    status: s.status,
                    hand: is_owner.then(|| s.hand.clone()).flatten(),
                    up_cards: up_cards_for_viewer(&s.up_cards, is_owner),
                    last_action: s.last_action,
                    pending_join: s.pending_join,
                    waiting_for_bb: s.waiting_for_bb,
                    pending_sit_out: s.pending_sit_out,
                    pending_leave: s.pending_leave,
                    disconnected: s.disconnected,
                    time_bank_chips: s.time_bank_chips,
                }
            })
        })
        .collect();

    let config = RoomConfigView {
        small_blind: room.config.small_blind,
        big_blind: room.config.big_blind,
        buy_in_min: room.config.buy_in_min(),
        buy_in_max: room.config.buy_in_max(),
        allowed_games: room.config.allowed_games.clone(),
        time_limit: room.config.time_limit,
        stud_ante: room.config.stud_ante(),
        has_password: room.config.password.is_some(),
        password: if is_host { room.config.password.clone() } else { None },
    };

    RoomView {
        id: room.id.clone(),
        config,
        variant: room.variant,
        seats,
        button_index: room.button_index,
        host_seat_id: room.host_seat_id.clone(),
        is_preset: room.is_preset,
        status: room.state.status,
        street: room.state.street,
        pot: room.state.pot.clone(),
        board: room.state.board.clone(),
        current_bet: room.state.current_bet,
        min_raise: room.state.min_raise,
        raises_this_round: room.state.raises_this_round,
        hand_number: room.state.hand_number,
        active_player_index: room.state.active_player_index,
        is_draw_phase: room.state.is_draw_phase,
        is_runout: room.state.is_runout,
        rotation: room.rotation.as_ref().map(rotation_view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::config::RoomConfig;
    use crate::gameplay::GameVariant;

    fn room_with_password() -> Room {
        let mut cfg = RoomConfig::new(5, 10);
        cfg.password = Some("secret".into());
        let mut room = Room::new("ABC123".into(), 2, GameVariant::Nlh, cfg, false);
        room.sit_down(0, "host".into(), "Host".into(), 1000).unwrap();
        room.sit_down(1, "p2".into(), "P2".into(), 1000).unwrap();
        room
    }

    #[test]
    fn other_seats_hand_is_always_hidden() {
        let mut room = room_with_password();
        room.seats[0].as_mut().unwrap().hand = Some(vec![]);
        room.seats[1].as_mut().unwrap().hand = Some(vec![]);
        let view = build_view(&room, Some("p2"));
        assert!(view.seats[1].as_ref().unwrap().hand.is_some());
        assert!(view.seats[0].as_ref().unwrap().hand.is_none());
    }

    #[test]
    fn password_is_hidden_from_non_host() {
        let room = room_with_password();
        let view = build_view(&room, Some("p2"));
        assert!(view.config.password.is_none());
        assert!(view.config.has_password);
    }

    #[test]
    fn password_is_visible_to_host() {
        let room = room_with_password();
        let view = build_view(&room, Some("host"));
        assert_eq!(view.config.password.as_deref(), Some("secret"));
    }

    #[test]
    fn rotation_view_is_absent_until_a_rotation_is_configured() {
        let room = room_with_password();
        let view = build_view(&room, Some("p2"));
        assert!(view.rotation.is_none());
    }

    #[test]
    fn rotation_view_reflects_meta_game_and_stand_up_state() {
        let mut room = room_with_password();
        let mut state = RotationState::new(vec![GameVariant::Nlh], 8);
        state.enable_meta_game(vec!["host".into(), "p2".into()]);
        room.rotation = Some(state);
        let view = build_view(&room, Some("p2"));
        let rotation = view.rotation.unwrap();
        assert!(rotation.meta_game_enabled);
        assert_eq!(rotation.stand_up_remaining, Some(vec!["host".to_string(), "p2".to_string()]));
    }

    #[test]
    fn fourth_street_upcard_hidden_for_spectators_but_not_owner() {
        use crate::cards::{Rank, Suit};
        let mut room = room_with_password();
        let up = vec![
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Three, Suit::Club),
            Card::new(Rank::Four, Suit::Club),
        ];
        room.seats[1].as_mut().unwrap().up_cards = up.clone();
        let as_owner = build_view(&room, Some("p2"));
        let as_other = build_view(&room, Some("host"));
        assert_eq!(as_owner.seats[1].as_ref().unwrap().up_cards[1], Some(up[1]));
        assert_eq!(as_other.seats[1].as_ref().unwrap().up_cards[1], None);
        assert_eq!(as_other.seats[1].as_ref().unwrap().up_cards[0], Some(up[0]));
    }
}
