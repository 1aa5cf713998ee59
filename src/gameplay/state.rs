use super::pot::Pot;
use super::seat::{Chips, Seat};
use crate::cards::{Card, Deck, Street};
use serde::Serialize;

/// §3 "GameState.status". Button games and Stud/Draw games share the same
/// state machine shape but walk different street sequences — `Street`
/// itself already distinguishes them, `Status` only needs to track the
/// phase outside of a concrete street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Waiting,
    Playing,
    Showdown,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub status: Status,
    pub street: Street,
    pub pot: Pot,
    pub board: Vec<Card>,
    pub deck: Deck,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub raises_this_round: u32,
    pub hand_number: u64,
    pub active_player_index: Option<usize>,
    pub street_starter_index: Option<usize>,
    pub last_aggressor_index: Option<usize>,
    pub is_draw_phase: bool,
    pub players_completed_draw: Vec<String>,
    pub is_runout: bool,
    pub runout_phase: Option<Street>,
}

impl GameState {
    pub fn waiting(deck: Deck) -> Self {
        Self {
            status: Status::Waiting,
            street: Street::Pref,
            pot: Pot::default(),
            board: Vec::new(),
            deck,
            current_bet: 0,
            min_raise: 0,
            raises_this_round: 0,
            hand_number: 0,
            active_player_index: None,
            street_starter_index: None,
            last_aggressor_index: None,
            is_draw_phase: false,
            players_completed_draw: Vec::new(),
            is_runout: false,
            runout_phase: None,
        }
    }

    /// Self-check for the conservation/shape invariants of spec §8, the way
    /// `Showdown::is_complete` self-checks conservation before returning in
    /// the teacher crate. Only compiled into debug builds; a violation means
    /// an engine bug, not a client-triggerable condition, so it panics
    /// rather than returning a `Result`.
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self, seats: &[Option<Seat>]) {
        let total_bet_sum: Chips = seats.iter().flatten().map(|s| s.total_bet).sum();
        debug_assert_eq!(
            total_bet_sum,
            self.pot.total(),
            "pot conservation violated: sum(totalBet)={total_bet_sum} pot.total()={}",
            self.pot.total()
        );
        let max_live_bet = seats
            .iter()
            .flatten()
            .filter(|s| s.is_live())
            .map(|s| s.bet)
            .max()
            .unwrap_or(0);
        debug_assert!(
            self.current_bet >= max_live_bet,
            "currentBet {} below max live bet {max_live_bet}",
            self.current_bet
        );
    }
}
