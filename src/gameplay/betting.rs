use super::action::ActionKind;
use super::config::RoomConfig;
use super::seat::{Chips, Seat};
use super::state::GameState;
use super::variant::{BettingStructure, VariantProfile};
use crate::cards::Street;
use serde::Serialize;

/// §4.4 Action Validator output: the legal action set plus the numeric
/// bounds a client needs to render bet/raise controls.
#[derive(Debug, Clone, Serialize)]
pub struct ValidActions {
    pub valid_actions: Vec<ActionName>,
    pub min_bet: Chips,
    pub max_bet: Chips,
    pub fixed_bet_size: Option<Chips>,
    pub is_capped: bool,
    pub raises_remaining: u32,
    pub bet_structure: BettingStructure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionName {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

/// Number of raises permitted per betting round under Fixed-Limit: the
/// default cap of 4 total bets (1 bet + 3 raises), lifted entirely
/// heads-up (spec §4.4/§4.5 "Heads-up exception: no cap").
pub fn raise_cap(config: &RoomConfig, live_seat_count: usize) -> Option<u32> {
    if live_seat_count <= 2 {
        None
    } else {
        Some(config.raise_cap)
    }
}

/// Small bet on the early half of a variant's streets, big bet (2x) on the
/// later half — the conventional Fixed-Limit split for both Stud (3rd/4th
/// small, 5th-7th big) and Triple Draw (pre-draw/1st-draw small, 2nd/3rd
/// big) falls out of the same "first half vs second half" rule.
pub fn fixed_bet_size(profile: &VariantProfile, street: Street, config: &RoomConfig) -> Chips {
    let idx = profile.streets.iter().position(|s| *s == street).unwrap_or(0);
    let is_late = idx * 2 >= profile.streets.len();
    if is_late {
        config.big_blind * 2
    } else {
        config.big_blind
    }
}

pub fn compute_valid_actions(
    state: &GameState,
    seats: &[Option<Seat>],
    seat_index: usize,
    profile: &VariantProfile,
    config: &RoomConfig,
) -> ValidActions {
    let seat = seats[seat_index].as_ref().expect("seat_index must be occupied");
    let live_count = seats.iter().flatten().filter(|s| s.is_live()).count();
    let cap = raise_cap(config, live_count);
    let is_capped = cap.is_some_and(|c| state.raises_this_round >= c);

    let to_call = state.current_bet.saturating_sub(seat.bet).min(seat.stack);
    let mut valid = Vec::with_capacity(5);
    valid.push(ActionName::Fold);
    if seat.bet == state.current_bet {
        valid.push(ActionName::Check);
    }
    if seat.bet < state.current_bet && seat.stack > 0 {
        valid.push(ActionName::Call);
    }
    if seat.stack > 0 {
        valid.push(ActionName::AllIn);
    }

    let fixed_size = match profile.betting {
        BettingStructure::FixedLimit => Some(fixed_bet_size(profile, state.street, config)),
        _ => None,
    };

    let (min_bet, max_bet) = bet_bounds(state, seat, profile, config, fixed_size, to_call);

    if state.current_bet == 0 {
        if seat.stack > 0 {
            valid.push(ActionName::Bet);
        }
    } else if !is_capped && seat.stack > to_call && max_bet > to_call && !seat.acted_this_round {
        // A short all-in updates `currentBet` without reopening: a seat
        // that already acted since the last full bet/raise must call or
        // fold, never raise again, until a full raise clears this flag.
        valid.push(ActionName::Raise);
    }

    ValidActions {
        valid_actions: valid,
        min_bet,
        max_bet,
        fixed_bet_size: fixed_size,
        is_capped,
        raises_remaining: cap.map(|c| c.saturating_sub(state.raises_this_round)).unwrap_or(u32::MAX),
        bet_structure: profile.betting,
    }
}

/// Returns (min additional chips, max additional chips) for the currently
/// legal bet-or-raise, expressed as *additional* chips on top of `seat.bet`
/// (matching the wire protocol's `amount` semantics, spec §6).
fn bet_bounds(
    state: &GameState,
    seat: &Seat,
    profile: &VariantProfile,
    config: &RoomConfig,
    fixed_size: Option<Chips>,
    to_call: Chips,
) -> (Chips, Chips) {
    if let Some(size) = fixed_size {
        let amount = if state.current_bet == 0 {
            size
        } else {
            to_call + size
        };
        let amount = amount.min(seat.stack);
        return (amount, amount);
    }

    match profile.betting {
        BettingStructure::NoLimit => {
            if state.current_bet == 0 {
                (config.big_blind.min(seat.stack), seat.stack)
            } else {
                let min_raise_to = to_call + state.min_raise.max(config.big_blind);
                (min_raise_to.min(seat.stack), seat.stack)
            }
        }
        BettingStructure::PotLimit => {
            // Pot already includes every chip committed so far this hand,
            // including the current round (engine updates it on commit).
            let pot_total = state.pot.main;
            if state.current_bet == 0 {
                (config.big_blind.min(seat.stack), pot_total.min(seat.stack))
            } else {
                let min_raise_to = to_call + state.min_raise.max(config.big_blind);
                let max_raise_to = pot_total + 2 * to_call;
                (min_raise_to.min(seat.stack), max_raise_to.min(seat.stack))
            }
        }
        BettingStructure::FixedLimit => unreachable!("handled by fixed_size branch above"),
    }
}

/// Classifies a submitted action against the validator's output; returns
/// `Ok(())` when legal. The engine calls this before mutating any state
/// (spec §4.5 step 1).
pub fn validate(
    action: &ActionKind,
    valid: &ValidActions,
) -> Result<(), crate::errors::ValidationError> {
    use crate::errors::ValidationError;
    let ok = match action {
        ActionKind::Fold => valid.valid_actions.contains(&ActionName::Fold),
        ActionKind::Check => valid.valid_actions.contains(&ActionName::Check),
        ActionKind::Call => valid.valid_actions.contains(&ActionName::Call),
        ActionKind::AllIn => valid.valid_actions.contains(&ActionName::AllIn),
        ActionKind::Bet(amount) => {
            valid.valid_actions.contains(&ActionName::Bet)
                && *amount >= valid.min_bet
                && *amount <= valid.max_bet
        }
        ActionKind::Raise(amount) => {
            valid.valid_actions.contains(&ActionName::Raise)
                && *amount >= valid.min_bet
                && *amount <= valid.max_bet
        }
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::IllegalAction {
            action: action.to_string(),
        })
    }
}
