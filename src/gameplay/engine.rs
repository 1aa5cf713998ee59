use super::action::ActionKind;
use super::betting;
use super::dealer::{self, DealError};
use super::pot;
use super::room::Room;
use super::seat::{LastAction, Seat, SeatStatus};
use super::showdown::{self, ShowdownResult};
use super::state::Status;
use super::variant::{BettingStructure, Family, GameVariant, VariantProfile};
use crate::cards::{Card, Street};
use crate::errors::{IntegrityError, RoomError, StateError, ValidationError};

/// What happened as a result of driving the state machine one step. The
/// session layer uses this to decide which events to broadcast; the engine
/// itself never touches a socket.
#[derive(Debug)]
pub enum Effect {
    ActionApplied { seat_index: usize },
    StreetAdvanced { street: Street },
    DrawPhaseStarted,
    DrawSubmitted { seat_index: usize },
    HandComplete(ShowdownResult),
}

fn is_heads_up(seats: &[Option<Seat>]) -> bool {
    seats.iter().flatten().filter(|s| s.is_live()).count() == 2
}

/// Next seat index (wrapping) whose seat is occupied, not folded/all-in/
/// sitting out, and has chips behind — i.e. someone who can actually submit
/// a betting action.
fn next_actor(seats: &[Option<Seat>], from: usize) -> Option<usize> {
    let n = seats.len();
    for step in 1..=n {
        let i = (from + step) % n;
        if seats[i].as_ref().is_some_and(|s| s.can_act()) {
            return Some(i);
        }
    }
    None
}

/// First-to-act for a flop-family street, or for any post-draw betting
/// round: the first live seat left of the button.
fn first_left_of_button(seats: &[Option<Seat>], button: usize) -> Option<usize> {
    next_actor(seats, button).or_else(|| {
        // Everyone left of the button is folded/all-in/sitting out but the
        // button itself can still act (single actionable seat remaining).
        seats[button].as_ref().is_some_and(Seat::can_act).then_some(button)
    })
}

const SUIT_ORDER: [crate::cards::Suit; 4] = [
    crate::cards::Suit::Club,
    crate::cards::Suit::Diamond,
    crate::cards::Suit::Heart,
    crate::cards::Suit::Spade,
];

fn suit_rank(card: Card) -> u8 {
    SUIT_ORDER.iter().position(|s| *s == card.suit()).unwrap_or(0) as u8
}

/// Best up-card showing among live Stud seats: the highest exposed pair, or
/// failing that the highest single up-card (suit breaks ties low-to-high
/// clubs<diamonds<hearts<spades, matching `dealer::determine_bring_in`).
/// Razz inverts to the worst showing. This only ever looks at `up_cards`,
/// never the hidden down cards.
fn best_showing_actor(seats: &[Option<Seat>], is_razz: bool) -> usize {
    fn showing_key(up: &[Card]) -> (u8, u8, u8) {
        let mut counts = std::collections::HashMap::new();
        for c in up {
            *counts.entry(c.rank() as u8).or_insert(0u8) += 1;
        }
        let best_pair_rank = counts
            .iter()
            .filter(|(_, &n)| n >= 2)
            .map(|(&r, _)| r)
            .max()
            .unwrap_or(0);
        let high_card = up.iter().map(|c| c.rank() as u8).max().unwrap_or(0);
        let high_suit = up.iter().max_by_key(|c| (c.rank() as u8, suit_rank(**c))).map(|c| suit_rank(*c)).unwrap_or(0);
        (best_pair_rank, high_card, high_suit)
    }

    (0..seats.len())
        .filter(|&i| seats[i].as_ref().is_some_and(|s| s.is_live()))
        .max_by_key(|&i| {
            let key = showing_key(&seats[i].as_ref().unwrap().up_cards);
            if is_razz {
                (u8::MAX - key.0, u8::MAX - key.1, key.2)
            } else {
                key
            }
        })
        .expect("at least one live seat holds an up card")
}

/// §4.5 "Hand start": rejects unless at least two seats are startable, then
/// moves the button, resets every seat, shuffles a fresh deck, collects
/// forced bets, deals starting cards and opens the first street's action.
pub fn start_hand(room: &mut Room) -> Result<(), RoomError> {
    if room.startable_seat_count() < 2 {
        return Err(StateError::NotEnoughPlayers.into());
    }
    for seat in room.seats.iter_mut().flatten() {
        seat.reset_for_new_hand();
    }
    room.button_index = dealer::move_button(&room.seats, room.button_index);

    room.state.hand_number += 1;
    room.state.deck = crate::cards::Deck::standard();
    room.state.deck.shuffle();
    room.state.board.clear();
    room.state.pot = Default::default();
    room.state.is_runout = false;
    room.state.runout_phase = None;
    room.state.is_draw_phase = false;
    room.state.players_completed_draw.clear();
    room.state.raises_this_round = 0;

    let profile = room.variant.profile();
    room.state.street = profile.streets[0];

    match profile.family {
        Family::Flop => {
            let (_, bb_idx) = dealer::collect_blinds(
                &mut room.seats,
                room.button_index,
                room.config.small_blind,
                room.config.big_blind,
            );
            clear_waiting_for_bb(&mut room.seats, bb_idx);
            deal_underflow(dealer::deal_hole_cards(&mut room.state.deck, &mut room.seats, profile.hole_cards))?;
            room.state.current_bet = room.config.big_blind;
            room.state.min_raise = room.config.big_blind;
            let first = if is_heads_up(&room.seats) {
                room.button_index
            } else {
                next_actor(&room.seats, bb_idx).unwrap_or(bb_idx)
            };
            open_betting(room, first);
        }
        Family::Stud => {
            if profile.has_antes {
                dealer::collect_antes(&mut room.seats, room.config.stud_ante());
            }
            deal_underflow(dealer::deal_stud_initial(&mut room.state.deck, &mut room.seats))?;
            let bring_in = dealer::determine_bring_in(&room.seats, room.variant == GameVariant::Razz);
            let bring_in_amount = (room.config.big_blind / 4).max(1);
            if let Some(seat) = room.seats[bring_in].as_mut() {
                seat.commit(bring_in_amount.min(seat.stack));
                seat.last_action = Some(LastAction::BringIn);
            }
            room.state.current_bet = room.seats[bring_in].as_ref().unwrap().bet;
            room.state.min_raise = betting::fixed_bet_size(&profile, room.state.street, &room.config);
            open_betting(room, bring_in);
        }
        Family::Draw => {
            let (_, bb_idx) = dealer::collect_blinds(
                &mut room.seats,
                room.button_index,
                room.config.small_blind,
                room.config.big_blind,
            );
            clear_waiting_for_bb(&mut room.seats, bb_idx);
            deal_underflow(dealer::deal_hole_cards(&mut room.state.deck, &mut room.seats, profile.hole_cards))?;
            room.state.current_bet = room.config.big_blind;
            room.state.min_raise = betting::fixed_bet_size(&profile, room.state.street, &room.config);
            let first = if is_heads_up(&room.seats) {
                room.button_index
            } else {
                next_actor(&room.seats, bb_idx).unwrap_or(bb_idx)
            };
            open_betting(room, first);
        }
        Family::Ofc => unreachable!("OFC hands are driven through gameplay::ofc::engine"),
    }

    room.state.status = Status::Playing;
    room.state.pot = pot::collect_pots(&room.seats);
    Ok(())
}

fn clear_waiting_for_bb(seats: &mut [Option<Seat>], bb_idx: usize) {
    if let Some(seat) = seats[bb_idx].as_mut() {
        seat.waiting_for_bb = false;
    }
}

fn deal_underflow(result: Result<(), DealError>) -> Result<(), RoomError> {
    result.map_err(|e| match e {
        DealError::DeckUnderflow { needed, available } => {
            IntegrityError::DeckUnderflow { needed, available }.into()
        }
        other => unreachable!("dealing the initial hand never produces {other:?}"),
    })
}

fn open_betting(room: &mut Room, first_to_act: usize) {
    room.state.active_player_index = Some(first_to_act);
    room.state.street_starter_index = Some(first_to_act);
    room.state.last_aggressor_index = None;
}

/// §4.5 step 1-5: validates turn and legality, mutates state, and decides
/// what happens next (advance the actor, close the round, or end the hand).
pub fn process_action(room: &mut Room, seat_index: usize, action: ActionKind) -> Result<Effect, RoomError> {
    if room.state.status != Status::Playing || room.state.is_draw_phase {
        return Err(ValidationError::ActionWhileWaiting.into());
    }
    if room.state.active_player_index != Some(seat_index) {
        return Err(ValidationError::NotSeatsTurn.into());
    }

    let profile = room.variant.profile();
    let valid = betting::compute_valid_actions(&room.state, &room.seats, seat_index, &profile, &room.config);
    betting::validate(&action, &valid)?;

    apply_action(room, seat_index, seat_index, &action, &profile);
    room.state.pot = pot::collect_pots(&room.seats);
    #[cfg(debug_assertions)]
    room.state.check_invariants(&room.seats);

    let contenders: Vec<usize> = (0..room.seats.len())
        .filter(|&i| room.seats[i].as_ref().is_some_and(|s| s.is_live()))
        .collect();
    if contenders.len() <= 1 {
        return Ok(finish_hand(room));
    }

    if !round_closed(room) {
        room.state.active_player_index = next_actor(&room.seats, seat_index);
        return Ok(Effect::ActionApplied { seat_index });
    }

    advance_after_round_close(room, &profile)
}

/// A raise-gate lives in `compute_valid_actions`'s caller: RAISE is only
/// offered when the seat hasn't acted since the last reopening bet/raise,
/// which `betting::compute_valid_actions` doesn't know about (it only sees
/// `GameState`, not per-seat history) — see `reopen` below for where that
/// gate is actually enforced by clearing `acted_this_round`.
fn apply_action(room: &mut Room, seat_index: usize, _turn: usize, action: &ActionKind, profile: &VariantProfile) {
    let previous_current_bet = room.state.current_bet;
    let stack_before = room.seats[seat_index].as_ref().unwrap().stack;
    let bet_before = room.seats[seat_index].as_ref().unwrap().bet;

    match action {
        ActionKind::Fold => {
            let seat = room.seats[seat_index].as_mut().unwrap();
            seat.status = SeatStatus::Folded;
            seat.last_action = Some(LastAction::Fold);
        }
        ActionKind::Check => {
            let seat = room.seats[seat_index].as_mut().unwrap();
            seat.last_action = Some(LastAction::Check);
        }
        ActionKind::Call => {
            let call_amount = previous_current_bet.saturating_sub(bet_before).min(stack_before);
            let seat = room.seats[seat_index].as_mut().unwrap();
            seat.commit(call_amount);
            seat.last_action = Some(LastAction::Call);
        }
        ActionKind::Bet(amount) | ActionKind::Raise(amount) => {
            let seat = room.seats[seat_index].as_mut().unwrap();
            seat.commit(*amount);
            let total_bet_to = seat.bet;
            seat.last_action = Some(if matches!(action, ActionKind::Bet(_)) {
                LastAction::Bet
            } else {
                LastAction::Raise
            });
            room.state.current_bet = total_bet_to;
            room.state.min_raise = total_bet_to.saturating_sub(previous_current_bet);
            reopen(room, seat_index);
            if profile.betting == BettingStructure::FixedLimit {
                room.state.raises_this_round += 1;
            }
        }
        ActionKind::AllIn => {
            let seat = room.seats[seat_index].as_mut().unwrap();
            let shove = seat.stack;
            seat.commit(shove);
            let total_bet_to = seat.bet;
            seat.last_action = Some(LastAction::AllIn);
            if total_bet_to > previous_current_bet {
                let raise_size = total_bet_to - previous_current_bet;
                let is_full_raise = previous_current_bet == 0 || raise_size >= room.state.min_raise.max(1);
                room.state.current_bet = total_bet_to;
                if is_full_raise {
                    room.state.min_raise = raise_size;
                    reopen(room, seat_index);
                    if profile.betting == BettingStructure::FixedLimit {
                        room.state.raises_this_round += 1;
                    }
                }
                // Short all-in: currentBet updated, minRaise/aggressor/
                // street-starter untouched, nobody's `acted_this_round` is
                // cleared — §4.5 step 2 "does not reopen".
            }
        }
    }

    room.seats[seat_index].as_mut().unwrap().acted_this_round = true;
}

/// A full bet/raise reopens action: everyone else who already acted this
/// round must be heard from again, so their `acted_this_round` is cleared.
/// Since `RAISE` is only legal for a seat with `acted_this_round == false`
/// (see `betting::compute_valid_actions`'s caller contract above), this is
/// also what prevents a player who already called a short all-in's reduced
/// bet from re-raising once they're forced to act again.
fn reopen(room: &mut Room, aggressor_index: usize) {
    room.state.last_aggressor_index = Some(aggressor_index);
    room.state.street_starter_index = Some(aggressor_index);
    for (i, seat) in room.seats.iter_mut().enumerate() {
        if i == aggressor_index {
            continue;
        }
        if let Some(seat) = seat {
            seat.acted_this_round = false;
        }
    }
}

/// True once every seat still able to act has matched `currentBet` and has
/// acted at least once since the last reopening bet/raise (spec §4.5 step
/// 3). Folded and all-in seats impose no obligation.
fn round_closed(room: &Room) -> bool {
    room.seats
        .iter()
        .flatten()
        .filter(|s| s.can_act())
        .all(|s| s.bet == room.state.current_bet && s.acted_this_round)
}

fn advance_after_round_close(room: &mut Room, profile: &VariantProfile) -> Result<Effect, RoomError> {
    let actionable = room.seats.iter().flatten().filter(|s| s.can_act()).count();
    if actionable <= 1 {
        room.state.is_runout = true;
        room.state.runout_phase = Some(room.state.street);
        return Ok(run_out_and_finish(room, profile));
    }

    if room.state.street.is_last(profile.streets) {
        return Ok(finish_hand(room));
    }

    match profile.family {
        Family::Draw => {
            begin_draw_phase(room);
            Ok(Effect::DrawPhaseStarted)
        }
        _ => {
            let street = deal_next_street(room, profile);
            open_next_betting_round(room, profile);
            Ok(Effect::StreetAdvanced { street })
        }
    }
}

fn reset_for_new_betting_round(room: &mut Room) {
    for seat in room.seats.iter_mut().flatten() {
        seat.reset_for_new_round();
    }
    room.state.current_bet = 0;
    room.state.raises_this_round = 0;
}

fn deal_next_street(room: &mut Room, profile: &VariantProfile) -> Street {
    let next = room.state.street.next(profile.streets).expect("caller checked this isn't the last street");
    room.state.street = next;
    match profile.family {
        Family::Flop => {
            let dealt = match next {
                Street::Flop => dealer::deal_flop(&mut room.state.deck),
                Street::Turn => dealer::deal_turn(&mut room.state.deck).map(|c| vec![c]),
                Street::Rive => dealer::deal_river(&mut room.state.deck).map(|c| vec![c]),
                _ => unreachable!("flop-family streets are Flop/Turn/River only"),
            };
            let cards = dealt.expect("deck underflow mid-hand should never happen with a standard 52-card deck");
            room.state.board.extend(cards);
        }
        Family::Stud => {
            dealer::deal_stud_street(&mut room.state.deck, &mut room.seats, next == Street::Seventh)
                .expect("deck underflow mid-hand should never happen with a standard 52-card deck");
        }
        Family::Draw | Family::Ofc => unreachable!("handled by the draw-phase path"),
    }
    next
}

fn open_next_betting_round(room: &mut Room, profile: &VariantProfile) {
    reset_for_new_betting_round(room);
    room.state.min_raise = match profile.betting {
        BettingStructure::FixedLimit => betting::fixed_bet_size(profile, room.state.street, &room.config),
        _ => room.config.big_blind,
    };
    let first = match profile.family {
        Family::Flop | Family::Draw => first_left_of_button(&room.seats, room.button_index).unwrap_or(room.button_index),
        Family::Stud => best_showing_actor(&room.seats, room.variant == GameVariant::Razz),
        Family::Ofc => unreachable!(),
    };
    open_betting(room, first);
}

fn begin_draw_phase(room: &mut Room) {
    let next = room.state.street.next(&[Street::Pref, Street::FirstDraw, Street::SecondDraw, Street::ThirdDraw]);
    if let Some(next) = next {
        room.state.street = next;
    }
    room.state.is_draw_phase = true;
    room.state.players_completed_draw.clear();
    room.state.active_player_index = None;
}

/// §4.5d: a live seat exchanges the cards at `discard_indexes` for fresh
/// ones from the deck. Betting for the street only opens once every live
/// seat has drawn (or, mid all-in runout, once every remaining street's
/// draw round has been cleared this way).
pub fn submit_draw(room: &mut Room, seat_index: usize, discard_indexes: Vec<usize>) -> Result<Effect, RoomError> {
    if !room.state.is_draw_phase {
        return Err(ValidationError::DrawOutsideDrawPhase.into());
    }
    let profile = room.variant.profile();
    let seat = room.seats[seat_index].as_ref().ok_or(ValidationError::DrawOutsideDrawPhase)?;
    if !seat.is_live() {
        return Err(ValidationError::DrawOutsideDrawPhase.into());
    }
    if room.state.players_completed_draw.contains(&seat.player_id) {
        return Err(ValidationError::DrawOutsideDrawPhase.into());
    }
    if discard_indexes.len() > profile.max_draw_count {
        return Err(ValidationError::DiscardIndexOutOfRange(discard_indexes.len()).into());
    }

    let seat = room.seats[seat_index].as_mut().unwrap();
    dealer::exchange_draw_cards(&mut room.state.deck, seat, &discard_indexes).map_err(|e| match e {
        DealError::DiscardIndexOutOfRange(i) => ValidationError::DiscardIndexOutOfRange(i).into(),
        DealError::DuplicateDiscardIndex(i) => ValidationError::DiscardIndexOutOfRange(i).into(),
        DealError::DeckUnderflow { needed, available } => IntegrityError::DeckUnderflow { needed, available }.into(),
    })?;
    seat.last_action = Some(LastAction::Draw);
    room.state.players_completed_draw.push(seat.player_id.clone());

    let live_count = room.seats.iter().flatten().filter(|s| s.is_live()).count();
    if room.state.players_completed_draw.len() < live_count {
        return Ok(Effect::DrawSubmitted { seat_index });
    }

    room.state.is_draw_phase = false;
    room.state.players_completed_draw.clear();
    let actionable = room.seats.iter().flatten().filter(|s| s.can_act()).count();
    if actionable <= 1 {
        room.state.is_runout = true;
        room.state.runout_phase = Some(room.state.street);
        return Ok(run_out_and_finish(room, &profile));
    }
    open_next_betting_round(room, &profile);
    Ok(Effect::DrawSubmitted { seat_index })
}

/// No further action is possible (at most one seat can still act): deal or
/// draw through every remaining street synchronously and go to showdown.
/// Pacing the board reveal for spectators is a session-layer concern, not
/// the engine's — this function only produces the final state.
fn run_out_and_finish(room: &mut Room, profile: &VariantProfile) -> Effect {
    loop {
        if room.state.street.is_last(profile.streets) {
            break;
        }
        match profile.family {
            Family::Flop | Family::Stud => {
                deal_next_street(room, profile);
            }
            Family::Draw => {
                let live: Vec<usize> = (0..room.seats.len())
                    .filter(|&i| room.seats[i].as_ref().is_some_and(Seat::is_live))
                    .collect();
                let next = room
                    .state
                    .street
                    .next(&[Street::Pref, Street::FirstDraw, Street::SecondDraw, Street::ThirdDraw]);
                if let Some(next) = next {
                    room.state.street = next;
                }
                for i in live {
                    let seat = room.seats[i].as_mut().unwrap();
                    // Nobody left to choose: an all-in runout stands pat
                    // rather than blocking on input from a seat that can
                    // no longer influence the pot either way.
                    let _ = dealer::exchange_draw_cards(&mut room.state.deck, seat, &[]);
                }
            }
            Family::Ofc => unreachable!(),
        }
    }
    room.state.active_player_index = None;
    finish_hand(room)
}

fn finish_hand(room: &mut Room) -> Effect {
    room.state.status = Status::Showdown;
    room.state.active_player_index = None;
    let result = showdown::resolve_showdown(room);
    Effect::HandComplete(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::config::RoomConfig;
    use crate::gameplay::room::Room;

    fn two_handed_nlh(stack_a: u64, stack_b: u64) -> Room {
        let mut room = Room::new("ABC123".into(), 2, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.sit_down(0, "a".into(), "Alice".into(), stack_a).unwrap();
        room.sit_down(1, "b".into(), "Bob".into(), stack_b).unwrap();
        room
    }

    #[test]
    fn start_hand_rejects_a_single_seat() {
        let mut room = Room::new("ABC123".into(), 2, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.sit_down(0, "a".into(), "Alice".into(), 500).unwrap();
        assert!(matches!(
            start_hand(&mut room),
            Err(RoomError::State(StateError::NotEnoughPlayers))
        ));
    }

    #[test]
    fn heads_up_fold_preflop_awards_entire_pot_uncontested() {
        let mut room = two_handed_nlh(500, 500);
        start_hand(&mut room).unwrap();
        // Heads-up: button posts SB and acts first preflop.
        assert_eq!(room.state.active_player_index, Some(room.button_index));
        let button = room.button_index;
        let effect = process_action(&mut room, button, ActionKind::Fold).unwrap();
        match effect {
            Effect::HandComplete(result) => {
                assert!(result.is_uncontested);
                assert_eq!(result.winners.len(), 1);
                assert_eq!(result.winners[0].amount, 15);
            }
            other => panic!("expected hand completion, got {other:?}"),
        }
        let other = 1 - button;
        assert_eq!(room.seats[other].as_ref().unwrap().stack, 505);
        assert_eq!(room.seats[button].as_ref().unwrap().stack, 495);
    }

    #[test]
    fn big_blind_gets_an_option_even_after_everyone_calls() {
        let mut room = two_handed_nlh(500, 500);
        start_hand(&mut room).unwrap();
        let button = room.button_index;
        let bb = 1 - button;
        // Button (SB) calls the big blind.
        process_action(&mut room, button, ActionKind::Call).unwrap();
        // Action must not have closed the round yet: BB hasn't acted.
        assert_eq!(room.state.active_player_index, Some(bb));
        assert_eq!(room.state.street, Street::Pref);
        // BB checks their option, closing the round and dealing the flop.
        let effect = process_action(&mut room, bb, ActionKind::Check).unwrap();
        assert!(matches!(effect, Effect::StreetAdvanced { street: Street::Flop }));
        assert_eq!(room.state.board.len(), 3);
    }

    #[test]
    fn raise_reopens_action_for_a_seat_that_already_called() {
        let mut room = Room::new("ABC123".into(), 3, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.sit_down(0, "a".into(), "Alice".into(), 1000).unwrap();
        room.sit_down(1, "b".into(), "Bob".into(), 1000).unwrap();
        room.sit_down(2, "c".into(), "Carol".into(), 1000).unwrap();
        start_hand(&mut room).unwrap();
        // Button = 0, SB = 1, BB = 2; first to act = 0.
        process_action(&mut room, 0, ActionKind::Call).unwrap();
        // Seat 1 (SB) re-raises over the blind.
        process_action(&mut room, 1, ActionKind::Raise(30)).unwrap();
        // Seat 2 (BB) calls the raise.
        process_action(&mut room, 2, ActionKind::Call).unwrap();
        // Action must return to seat 0, who only called the original BB
        // and never faced seat 1's raise.
        assert_eq!(room.state.active_player_index, Some(0));
        assert!(room.seats[0].as_ref().unwrap().can_act());
    }

    #[test]
    fn short_all_in_does_not_let_an_already_acted_caller_reraise() {
        let mut room = Room::new("ABC123".into(), 3, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.sit_down(0, "a".into(), "Alice".into(), 1000).unwrap();
        room.sit_down(1, "b".into(), "Bob".into(), 1000).unwrap();
        room.sit_down(2, "c".into(), "Carol".into(), 25).unwrap();
        start_hand(&mut room).unwrap();
        // Button=0 folds preflop isn't what we want; instead seat 0 raises,
        // seat 1 calls, then the short stack (seat 2, BB) shoves for less
        // than a full raise.
        process_action(&mut room, 0, ActionKind::Raise(20)).unwrap(); // to 30
        process_action(&mut room, 1, ActionKind::Call).unwrap();
        process_action(&mut room, 2, ActionKind::AllIn).unwrap(); // 25 total, short of 30+20
        assert_eq!(room.state.current_bet, 25.max(room.state.current_bet));
        // Seat 0 must act again (facing a changed current bet) but may not
        // raise, since seat 2's shove did not reopen the action.
        let valid = betting::compute_valid_actions(&room.state, &room.seats, 0, &room.variant.profile(), &room.config);
        assert!(!valid.valid_actions.contains(&super::super::betting::ActionName::Raise));
    }
}
