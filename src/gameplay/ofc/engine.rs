use super::state::{OFCPhase, OFCState, Row};
use crate::cards::Card;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OFCError {
    #[error("round 1 requires placing all 5 dealt cards")]
    MustPlaceAllInitialCards,
    #[error("this round requires placing exactly 2 of the 3 dealt cards")]
    MustPlaceTwoOfThree,
    #[error("discard must be the one dealt card not placed")]
    InvalidDiscard,
    #[error("row is already at capacity")]
    RowFull,
    #[error("it is not this seat's turn to place")]
    NotPlayersTurn,
    #[error("this seat has no cards awaiting placement")]
    NoCardsToPlace,
}

/// Deals 5 cards to every seat's `current_cards` for round 1 (spec §4.7).
pub fn deal_initial(state: &mut OFCState) -> Result<(), OFCError> {
    for player in state.players.iter_mut() {
        let dealt = state.deck.draw_n(5).ok_or(OFCError::NoCardsToPlace)?;
        player.current_cards = dealt;
    }
    Ok(())
}

/// Deals 3 cards to the seat currently on turn for rounds 2-5.
pub fn deal_to_current_turn(state: &mut OFCState) -> Result<(), OFCError> {
    let dealt = state.deck.draw_n(3).ok_or(OFCError::NoCardsToPlace)?;
    state.players[state.current_turn_index].current_cards = dealt;
    Ok(())
}

/// Submits a seat's placement for the current round.
///
/// Round 1: `placements` must cover all 5 dealt cards, `discard` must be
/// `None`. Rounds 2-5: `placements` must cover exactly 2 of the 3 dealt
/// cards, `discard` must be the third.
pub fn place_cards(
    state: &mut OFCState,
    player_index: usize,
    placements: Vec<(Card, Row)>,
    discard: Option<Card>,
) -> Result<(), OFCError> {
    if state.phase == OFCPhase::PineapplePlacing && player_index != state.current_turn_index {
        return Err(OFCError::NotPlayersTurn);
    }

    let dealt = state.players[player_index].current_cards.clone();
    if dealt.is_empty() {
        return Err(OFCError::NoCardsToPlace);
    }

    match state.phase {
        OFCPhase::InitialPlacing => {
            if placements.len() != 5 || discard.is_some() {
                return Err(OFCError::MustPlaceAllInitialCards);
            }
        }
        OFCPhase::PineapplePlacing => {
            if placements.len() != 2 {
                return Err(OFCError::MustPlaceTwoOfThree);
            }
            let discard = discard.ok_or(OFCError::MustPlaceTwoOfThree)?;
            let placed_cards: Vec<Card> = placements.iter().map(|(c, _)| *c).collect();
            let mut accounted = placed_cards.clone();
            accounted.push(discard);
            accounted.sort_by_key(|c| u8::from(*c));
            let mut expected = dealt.clone();
            expected.sort_by_key(|c| u8::from(*c));
            if accounted != expected {
                return Err(OFCError::InvalidDiscard);
            }
        }
        OFCPhase::Scoring => return Err(OFCError::NoCardsToPlace),
    }

    let player = &mut state.players[player_index];
    for (card, row) in &placements {
        if !player.board.place(*row, *card) {
            return Err(OFCError::RowFull);
        }
    }
    if let Some(discard) = discard {
        player.discards.push(discard);
    }
    player.current_cards.clear();
    player.has_placed = true;

    advance_turn(state);
    Ok(())
}

fn advance_turn(state: &mut OFCState) {
    let n = state.players.len();
    match state.phase {
        OFCPhase::InitialPlacing => {
            if state.players.iter().all(|p| p.has_placed) {
                begin_round(state, 2);
            }
        }
        OFCPhase::PineapplePlacing => {
            state.current_turn_index = (state.current_turn_index + 1) % n;
            if state.players.iter().all(|p| p.has_placed) {
                if state.round >= 5 {
                    state.phase = OFCPhase::Scoring;
                } else {
                    begin_round(state, state.round + 1);
                }
            }
        }
        OFCPhase::Scoring => {}
    }
}

fn begin_round(state: &mut OFCState, round: u8) {
    state.round = round;
    state.phase = OFCPhase::PineapplePlacing;
    state.current_turn_index = 0;
    for player in state.players.iter_mut() {
        player.has_placed = false;
    }
}

pub fn is_scoring(state: &OFCState) -> bool {
    state.phase == OFCPhase::Scoring
}
