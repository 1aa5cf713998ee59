use super::scoring::is_fouled;
use super::state::Board;
use crate::cards::wild::best_strength_with_wilds;
use crate::cards::{Rank, Ranking};

/// Top pair QQ+ (or any trips), non-fouled, grants entry (spec §4.7).
pub fn qualifies_for_entry(board: &Board) -> bool {
    if is_fouled(board) {
        return false;
    }
    match best_strength_with_wilds(&board.top).ranking() {
        Ranking::OnePair(rank) => rank.value() >= Rank::Queen.value(),
        Ranking::ThreeOAK(_) => true,
        _ => false,
    }
}

/// Continuation requires top trips+, OR middle full-house+, OR bottom
/// quads+, all non-fouled (spec §4.7).
pub fn qualifies_for_continuation(board: &Board) -> bool {
    if is_fouled(board) {
        return false;
    }
    let top_ok = matches!(best_strength_with_wilds(&board.top).ranking(), Ranking::ThreeOAK(_));
    let middle_ok = matches!(
        best_strength_with_wilds(&board.middle).ranking(),
        Ranking::FullHouse(..) | Ranking::FourOAK(_) | Ranking::StraightFlush(_)
    );
    let bottom_ok = matches!(
        best_strength_with_wilds(&board.bottom).ranking(),
        Ranking::FourOAK(_) | Ranking::StraightFlush(_)
    );
    top_ok || middle_ok || bottom_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Suit};

    fn board(top: Vec<Card>, middle: Vec<Card>, bottom: Vec<Card>) -> Board {
        Board { top, middle, bottom }
    }

    fn filler_middle() -> Vec<Card> {
        vec![
            Card::new(Rank::Two, Suit::Spade),
            Card::new(Rank::Four, Suit::Club),
            Card::new(Rank::Six, Suit::Diamond),
            Card::new(Rank::Eight, Suit::Heart),
            Card::new(Rank::Ten, Suit::Spade),
        ]
    }

    fn filler_bottom() -> Vec<Card> {
        vec![
            Card::new(Rank::Three, Suit::Club),
            Card::new(Rank::Five, Suit::Diamond),
            Card::new(Rank::Seven, Suit::Heart),
            Card::new(Rank::Nine, Suit::Spade),
            Card::new(Rank::Jack, Suit::Club),
        ]
    }

    #[test]
    fn pair_of_queens_on_top_grants_fantasyland() {
        let b = board(
            vec![
                Card::new(Rank::Queen, Suit::Club),
                Card::new(Rank::Queen, Suit::Diamond),
                Card::new(Rank::Two, Suit::Heart),
            ],
            filler_middle(),
            filler_bottom(),
        );
        assert!(qualifies_for_entry(&b));
    }

    #[test]
    fn pair_of_jacks_does_not_grant_fantasyland() {
        let b = board(
            vec![
                Card::new(Rank::Jack, Suit::Club),
                Card::new(Rank::Jack, Suit::Diamond),
                Card::new(Rank::Two, Suit::Heart),
            ],
            filler_middle(),
            filler_bottom(),
        );
        assert!(!qualifies_for_entry(&b));
    }

    #[test]
    fn quads_on_bottom_grants_continuation() {
        let b = board(
            vec![
                Card::new(Rank::Two, Suit::Club),
                Card::new(Rank::Four, Suit::Diamond),
                Card::new(Rank::Six, Suit::Heart),
            ],
            filler_middle(),
            vec![
                Card::new(Rank::Nine, Suit::Club),
                Card::new(Rank::Nine, Suit::Diamond),
                Card::new(Rank::Nine, Suit::Heart),
                Card::new(Rank::Nine, Suit::Spade),
                Card::new(Rank::Jack, Suit::Club),
            ],
        );
        assert!(qualifies_for_continuation(&b));
    }
}
