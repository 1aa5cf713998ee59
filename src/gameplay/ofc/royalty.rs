use super::state::Board;
use crate::cards::wild::best_strength_with_wilds;
use crate::cards::{Card, Rank, Ranking};

/// JOPT royalty table (spec §4.7). Each row scores independently; a fouled
/// board earns zero royalties regardless of what any individual row would
/// have scored in isolation (enforced by the caller, not here).
pub fn royalties(board: &Board) -> u32 {
    royalty_top(&board.top) + royalty_middle(&board.middle) + royalty_bottom(&board.bottom)
}

/// Top row is 3 cards: only a pair of 66+ or trips score. The shared
/// evaluator handles a 3-card hand fine (straight/flush categories are
/// unreachable with fewer than 5 ranks), and resolves jokers the same way
/// full rows do.
fn royalty_top(cards: &[Card]) -> u32 {
    if cards.len() != 3 {
        return 0;
    }
    match best_strength_with_wilds(cards).ranking() {
        Ranking::ThreeOAK(rank) => 10 + (rank.value() - 2) as u32,
        Ranking::OnePair(rank) if rank.value() >= 6 => (rank.value() - 5) as u32,
        _ => 0,
    }
}

fn royalty_middle(cards: &[Card]) -> u32 {
    if cards.len() != 5 {
        return 0;
    }
    match best_strength_with_wilds(cards).ranking() {
        Ranking::ThreeOAK(_) => 2,
        Ranking::Straight(_) => 4,
        Ranking::Flush(_) => 8,
        Ranking::FullHouse(..) => 12,
        Ranking::FourOAK(_) => 20,
        Ranking::StraightFlush(Rank::Ace) => 50,
        Ranking::StraightFlush(_) => 30,
        _ => 0,
    }
}

fn royalty_bottom(cards: &[Card]) -> u32 {
    if cards.len() != 5 {
        return 0;
    }
    match best_strength_with_wilds(cards).ranking() {
        Ranking::Straight(_) => 2,
        Ranking::Flush(_) => 4,
        Ranking::FullHouse(..) => 6,
        Ranking::FourOAK(_) => 10,
        Ranking::StraightFlush(Rank::Ace) => 25,
        Ranking::StraightFlush(_) => 15,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit::*;

    fn c(rank: Rank, suit: crate::cards::Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn top_row_pair_of_sixes_scores_one() {
        let top = vec![c(Rank::Six, Spade), c(Rank::Six, Heart), c(Rank::Two, Club)];
        assert_eq!(royalty_top(&top), 1);
    }

    #[test]
    fn top_row_trip_aces_scores_twenty_two() {
        let top = vec![c(Rank::Ace, Spade), c(Rank::Ace, Heart), c(Rank::Ace, Club)];
        assert_eq!(royalty_top(&top), 22);
    }

    #[test]
    fn top_row_low_pair_scores_nothing() {
        let top = vec![c(Rank::Five, Spade), c(Rank::Five, Heart), c(Rank::Two, Club)];
        assert_eq!(royalty_top(&top), 0);
    }

    #[test]
    fn bottom_row_straight_flush_royal_scores_twenty_five() {
        let bottom = vec![
            c(Rank::Ace, Spade),
            c(Rank::King, Spade),
            c(Rank::Queen, Spade),
            c(Rank::Jack, Spade),
            c(Rank::Ten, Spade),
        ];
        assert_eq!(royalty_bottom(&bottom), 25);
    }

    #[test]
    fn middle_row_quads_scores_twenty() {
        let middle = vec![
            c(Rank::Nine, Spade),
            c(Rank::Nine, Heart),
            c(Rank::Nine, Club),
            c(Rank::Nine, Diamond),
            c(Rank::Two, Spade),
        ];
        assert_eq!(royalty_middle(&middle), 20);
    }
}
