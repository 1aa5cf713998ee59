pub mod badugi;
pub mod card;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod kicks;
pub mod lowball;
pub mod rank;
pub mod ranking;
pub mod strength;
pub mod street;
pub mod suit;
pub mod wild;

pub use card::Card;
pub use deck::Deck;
pub use hand::Hand;
pub use rank::Rank;
pub use ranking::Ranking;
pub use strength::Strength;
pub use street::Street;
pub use suit::Suit;

use std::cmp::Ordering;

/// Best 5-card [`Strength`] obtainable from an arbitrary 5-7 card set,
/// routing every hi-hand showdown path (NLH/Stud "choose 5 of N") through a
/// single entry point instead of duplicating combination logic per variant.
/// PLO's "2 hole x 3 board" rule is a separate combination search — see
/// `gameplay::showdown::best_omaha_hand` — because it is constrained rather
/// than free choice.
pub fn best_of(cards: &[Card]) -> Strength {
    assert!(cards.len() >= 5, "need at least 5 cards to evaluate a hand");
    if cards.len() == 5 {
        return Strength::from(Hand::from(cards));
    }
    combinations(cards.len(), 5)
        .into_iter()
        .map(|idx| {
            let chosen: Vec<Card> = idx.iter().map(|&i| cards[i]).collect();
            Strength::from(Hand::from(&chosen))
        })
        .max()
        .expect("at least one 5-card combination")
}

/// Total order over two hands' best-5 strength: -1/0/+1, matching
/// `compareHands` in spec §4.1. Zero only on a genuine tie of the full
/// tiebreak vector — suits never break ties in high-only games.
pub fn compare_hands(a: &Strength, b: &Strength) -> Ordering {
    a.cmp(b)
}

pub(crate) fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut idx: Vec<usize> = Vec::with_capacity(k);
    fn rec(start: usize, n: usize, k: usize, idx: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if idx.len() == k {
            out.push(idx.clone());
            return;
        }
        for i in start..n {
            idx.push(i);
            rec(i + 1, n, k, idx, out);
            idx.pop();
        }
    }
    rec(0, n, k, &mut idx, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::rank::Rank;
    use crate::cards::suit::Suit;

    #[test]
    fn best_of_seven_matches_direct_bitmask_evaluation() {
        let cards = vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
            Card::new(Rank::King, Suit::Diamond),
            Card::new(Rank::King, Suit::Club),
            Card::new(Rank::Queen, Suit::Spade),
            Card::new(Rank::Jack, Suit::Heart),
            Card::new(Rank::Nine, Suit::Diamond),
        ];
        assert_eq!(best_of(&cards), Strength::from(Hand::from(&cards)));
    }
}
