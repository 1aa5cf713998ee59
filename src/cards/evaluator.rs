use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// Evaluates the best high-hand ranking obtainable from an arbitrary set of
/// 5 to 7 concrete cards (hole + board, or a Stud/OFC row), via bitwise rank
/// and suit masks rather than enumerating every 5-card subset.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

impl Evaluator {
    pub fn find_ranking(&self) -> Ranking {
        None.or_else(|| self.find_straight_flush_or_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .or_else(|| self.find_1_oak())
            .expect("at least one card in hand")
    }

    pub fn find_kickers(&self, value: Ranking) -> Kickers {
        let n = value.n_kickers();
        if n == 0 {
            return Kickers::from(0u16);
        }
        let mask = value.spent_mask();
        let mut bits = !mask & self.rank_masks();
        while bits.count_ones() as usize > n {
            bits &= !(1 << bits.trailing_zeros());
        }
        Kickers::from(bits)
    }

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1).map(Ranking::HighCard)
    }
    fn find_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).map(Ranking::OnePair)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).and_then(|hi| {
            self.find_rank_of_n_oak_under(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
                .or(Some(Ranking::OnePair(hi)))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).and_then(|trips| {
            self.find_rank_of_n_oak_under(2, Some(trips))
                .map(|pairs| Ranking::FullHouse(trips, pairs))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.rank_masks())
            .map(Ranking::Straight)
    }
    fn find_straight_flush_or_flush(&self) -> Option<Ranking> {
        let suit = self.find_suit_of_flush()?;
        let bits = self.suit_masks()[suit as usize];
        if let Some(rank) = self.find_rank_of_straight(bits) {
            Some(Ranking::StraightFlush(rank))
        } else {
            // Flush tiebreak is the highest card value in the flush suit,
            // not the most frequently occurring rank.
            Some(Ranking::Flush(Rank::from_mask(bits)))
        }
    }

    fn find_rank_of_straight(&self, mask: u16) -> Option<Rank> {
        const WHEEL: u16 = 0b_1_0000_0000_1111;
        let mut bits = mask;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            // After 4 rounds of `bits &= bits << 1`, the one surviving bit
            // sits at the straight's high rank directly.
            Some(Rank::from(bits.trailing_zeros() as u8))
        } else if WHEEL == (WHEEL & mask) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        self.suit_count()
            .iter()
            .position(|&n| n >= 5)
            .map(|i| Suit::from(i as u8))
    }
    fn find_rank_of_n_oak_under(&self, oak: usize, below: Option<Rank>) -> Option<Rank> {
        let ceiling = below.map(|r| r as u8).unwrap_or(13);
        let mut found: Option<Rank> = None;
        for i in 0..ceiling {
            let rank = Rank::from(i);
            if self.count_of_rank(rank) as usize >= oak {
                found = Some(rank);
            }
        }
        found
    }
    fn find_rank_of_n_oak(&self, n: usize) -> Option<Rank> {
        self.find_rank_of_n_oak_under(n, None)
    }
    fn count_of_rank(&self, rank: Rank) -> u32 {
        self.0
            .cards()
            .iter()
            .filter(|c| c.rank() == rank)
            .count() as u32
    }

    fn rank_masks(&self) -> u16 {
        self.0
            .cards()
            .iter()
            .map(|c| c.rank().mask())
            .fold(0, |acc, r| acc | r)
    }
    fn suit_count(&self) -> [u8; 4] {
        self.0.cards().iter().map(|c| c.suit()).fold([0; 4], |mut counts, s| {
            counts[s as usize] += 1;
            counts
        })
    }
    fn suit_masks(&self) -> [u16; 4] {
        self.0
            .cards()
            .iter()
            .map(|c| (c.suit(), c.rank()))
            .fold([0; 4], |mut suits, (s, r)| {
                suits[s as usize] |= r.mask();
                suits
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::cards::rank::Rank;
    use crate::cards::suit::Suit;

    fn evaluate_hand(cards: Vec<(Rank, Suit)>) -> Ranking {
        let cards: Vec<Card> = cards.into_iter().map(|(r, s)| Card::new(r, s)).collect();
        let hand = Hand::from(&cards);
        Evaluator::from(hand).find_ranking()
    }

    #[test]
    fn high_card() {
        let hand = vec![
            (Rank::Ace, Suit::Spade),
            (Rank::King, Suit::Heart),
            (Rank::Queen, Suit::Diamond),
            (Rank::Jack, Suit::Club),
            (Rank::Nine, Suit::Spade),
        ];
        assert_eq!(evaluate_hand(hand), Ranking::HighCard(Rank::Ace));
    }

    #[test]
    fn two_pair() {
        let hand = vec![
            (Rank::Ace, Suit::Spade),
            (Rank::Ace, Suit::Heart),
            (Rank::King, Suit::Diamond),
            (Rank::King, Suit::Club),
            (Rank::Queen, Suit::Spade),
        ];
        assert_eq!(evaluate_hand(hand), Ranking::TwoPair(Rank::Ace, Rank::King));
    }

    #[test]
    fn full_house() {
        let hand = vec![
            (Rank::Ace, Suit::Spade),
            (Rank::Ace, Suit::Heart),
            (Rank::Ace, Suit::Diamond),
            (Rank::King, Suit::Club),
            (Rank::King, Suit::Spade),
        ];
        assert_eq!(
            evaluate_hand(hand),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn wheel_straight() {
        let hand = vec![
            (Rank::Ace, Suit::Spade),
            (Rank::Two, Suit::Heart),
            (Rank::Three, Suit::Diamond),
            (Rank::Four, Suit::Club),
            (Rank::Five, Suit::Spade),
        ];
        assert_eq!(evaluate_hand(hand), Ranking::Straight(Rank::Five));
    }

    #[test]
    fn wheel_straight_flush() {
        let hand = vec![
            (Rank::Ace, Suit::Spade),
            (Rank::Two, Suit::Spade),
            (Rank::Three, Suit::Spade),
            (Rank::Four, Suit::Spade),
            (Rank::Five, Suit::Spade),
        ];
        assert_eq!(evaluate_hand(hand), Ranking::StraightFlush(Rank::Five));
    }

    #[test]
    fn seven_card_best_of() {
        let hand = vec![
            (Rank::Ace, Suit::Spade),
            (Rank::Ace, Suit::Heart),
            (Rank::King, Suit::Diamond),
            (Rank::King, Suit::Club),
            (Rank::Queen, Suit::Spade),
            (Rank::Jack, Suit::Heart),
            (Rank::Nine, Suit::Diamond),
        ];
        assert_eq!(evaluate_hand(hand), Ranking::TwoPair(Rank::Ace, Rank::King));
    }

    #[test]
    fn flush_tiebreak_uses_highest_card_not_frequency() {
        // Five-flush with two off-suit cards padded in; tiebreak must be
        // the highest-ranked card in the flush suit.
        let hand = vec![
            (Rank::Four, Suit::Heart),
            (Rank::Six, Suit::Heart),
            (Rank::Seven, Suit::Heart),
            (Rank::Eight, Suit::Heart),
            (Rank::Nine, Suit::Heart),
            (Rank::Ten, Suit::Spade),
        ];
        assert_eq!(evaluate_hand(hand), Ranking::Flush(Rank::Nine));
    }

    #[test]
    fn compare_hands_transitive_sample() {
        let a = evaluate_hand(vec![
            (Rank::Ace, Suit::Spade),
            (Rank::Ace, Suit::Heart),
            (Rank::King, Suit::Diamond),
            (Rank::Queen, Suit::Club),
            (Rank::Jack, Suit::Spade),
        ]);
        let b = evaluate_hand(vec![
            (Rank::King, Suit::Spade),
            (Rank::King, Suit::Heart),
            (Rank::Queen, Suit::Diamond),
            (Rank::Jack, Suit::Club),
            (Rank::Ten, Suit::Spade),
        ]);
        assert!(a > b);
    }
}
