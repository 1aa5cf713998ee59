use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;

/// A resolved badugi: `size` cards (1-4), all distinct rank and suit, more
/// cards is strictly better, and within equal size the ranks are compared
/// ascending (ace counts low, same as [`super::lowball`]). `Ord` reproduces
/// "greater `Badugi` wins" once `size` is negated — see [`Badugi::beats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badugi {
    size: usize,
    ranks_ascending: Vec<u8>,
}

impl Badugi {
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if `self` is a better badugi than `other`. A bigger badugi
    /// always wins; equal size compares the ranks ascending (lower wins),
    /// matching ace-to-five's "lowest high card" rule.
    pub fn beats(&self, other: &Badugi) -> bool {
        if self.size != other.size {
            return self.size > other.size;
        }
        self.ranks_ascending < other.ranks_ascending
    }
}

impl std::fmt::Display for Badugi {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let ranks: Vec<String> = self
            .ranks_ascending
            .iter()
            .map(|&v| if v == 1 { Rank::Ace } else { Rank::from(v - 2) })
            .map(|r| r.to_string())
            .collect();
        write!(f, "{}-card badugi ({})", self.size, ranks.join("-"))
    }
}

fn low_value(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 1,
        other => other.value(),
    }
}

fn subsets(n: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    for mask in 1u32..(1 << n) {
        out.push((0..n).filter(|i| mask & (1 << i) != 0).collect());
    }
    out
}

/// Best badugi obtainable from a hand (up to 4 cards, as dealt in Badugi
/// draw rounds). Distinct rank *and* distinct suit are both required for a
/// card to count toward the badugi; a single card always qualifies as a
/// size-1 badugi.
pub fn best_badugi(cards: &[Card]) -> Badugi {
    assert!(!cards.is_empty(), "need at least one card");
    subsets(cards.len())
        .into_iter()
        .filter_map(|idx| {
            let chosen: Vec<&Card> = idx.iter().map(|&i| &cards[i]).collect();
            let mut suits: Vec<Suit> = chosen.iter().map(|c| c.suit()).collect();
            let mut ranks: Vec<Rank> = chosen.iter().map(|c| c.rank()).collect();
            suits.sort_by_key(|s| *s as u8);
            ranks.sort_by_key(|r| *r as u8);
            suits.dedup();
            ranks.dedup();
            if suits.len() == chosen.len() && ranks.len() == chosen.len() {
                let mut ranks_ascending: Vec<u8> =
                    chosen.iter().map(|c| low_value(c.rank())).collect();
                ranks_ascending.sort_unstable();
                Some(Badugi {
                    size: chosen.len(),
                    ranks_ascending,
                })
            } else {
                None
            }
        })
        .max_by(|a, b| {
            if a.beats(b) {
                std::cmp::Ordering::Greater
            } else if b.beats(a) {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .expect("a lone card is always a valid size-1 badugi")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_distinct_ranks_and_suits_is_a_four_card_badugi() {
        let hand = vec![
            Card::new(Rank::Ace, Suit::Club),
            Card::new(Rank::Two, Suit::Diamond),
            Card::new(Rank::Three, Suit::Heart),
            Card::new(Rank::Four, Suit::Spade),
        ];
        assert_eq!(best_badugi(&hand).size(), 4);
    }

    #[test]
    fn duplicate_suit_caps_badugi_at_three() {
        let hand = vec![
            Card::new(Rank::Ace, Suit::Club),
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Three, Suit::Heart),
            Card::new(Rank::Four, Suit::Spade),
        ];
        assert_eq!(best_badugi(&hand).size(), 3);
    }

    #[test]
    fn bigger_badugi_beats_smaller() {
        let four = best_badugi(&[
            Card::new(Rank::King, Suit::Club),
            Card::new(Rank::Queen, Suit::Diamond),
            Card::new(Rank::Jack, Suit::Heart),
            Card::new(Rank::Ten, Suit::Spade),
        ]);
        let three = best_badugi(&[
            Card::new(Rank::Ace, Suit::Club),
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Three, Suit::Heart),
        ]);
        assert!(four.beats(&three));
    }
}
