use super::card::Card;
use super::hand::Hand;
use super::rank::Rank;
use super::strength::Strength;
use crate::cards::combinations;

/// Ace-to-five low value for a single rank: Ace is always the lowest card
/// (value 1), everything else keeps its ordinary 2..13 value. Used by Razz
/// and by the qualifying low side of hi/lo splits (PLO8, 7CS8). Straights
/// and flushes never count against an ace-to-five low hand.
fn ace_low_value(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 1,
        other => other.value(),
    }
}

/// A resolved ace-to-five low hand: `category` is the group shape severity
/// (0 = no pair .. 5 = quads, lower is better), `tiebreak` is the group
/// values in the same priority order the category was read off, so two
/// `LowValue`s of equal category compare lexicographically on it. `Ord`
/// reproduces "lower `LowValue` is a better low hand" directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LowValue {
    category: u8,
    tiebreak: Vec<u8>,
}

impl LowValue {
    /// 8-or-better qualifier for hi/lo splits: no pair, and the highest
    /// card in the five is 8 or lower.
    pub fn qualifies_for_low(&self) -> bool {
        self.category == 0 && self.tiebreak.last().copied().unwrap_or(13) <= 8
    }
}

fn display_low_value(rank_values: u8) -> Rank {
    if rank_values == 1 {
        Rank::Ace
    } else {
        Rank::from(rank_values - 2)
    }
}

impl std::fmt::Display for LowValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut ranks: Vec<Rank> = self.tiebreak.iter().map(|&v| display_low_value(v)).collect();
        ranks.reverse();
        write!(f, "{}-low", ranks.iter().map(|r| r.to_string()).collect::<Vec<_>>().join("-"))
    }
}

fn classify_five(values: &mut [u8; 5]) -> LowValue {
    values.sort_unstable();
    let mut counts: std::collections::BTreeMap<u8, u8> = std::collections::BTreeMap::new();
    for &v in values.iter() {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut groups: Vec<(u8, u8)> = counts.into_iter().map(|(v, c)| (c, v)).collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    let shape: Vec<u8> = groups.iter().map(|g| g.0).collect();
    let category = match shape.as_slice() {
        [1, 1, 1, 1, 1] => 0,
        [2, 1, 1, 1] => 1,
        [2, 2, 1] => 2,
        [3, 1, 1] => 3,
        [3, 2] => 4,
        [4, 1] => 5,
        _ => unreachable!("five cards always group into one of the six shapes"),
    };
    let tiebreak: Vec<u8> = groups.iter().map(|g| g.1).collect();
    LowValue { category, tiebreak }
}

fn combinations_5(n: usize) -> Vec<[usize; 5]> {
    let mut out = Vec::new();
    let mut idx = [0usize; 5];
    fn rec(start: usize, n: usize, depth: usize, idx: &mut [usize; 5], out: &mut Vec<[usize; 5]>) {
        if depth == 5 {
            out.push(*idx);
            return;
        }
        for i in start..n {
            idx[depth] = i;
            rec(i + 1, n, depth + 1, idx, out);
        }
    }
    rec(0, n, 0, &mut idx, &mut out);
    out
}

/// Best ace-to-five low hand obtainable from 5-7 concrete cards. Panics if
/// fewer than 5 cards are given (callers only invoke this at showdown with a
/// complete hand).
pub fn best_ace_to_five(cards: &[Card]) -> LowValue {
    assert!(cards.len() >= 5, "need at least 5 cards to form a low hand");
    combinations_5(cards.len())
        .into_iter()
        .map(|idx| {
            let mut values = [0u8; 5];
            for (slot, i) in idx.iter().enumerate() {
                values[slot] = ace_low_value(cards[*i].rank());
            }
            classify_five(&mut values)
        })
        .min()
        .expect("at least one 5-card combination")
}

/// Best 2-7 low hand obtainable from 5-7 concrete cards (2-7 Triple Draw,
/// spec §4.1/§4.6): Ace is high only, and straights/flushes count against
/// the hand exactly as they would in a hi game, so this is just the *worst*
/// standard [`Strength`] achievable — no separate category table needed.
/// A lower `Strength` is a better 2-7 low; callers compare with `<`, never
/// `>`, or use [`DeuceSevenLow::beats`] to avoid the inversion footgun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeuceSevenLow(Strength);

impl DeuceSevenLow {
    pub fn strength(&self) -> Strength {
        self.0
    }

    /// True if `self` is the better 2-7 low (lower standard hi-strength).
    pub fn beats(&self, other: &DeuceSevenLow) -> bool {
        self.0 < other.0
    }
}

impl std::fmt::Display for DeuceSevenLow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} (as a low)", self.0)
    }
}

pub fn best_deuce_seven_low(cards: &[Card]) -> DeuceSevenLow {
    assert!(cards.len() >= 5, "need at least 5 cards to form a 2-7 low hand");
    if cards.len() == 5 {
        return DeuceSevenLow(Strength::from(Hand::from(cards)));
    }
    let worst = combinations(cards.len(), 5)
        .into_iter()
        .map(|idx| {
            let chosen: Vec<Card> = idx.iter().map(|&i| cards[i]).collect();
            Strength::from(Hand::from(&chosen))
        })
        .min()
        .expect("at least one 5-card combination");
    DeuceSevenLow(worst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::suit::Suit;

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks
            .iter()
            .zip(Suit::ALL.iter().cycle())
            .map(|(r, s)| Card::new(*r, *s))
            .collect()
    }

    #[test]
    fn wheel_is_best_possible_low() {
        let hand = cards(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
        let value = best_ace_to_five(&hand);
        assert_eq!(value.category, 0);
        assert!(value.qualifies_for_low());
    }

    #[test]
    fn pair_is_worse_than_six_high() {
        let six_high = cards(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]);
        let paired = cards(&[Rank::Two, Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
        assert!(best_ace_to_five(&six_high) < best_ace_to_five(&paired));
    }

    #[test]
    fn nine_high_does_not_qualify_for_eight_or_better() {
        let hand = cards(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Nine]);
        assert!(!best_ace_to_five(&hand).qualifies_for_low());
    }

    #[test]
    fn best_of_seven_picks_lowest_five() {
        let hand = cards(&[
            Rank::King,
            Rank::Queen,
            Rank::Ace,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
        ]);
        let value = best_ace_to_five(&hand);
        assert_eq!(value.category, 0);
        assert!(value.qualifies_for_low());
    }

    #[test]
    fn deuce_seven_wheel_is_not_the_best_low_because_straights_count_against_it() {
        let wheel = cards(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
        let seven_high = cards(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Seven]);
        assert!(best_deuce_seven_low(&seven_high).beats(&best_deuce_seven_low(&wheel)));
    }

    #[test]
    fn deuce_seven_nuts_is_seven_five_four_three_two_unsuited() {
        let nuts = cards(&[Rank::Seven, Rank::Five, Rank::Four, Rank::Three, Rank::Two]);
        let worse = cards(&[Rank::Eight, Rank::Five, Rank::Four, Rank::Three, Rank::Two]);
        assert!(best_deuce_seven_low(&nuts).beats(&best_deuce_seven_low(&worse)));
    }

    #[test]
    fn deuce_seven_best_of_seven_picks_the_lowest_five() {
        let hand = cards(&[
            Rank::King,
            Rank::Queen,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Seven,
        ]);
        let value = best_deuce_seven_low(&hand);
        let expected = best_deuce_seven_low(&cards(&[
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Seven,
        ]));
        assert_eq!(value, expected);
    }
}
