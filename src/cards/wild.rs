use super::card::Card;
use super::hand::Hand;
use super::rank::Rank;
use super::strength::Strength;
use super::suit::Suit;

fn universe() -> Vec<Card> {
    let mut all = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            all.push(Card::new(rank, suit));
        }
    }
    all
}

/// Resolves a row that may contain OFC jokers into its best-possible
/// [`Strength`] by enumerating substitutions from the 52-card universe,
/// excluding cards already concrete in the row. Two jokers enumerate ordered
/// unique pairs (spec §4.1); since swapping the two assignments yields the
/// same resulting hand, unordered pairs are sufficient and cheaper.
pub fn best_strength_with_wilds(row: &[Card]) -> Strength {
    let concrete: Vec<Card> = row.iter().copied().filter(|c| !c.is_joker()).collect();
    let jokers = row.len() - concrete.len();
    match jokers {
        0 => Strength::from(Hand::from(&concrete)),
        1 => {
            let used = Hand::from(&concrete);
            universe()
                .into_iter()
                .filter(|c| !used.contains(*c))
                .map(|sub| {
                    let mut cards = concrete.clone();
                    cards.push(sub);
                    Strength::from(Hand::from(&cards))
                })
                .max()
                .expect("52-card universe always has a free substitute")
        }
        2 => {
            let used = Hand::from(&concrete);
            let candidates: Vec<Card> = universe().into_iter().filter(|c| !used.contains(*c)).collect();
            let mut best: Option<Strength> = None;
            for i in 0..candidates.len() {
                for j in (i + 1)..candidates.len() {
                    let mut cards = concrete.clone();
                    cards.push(candidates[i]);
                    cards.push(candidates[j]);
                    let s = Strength::from(Hand::from(&cards));
                    if best.map_or(true, |b| s > b) {
                        best = Some(s);
                    }
                }
            }
            best.expect("52-card universe always has two free substitutes")
        }
        n => panic!("a row cannot hold {n} jokers"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::JOKER_1;

    #[test]
    fn no_joker_is_a_plain_evaluation() {
        let row = vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
            Card::new(Rank::King, Suit::Diamond),
            Card::new(Rank::King, Suit::Club),
            Card::new(Rank::Queen, Suit::Spade),
        ];
        assert_eq!(
            best_strength_with_wilds(&row),
            Strength::from(Hand::from(&row))
        );
    }

    #[test]
    fn single_joker_completes_quads_over_two_pair() {
        let row = vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
            Card::new(Rank::Ace, Suit::Diamond),
            Card::new(Rank::King, Suit::Club),
            JOKER_1,
        ];
        let resolved = best_strength_with_wilds(&row);
        // Best use of the joker is the fourth ace, not a pair of kings.
        let quads = Strength::from(Hand::from(&vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
            Card::new(Rank::Ace, Suit::Diamond),
            Card::new(Rank::Ace, Suit::Club),
            Card::new(Rank::King, Suit::Club),
        ]));
        assert_eq!(resolved, quads);
    }
}
