use super::card::{Card, JOKER_1, JOKER_2};
use super::rank::Rank;
use super::suit::Suit;
use rand::seq::SliceRandom;

/// A shuffled stack of cards, dealt from the top (`pop()` end). Burns and
/// deals consume cards in place; a hand never sees more cards than the deck
/// actually holds.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// 52-card deck for every button/stud/draw variant, shuffled with an
    /// OS-backed RNG (spec: "cryptographically unpredictable source").
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        let mut deck = Self { cards };
        deck.shuffle();
        deck
    }

    /// 52+2 deck for OFC, which deals the two wildcard jokers into play.
    pub fn with_jokers() -> Self {
        let mut deck = Self::standard();
        deck.cards.push(JOKER_1);
        deck.cards.push(JOKER_2);
        deck.shuffle();
        deck
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draws one card off the top. `None` on underflow — callers treat this
    /// as an integrity violation (spec §7: "deck underflow ... fatal hand
    /// abort"), never as an ordinary `Option`.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn draw_n(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.cards.len() < n {
            return None;
        }
        Some((0..n).filter_map(|_| self.draw()).collect())
    }

    /// Burns one card (discards it face down) and returns it so tests can
    /// assert on it; gameplay code ignores the return value.
    pub fn burn(&mut self) -> Option<Card> {
        self.draw()
    }

    /// Returns a card to the bottom of the deck. Used by the draw-exchange
    /// reshuffle-the-burn-pile fallback (§4.5d) when the deck runs dry mid
    /// draw round.
    pub fn return_to_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 52);
        let unique: std::collections::HashSet<u8> =
            deck.cards.iter().map(|c| u8::from(*c)).collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn ofc_deck_has_54_cards_including_jokers() {
        let deck = Deck::with_jokers();
        assert_eq!(deck.len(), 54);
        assert!(deck.cards.contains(&JOKER_1));
        assert!(deck.cards.contains(&JOKER_2));
    }

    #[test]
    fn draw_n_fails_on_underflow() {
        let mut deck = Deck::standard();
        deck.cards.truncate(3);
        assert!(deck.draw_n(4).is_none());
        assert_eq!(deck.draw_n(3).map(|c| c.len()), Some(3));
    }
}
