use super::seat::{Chips, Seat, SeatStatus};
use crate::cards::{Card, Deck};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DealError {
    #[error("deck underflow: needed {needed} cards, {available} remain")]
    DeckUnderflow { needed: usize, available: usize },
    #[error("discard index {0} out of range")]
    DiscardIndexOutOfRange(usize),
    #[error("duplicate discard index {0}")]
    DuplicateDiscardIndex(usize),
}

/// A room's seat array is fixed-length with `None` for empty chairs (spec
/// §3). Everything below operates on that array directly rather than a
/// compacted copy, so seat indices stay stable across deals.
pub type Seats = [Option<Seat>];

fn is_live(seat: &Option<Seat>) -> bool {
    matches!(seat, Some(s) if s.status == SeatStatus::Active || s.status == SeatStatus::AllIn)
}

fn is_occupied_not_sitting_out(seat: &Option<Seat>) -> bool {
    matches!(seat, Some(s) if s.status != SeatStatus::SitOut)
}

/// Next seat index, modulo seat count, whose status is `ACTIVE` or
/// `ALL_IN`. Empty chairs and `SIT_OUT` seats are skipped. Used for button
/// movement, blind assignment and post-draw turn order alike.
fn next_active(seats: &Seats, from: usize) -> usize {
    let n = seats.len();
    let mut i = from;
    for _ in 0..n {
        i = (i + 1) % n;
        if is_live(&seats[i]) {
            return i;
        }
    }
    from
}

/// Advances the dealer button to the next seat eligible to hold it.
pub fn move_button(seats: &Seats, current_button: usize) -> usize {
    next_active(seats, current_button)
}

pub fn deal_hole_cards(deck: &mut Deck, seats: &mut Seats, count: usize) -> Result<(), DealError> {
    let live: Vec<usize> = (0..seats.len())
        .filter(|&i| is_occupied_not_sitting_out(&seats[i]))
        .collect();
    let needed = live.len() * count;
    if deck.len() < needed {
        return Err(DealError::DeckUnderflow {
            needed,
            available: deck.len(),
        });
    }
    for &i in &live {
        seats[i].as_mut().unwrap().hand = Some(Vec::with_capacity(count));
    }
    for _ in 0..count {
        for &i in &live {
            let card = deck.draw().expect("underflow checked above");
            seats[i].as_mut().unwrap().hand.get_or_insert_with(Vec::new).push(card);
        }
    }
    Ok(())
}

fn burn_and_deal(deck: &mut Deck, n: usize) -> Result<Vec<Card>, DealError> {
    if deck.len() < n + 1 {
        return Err(DealError::DeckUnderflow {
            needed: n + 1,
            available: deck.len(),
        });
    }
    deck.burn();
    deck.draw_n(n).ok_or(DealError::DeckUnderflow {
        needed: n,
        available: deck.len(),
    })
}

pub fn deal_flop(deck: &mut Deck) -> Result<Vec<Card>, DealError> {
    burn_and_deal(deck, 3)
}

pub fn deal_turn(deck: &mut Deck) -> Result<Card, DealError> {
    Ok(burn_and_deal(deck, 1)?.remove(0))
}

pub fn deal_river(deck: &mut Deck) -> Result<Card, DealError> {
    Ok(burn_and_deal(deck, 1)?.remove(0))
}

/// Heads-up: button posts SB, the other seat posts BB. 3+ handed: the seat
/// after the button posts SB, the next posts BB. A short stack posts
/// whatever remains and goes all-in (spec §4.2). Returns (sb_index,
/// bb_index).
pub fn collect_blinds(seats: &mut Seats, button: usize, sb: Chips, bb: Chips) -> (usize, usize) {
    let heads_up = seats.iter().filter(|s| is_live(s)).count() == 2;
    let (sb_idx, bb_idx) = if heads_up {
        (button, next_active(seats, button))
    } else {
        let s = next_active(seats, button);
        let b = next_active(seats, s);
        (s, b)
    };
    post(seats[sb_idx].as_mut().unwrap(), sb);
    post(seats[bb_idx].as_mut().unwrap(), bb);
    (sb_idx, bb_idx)
}

pub fn collect_antes(seats: &mut Seats, ante: Chips) -> Chips {
    let mut collected = 0;
    for seat in seats.iter_mut().flatten() {
        if seat.status == SeatStatus::Active {
            let before = seat.stack;
            post(seat, ante);
            collected += before - seat.stack;
        }
    }
    collected
}

fn post(seat: &mut Seat, amount: Chips) {
    let amount = amount.min(seat.stack);
    seat.commit(amount);
}

/// 2 down + 1 up per active seat, dealt round-robin (spec §4.2).
pub fn deal_stud_initial(deck: &mut Deck, seats: &mut Seats) -> Result<(), DealError> {
    deal_hole_cards(deck, seats, 2)?;
    deal_stud_street(deck, seats, false)
}

/// One card per live seat: up-card, except 7th Street which deals down.
pub fn deal_stud_street(deck: &mut Deck, seats: &mut Seats, is_down: bool) -> Result<(), DealError> {
    let live: Vec<usize> = (0..seats.len()).filter(|&i| is_live(&seats[i])).collect();
    if deck.len() < live.len() {
        return Err(DealError::DeckUnderflow {
            needed: live.len(),
            available: deck.len(),
        });
    }
    for &i in &live {
        let card = deck.draw().expect("underflow checked above");
        let seat = seats[i].as_mut().unwrap();
        seat.hand.get_or_insert_with(Vec::new).push(card);
        if !is_down {
            seat.up_cards.push(card);
        }
    }
    Ok(())
}

/// Lowest up-card starts the action (ties broken clubs < diamonds < hearts
/// < spades); Razz inverts to the highest up-card.
pub fn determine_bring_in(seats: &Seats, is_razz: bool) -> usize {
    (0..seats.len())
        .filter(|&i| is_live(&seats[i]))
        .min_by_key(|&i| {
            let s = seats[i].as_ref().unwrap();
            let up = *s.up_cards.last().expect("stud seats always have an up card");
            let rank = up.rank() as u8;
            let suit = up.suit() as u8;
            // Lowest (rank, suit) brings it in; Razz inverts rank only, so
            // the highest-ranked up-card brings it in with the same
            // clubs-low suit tie-break.
            if is_razz {
                (u8::MAX - rank, suit)
            } else {
                (rank, suit)
            }
        })
        .expect("at least one seat dealt an up card")
}

/// Replaces the chosen indexes in a seat's hand with fresh deck cards;
/// indexes must be unique and in range. If the deck runs dry mid-exchange,
/// the caller is expected to have reshuffled the burn pile back in first
/// (spec §4.5d) — this function only ever draws, it never reshuffles.
pub fn exchange_draw_cards(
    deck: &mut Deck,
    seat: &mut Seat,
    indexes: &[usize],
) -> Result<(), DealError> {
    let hand = seat.hand.as_mut().expect("seat must hold cards to draw");
    let mut seen = std::collections::HashSet::new();
    for &idx in indexes {
        if idx >= hand.len() {
            return Err(DealError::DiscardIndexOutOfRange(idx));
        }
        if !seen.insert(idx) {
            return Err(DealError::DuplicateDiscardIndex(idx));
        }
    }
    if deck.len() < indexes.len() {
        return Err(DealError::DeckUnderflow {
            needed: indexes.len(),
            available: deck.len(),
        });
    }
    for &idx in indexes {
        let fresh = deck.draw().expect("underflow checked above");
        hand[idx] = fresh;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn seats(n: usize) -> Vec<Option<Seat>> {
        (0..n)
            .map(|i| Some(Seat::new(format!("p{i}"), format!("p{i}"), 1000)))
            .collect()
    }

    #[test]
    fn heads_up_button_is_small_blind() {
        let mut s = seats(2);
        let (sb, bb) = collect_blinds(&mut s, 0, 5, 10);
        assert_eq!(sb, 0);
        assert_eq!(bb, 1);
        assert_eq!(s[0].as_ref().unwrap().bet, 5);
        assert_eq!(s[1].as_ref().unwrap().bet, 10);
    }

    #[test]
    fn three_handed_blinds_are_left_of_button() {
        let mut s = seats(3);
        let (sb, bb) = collect_blinds(&mut s, 0, 5, 10);
        assert_eq!(sb, 1);
        assert_eq!(bb, 2);
    }

    #[test]
    fn short_stack_blind_goes_all_in() {
        let mut s = seats(2);
        s[1].as_mut().unwrap().stack = 3;
        let (_, bb) = collect_blinds(&mut s, 0, 5, 10);
        assert_eq!(bb, 1);
        assert_eq!(s[1].as_ref().unwrap().bet, 3);
        assert_eq!(s[1].as_ref().unwrap().status, SeatStatus::AllIn);
    }

    #[test]
    fn empty_chairs_are_skipped_for_the_button() {
        let mut s = seats(3);
        s[1] = None;
        assert_eq!(move_button(&s, 0), 2);
    }

    #[test]
    fn deal_hole_cards_fails_cleanly_on_underflow() {
        let mut deck = Deck::standard();
        let mut s = seats(30);
        // 30 seats * 2 cards = 60 > 52
        assert!(deal_hole_cards(&mut deck, &mut s, 2).is_err());
    }

    #[test]
    fn bring_in_is_lowest_upcard_suit_broken() {
        let mut s = seats(2);
        s[0].as_mut().unwrap().up_cards.push(Card::new(Rank::Three, Suit::Spade));
        s[1].as_mut().unwrap().up_cards.push(Card::new(Rank::Three, Suit::Club));
        assert_eq!(determine_bring_in(&s, false), 1);
    }

    #[test]
    fn razz_bring_in_is_highest_upcard() {
        let mut s = seats(2);
        s[0].as_mut().unwrap().up_cards.push(Card::new(Rank::King, Suit::Spade));
        s[1].as_mut().unwrap().up_cards.push(Card::new(Rank::Three, Suit::Club));
        assert_eq!(determine_bring_in(&s, true), 0);
    }

    #[test]
    fn draw_exchange_rejects_duplicate_indexes() {
        let mut deck = Deck::standard();
        let mut seat = Seat::new("p".into(), "p".into(), 100);
        seat.hand = Some(deck.draw_n(5).unwrap());
        assert!(matches!(
            exchange_draw_cards(&mut deck, &mut seat, &[0, 0]),
            Err(DealError::DuplicateDiscardIndex(0))
        ));
    }
}
