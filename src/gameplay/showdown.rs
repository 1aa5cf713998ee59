use super::room::Room;
use super::seat::{Chips, PlayerId, SeatStatus};
use super::variant::{Family, VariantProfile};
use crate::cards::badugi::best_badugi;
use crate::cards::lowball::{best_ace_to_five, best_deuce_seven_low, LowValue};
use crate::cards::{best_of, combinations, Card, Hand, Strength};
use serde::Serialize;
use std::collections::HashMap;

/// One seat's award from a single showdown (spec §4.6 output row).
#[derive(Debug, Clone, Serialize)]
pub struct WinnerShare {
    pub player_id: PlayerId,
    pub player_name: String,
    pub hand: Vec<Card>,
    pub hand_rank: String,
    pub amount: Chips,
}

/// A contesting seat's revealed hand, shown whether or not it won anything.
#[derive(Debug, Clone, Serialize)]
pub struct RevealedHand {
    pub player_id: PlayerId,
    pub player_name: String,
    pub hand: Vec<Card>,
    pub hand_rank: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowdownResult {
    pub winners: Vec<WinnerShare>,
    pub all_hands: Vec<RevealedHand>,
    pub is_uncontested: bool,
}

/// A seat's evaluated showing, dispatched on variant family (spec §4.6.b).
enum Showing {
    Hi(Strength),
    Lo(LowValue),
    HiLo { hi: Strength, lo: Option<LowValue> },
    DeuceSeven(crate::cards::lowball::DeuceSevenLow),
    Badugi(crate::cards::badugi::Badugi),
}

impl Showing {
    fn describe(&self) -> String {
        match self {
            Showing::Hi(s) => s.to_string(),
            Showing::Lo(lo) => lo.to_string(),
            Showing::HiLo { hi, lo: Some(lo) } => format!("{hi} / {lo}"),
            Showing::HiLo { hi, lo: None } => format!("{hi} (no qualifying low)"),
            Showing::DeuceSeven(d) => d.to_string(),
            Showing::Badugi(b) => b.to_string(),
        }
    }
}

/// Best hi hand from exactly 2 of `hole` and 3 of `board` (spec §4.1 PLO
/// rule: 10 combinations, the best is selected).
pub fn best_omaha_hand(hole: &[Card], board: &[Card]) -> Strength {
    combinations(hole.len(), 2)
        .into_iter()
        .flat_map(|h| combinations(board.len(), 3).into_iter().map(move |b| (h.clone(), b)))
        .map(|(h, b)| {
            let mut five: Vec<Card> = h.iter().map(|&i| hole[i]).collect();
            five.extend(b.iter().map(|&i| board[i]));
            Strength::from(Hand::from(&five))
        })
        .max()
        .expect("4 hole x 5 board always yields 10 combinations")
}

/// Best qualifying (8-or-better) ace-to-five low from the same 2-hole x
/// 3-board constraint PLO8 imposes on the hi side. `None` if no combination
/// qualifies.
pub fn best_omaha_low(hole: &[Card], board: &[Card]) -> Option<LowValue> {
    combinations(hole.len(), 2)
        .into_iter()
        .flat_map(|h| combinations(board.len(), 3).into_iter().map(move |b| (h.clone(), b)))
        .filter_map(|(h, b)| {
            let mut five: Vec<Card> = h.iter().map(|&i| hole[i]).collect();
            five.extend(b.iter().map(|&i| board[i]));
            let low = best_ace_to_five(&five);
            low.qualifies_for_low().then_some(low)
        })
        .min()
}

fn evaluate(profile: &VariantProfile, hole: &[Card], board: &[Card]) -> Showing {
    match profile.variant {
        crate::gameplay::variant::GameVariant::Nlh => {
            let mut all = hole.to_vec();
            all.extend_from_slice(board);
            Showing::Hi(best_of(&all))
        }
        crate::gameplay::variant::GameVariant::Plo => Showing::Hi(best_omaha_hand(hole, board)),
        crate::gameplay::variant::GameVariant::Plo8 => Showing::HiLo {
            hi: best_omaha_hand(hole, board),
            lo: best_omaha_low(hole, board),
        },
        crate::gameplay::variant::GameVariant::SevenCardStud => Showing::Hi(best_of(hole)),
        crate::gameplay::variant::GameVariant::SevenCardStud8 => Showing::HiLo {
            hi: best_of(hole),
            lo: {
                let low = best_ace_to_five(hole);
                low.qualifies_for_low().then_some(low)
            },
        },
        crate::gameplay::variant::GameVariant::Razz => Showing::Lo(best_ace_to_five(hole)),
        crate::gameplay::variant::GameVariant::TripleDraw27 => {
            Showing::DeuceSeven(best_deuce_seven_low(hole))
        }
        crate::gameplay::variant::GameVariant::Badugi => Showing::Badugi(best_badugi(hole)),
        crate::gameplay::variant::GameVariant::Ofc => {
            unreachable!("OFC never reaches the betting showdown manager")
        }
    }
}

/// Seat indices in the order action would start (first seat left of the
/// button), used to break odd-chip ties (spec §4.6.d "first-to-act from
/// button").
fn first_to_act_order(button: usize, n: usize) -> Vec<usize> {
    (1..=n).map(|k| (button + k) % n).collect()
}

/// Splits `amount` evenly across `winners`, handing any remainder chips one
/// at a time to the earliest winners in `order`.
fn split_with_odd_chip(amount: Chips, winners: &[usize], order: &[usize]) -> HashMap<usize, Chips> {
    let n = winners.len() as Chips;
    let share = amount / n;
    let remainder = (amount % n) as usize;
    let mut out: HashMap<usize, Chips> = winners.iter().map(|&w| (w, share)).collect();
    let ordered: Vec<usize> = order.iter().copied().filter(|i| winners.contains(i)).collect();
    for &w in ordered.iter().take(remainder) {
        *out.get_mut(&w).unwrap() += 1;
    }
    out
}

/// Resolves a room in `Status::Showdown`: evaluates every non-folded seat's
/// hand per variant, awards every pot tier (hi-only or hi/lo split), credits
/// stacks, and zeroes the pot (spec §4.6). Panics if called outside
/// showdown or on an `Ofc` room — callers route OFC hands through
/// `gameplay::ofc` instead.
pub fn resolve_showdown(room: &mut Room) -> ShowdownResult {
    let profile = room.variant.profile();
    assert_ne!(profile.family, Family::Ofc, "OFC rooms never reach the betting showdown manager");

    let contesting: Vec<usize> = room
        .seats
        .iter()
        .enumerate()
        .filter(|(_, s)| matches!(s, Some(seat) if seat.status != SeatStatus::Folded))
        .map(|(i, _)| i)
        .collect();

    if contesting.len() == 1 {
        let idx = contesting[0];
        let amount = room.state.pot.total();
        let seat = room.seats[idx].as_mut().expect("contesting seat is occupied");
        seat.stack += amount;
        let winner = WinnerShare {
            player_id: seat.player_id.clone(),
            player_name: seat.display_name.clone(),
            hand: Vec::new(),
            hand_rank: "Uncontested".to_string(),
            amount,
        };
        room.state.pot = super::pot::Pot::default();
        return ShowdownResult {
            winners: vec![winner],
            all_hands: Vec::new(),
            is_uncontested: true,
        };
    }

    let showings: HashMap<usize, Showing> = contesting
        .iter()
        .map(|&i| {
            let seat = room.seats[i].as_ref().expect("contesting seat is occupied");
            let hole = seat.hand.as_deref().unwrap_or(&[]);
            (i, evaluate(&profile, hole, &room.state.board))
        })
        .collect();

    let order = first_to_act_order(room.button_index, room.seats.len());
    let mut amounts: HashMap<usize, Chips> = HashMap::new();

    // Spec §4.6 step 2 iterates side pots largest-first then main; the
    // resulting per-seat totals are order-independent, this only fixes the
    // order winners would be reported in a streaming implementation.
    let mut tiers: Vec<(Chips, Vec<PlayerId>)> = room
        .state
        .pot
        .side
        .iter()
        .rev()
        .map(|p| (p.amount, p.eligible_players.clone()))
        .collect();
    tiers.push((room.state.pot.main, Vec::new())); // main's eligibility is recovered below

    for (amount, eligible_ids) in tiers {
        if amount == 0 {
            continue;
        }
        // Every contesting (non-folded) seat is eligible for the main
        // pot: its tier is the global minimum nonzero `total_bet`, which
        // by construction is <= every seat's own commitment.
        let eligible: Vec<usize> = if eligible_ids.is_empty() {
            contesting.clone()
        } else {
            contesting
                .iter()
                .copied()
                .filter(|i| {
                    let pid = &room.seats[*i].as_ref().unwrap().player_id;
                    eligible_ids.contains(pid)
                })
                .collect()
        };
        if eligible.is_empty() {
            continue;
        }
        award_tier(amount, &eligible, &showings, profile.is_hi_lo, &order, &mut amounts);
    }

    for (&idx, &amount) in &amounts {
        room.seats[idx].as_mut().expect("winner seat is occupied").stack += amount;
    }
    room.state.pot = super::pot::Pot::default();

    let mut winners: Vec<WinnerShare> = amounts
        .into_iter()
        .map(|(idx, amount)| {
            let seat = room.seats[idx].as_ref().expect("winner seat is occupied");
            WinnerShare {
                player_id: seat.player_id.clone(),
                player_name: seat.display_name.clone(),
                hand: seat.hand.clone().unwrap_or_default(),
                hand_rank: showings[&idx].describe(),
                amount,
            }
        })
        .collect();
    winners.sort_by_key(|w| std::cmp::Reverse(w.amount));

    let all_hands: Vec<RevealedHand> = contesting
        .iter()
        .map(|&idx| {
            let seat = room.seats[idx].as_ref().expect("contesting seat is occupied");
            RevealedHand {
                player_id: seat.player_id.clone(),
                player_name: seat.display_name.clone(),
                hand: seat.hand.clone().unwrap_or_default(),
                hand_rank: showings[&idx].describe(),
            }
        })
        .collect();

    ShowdownResult {
        winners,
        all_hands,
        is_uncontested: false,
    }
}

/// Awards one pot tier among `eligible` seats, splitting hi/lo if the
/// variant calls for it (spec §4.6.d), and accumulates into `amounts`.
fn award_tier(
    amount: Chips,
    eligible: &[usize],
    showings: &HashMap<usize, Showing>,
    is_hi_lo: bool,
    order: &[usize],
    amounts: &mut HashMap<usize, Chips>,
) {
    if is_hi_lo {
        let hi_strength = |i: &usize| match &showings[i] {
            Showing::HiLo { hi, .. } => *hi,
            _ => unreachable!("hi/lo variant must produce HiLo showings"),
        };
        let lo_value = |i: &usize| match &showings[i] {
            Showing::HiLo { lo, .. } => lo.clone(),
            _ => unreachable!("hi/lo variant must produce HiLo showings"),
        };

        let best_hi = eligible.iter().map(hi_strength).max().unwrap();
        let hi_winners: Vec<usize> = eligible.iter().copied().filter(|i| hi_strength(i) == best_hi).collect();

        let qualifying_lo: Vec<(usize, LowValue)> =
            eligible.iter().filter_map(|&i| lo_value(&i).map(|v| (i, v))).collect();

        if qualifying_lo.is_empty() {
            for (seat, share) in split_with_odd_chip(amount, &hi_winners, order) {
                *amounts.entry(seat).or_insert(0) += share;
            }
            return;
        }

        let best_lo = qualifying_lo.iter().map(|(_, v)| v.clone()).min().unwrap();
        let lo_winners: Vec<usize> = qualifying_lo
            .into_iter()
            .filter(|(_, v)| *v == best_lo)
            .map(|(i, _)| i)
            .collect();

        let hi_amount = amount / 2 + amount % 2;
        let lo_amount = amount / 2;
        for (seat, share) in split_with_odd_chip(hi_amount, &hi_winners, order) {
            *amounts.entry(seat).or_insert(0) += share;
        }
        for (seat, share) in split_with_odd_chip(lo_amount, &lo_winners, order) {
            *amounts.entry(seat).or_insert(0) += share;
        }
        return;
    }

    let key = |i: &usize| -> LowValueOrStrength {
        match &showings[i] {
            Showing::Hi(s) => LowValueOrStrength::Hi(*s),
            Showing::Lo(v) => LowValueOrStrength::Lo(v.clone()),
            Showing::DeuceSeven(d) => LowValueOrStrength::DeuceSeven(*d),
            Showing::Badugi(b) => LowValueOrStrength::Badugi(b.clone()),
            Showing::HiLo { .. } => unreachable!("hi-only dispatch hit a HiLo showing"),
        }
    };
    let best = eligible.iter().map(key).max().unwrap();
    let winners: Vec<usize> = eligible.iter().copied().filter(|i| key(i) == best).collect();
    for (seat, share) in split_with_odd_chip(amount, &winners, order) {
        *amounts.entry(seat).or_insert(0) += share;
    }
}

/// Uniform "bigger is better" key across the four non-hi-lo evaluators, so
/// the hi-only award path can take a single `max()` regardless of variant.
/// Low-hand variants (`Lo`, `DeuceSeven`) are wrapped so that their natural
/// "lower is better" order inverts to fit this key's "higher wins".
#[derive(Debug, Clone, PartialEq, Eq)]
enum LowValueOrStrength {
    Hi(Strength),
    Lo(LowValue),
    DeuceSeven(crate::cards::lowball::DeuceSevenLow),
    Badugi(crate::cards::badugi::Badugi),
}

impl PartialOrd for LowValueOrStrength {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LowValueOrStrength {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (LowValueOrStrength::Hi(a), LowValueOrStrength::Hi(b)) => a.cmp(b),
            (LowValueOrStrength::Lo(a), LowValueOrStrength::Lo(b)) => b.cmp(a),
            (LowValueOrStrength::DeuceSeven(a), LowValueOrStrength::DeuceSeven(b)) => {
                if a == b {
                    std::cmp::Ordering::Equal
                } else if a.beats(b) {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Less
                }
            }
            (LowValueOrStrength::Badugi(a), LowValueOrStrength::Badugi(b)) => {
                if a == b {
                    std::cmp::Ordering::Equal
                } else if a.beats(b) {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Less
                }
            }
            _ => unreachable!("a single hi-only award never mixes evaluator families"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::config::RoomConfig;
    use crate::gameplay::room::Room;
    use crate::gameplay::state::Status;
    use crate::gameplay::variant::GameVariant;
    use crate::cards::{Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn heads_up_fold_awards_entire_pot_uncontested() {
        let mut room = Room::new("ABCDEF".into(), 2, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.sit_down(0, "a".into(), "Alice".into(), 500).unwrap();
        room.sit_down(1, "b".into(), "Bob".into(), 500).unwrap();
        room.seats[0].as_mut().unwrap().status = SeatStatus::Folded;
        room.seats[0].as_mut().unwrap().total_bet = 5;
        room.seats[1].as_mut().unwrap().total_bet = 10;
        room.state.pot.main = 15;
        room.state.status = Status::Showdown;

        let result = resolve_showdown(&mut room);
        assert!(result.is_uncontested);
        assert_eq!(result.winners.len(), 1);
        assert_eq!(result.winners[0].player_id, "b");
        assert_eq!(result.winners[0].amount, 15);
        assert_eq!(room.seats[1].as_ref().unwrap().stack, 505);
        assert_eq!(room.state.pot.total(), 0);
    }

    #[test]
    fn plo_holder_with_flush_beats_pair_of_aces() {
        let mut room = Room::new("ABCDEF".into(), 2, GameVariant::Plo, RoomConfig::new(5, 10), false);
        room.sit_down(0, "a".into(), "Alice".into(), 500).unwrap();
        room.sit_down(1, "b".into(), "Bob".into(), 500).unwrap();
        room.seats[0].as_mut().unwrap().hand = Some(vec![
            card(Rank::Ace, Suit::Spade),
            card(Rank::King, Suit::Spade),
            card(Rank::Queen, Suit::Spade),
            card(Rank::Jack, Suit::Spade),
        ]);
        room.seats[1].as_mut().unwrap().hand = Some(vec![
            card(Rank::Ace, Suit::Heart),
            card(Rank::Ace, Suit::Diamond),
            card(Rank::Two, Suit::Club),
            card(Rank::Three, Suit::Club),
        ]);
        room.state.board = vec![
            card(Rank::Ten, Suit::Spade),
            card(Rank::Nine, Suit::Spade),
            card(Rank::Eight, Suit::Diamond),
            card(Rank::Seven, Suit::Club),
            card(Rank::Two, Suit::Heart),
        ];
        room.seats[0].as_mut().unwrap().total_bet = 100;
        room.seats[1].as_mut().unwrap().total_bet = 100;
        room.state.pot.main = 200;
        room.state.status = Status::Showdown;

        let result = resolve_showdown(&mut room);
        assert_eq!(result.winners.len(), 1);
        assert_eq!(result.winners[0].player_id, "a");
        assert_eq!(result.winners[0].amount, 200);
    }

    #[test]
    fn three_way_all_in_splits_main_and_side_pot_by_eligibility() {
        let mut room = Room::new("ABCDEF".into(), 3, GameVariant::Nlh, RoomConfig::new(1, 2), false);
        room.sit_down(0, "a".into(), "A".into(), 0).unwrap();
        room.sit_down(1, "b".into(), "B".into(), 0).unwrap();
        room.sit_down(2, "c".into(), "C".into(), 0).unwrap();

        room.seats[0].as_mut().unwrap().total_bet = 50;
        room.seats[0].as_mut().unwrap().status = SeatStatus::AllIn;
        room.seats[0].as_mut().unwrap().hand = Some(vec![
            card(Rank::Two, Suit::Club),
            card(Rank::Seven, Suit::Diamond),
        ]);

        room.seats[1].as_mut().unwrap().total_bet = 100;
        room.seats[1].as_mut().unwrap().hand = Some(vec![
            card(Rank::Ace, Suit::Spade),
            card(Rank::Ace, Suit::Heart),
        ]);

        room.seats[2].as_mut().unwrap().total_bet = 100;
        room.seats[2].as_mut().unwrap().hand = Some(vec![
            card(Rank::King, Suit::Spade),
            card(Rank::King, Suit::Heart),
        ]);

        room.state.board = vec![
            card(Rank::Two, Suit::Spade),
            card(Rank::Five, Suit::Diamond),
            card(Rank::Nine, Suit::Club),
            card(Rank::Jack, Suit::Heart),
            card(Rank::Three, Suit::Diamond),
        ];
        room.state.pot = super::super::pot::collect_pots(&room.seats);
        assert_eq!(room.state.pot.main, 150);
        assert_eq!(room.state.pot.side[0].amount, 100);
        room.state.status = Status::Showdown;

        let result = resolve_showdown(&mut room);
        let total_awarded: Chips = result.winners.iter().map(|w| w.amount).sum();
        assert_eq!(total_awarded, 250);
        // B (aces) beats both A and C on every pot tier it's eligible for.
        let b_award = result.winners.iter().find(|w| w.player_id == "b").unwrap();
        assert_eq!(b_award.amount, 250);
    }

    #[test]
    fn plo8_no_qualifying_low_lets_hi_scoop() {
        let mut room = Room::new("ABCDEF".into(), 2, GameVariant::Plo8, RoomConfig::new(5, 10), false);
        room.sit_down(0, "a".into(), "Alice".into(), 500).unwrap();
        room.sit_down(1, "b".into(), "Bob".into(), 500).unwrap();
        room.seats[0].as_mut().unwrap().hand = Some(vec![
            card(Rank::Ace, Suit::Spade),
            card(Rank::King, Suit::Spade),
            card(Rank::Queen, Suit::Spade),
            card(Rank::Jack, Suit::Spade),
        ]);
        room.seats[1].as_mut().unwrap().hand = Some(vec![
            card(Rank::Ace, Suit::Heart),
            card(Rank::Ace, Suit::Diamond),
            card(Rank::Two, Suit::Club),
            card(Rank::Three, Suit::Club),
        ]);
        room.state.board = vec![
            card(Rank::Ten, Suit::Spade),
            card(Rank::Nine, Suit::Spade),
            card(Rank::King, Suit::Diamond),
            card(Rank::King, Suit::Club),
            card(Rank::Queen, Suit::Heart),
        ];
        room.seats[0].as_mut().unwrap().total_bet = 100;
        room.seats[1].as_mut().unwrap().total_bet = 100;
        room.state.pot.main = 200;
        room.state.status = Status::Showdown;

        let result = resolve_showdown(&mut room);
        assert_eq!(result.winners.len(), 1);
        assert_eq!(result.winners[0].amount, 200);
    }

    #[test]
    fn odd_chip_goes_to_first_to_act_from_button_on_a_chop() {
        let mut room = Room::new("ABCDEF".into(), 2, GameVariant::Nlh, RoomConfig::new(5, 10), false);
        room.sit_down(0, "a".into(), "Alice".into(), 500).unwrap();
        room.sit_down(1, "b".into(), "Bob".into(), 500).unwrap();
        room.button_index = 0;
        let same_hand = vec![card(Rank::Ace, Suit::Spade), card(Rank::King, Suit::Club)];
        room.seats[0].as_mut().unwrap().hand = Some(same_hand.clone());
        room.seats[1].as_mut().unwrap().hand = Some(same_hand);
        room.state.board = vec![
            card(Rank::Two, Suit::Heart),
            card(Rank::Five, Suit::Diamond),
            card(Rank::Nine, Suit::Club),
            card(Rank::Jack, Suit::Spade),
            card(Rank::Three, Suit::Diamond),
        ];
        room.seats[0].as_mut().unwrap().total_bet = 51;
        room.seats[1].as_mut().unwrap().total_bet = 51;
        room.state.pot.main = 101;
        room.state.status = Status::Showdown;

        let result = resolve_showdown(&mut room);
        // button=0, first-to-act order is [1, 0] heads-up: seat 1 gets the odd chip.
        let seat1_amount = result.winners.iter().find(|w| w.player_id == "b").unwrap().amount;
        assert_eq!(seat1_amount, 51);
    }
}
