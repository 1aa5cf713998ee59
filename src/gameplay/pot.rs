use super::seat::{Chips, PlayerId, Seat, SeatStatus};
use serde::Serialize;

/// One tier of the pot: `amount` of chips, contested by `eligible_players`
/// (non-folded seats whose `total_bet` reached this tier). The lowest tier
/// is `main`, the rest are `side`, ascending (spec §3/§4.3).
#[derive(Debug, Clone, Serialize)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_players: Vec<PlayerId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Pot {
    pub main: Chips,
    pub side: Vec<SidePot>,
}

impl Pot {
    pub fn total(&self) -> Chips {
        self.main + self.side.iter().map(|p| p.amount).sum::<Chips>()
    }
}

/// Derives main + side pots from seats' `total_bet`, per spec §4.3: collect
/// distinct non-zero commitment tiers, have every contributor pay into each
/// tier up to its own commitment, and mark each tier's eligibility as the
/// non-folded seats that reached it. Reconstruction is exact: the returned
/// pot's total always equals the sum of every seat's `total_bet`.
pub fn collect_pots(seats: &[Option<Seat>]) -> Pot {
    let occupied: Vec<&Seat> = seats.iter().flatten().collect();
    let mut tiers: Vec<Chips> = occupied
        .iter()
        .map(|s| s.total_bet)
        .filter(|&b| b > 0)
        .collect();
    tiers.sort_unstable();
    tiers.dedup();

    let mut pots = Vec::with_capacity(tiers.len());
    let mut prev = 0;
    for &tier in &tiers {
        let amount: Chips = occupied
            .iter()
            .map(|s| s.total_bet.min(tier).saturating_sub(prev))
            .sum();
        let eligible_players: Vec<PlayerId> = occupied
            .iter()
            .filter(|s| s.status != SeatStatus::Folded && s.total_bet >= tier)
            .map(|s| s.player_id.clone())
            .collect();
        pots.push(SidePot {
            amount,
            eligible_players,
        });
        prev = tier;
    }

    let mut pots = pots.into_iter();
    let main = pots.next().map(|p| p.amount).unwrap_or(0);
    let side: Vec<SidePot> = pots.collect();
    Pot { main, side }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::seat::Seat;

    fn seat(id: &str, total_bet: Chips, status: SeatStatus) -> Option<Seat> {
        let mut s = Seat::new(id.to_string(), id.to_string(), 0);
        s.total_bet = total_bet;
        s.status = status;
        Some(s)
    }

    #[test]
    fn three_way_all_in_produces_main_and_one_side_pot() {
        // A all-in for 50, B and C cover to 100 each.
        let seats = vec![
            seat("A", 50, SeatStatus::AllIn),
            seat("B", 100, SeatStatus::Active),
            seat("C", 100, SeatStatus::Active),
        ];
        let pot = collect_pots(&seats);
        assert_eq!(pot.main, 150);
        assert_eq!(pot.side.len(), 1);
        assert_eq!(pot.side[0].amount, 100);
        assert_eq!(pot.side[0].eligible_players, vec!["B", "C"]);
        assert_eq!(pot.total(), 250);
    }

    #[test]
    fn folded_seat_still_funds_pot_but_is_not_eligible() {
        let seats = vec![
            seat("A", 50, SeatStatus::Folded),
            seat("B", 50, SeatStatus::Active),
        ];
        let pot = collect_pots(&seats);
        assert_eq!(pot.main, 100);
        assert_eq!(pot.side.len(), 0);
        assert_eq!(pot.total(), 100);
    }

    #[test]
    fn no_commitments_yields_empty_pot() {
        let seats = vec![seat("A", 0, SeatStatus::Active)];
        let pot = collect_pots(&seats);
        assert_eq!(pot.total(), 0);
        assert_eq!(pot.side.len(), 0);
    }

    #[test]
    fn reconstruction_is_exact_across_four_tiers() {
        let seats = vec![
            seat("A", 10, SeatStatus::AllIn),
            seat("B", 30, SeatStatus::AllIn),
            seat("C", 70, SeatStatus::AllIn),
            seat("D", 70, SeatStatus::Active),
        ];
        let pot = collect_pots(&seats);
        let sum_total_bet: Chips = seats.iter().flatten().map(|s| s.total_bet).sum();
        assert_eq!(pot.total(), sum_total_bet);
        assert_eq!(pot.side.len(), 2);
    }
}
