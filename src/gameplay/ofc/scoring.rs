use super::royalty::royalties;
use super::state::{Board, PlayerOFC};
use crate::cards::wild::best_strength_with_wilds;
use crate::gameplay::seat::Chips;

/// `rank(bottom) < rank(middle)` or `rank(middle) < rank(top)` (spec §4.7).
/// The shared evaluator's [`crate::cards::Ranking`] total order already
/// spans both the 3-card top-row categories and the full 5-card ones, so a
/// direct `Strength` comparison is exactly the rule.
pub fn is_fouled(board: &Board) -> bool {
    let top = best_strength_with_wilds(&board.top);
    let middle = best_strength_with_wilds(&board.middle);
    let bottom = best_strength_with_wilds(&board.bottom);
    bottom < middle || middle < top
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandScore {
    pub fouled: bool,
    pub royalties: u32,
}

pub fn score_board(board: &Board) -> HandScore {
    let fouled = is_fouled(board);
    HandScore {
        fouled,
        royalties: if fouled { 0 } else { royalties(board) },
    }
}

/// Chip change for every seat after JOPT pairwise scoring across every
/// ordered pair `(i, j)` with `i < j` (spec §4.7).
pub fn settle(players: &[PlayerOFC], big_blind: Chips) -> Vec<i64> {
    let scores: Vec<HandScore> = players.iter().map(|p| score_board(&p.board)).collect();
    let mut points = vec![0i64; players.len()];

    for i in 0..players.len() {
        for j in (i + 1)..players.len() {
            let (pi, pj) = pairwise_points(&players[i].board, scores[i], &players[j].board, scores[j]);
            points[i] += pi;
            points[j] += pj;
        }
    }

    points.into_iter().map(|p| p * big_blind as i64).collect()
}

/// Points for one ordered matchup, from `a`'s perspective; `b`'s points are
/// always the exact negation since this is a zero-sum exchange.
fn pairwise_points(a: &Board, a_score: HandScore, b: &Board, b_score: HandScore) -> (i64, i64) {
    if a_score.fouled && b_score.fouled {
        return (0, 0);
    }
    if a_score.fouled {
        return (-6, 6);
    }
    if b_score.fouled {
        return (6, -6);
    }

    let mut a_points = 0i64;
    let top = best_strength_with_wilds(&a.top).cmp(&best_strength_with_wilds(&b.top));
    let middle = best_strength_with_wilds(&a.middle).cmp(&best_strength_with_wilds(&b.middle));
    let bottom = best_strength_with_wilds(&a.bottom).cmp(&best_strength_with_wilds(&b.bottom));
    for row in [top, middle, bottom] {
        a_points += match row {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        };
    }
    if a_points == 3 {
        a_points += 3;
    } else if a_points == -3 {
        a_points -= 3;
    }

    let royalty_net = a_score.royalties as i64 - b_score.royalties as i64;
    (a_points + royalty_net, -(a_points + royalty_net))
}
