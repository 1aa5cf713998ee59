use super::rank::Rank;

/// A high-hand category plus its deciding rank(s). Ordered `HighCard <
/// ... < StraightFlush`; ties within a category are broken by [`super::kicks::Kickers`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),
    OnePair(Rank),
    TwoPair(Rank, Rank),
    ThreeOAK(Rank),
    Straight(Rank),
    Flush(Rank),
    FullHouse(Rank, Rank),
    FourOAK(Rank),
    StraightFlush(Rank),
}

impl Ranking {
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(_, _) => 1,
            _ => 0,
        }
    }

    /// Rank-presence mask of the rank(s) already spent on the category,
    /// so the kicker search can exclude them.
    pub fn spent_mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) => hi.mask() | lo.mask(),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::FourOAK(hi)
            | Ranking::ThreeOAK(hi) => hi.mask(),
            Ranking::FullHouse(..)
            | Ranking::StraightFlush(..)
            | Ranking::Straight(..)
            | Ranking::Flush(..) => 0,
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::FullHouse(r1, r2) => write!(f, "Full House, {r1}s over {r2}s"),
            Ranking::TwoPair(r1, r2) => write!(f, "Two Pair, {r1}s and {r2}s"),
            Ranking::HighCard(r) => write!(f, "High Card, {r}"),
            Ranking::OnePair(r) => write!(f, "Pair of {r}s"),
            Ranking::ThreeOAK(r) => write!(f, "Three of a Kind, {r}s"),
            Ranking::Straight(r) => write!(f, "Straight, {r} high"),
            Ranking::FourOAK(r) => write!(f, "Four of a Kind, {r}s"),
            Ranking::Flush(r) => write!(f, "Flush, {r} high"),
            Ranking::StraightFlush(r) => write!(f, "Straight Flush, {r} high"),
        }
    }
}
