/// A betting round within a hand. Variants advance through different
/// subsets of these in a fixed order; see `gameplay::variant::VariantProfile`
/// for the per-variant street sequence.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum Street {
    /// Hold'em/Omaha pre-flop, Draw's first betting round, OFC's initial set.
    Pref,
    Flop,
    Turn,
    Rive,
    /// Seven Card Stud, Razz: 3rd through 7th street.
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    /// Draw variants: each betting round is followed by a card exchange.
    FirstDraw,
    SecondDraw,
    ThirdDraw,
}

impl Street {
    pub const HOLDEM: &'static [Self] = &[Self::Pref, Self::Flop, Self::Turn, Self::Rive];
    pub const STUD: &'static [Self] = &[
        Self::Third,
        Self::Fourth,
        Self::Fifth,
        Self::Sixth,
        Self::Seventh,
    ];
    pub const SINGLE_DRAW: &'static [Self] = &[Self::Pref, Self::FirstDraw];
    pub const TRIPLE_DRAW: &'static [Self] = &[
        Self::Pref,
        Self::FirstDraw,
        Self::SecondDraw,
        Self::ThirdDraw,
    ];

    /// Number of community cards visible on the board once this street is
    /// reached, for flop-game variants. Zero for Stud/Draw, which have no
    /// shared board.
    pub const fn n_board_cards(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive => 5,
            _ => 0,
        }
    }

    pub fn next(&self, sequence: &[Self]) -> Option<Self> {
        let i = sequence.iter().position(|s| s == self)?;
        sequence.get(i + 1).copied()
    }

    pub fn is_first(&self, sequence: &[Self]) -> bool {
        sequence.first() == Some(self)
    }

    pub fn is_last(&self, sequence: &[Self]) -> bool {
        sequence.last() == Some(self)
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Pref => "preflop",
                Self::Flop => "flop",
                Self::Turn => "turn",
                Self::Rive => "river",
                Self::Third => "third street",
                Self::Fourth => "fourth street",
                Self::Fifth => "fifth street",
                Self::Sixth => "sixth street",
                Self::Seventh => "seventh street",
                Self::FirstDraw => "first draw",
                Self::SecondDraw => "second draw",
                Self::ThirdDraw => "third draw",
            }
        )
    }
}
