use std::fmt::{Display, Formatter, Result};

/// `Two..=Ace`, internal value 2..=14 via [`Rank::value`]. "T" is rank 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Standard high value, 2..=14.
    pub fn value(&self) -> u8 {
        *self as u8 + 2
    }

    /// Bit mask with a single bit set at this rank's position (0..13).
    pub fn mask(&self) -> u16 {
        1 << (*self as u8)
    }

    /// Highest set bit of a rank-presence mask.
    pub fn from_mask(mask: u16) -> Self {
        Rank::from(15 - mask.leading_zeros() as u8)
    }
}

impl From<u8> for Rank {
    fn from(n: u8) -> Rank {
        match n {
            0 => Rank::Two,
            1 => Rank::Three,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            12 => Rank::Ace,
            _ => panic!("invalid rank index {n}"),
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Two => "2",
                Rank::Three => "3",
                Rank::Four => "4",
                Rank::Five => "5",
                Rank::Six => "6",
                Rank::Seven => "7",
                Rank::Eight => "8",
                Rank::Nine => "9",
                Rank::Ten => "T",
                Rank::Jack => "J",
                Rank::Queen => "Q",
                Rank::King => "K",
                Rank::Ace => "A",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_roundtrip() {
        for r in Rank::ALL {
            assert_eq!(r, Rank::from(r as u8));
        }
    }

    #[test]
    fn mask_roundtrip() {
        for r in Rank::ALL {
            assert_eq!(r, Rank::from_mask(r.mask()));
        }
    }

    #[test]
    fn ace_is_high() {
        assert_eq!(Rank::Ace.value(), 14);
        assert!(Rank::Ace > Rank::King);
    }
}
