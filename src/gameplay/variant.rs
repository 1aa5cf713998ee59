use crate::cards::Street;
use serde::{Deserialize, Serialize};

/// Betting structure a variant (or a room's configuration of it) is played
/// under. Dictates how [`crate::gameplay::betting::ActionValidator`] derives
/// legal bet sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BettingStructure {
    NoLimit,
    PotLimit,
    FixedLimit,
}

/// Which of the three dealing families a variant belongs to: flop games
/// share a board and a button, Stud games deal up/down cards with no board,
/// Draw games deal a private hand with exchange rounds. OFC is its own
/// family entirely and is never driven through [`crate::gameplay::engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Flop,
    Stud,
    Draw,
    Ofc,
}

/// Canonical variant codes from spec §6. The list is configuration-driven
/// in spirit (a deploy could add more), but the server only ships dispatch
/// tables for these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVariant {
    Nlh,
    Plo,
    Plo8,
    SevenCardStud,
    SevenCardStud8,
    Razz,
    TripleDraw27,
    Badugi,
    Ofc,
}

/// Per-variant rules table: dealing plan, betting structure, hand size and
/// the few boolean knobs the engine needs to branch on. This is the
/// enum-keyed dispatch table spec §9 calls for in place of a stringly-typed
/// `gameVariant` switch scattered through the code.
pub struct VariantProfile {
    pub variant: GameVariant,
    pub family: Family,
    pub betting: BettingStructure,
    pub streets: &'static [Street],
    /// Cards dealt face down to each seat at the start of a hand (hole
    /// cards for flop/draw games; 2 down + 1 up for Stud counts only the
    /// down cards here, the up card is dealt separately by the dealer).
    pub hole_cards: usize,
    pub has_button: bool,
    pub has_antes: bool,
    pub max_draw_count: usize,
    pub is_hi_lo: bool,
    /// Ace is low and straights/flushes don't count (Razz); `false` means
    /// hi-hand evaluation (button/Stud-hi games) or 2-7 lowball (ace high,
    /// straights/flushes count against you, handled separately by
    /// `is_deuce_seven`).
    pub is_ace_to_five_low: bool,
    pub is_deuce_seven_low: bool,
    pub is_badugi: bool,
}

impl GameVariant {
    pub fn profile(&self) -> VariantProfile {
        use BettingStructure::*;
        use Family::*;
        match self {
            GameVariant::Nlh => VariantProfile {
                variant: *self,
                family: Flop,
                betting: NoLimit,
                streets: Street::HOLDEM,
                hole_cards: 2,
                has_button: true,
                has_antes: false,
                max_draw_count: 0,
                is_hi_lo: false,
                is_ace_to_five_low: false,
                is_deuce_seven_low: false,
                is_badugi: false,
            },
            GameVariant::Plo => VariantProfile {
                variant: *self,
                family: Flop,
                betting: PotLimit,
                streets: Street::HOLDEM,
                hole_cards: 4,
                has_button: true,
                has_antes: false,
                max_draw_count: 0,
                is_hi_lo: false,
                is_ace_to_five_low: false,
                is_deuce_seven_low: false,
                is_badugi: false,
            },
            GameVariant::Plo8 => VariantProfile {
                variant: *self,
                family: Flop,
                betting: PotLimit,
                streets: Street::HOLDEM,
                hole_cards: 4,
                has_button: true,
                has_antes: false,
                max_draw_count: 0,
                is_hi_lo: true,
                is_ace_to_five_low: true,
                is_deuce_seven_low: false,
                is_badugi: false,
            },
            GameVariant::SevenCardStud => VariantProfile {
                variant: *self,
                family: Stud,
                betting: FixedLimit,
                streets: Street::STUD,
                hole_cards: 2,
                has_button: false,
                has_antes: true,
                max_draw_count: 0,
                is_hi_lo: false,
                is_ace_to_five_low: false,
                is_deuce_seven_low: false,
                is_badugi: false,
            },
            GameVariant::SevenCardStud8 => VariantProfile {
                variant: *self,
                family: Stud,
                betting: FixedLimit,
                streets: Street::STUD,
                hole_cards: 2,
                has_button: false,
                has_antes: true,
                max_draw_count: 0,
                is_hi_lo: true,
                is_ace_to_five_low: true,
                is_deuce_seven_low: false,
                is_badugi: false,
            },
            GameVariant::Razz => VariantProfile {
                variant: *self,
                family: Stud,
                betting: FixedLimit,
                streets: Street::STUD,
                hole_cards: 2,
                has_button: false,
                has_antes: true,
                max_draw_count: 0,
                is_hi_lo: false,
                is_ace_to_five_low: true,
                is_deuce_seven_low: false,
                is_badugi: false,
            },
            GameVariant::TripleDraw27 => VariantProfile {
                variant: *self,
                family: Draw,
                betting: FixedLimit,
                streets: Street::TRIPLE_DRAW,
                hole_cards: 5,
                has_button: true,
                has_antes: false,
                max_draw_count: 5,
                is_hi_lo: false,
                is_ace_to_five_low: false,
                is_deuce_seven_low: true,
                is_badugi: false,
            },
            GameVariant::Badugi => VariantProfile {
                variant: *self,
                family: Draw,
                betting: FixedLimit,
                streets: Street::TRIPLE_DRAW,
                hole_cards: 4,
                has_button: true,
                has_antes: false,
                max_draw_count: 4,
                is_hi_lo: false,
                is_ace_to_five_low: false,
                is_deuce_seven_low: false,
                is_badugi: true,
            },
            GameVariant::Ofc => VariantProfile {
                variant: *self,
                family: Ofc,
                betting: NoLimit, // unused: OFC has no betting rounds
                streets: &[],
                hole_cards: 0,
                has_button: false,
                has_antes: false,
                max_draw_count: 0,
                is_hi_lo: false,
                is_ace_to_five_low: false,
                is_deuce_seven_low: false,
                is_badugi: false,
            },
        }
    }
}

impl std::fmt::Display for GameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GameVariant::Nlh => "NLH",
                GameVariant::Plo => "PLO",
                GameVariant::Plo8 => "PLO8",
                GameVariant::SevenCardStud => "7CS",
                GameVariant::SevenCardStud8 => "7CS8",
                GameVariant::Razz => "RAZZ",
                GameVariant::TripleDraw27 => "2-7_TD",
                GameVariant::Badugi => "BADUGI",
                GameVariant::Ofc => "OFC",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plo8_is_hi_lo_and_pot_limit() {
        let p = GameVariant::Plo8.profile();
        assert!(p.is_hi_lo);
        assert_eq!(p.betting, BettingStructure::PotLimit);
        assert_eq!(p.hole_cards, 4);
    }

    #[test]
    fn razz_is_ace_to_five_without_hi_lo() {
        let p = GameVariant::Razz.profile();
        assert!(p.is_ace_to_five_low);
        assert!(!p.is_hi_lo);
    }

    #[test]
    fn stud_variants_have_no_button() {
        assert!(!GameVariant::SevenCardStud.profile().has_button);
        assert!(GameVariant::Nlh.profile().has_button);
    }
}
