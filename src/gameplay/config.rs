use super::seat::Chips;
use super::variant::GameVariant;
use serde::{Deserialize, Serialize};

/// Per-room configuration (spec §6 table). Every tunable beyond the blinds
/// is `Option`, defaulted against `big_blind` at resolution time rather than
/// hardcoded — mirrors the "derive defaults from BB" rule the table itself
/// states for buy-ins, ante and fixed-limit bet sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub buy_in_min: Option<Chips>,
    pub buy_in_max: Option<Chips>,
    pub allowed_games: Option<Vec<GameVariant>>,
    pub time_limit: Option<u64>,
    pub stud_ante: Option<Chips>,
    pub password: Option<String>,

    /// Seconds a seat has to act before auto-fold/check (§4.9). Default
    /// resolved in DESIGN.md's Open-Question decision.
    pub turn_timeout_secs: u64,
    /// Action-token time-to-live in seconds (§4.9).
    pub action_token_ttl_secs: u64,
    /// Grace period before the scheduler auto-starts an eligible room.
    pub auto_start_grace_secs: u64,
    /// Delay between SHOWDOWN and the next hand's start.
    pub hand_settle_delay_secs: u64,
    /// Fixed-Limit raises-per-round cap, lifted heads-up (§4.4).
    pub raise_cap: u32,
}

impl RoomConfig {
    pub fn new(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
            buy_in_min: None,
            buy_in_max: None,
            allowed_games: None,
            time_limit: None,
            stud_ante: None,
            password: None,
            turn_timeout_secs: 30,
            action_token_ttl_secs: 35,
            auto_start_grace_secs: 2,
            hand_settle_delay_secs: 2,
            raise_cap: 4,
        }
    }

    pub fn buy_in_min(&self) -> Chips {
        self.buy_in_min.unwrap_or(self.big_blind * 20)
    }

    pub fn buy_in_max(&self) -> Chips {
        self.buy_in_max.unwrap_or(self.big_blind * 200)
    }

    pub fn stud_ante(&self) -> Chips {
        self.stud_ante.unwrap_or((self.big_blind / 5).max(1))
    }

    pub fn turn_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.time_limit.unwrap_or(self.turn_timeout_secs))
    }

    pub fn is_allowed(&self, variant: GameVariant) -> bool {
        match &self.allowed_games {
            Some(list) => list.contains(&variant),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_in_defaults_scale_off_big_blind() {
        let cfg = RoomConfig::new(5, 10);
        assert_eq!(cfg.buy_in_min(), 200);
        assert_eq!(cfg.buy_in_max(), 2000);
    }

    #[test]
    fn stud_ante_defaults_to_a_fifth_of_big_blind() {
        let cfg = RoomConfig::new(5, 10);
        assert_eq!(cfg.stud_ante(), 2);
    }

    #[test]
    fn explicit_time_limit_overrides_turn_timeout() {
        let mut cfg = RoomConfig::new(5, 10);
        cfg.time_limit = Some(15);
        assert_eq!(cfg.turn_timeout().as_secs(), 15);
    }

    #[test]
    fn allowed_games_restricts_variant_list() {
        let mut cfg = RoomConfig::new(5, 10);
        cfg.allowed_games = Some(vec![GameVariant::Nlh]);
        assert!(cfg.is_allowed(GameVariant::Nlh));
        assert!(!cfg.is_allowed(GameVariant::Plo));
    }
}
