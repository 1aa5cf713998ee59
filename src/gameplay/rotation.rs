use super::seat::PlayerId;
use super::variant::GameVariant;
use crate::cards::{Card, Rank};

/// §4.10 Rotation/MetaGame: cycles a room through a fixed list of variants
/// every `hands_per_rotation` hands, tracks orbits of the button for the
/// 7-2 bonus, and runs the Stand-Up elimination side-game.
#[derive(Debug, Clone)]
pub struct RotationState {
    pub games_list: Vec<GameVariant>,
    pub current_index: usize,
    pub hands_per_rotation: u32,
    pub hands_since_rotation: u32,
    /// Number of times the button has completed a full trip back to the
    /// seat that currently holds it (spec §9 Open-Question resolution).
    pub orbit_count: u32,
    pub seats_seen_this_orbit: std::collections::HashSet<usize>,
    pub stand_up: Option<StandUpElimination>,
    /// Whether the side-games (7-2 bonus, Stand-Up elimination) are live.
    /// Plain game rotation (`set-rotation`) does not imply the meta-game is
    /// on; only `toggle-meta-game` flips this.
    pub meta_game_enabled: bool,
}

/// Sit-and-go-style elimination side-game: seats busted (stack reaches 0)
/// are removed from contention; the last seat standing wins the side-game.
#[derive(Debug, Clone)]
pub struct StandUpElimination {
    pub remaining: Vec<PlayerId>,
    pub eliminated_order: Vec<PlayerId>,
}

impl RotationState {
    pub fn new(games_list: Vec<GameVariant>, hands_per_rotation: u32) -> Self {
        Self {
            games_list,
            current_index: 0,
            hands_per_rotation,
            hands_since_rotation: 0,
            orbit_count: 0,
            seats_seen_this_orbit: std::collections::HashSet::new(),
            stand_up: None,
            meta_game_enabled: false,
        }
    }

    pub fn current_variant(&self) -> GameVariant {
        self.games_list[self.current_index]
    }

    /// Call once per completed hand. Returns the new variant if rotation
    /// advanced this call.
    pub fn record_hand_completed(&mut self) -> Option<GameVariant> {
        self.hands_since_rotation += 1;
        if self.hands_since_rotation >= self.hands_per_rotation && self.games_list.len() > 1 {
            self.hands_since_rotation = 0;
            self.current_index = (self.current_index + 1) % self.games_list.len();
            Some(self.current_variant())
        } else {
            None
        }
    }

    /// Call once per hand with the seat index that held the button. An
    /// orbit completes when the button returns to a seat already seen in
    /// the current sweep.
    pub fn record_button_seat(&mut self, button_seat: usize) {
        if !self.seats_seen_this_orbit.insert(button_seat) {
            self.orbit_count += 1;
            self.seats_seen_this_orbit.clear();
            self.seats_seen_this_orbit.insert(button_seat);
        }
    }

    pub fn begin_stand_up(&mut self, players: Vec<PlayerId>) {
        self.stand_up = Some(StandUpElimination {
            remaining: players,
            eliminated_order: Vec::new(),
        });
    }

    /// Turns on the 7-2 bonus and Stand-Up elimination together (spec §4.10
    /// meta-game toggle); plain rotation via `set-rotation` never calls this.
    pub fn enable_meta_game(&mut self, players: Vec<PlayerId>) {
        self.meta_game_enabled = true;
        self.begin_stand_up(players);
    }

    /// Removes a busted player from the side-game; returns the winner's id
    /// once exactly one remains.
    pub fn eliminate(&mut self, player_id: &str) -> Option<PlayerId> {
        let stand_up = self.stand_up.as_mut()?;
        if let Some(pos) = stand_up.remaining.iter().position(|p| p == player_id) {
            let removed = stand_up.remaining.remove(pos);
            stand_up.eliminated_order.push(removed);
        }
        if stand_up.remaining.len() == 1 {
            stand_up.remaining.first().cloned()
        } else {
            None
        }
    }
}

/// A seat's hole cards qualify for the 7-2 bonus iff they are exactly
/// seven and deuce, any suits, and the seat wins the showdown (the caller
/// checks the win condition; this only classifies the cards).
pub fn holds_seven_deuce(hole_cards: &[Card]) -> bool {
    hole_cards.len() == 2
        && hole_cards.iter().any(|c| c.rank() == Rank::Seven)
        && hole_cards.iter().any(|c| c.rank() == Rank::Two)
}

/// 7-2 bonus payout, conventionally bigger for the suited version. `None`
/// if the hand doesn't qualify.
pub fn seven_deuce_bonus(hole_cards: &[Card], big_blind: u64) -> Option<u64> {
    if !holds_seven_deuce(hole_cards) {
        return None;
    }
    let suited = hole_cards[0].suit() == hole_cards[1].suit();
    Some(if suited { big_blind * 20 } else { big_blind * 10 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn rotation_advances_after_configured_hand_count() {
        let mut r = RotationState::new(vec![GameVariant::Nlh, GameVariant::Plo], 2);
        assert!(r.record_hand_completed().is_none());
        assert_eq!(r.record_hand_completed(), Some(GameVariant::Plo));
        assert_eq!(r.current_variant(), GameVariant::Plo);
    }

    #[test]
    fn orbit_completes_when_button_revisits_a_seat() {
        let mut r = RotationState::new(vec![GameVariant::Nlh], 100);
        r.record_button_seat(0);
        r.record_button_seat(1);
        r.record_button_seat(2);
        assert_eq!(r.orbit_count, 0);
        r.record_button_seat(0);
        assert_eq!(r.orbit_count, 1);
    }

    #[test]
    fn plain_rotation_does_not_enable_the_meta_game() {
        let r = RotationState::new(vec![GameVariant::Nlh, GameVariant::Plo], 2);
        assert!(!r.meta_game_enabled);
        assert!(r.stand_up.is_none());
    }

    #[test]
    fn enabling_meta_game_seeds_stand_up_with_the_given_players() {
        let mut r = RotationState::new(vec![GameVariant::Nlh], 8);
        r.enable_meta_game(vec!["a".into(), "b".into()]);
        assert!(r.meta_game_enabled);
        assert_eq!(r.stand_up.unwrap().remaining, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn stand_up_elimination_declares_last_seat_standing() {
        let mut r = RotationState::new(vec![GameVariant::Nlh], 100);
        r.begin_stand_up(vec!["a".into(), "b".into(), "c".into()]);
        assert!(r.eliminate("a").is_none());
        assert_eq!(r.eliminate("b"), Some("c".to_string()));
    }

    #[test]
    fn seven_deuce_offsuit_qualifies_for_the_smaller_bonus() {
        let hand = vec![Card::new(Rank::Seven, Suit::Club), Card::new(Rank::Two, Suit::Spade)];
        assert_eq!(seven_deuce_bonus(&hand, 10), Some(100));
    }

    #[test]
    fn seven_deuce_suited_qualifies_for_the_bigger_bonus() {
        let hand = vec![Card::new(Rank::Seven, Suit::Club), Card::new(Rank::Two, Suit::Club)];
        assert_eq!(seven_deuce_bonus(&hand, 10), Some(200));
    }

    #[test]
    fn unrelated_hole_cards_do_not_qualify() {
        let hand = vec![Card::new(Rank::Ace, Suit::Club), Card::new(Rank::King, Suit::Spade)];
        assert_eq!(seven_deuce_bonus(&hand, 10), None);
    }
}
