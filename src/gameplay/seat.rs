use crate::cards::Card;
use serde::{Deserialize, Serialize};

pub type Chips = u64;
pub type PlayerId = String;

/// §3 "Player (seat)" status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    Active,
    Folded,
    AllIn,
    SitOut,
}

/// One action a seat can have last performed, surfaced to clients for
/// display ("Check", "Raise to 40", ...). Carried on the seat rather than
/// reconstructed from the action log, matching the room's "no action log"
/// data model (§3 lists no history array on `Room`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
    Blind,
    Ante,
    BringIn,
    Draw,
}

/// A seat at a table. Stable identity is `player_id` (the connection
/// token); chips and in-hand state live here, cards are private and only
/// ever serialized for the owning connection (see `session::sanitize`).
#[derive(Debug, Clone)]
pub struct Seat {
    pub player_id: PlayerId,
    pub display_name: String,
    pub stack: Chips,
    pub bet: Chips,
    pub total_bet: Chips,
    pub status: SeatStatus,
    pub hand: Option<Vec<Card>>,
    pub up_cards: Vec<Card>,
    pub last_action: Option<LastAction>,
    /// Cleared at the start of every betting round; set once the seat
    /// submits a real action through `processAction`. Forced posts (blinds,
    /// antes, bring-in) go through `commit`/`post` directly and never touch
    /// this, which is what gives the big blind / bring-in seat a genuine
    /// option even though their posted bet already matches `currentBet`.
    pub acted_this_round: bool,
    pub pending_join: bool,
    pub waiting_for_bb: bool,
    pub pending_sit_out: bool,
    pub pending_leave: bool,
    pub disconnected: bool,
    pub resume_token: Option<String>,
    pub consecutive_timeouts: u32,
    pub time_bank_chips: u32,
}

pub const DEFAULT_TIME_BANK_CHIPS: u32 = 5;

impl Seat {
    pub fn new(player_id: PlayerId, display_name: String, stack: Chips) -> Self {
        Self {
            player_id,
            display_name,
            stack,
            bet: 0,
            total_bet: 0,
            status: SeatStatus::Active,
            hand: None,
            up_cards: Vec::new(),
            last_action: None,
            acted_this_round: false,
            pending_join: false,
            waiting_for_bb: false,
            pending_sit_out: false,
            pending_leave: false,
            disconnected: false,
            resume_token: None,
            consecutive_timeouts: 0,
            time_bank_chips: DEFAULT_TIME_BANK_CHIPS,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.status, SeatStatus::Active | SeatStatus::AllIn)
    }

    pub fn can_act(&self) -> bool {
        self.status == SeatStatus::Active && self.stack > 0
    }

    /// True for startable at the auto-start scheduler's check (spec §4.9):
    /// stack funded, not opted out, and either already active or sitting in
    /// waiting for the hand after a mid-hand join.
    pub fn is_startable(&self) -> bool {
        if self.stack == 0 || self.pending_sit_out || self.pending_leave {
            return false;
        }
        match self.status {
            SeatStatus::Active => true,
            SeatStatus::SitOut => self.pending_join && !self.waiting_for_bb,
            _ => false,
        }
    }

    pub fn reset_for_new_hand(&mut self) {
        self.bet = 0;
        self.total_bet = 0;
        self.hand = None;
        self.up_cards.clear();
        self.last_action = None;
        self.acted_this_round = false;
        if self.status == SeatStatus::Folded || self.status == SeatStatus::AllIn {
            self.status = SeatStatus::Active;
        }
        if self.pending_join && !self.waiting_for_bb {
            self.status = SeatStatus::Active;
            self.pending_join = false;
        }
    }

    pub fn reset_for_new_round(&mut self) {
        self.bet = 0;
        self.acted_this_round = false;
    }

    /// Moves chips from stack into the current round's bet, flipping to
    /// all-in if it zeroes the stack.
    pub fn commit(&mut self, amount: Chips) {
        let amount = amount.min(self.stack);
        self.stack -= amount;
        self.bet += amount;
        self.total_bet += amount;
        if self.stack == 0 && self.status == SeatStatus::Active {
            self.status = SeatStatus::AllIn;
        }
    }
}
