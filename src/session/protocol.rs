//! §6 external interfaces: the wire shape of every client/server event,
//! `{event, data}` exactly as specified, via serde's internally-tagged
//! enum representation. Rust callers get exhaustive match ergonomics;
//! the JSON on the wire is stringly-typed the way the spec describes it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cards::Card;
use crate::gameplay::action::ActionKind;
use crate::gameplay::betting::{ActionName, BettingStructure};
use crate::gameplay::ofc::state::Row;
use crate::gameplay::room::RoomId;
use crate::gameplay::seat::{Chips, PlayerId};
use crate::gameplay::showdown::ShowdownResult;
use crate::gameplay::variant::GameVariant;

use super::sanitize::RoomView;

/// Wire shape of `player-action`'s `{type, amount?, actionToken}`: the type
/// tag is separate from the numeric amount, unlike the internal
/// [`ActionKind`] (which nests the amount inside `Bet`/`Raise`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionTypeWire {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionTypeWire {
    /// Reassembles the wire `{type, amount}` pair into the internal
    /// [`ActionKind`] the engine expects.
    pub fn into_action_kind(self, amount: Option<Chips>) -> ActionKind {
        match self {
            ActionTypeWire::Fold => ActionKind::Fold,
            ActionTypeWire::Check => ActionKind::Check,
            ActionTypeWire::Call => ActionKind::Call,
            ActionTypeWire::Bet => ActionKind::Bet(amount.unwrap_or(0)),
            ActionTypeWire::Raise => ActionKind::Raise(amount.unwrap_or(0)),
            ActionTypeWire::AllIn => ActionKind::AllIn,
        }
    }
}

/// A single OFC placement instruction: one dealt card assigned to one row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementWire {
    pub card: Card,
    pub row: Row,
}

/// Partial room configuration update (`update-room-config` /
/// `update-private-room-config`): every field optional, only the ones
/// present are applied — matches §9's "freeform config objects ->
/// `Option<T>` fields" design note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    pub max_players: Option<usize>,
    pub small_blind: Option<Chips>,
    pub big_blind: Option<Chips>,
    pub buy_in_min: Option<Chips>,
    pub buy_in_max: Option<Chips>,
    pub allowed_games: Option<Vec<GameVariant>>,
    pub time_limit: Option<u64>,
    pub stud_ante: Option<Chips>,
    pub password: Option<String>,
}

impl ConfigPatch {
    /// Applies only the present fields onto `base`, leaving the rest
    /// untouched (spec §9 "freeform config objects -> `Option<T>` fields").
    pub fn apply(&self, base: &crate::gameplay::config::RoomConfig) -> crate::gameplay::config::RoomConfig {
        let mut next = base.clone();
        if let Some(sb) = self.small_blind {
            next.small_blind = sb;
        }
        if let Some(bb) = self.big_blind {
            next.big_blind = bb;
        }
        if self.buy_in_min.is_some() {
            next.buy_in_min = self.buy_in_min;
        }
        if self.buy_in_max.is_some() {
            next.buy_in_max = self.buy_in_max;
        }
        if self.allowed_games.is_some() {
            next.allowed_games = self.allowed_games.clone();
        }
        if self.time_limit.is_some() {
            next.time_limit = self.time_limit;
        }
        if self.stud_ante.is_some() {
            next.stud_ante = self.stud_ante;
        }
        if self.password.is_some() {
            next.password = self.password.clone();
        }
        next
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrivateRoomData {
    pub config: ConfigPatch,
    pub password: Option<String>,
    pub custom_room_id: Option<String>,
}

/// Every row of §6's "Client -> Server events" table, tagged the way the
/// spec's `{event, data}` wire shape demands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom {
        room_id: RoomId,
        player_name: String,
        resume_token: Option<String>,
    },
    LeaveRoom,
    GetRoomList,
    SitDown {
        seat_index: usize,
        buy_in: Chips,
        resume_token: Option<String>,
    },
    QuickJoin {
        room_id: RoomId,
        buy_in: Chips,
    },
    Rebuy {
        amount: Chips,
    },
    ImBack,
    LeaveSeat,
    PlayerAction {
        #[serde(rename = "type")]
        action_type: ActionTypeWire,
        amount: Option<Chips>,
        action_token: Uuid,
    },
    DrawExchange {
        discard_indexes: Vec<usize>,
    },
    UseTimebank,
    RequestRoomState,
    OfcPlaceCards {
        placements: Vec<PlacementWire>,
        discard_card: Option<Card>,
    },
    CreatePrivateRoom(CreatePrivateRoomData),
    JoinPrivateRoom {
        room_id: RoomId,
        password: Option<String>,
        buy_in: Chips,
    },
    UpdateRoomConfig(ConfigPatch),
    UpdatePrivateRoomConfig(ConfigPatch),
    SetGameVariant {
        variant: GameVariant,
    },
    ChangeVariant {
        variant: GameVariant,
    },
    SetRotation {
        games_list: Vec<GameVariant>,
        hands_per_rotation: u32,
    },
    ToggleMetaGame,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YourTurnData {
    pub valid_actions: Vec<ActionName>,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub max_bet: Chips,
    pub bet_structure: BettingStructure,
    pub is_capped: bool,
    pub raises_remaining: u32,
    pub fixed_bet_size: Option<Chips>,
    pub timeout: u64,
    pub action_token: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunoutStartedData {
    pub runout_phase: Option<crate::cards::Street>,
    pub full_board: Vec<Card>,
    pub revealed_hands: Vec<crate::gameplay::showdown::RevealedHand>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunoutBoardData {
    pub board: Vec<Card>,
    pub phase: crate::cards::Street,
}

/// Every row of §6's "Server -> Client events" table.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
#[allow(clippy::large_enum_variant)]
pub enum ServerEvent {
    RoomJoined {
        room: RoomView,
        your_socket_id: String,
        your_hand: Option<Vec<Card>>,
    },
    SitDownSuccess {
        seat_index: usize,
    },
    RoomStateUpdate(RoomView),
    GameStarted {
        room: RoomView,
        your_hand: Option<Vec<Card>>,
    },
    YourTurn(YourTurnData),
    TimerUpdate {
        seconds: u64,
    },
    TimebankUpdate {
        chips: u32,
    },
    ActionInvalid {
        reason: String,
    },
    DrawComplete {
        hand: Vec<Card>,
    },
    PlayerDrew {
        seat_index: usize,
        count: usize,
    },
    RunoutStarted(RunoutStartedData),
    RunoutBoard(RunoutBoardData),
    ShowdownResult(ShowdownResult),
    SevenDeuceBonus {
        winner: PlayerId,
        amount: Chips,
    },
    NextGame {
        next_game: GameVariant,
        games_list: Vec<GameVariant>,
    },
    StandUpEliminated {
        player_id: PlayerId,
    },
    StandUpWinner {
        player_id: PlayerId,
    },
    ConfigUpdated(RoomView),
    ConfigPending,
    ConfigApplied(RoomView),
    OfcDeal {
        seat_index: usize,
        cards: Vec<Card>,
    },
    OfcRoundComplete {
        round: u8,
    },
    OfcScoring {
        chip_deltas: Vec<i64>,
    },
    OfcError {
        reason: String,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_event_round_trips_through_the_spec_wire_shape() {
        let json = r#"{"event":"player-action","data":{"type":"raise","amount":40,"actionToken":"11111111-1111-1111-1111-111111111111"}}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        match event {
            ClientEvent::PlayerAction { action_type, amount, .. } => {
                assert_eq!(action_type, ActionTypeWire::Raise);
                assert_eq!(amount, Some(40));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn sit_down_parses_without_resume_token() {
        let json = r#"{"event":"sit-down","data":{"seatIndex":2,"buyIn":1000}}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(
            event,
            ClientEvent::SitDown { seat_index: 2, buy_in: 1000, resume_token: None }
        ));
    }

    #[test]
    fn action_type_wire_reconstructs_action_kind() {
        assert_eq!(ActionTypeWire::Bet.into_action_kind(Some(20)), ActionKind::Bet(20));
        assert_eq!(ActionTypeWire::Fold.into_action_kind(None), ActionKind::Fold);
    }

    #[test]
    fn server_event_serializes_with_event_data_envelope() {
        let event = ServerEvent::ActionInvalid { reason: "not your turn".into() };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"action-invalid"#));
        assert!(json.contains(r#""reason":"not your turn"#));
    }
}
