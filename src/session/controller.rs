//! §4.9/§5: the per-room concurrency envelope. One [`RoomActor`] owns one
//! [`crate::gameplay::room::Room`] and every piece of mutable state that
//! lives alongside it (tokens, rate limits, the turn timer, connected
//! sockets); every other task talks to it only through a [`RoomHandle`]'s
//! message queue, the same single-writer shape as the teacher's
//! `gameroom::Actor`. A fired timer is delivered back into that same queue
//! as an ordinary message — the actor decides whether it's still relevant
//! (`schedule_epoch`) rather than racing a callback against new input.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::cards::{Card, Deck};
use crate::errors::{AuthorizationError, RoomError, StateError};
use crate::gameplay::action::ActionKind;
use crate::gameplay::betting::{self, ActionName};
use crate::gameplay::engine::{self, Effect};
use crate::gameplay::ofc::engine as ofc_engine;
use crate::gameplay::ofc::scoring as ofc_scoring;
use crate::gameplay::ofc::state::OFCState;
use crate::gameplay::room::{Room, RoomId};
use crate::gameplay::rotation;
use crate::gameplay::seat::{PlayerId, SeatStatus};
use crate::gameplay::showdown::ShowdownResult;
use crate::gameplay::state::Status;
use crate::gameplay::variant::{Family, GameVariant};

use super::protocol::{
    ClientEvent, ConfigPatch, PlacementWire, RunoutBoardData, RunoutStartedData, ServerEvent, YourTurnData,
};
use super::ratelimit::RateLimiter;
use super::sanitize;
use super::timer::{TurnTimer, TIMEOUTS_BEFORE_SIT_OUT};
use super::token::TokenRegistry;

pub type ConnectionId = String;

const RUNOUT_STEP_DELAY: Duration = Duration::from_millis(1500);

/// One connected socket: its identity and the channel the transport layer
/// drains to forward outbound events to the client.
struct Subscriber {
    player_id: PlayerId,
    outbox: UnboundedSender<ServerEvent>,
}

/// What a pending [`RoomMessage::TimerFired`] corresponds to, so an actor
/// restarted between scheduling and firing can tell a stale wakeup from a
/// live one.
enum TimerKind {
    Turn { seat_index: usize },
    Settle,
    AutoStart,
    RunoutStep,
}

pub enum RoomMessage {
    Connect {
        conn_id: ConnectionId,
        player_id: PlayerId,
        outbox: UnboundedSender<ServerEvent>,
    },
    Disconnect {
        conn_id: ConnectionId,
    },
    Client {
        conn_id: ConnectionId,
        player_id: PlayerId,
        event: ClientEvent,
    },
    TimerFired {
        epoch: u64,
    },
    TickFired {
        epoch: u64,
        seat_index: usize,
    },
}

/// A cloneable, cheap reference to a running room: the other end of its
/// inbox. Mirrors the teacher's `hosting::RoomHandle`.
#[derive(Clone)]
pub struct RoomHandle {
    pub id: RoomId,
    tx: UnboundedSender<RoomMessage>,
}

impl RoomHandle {
    pub fn spawn(room: Room) -> Self {
        Self::spawn_with_notifier(room, None)
    }

    /// Like [`spawn`], but wires an `on_empty` channel the room's actor
    /// signals on whenever the last seat leaves — the room manager drains it
    /// to delete non-preset rooms (spec §4.8) without needing to read a
    /// room's state directly (the actor is the only reader/writer of it).
    pub fn spawn_with_notifier(room: Room, on_empty: Option<UnboundedSender<RoomId>>) -> Self {
        let id = room.id.clone();
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = RoomActor::new(room, tx.clone(), rx, on_empty);
        tokio::spawn(actor.run());
        Self { id, tx }
    }

    pub fn connect(&self, conn_id: ConnectionId, player_id: PlayerId, outbox: UnboundedSender<ServerEvent>) {
        let _ = self.tx.send(RoomMessage::Connect { conn_id, player_id, outbox });
    }

    pub fn disconnect(&self, conn_id: ConnectionId) {
        let _ = self.tx.send(RoomMessage::Disconnect { conn_id });
    }

    pub fn dispatch(&self, conn_id: ConnectionId, player_id: PlayerId, event: ClientEvent) {
        let _ = self.tx.send(RoomMessage::Client { conn_id, player_id, event });
    }
}

pub struct RoomActor {
    room: Room,
    tokens: TokenRegistry,
    limiter: RateLimiter,
    turn_timer: TurnTimer,
    schedule_epoch: u64,
    pending_timer: Option<TimerKind>,
    /// Independent of `schedule_epoch`: gates the recurring per-second
    /// `timer-update` tick so it can run alongside the single-slot turn
    /// timer without stealing its epoch (cancelling one must not disturb
    /// the other, but both have to stop together when a turn ends).
    tick_epoch: u64,
    subscribers: HashMap<ConnectionId, Subscriber>,
    display_names: HashMap<PlayerId, String>,
    board_len_before_action: usize,
    pending_showdown: Option<ShowdownResult>,
    runout_steps: VecDeque<usize>,
    inbox: UnboundedReceiver<RoomMessage>,
    self_tx: UnboundedSender<RoomMessage>,
    on_empty: Option<UnboundedSender<RoomId>>,
}

impl RoomActor {
    fn new(
        room: Room,
        self_tx: UnboundedSender<RoomMessage>,
        inbox: UnboundedReceiver<RoomMessage>,
        on_empty: Option<UnboundedSender<RoomId>>,
    ) -> Self {
        let ttl = Duration::from_secs(room.config.action_token_ttl_secs);
        let turn_timeout = room.config.turn_timeout();
        Self {
            room,
            tokens: TokenRegistry::new(ttl),
            limiter: RateLimiter::new(),
            turn_timer: TurnTimer::new(turn_timeout),
            schedule_epoch: 0,
            pending_timer: None,
            tick_epoch: 0,
            subscribers: HashMap::new(),
            display_names: HashMap::new(),
            board_len_before_action: 0,
            pending_showdown: None,
            runout_steps: VecDeque::new(),
            inbox,
            self_tx,
            on_empty,
        }
    }

    fn notify_if_empty(&self) {
        if self.room.is_empty() {
            if let Some(tx) = &self.on_empty {
                let _ = tx.send(self.room.id.clone());
            }
        }
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.inbox.recv().await {
            match msg {
                RoomMessage::Connect { conn_id, player_id, outbox } => {
                    self.subscribers.insert(conn_id, Subscriber { player_id, outbox });
                }
                RoomMessage::Disconnect { conn_id } => self.on_disconnect(&conn_id),
                RoomMessage::Client { conn_id, player_id, event } => self.on_client_event(&conn_id, &player_id, event),
                RoomMessage::TimerFired { epoch } => self.on_timer_fired(epoch),
                RoomMessage::TickFired { epoch, seat_index } => self.on_tick_fired(epoch, seat_index),
            }
        }
    }

    // ---- scheduling -----------------------------------------------------

    fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.schedule_epoch += 1;
        let epoch = self.schedule_epoch;
        self.pending_timer = Some(kind);
        let tx = self.self_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(RoomMessage::TimerFired { epoch });
        });
    }

    /// Kicks off (or continues) the 1s `timer-update` cadence for the seat
    /// currently on the clock (spec §4.9/§5).
    fn schedule_tick(&mut self, seat_index: usize) {
        self.tick_epoch += 1;
        let epoch = self.tick_epoch;
        let tx = self.self_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let _ = tx.send(RoomMessage::TickFired { epoch, seat_index });
        });
    }

    fn on_tick_fired(&mut self, epoch: u64, seat_index: usize) {
        if epoch != self.tick_epoch || !self.turn_timer.is_running() {
            return;
        }
        let Some(player_id) = self.room.seats[seat_index].as_ref().map(|s| s.player_id.clone()) else {
            return;
        };
        let seconds = self.turn_timer.remaining_secs();
        self.send_to_player(&player_id, ServerEvent::TimerUpdate { seconds });
        if seconds > 0 {
            self.schedule_tick(seat_index);
        }
    }

    fn cancel_timer(&mut self) {
        self.schedule_epoch += 1;
        self.tick_epoch += 1;
        self.pending_timer = None;
        self.turn_timer.clear();
    }

    fn on_timer_fired(&mut self, epoch: u64) {
        if epoch != self.schedule_epoch {
            return;
        }
        match self.pending_timer.take() {
            Some(TimerKind::Turn { seat_index }) => self.on_turn_timeout(seat_index),
            Some(TimerKind::Settle) => self.on_settle_fired(),
            Some(TimerKind::AutoStart) => self.on_auto_start_fired(),
            Some(TimerKind::RunoutStep) => self.advance_runout_step(),
            None => {}
        }
    }

    // ---- broadcasting -----------------------------------------------------

    fn send_to_connection(&self, conn_id: &str, event: ServerEvent) {
        if let Some(sub) = self.subscribers.get(conn_id) {
            let _ = sub.outbox.send(event);
        }
    }

    fn send_to_player(&self, player_id: &str, event: ServerEvent) {
        for sub in self.subscribers.values() {
            if sub.player_id == player_id {
                let _ = sub.outbox.send(event.clone());
            }
        }
    }

    fn send_to_all(&self, event: ServerEvent) {
        for sub in self.subscribers.values() {
            let _ = sub.outbox.send(event.clone());
        }
    }

    fn broadcast_state(&self) {
        for sub in self.subscribers.values() {
            let view = sanitize::build_view(&self.room, Some(&sub.player_id));
            let _ = sub.outbox.send(ServerEvent::RoomStateUpdate(view));
        }
    }

    fn broadcast_game_started(&self) {
        for sub in self.subscribers.values() {
            let view = sanitize::build_view(&self.room, Some(&sub.player_id));
            let hand = self
                .room
                .find_seat_by_player(&sub.player_id)
                .and_then(|i| self.room.seats[i].as_ref())
                .and_then(|s| s.hand.clone());
            let _ = sub.outbox.send(ServerEvent::GameStarted { room: view, your_hand: hand });
        }
    }

    fn kick_other_connections(&mut self, player_id: &str, keep_conn_id: &str) {
        let doomed: Vec<ConnectionId> = self
            .subscribers
            .iter()
            .filter(|(cid, sub)| sub.player_id == player_id && cid.as_str() != keep_conn_id)
            .map(|(cid, _)| cid.clone())
            .collect();
        for cid in doomed {
            self.send_to_connection(&cid, ServerEvent::Error { message: "replaced by a new connection".into() });
            self.subscribers.remove(&cid);
        }
    }

    // ---- client events ----------------------------------------------------

    fn on_client_event(&mut self, conn_id: &str, player_id: &str, event: ClientEvent) {
        if !self.limiter.check(player_id) {
            self.send_to_player(player_id, ServerEvent::ActionInvalid {
                reason: AuthorizationError::RateLimitExceeded.to_string(),
            });
            return;
        }
        match event {
            ClientEvent::JoinRoom { player_name, resume_token, .. } => {
                self.display_names.insert(player_id.to_string(), player_name);
                self.on_join_room(conn_id, player_id, resume_token);
            }
            ClientEvent::LeaveRoom => self.on_leave_room(conn_id, player_id),
            ClientEvent::GetRoomList => {} // handled one layer up, by the room manager
            ClientEvent::SitDown { seat_index, buy_in, .. } => self.on_sit_down(player_id, seat_index, buy_in),
            ClientEvent::QuickJoin { buy_in, .. } => self.on_quick_join(player_id, buy_in),
            ClientEvent::Rebuy { amount } => self.on_rebuy(player_id, amount),
            ClientEvent::ImBack => self.on_im_back(player_id),
            ClientEvent::LeaveSeat => self.on_leave_seat(player_id),
            ClientEvent::PlayerAction { action_type, amount, action_token } => {
                self.on_player_action(player_id, action_type, amount, action_token)
            }
            ClientEvent::DrawExchange { discard_indexes } => self.on_draw_exchange(player_id, discard_indexes),
            ClientEvent::UseTimebank => self.on_use_timebank(player_id),
            ClientEvent::RequestRoomState => self.send_to_player(
                player_id,
                ServerEvent::RoomStateUpdate(sanitize::build_view(&self.room, Some(player_id))),
            ),
            ClientEvent::OfcPlaceCards { placements, discard_card } => {
                self.on_ofc_place_cards(player_id, placements, discard_card)
            }
            ClientEvent::CreatePrivateRoom(_) | ClientEvent::JoinPrivateRoom { .. } => {
                log::warn!("[room {}] private-room events must be handled by the room manager", self.room.id);
            }
            ClientEvent::UpdateRoomConfig(patch) | ClientEvent::UpdatePrivateRoomConfig(patch) => {
                self.on_update_config(player_id, patch)
            }
            ClientEvent::SetGameVariant { variant } | ClientEvent::ChangeVariant { variant } => {
                self.on_set_variant(player_id, variant)
            }
            ClientEvent::SetRotation { games_list, hands_per_rotation } => {
                self.on_set_rotation(player_id, games_list, hands_per_rotation)
            }
            ClientEvent::ToggleMetaGame => self.on_toggle_meta_game(player_id),
        }
    }

    fn on_join_room(&mut self, conn_id: &str, player_id: &str, resume_token: Option<String>) {
        if let Some(token) = resume_token.as_deref() {
            if let Some(idx) = self
                .room
                .seats
                .iter()
                .position(|s| s.as_ref().is_some_and(|s| s.resume_token.as_deref() == Some(token)))
            {
                let bound_player_id = self.room.seats[idx].as_ref().unwrap().player_id.clone();
                self.kick_other_connections(&bound_player_id, conn_id);
                if let Some(seat) = self.room.seats[idx].as_mut() {
                    seat.disconnected = false;
                }
                if let Some(sub) = self.subscribers.get_mut(conn_id) {
                    sub.player_id = bound_player_id;
                }
            }
        }
        let bound_player_id = self
            .subscribers
            .get(conn_id)
            .map(|s| s.player_id.clone())
            .unwrap_or_else(|| player_id.to_string());
        let hand = self
            .room
            .find_seat_by_player(&bound_player_id)
            .and_then(|idx| self.room.seats[idx].as_ref())
            .and_then(|s| s.hand.clone());
        self.send_to_connection(conn_id, ServerEvent::RoomJoined {
            room: sanitize::build_view(&self.room, Some(&bound_player_id)),
            your_socket_id: conn_id.to_string(),
            your_hand: hand,
        });
        self.broadcast_state();
    }

    fn on_leave_room(&mut self, conn_id: &str, player_id: &str) {
        let _ = self.room.stand_up(player_id);
        self.subscribers.remove(conn_id);
        self.broadcast_state();
        self.notify_if_empty();
    }

    fn on_sit_down(&mut self, player_id: &str, seat_index: usize, buy_in: u64) {
        if seat_index >= self.room.seats.len() {
            self.send_to_player(player_id, ServerEvent::Error { message: "no such seat".into() });
            return;
        }
        if buy_in < self.room.config.buy_in_min() || buy_in > self.room.config.buy_in_max() {
            self.send_to_player(player_id, ServerEvent::Error { message: "buy-in out of bounds".into() });
            return;
        }
        let name = self.display_names.get(player_id).cloned().unwrap_or_else(|| player_id.to_string());
        match self.room.sit_down(seat_index, player_id.to_string(), name, buy_in) {
            Ok(()) => {
                if let Some(seat) = self.room.seats[seat_index].as_mut() {
                    seat.resume_token = Some(Uuid::new_v4().to_string());
                }
                self.send_to_player(player_id, ServerEvent::SitDownSuccess { seat_index });
                self.broadcast_state();
                self.maybe_schedule_auto_start();
            }
            Err(e) => self.send_to_player(player_id, ServerEvent::Error { message: e.to_string() }),
        }
    }

    fn on_quick_join(&mut self, player_id: &str, buy_in: u64) {
        let empties: Vec<usize> = self.room.seats.iter().enumerate().filter(|(_, s)| s.is_none()).map(|(i, _)| i).collect();
        if empties.is_empty() {
            self.send_to_player(player_id, ServerEvent::Error { message: "room is full".into() });
            return;
        }
        let idx = empties[rand::Rng::random_range(&mut rand::rng(), 0..empties.len())];
        self.on_sit_down(player_id, idx, buy_in);
    }

    fn on_rebuy(&mut self, player_id: &str, amount: u64) {
        if self.room.is_hand_in_progress() {
            self.send_to_player(player_id, ServerEvent::Error { message: StateError::CannotRebuyInHand.to_string() });
            return;
        }
        let Some(idx) = self.room.find_seat_by_player(player_id) else {
            return;
        };
        let seat = self.room.seats[idx].as_mut().unwrap();
        let new_stack = seat.stack + amount;
        if new_stack > self.room.config.buy_in_max() {
            self.send_to_player(player_id, ServerEvent::Error { message: "rebuy exceeds max buy-in".into() });
            return;
        }
        seat.stack = new_stack;
        self.broadcast_state();
    }

    fn on_im_back(&mut self, player_id: &str) {
        if let Some(idx) = self.room.find_seat_by_player(player_id) {
            if let Some(seat) = self.room.seats[idx].as_mut() {
                seat.pending_sit_out = false;
                seat.consecutive_timeouts = 0;
            }
        }
        self.broadcast_state();
        self.maybe_schedule_auto_start();
    }

    fn on_leave_seat(&mut self, player_id: &str) {
        let Some(idx) = self.room.find_seat_by_player(player_id) else {
            return;
        };
        if self.room.is_hand_in_progress() {
            if let Some(seat) = self.room.seats[idx].as_mut() {
                seat.pending_leave = true;
            }
        } else {
            let _ = self.room.stand_up(player_id);
            self.notify_if_empty();
        }
        self.broadcast_state();
    }

    fn on_player_action(&mut self, player_id: &str, action_type: super::protocol::ActionTypeWire, amount: Option<u64>, action_token: Uuid) {
        let Some(seat_index) = self.room.find_seat_by_player(player_id) else {
            self.send_to_player(player_id, ServerEvent::Error { message: "not seated".into() });
            return;
        };
        if let Err(e) = self.tokens.consume(player_id, action_token) {
            let auth_err: AuthorizationError = e.into();
            self.send_to_player(player_id, ServerEvent::ActionInvalid { reason: auth_err.to_string() });
            return;
        }
        let action = action_type.into_action_kind(amount);
        self.apply_action(seat_index, action);
    }

    fn apply_action(&mut self, seat_index: usize, action: ActionKind) {
        self.cancel_timer();
        self.board_len_before_action = self.room.state.board.len();
        match engine::process_action(&mut self.room, seat_index, action) {
            Ok(effect) => {
                if let Some(seat) = self.room.seats[seat_index].as_mut() {
                    seat.consecutive_timeouts = 0;
                }
                self.handle_effect(effect);
            }
            Err(e) => {
                self.report_error(seat_index, e);
                if self.room.state.active_player_index == Some(seat_index) {
                    self.issue_your_turn(seat_index);
                }
            }
        }
    }

    fn on_draw_exchange(&mut self, player_id: &str, discard_indexes: Vec<usize>) {
        let Some(seat_index) = self.room.find_seat_by_player(player_id) else {
            return;
        };
        let count = discard_indexes.len();
        self.cancel_timer();
        self.board_len_before_action = self.room.state.board.len();
        match engine::submit_draw(&mut self.room, seat_index, discard_indexes) {
            Ok(effect) => {
                let hand = self.room.seats[seat_index].as_ref().and_then(|s| s.hand.clone()).unwrap_or_default();
                self.send_to_player(player_id, ServerEvent::DrawComplete { hand });
                self.send_to_all(ServerEvent::PlayerDrew { seat_index, count });
                self.handle_effect(effect);
            }
            Err(e) => self.report_error(seat_index, e),
        }
    }

    fn on_use_timebank(&mut self, player_id: &str) {
        let Some(seat_index) = self.room.find_seat_by_player(player_id) else {
            return;
        };
        if self.room.state.active_player_index != Some(seat_index) {
            self.send_to_player(player_id, ServerEvent::ActionInvalid { reason: "not your turn".into() });
            return;
        }
        let chips = {
            let seat = self.room.seats[seat_index].as_mut().unwrap();
            if seat.time_bank_chips == 0 {
                self.send_to_player(player_id, ServerEvent::ActionInvalid {
                    reason: "no time-bank chips remaining".into(),
                });
                return;
            }
            seat.time_bank_chips -= 1;
            seat.time_bank_chips
        };
        self.turn_timer.extend(super::timer::TIME_BANK_EXTENSION);
        let remaining = self.turn_timer.remaining();
        self.schedule(TimerKind::Turn { seat_index }, remaining);
        self.send_to_player(player_id, ServerEvent::TimebankUpdate { chips });
    }

    fn on_update_config(&mut self, player_id: &str, patch: ConfigPatch) {
        if self.room.host_seat_id.as_deref() != Some(player_id) {
            self.send_to_player(player_id, ServerEvent::Error { message: AuthorizationError::NotHost.to_string() });
            return;
        }
        let updated = patch.apply(&self.room.config);
        if self.room.is_hand_in_progress() {
            self.room.pending_config = Some(updated);
            self.send_to_player(player_id, ServerEvent::ConfigPending);
        } else {
            self.room.config = updated;
            self.send_to_all(ServerEvent::ConfigUpdated(sanitize::build_view(&self.room, None)));
        }
    }

    fn on_set_variant(&mut self, player_id: &str, variant: GameVariant) {
        if self.room.host_seat_id.as_deref() != Some(player_id) {
            self.send_to_player(player_id, ServerEvent::Error { message: AuthorizationError::NotHost.to_string() });
            return;
        }
        if self.room.is_hand_in_progress() {
            self.send_to_player(player_id, ServerEvent::Error {
                message: StateError::CannotChangeVariantInHand.to_string(),
            });
            return;
        }
        if !self.room.config.is_allowed(variant) {
            self.send_to_player(player_id, ServerEvent::Error { message: "variant not allowed in this room".into() });
            return;
        }
        self.room.variant = variant;
        self.room.ofc_state = (variant == GameVariant::Ofc).then(|| OFCState::new(self.room.seats.len()));
        self.broadcast_state();
    }

    fn on_set_rotation(&mut self, player_id: &str, games_list: Vec<GameVariant>, hands_per_rotation: u32) {
        if self.room.host_seat_id.as_deref() != Some(player_id) {
            self.send_to_player(player_id, ServerEvent::Error { message: AuthorizationError::NotHost.to_string() });
            return;
        }
        if games_list.is_empty() {
            return;
        }
        self.room.rotation = Some(rotation::RotationState::new(games_list, hands_per_rotation.max(1)));
        self.broadcast_state();
    }

    fn on_toggle_meta_game(&mut self, player_id: &str) {
        if self.room.host_seat_id.as_deref() != Some(player_id) {
            self.send_to_player(player_id, ServerEvent::Error { message: AuthorizationError::NotHost.to_string() });
            return;
        }
        if self.room.rotation.take().is_none() {
            let mut state = rotation::RotationState::new(vec![self.room.variant], 8);
            let seated: Vec<PlayerId> = self.room.seats.iter().flatten().map(|s| s.player_id.clone()).collect();
            state.enable_meta_game(seated);
            self.room.rotation = Some(state);
        }
        self.broadcast_state();
    }

    // ---- OFC ---------------------------------------------------------------

    fn start_ofc_hand(&mut self) {
        for seat in self.room.seats.iter_mut().flatten() {
            seat.reset_for_new_hand();
        }
        self.room.state.hand_number += 1;
        let mut state = OFCState::new(self.room.seats.len());
        if ofc_engine::deal_initial(&mut state).is_err() {
            return;
        }
        self.room.ofc_state = Some(state);
        self.room.state.status = Status::Playing;
        self.broadcast_game_started();
        for i in 0..self.room.seats.len() {
            if let (Some(seat), Some(state)) = (self.room.seats[i].as_ref(), self.room.ofc_state.as_ref()) {
                self.send_to_player(&seat.player_id, ServerEvent::OfcDeal {
                    seat_index: i,
                    cards: state.players[i].current_cards.clone(),
                });
            }
        }
    }

    fn on_ofc_place_cards(&mut self, player_id: &str, placements: Vec<PlacementWire>, discard_card: Option<Card>) {
        let Some(seat_index) = self.room.find_seat_by_player(player_id) else {
            return;
        };
        if self.room.ofc_state.is_none() {
            self.send_to_player(player_id, ServerEvent::OfcError { reason: "not an OFC room".into() });
            return;
        }
        let pairs: Vec<(Card, crate::gameplay::ofc::state::Row)> = placements.into_iter().map(|p| (p.card, p.row)).collect();
        let result = ofc_engine::place_cards(self.room.ofc_state.as_mut().unwrap(), seat_index, pairs, discard_card);
        match result {
            Ok(()) => {
                self.broadcast_state();
                if ofc_engine::is_scoring(self.room.ofc_state.as_ref().unwrap()) {
                    self.on_ofc_scoring();
                } else {
                    self.maybe_deal_next_ofc_turn();
                }
            }
            Err(e) => self.send_to_player(player_id, ServerEvent::OfcError { reason: e.to_string() }),
        }
    }

    fn maybe_deal_next_ofc_turn(&mut self) {
        let Some(state) = self.room.ofc_state.as_ref() else {
            return;
        };
        if state.phase != crate::gameplay::ofc::state::OFCPhase::PineapplePlacing {
            return;
        }
        let idx = state.current_turn_index;
        if !state.players[idx].current_cards.is_empty() || state.players[idx].has_placed {
            return;
        }
        if ofc_engine::deal_to_current_turn(self.room.ofc_state.as_mut().unwrap()).is_err() {
            return;
        }
        self.broadcast_state();
        let state = self.room.ofc_state.as_ref().unwrap();
        if let Some(seat) = self.room.seats[idx].as_ref() {
            let player_id = seat.player_id.clone();
            self.send_to_player(&player_id, ServerEvent::OfcDeal { seat_index: idx, cards: state.players[idx].current_cards.clone() });
        }
    }

    fn on_ofc_scoring(&mut self) {
        let Some(state) = self.room.ofc_state.as_ref() else {
            return;
        };
        let deltas = ofc_scoring::settle(&state.players, self.room.config.big_blind);
        for (i, delta) in deltas.iter().enumerate() {
            if let Some(seat) = self.room.seats[i].as_mut() {
                seat.stack = (seat.stack as i64 + delta).max(0) as u64;
            }
        }
        self.send_to_all(ServerEvent::OfcScoring { chip_deltas: deltas });
        self.room.ofc_state = None;
        self.room.state.status = Status::Showdown;
        self.broadcast_state();
        self.schedule(TimerKind::Settle, Duration::from_secs(self.room.config.hand_settle_delay_secs));
    }

    // ---- disconnect / timeout -----------------------------------------------

    fn on_disconnect(&mut self, conn_id: &str) {
        let Some(sub) = self.subscribers.remove(conn_id) else {
            return;
        };
        let player_id = sub.player_id;
        let Some(idx) = self.room.find_seat_by_player(&player_id) else {
            return;
        };
        if self.room.is_hand_in_progress() {
            if let Some(seat) = self.room.seats[idx].as_mut() {
                seat.disconnected = true;
            }
            if self.room.state.active_player_index == Some(idx) {
                self.apply_action(idx, ActionKind::Fold);
            } else if let Some(seat) = self.room.seats[idx].as_mut() {
                seat.pending_leave = true;
            }
        } else {
            let _ = self.room.stand_up(&player_id);
            self.notify_if_empty();
        }
        self.broadcast_state();
    }

    fn on_turn_timeout(&mut self, seat_index: usize) {
        let Some(seat) = self.room.seats[seat_index].as_ref() else {
            return;
        };
        let player_id = seat.player_id.clone();
        self.tokens.clear(&player_id);
        let profile = self.room.variant.profile();
        let valid = betting::compute_valid_actions(&self.room.state, &self.room.seats, seat_index, &profile, &self.room.config);
        let action = if valid.valid_actions.contains(&ActionName::Check) { ActionKind::Check } else { ActionKind::Fold };
        if let Some(seat) = self.room.seats[seat_index].as_mut() {
            seat.consecutive_timeouts += 1;
            if seat.consecutive_timeouts >= TIMEOUTS_BEFORE_SIT_OUT {
                seat.pending_sit_out = true;
            }
        }
        self.board_len_before_action = self.room.state.board.len();
        match engine::process_action(&mut self.room, seat_index, action) {
            Ok(effect) => self.handle_effect(effect),
            Err(e) => self.report_error(seat_index, e),
        }
    }

    fn report_error(&mut self, seat_index: usize, err: RoomError) {
        let player_id = self.room.seats[seat_index].as_ref().map(|s| s.player_id.clone());
        match &err {
            RoomError::Validation(_) | RoomError::Authorization(_) => {
                if let Some(pid) = player_id {
                    self.send_to_player(&pid, ServerEvent::ActionInvalid { reason: err.to_string() });
                }
            }
            RoomError::State(_) => {
                if let Some(pid) = player_id {
                    self.send_to_player(&pid, ServerEvent::Error { message: err.to_string() });
                }
            }
            RoomError::Integrity(_) => {
                log::error!("[room {}] integrity violation, aborting hand: {}", self.room.id, err);
                self.abort_hand();
            }
        }
    }

    fn abort_hand(&mut self) {
        for seat in self.room.seats.iter_mut().flatten() {
            seat.stack += seat.total_bet;
            seat.bet = 0;
            seat.total_bet = 0;
            seat.hand = None;
        }
        self.room.state = crate::gameplay::state::GameState::waiting(Deck::standard());
        self.cancel_timer();
        self.broadcast_state();
        self.maybe_schedule_auto_start();
    }

    // ---- effect handling -----------------------------------------------

    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ActionApplied { .. } | Effect::StreetAdvanced { .. } | Effect::DrawSubmitted { .. } => {
                self.broadcast_state();
                if let Some(seat_index) = self.room.state.active_player_index {
                    self.issue_your_turn(seat_index);
                }
            }
            Effect::DrawPhaseStarted => {
                self.broadcast_state();
            }
            Effect::HandComplete(result) => self.on_hand_complete(result),
        }
    }

    fn issue_your_turn(&mut self, seat_index: usize) {
        let Some(seat) = self.room.seats[seat_index].as_ref() else {
            return;
        };
        let player_id = seat.player_id.clone();
        let profile = self.room.variant.profile();
        let valid = betting::compute_valid_actions(&self.room.state, &self.room.seats, seat_index, &profile, &self.room.config);
        let token = self.tokens.issue(&player_id);
        let timeout = self.room.config.turn_timeout();
        self.turn_timer = TurnTimer::new(timeout);
        self.turn_timer.start();
        self.schedule(TimerKind::Turn { seat_index }, timeout);
        self.schedule_tick(seat_index);
        self.send_to_player(&player_id, ServerEvent::YourTurn(YourTurnData {
            valid_actions: valid.valid_actions,
            current_bet: self.room.state.current_bet,
            min_raise: self.room.state.min_raise,
            max_bet: valid.max_bet,
            bet_structure: valid.bet_structure,
            is_capped: valid.is_capped,
            raises_remaining: valid.raises_remaining,
            fixed_bet_size: valid.fixed_bet_size,
            timeout: timeout.as_secs(),
            action_token: token,
        }));
    }

    fn on_hand_complete(&mut self, result: ShowdownResult) {
        self.cancel_timer();
        if self.room.state.is_runout {
            self.begin_runout_reveal(result);
        } else {
            self.finish_hand_reporting(result);
        }
    }

    fn begin_runout_reveal(&mut self, result: ShowdownResult) {
        self.send_to_all(ServerEvent::RunoutStarted(RunoutStartedData {
            runout_phase: self.room.state.runout_phase,
            full_board: self.room.state.board.clone(),
            revealed_hands: result.all_hands.clone(),
        }));
        let profile = self.room.variant.profile();
        let board_after = self.room.state.board.len();
        self.runout_steps = [3usize, 4, 5]
            .into_iter()
            .filter(|&n| profile.family == Family::Flop && n > self.board_len_before_action && n <= board_after)
            .collect();
        self.pending_showdown = Some(result);
        self.advance_runout_step();
    }

    fn advance_runout_step(&mut self) {
        if let Some(upto) = self.runout_steps.pop_front() {
            let board = self.room.state.board[..upto].to_vec();
            self.send_to_all(ServerEvent::RunoutBoard(RunoutBoardData { board, phase: self.room.state.street }));
            self.schedule(TimerKind::RunoutStep, RUNOUT_STEP_DELAY);
        } else if let Some(result) = self.pending_showdown.take() {
            self.finish_hand_reporting(result);
        }
    }

    fn finish_hand_reporting(&mut self, result: ShowdownResult) {
        self.pending_showdown = Some(result);
        self.schedule(TimerKind::Settle, Duration::from_secs(self.room.config.hand_settle_delay_secs));
    }

    fn on_settle_fired(&mut self) {
        let Some(result) = self.pending_showdown.take() else {
            return;
        };
        if matches!(self.room.rotation.as_ref(), Some(r) if r.meta_game_enabled) {
            for share in &result.winners {
                if let Some(idx) = self.room.find_seat_by_player(&share.player_id) {
                    let hole = self.room.seats[idx].as_ref().and_then(|s| s.hand.clone());
                    if let Some(hole) = hole {
                        if let Some(bonus) = rotation::seven_deuce_bonus(&hole, self.room.config.big_blind) {
                            if let Some(seat) = self.room.seats[idx].as_mut() {
                                seat.stack += bonus;
                            }
                            self.send_to_all(ServerEvent::SevenDeuceBonus { winner: share.player_id.clone(), amount: bonus });
                        }
                    }
                }
            }
        }
        self.send_to_all(ServerEvent::ShowdownResult(result));
        self.settle_stand_up_eliminations();

        self.room.state.status = Status::Waiting;
        let had_pending_config = self.room.pending_config.is_some();
        self.room.apply_pending_config();
        if had_pending_config {
            self.send_to_all(ServerEvent::ConfigApplied(sanitize::build_view(&self.room, None)));
        }
        self.cleanup_pending_leavers();

        if let Some(rotation) = self.room.rotation.as_mut() {
            rotation.record_button_seat(self.room.button_index);
            if let Some(next) = rotation.record_hand_completed() {
                self.room.variant = next;
                self.send_to_all(ServerEvent::NextGame { next_game: next, games_list: rotation.games_list.clone() });
            }
        }
        self.broadcast_state();
        self.maybe_schedule_auto_start();
    }

    /// Drives the Stand-Up side-game (spec §4.10): any seat that busted this
    /// hand and still has a stake in the side-game is eliminated; the last
    /// remaining player is announced as its winner.
    fn settle_stand_up_eliminations(&mut self) {
        let has_stand_up = matches!(&self.room.rotation, Some(r) if r.stand_up.is_some());
        if !has_stand_up {
            return;
        }
        let busted: Vec<PlayerId> = self
            .room
            .seats
            .iter()
            .flatten()
            .filter(|s| s.stack == 0)
            .map(|s| s.player_id.clone())
            .collect();
        let mut winner = None;
        if let Some(rotation) = self.room.rotation.as_mut() {
            for player_id in &busted {
                if let Some(w) = rotation.eliminate(player_id) {
                    winner = Some(w);
                }
            }
        }
        for player_id in busted {
            self.send_to_all(ServerEvent::StandUpEliminated { player_id });
        }
        if let Some(winner) = winner {
            self.send_to_all(ServerEvent::StandUpWinner { player_id: winner });
        }
    }

    fn cleanup_pending_leavers(&mut self) {
        let leavers: Vec<PlayerId> = self.room.seats.iter().flatten().filter(|s| s.pending_leave).map(|s| s.player_id.clone()).collect();
        let had_leavers = !leavers.is_empty();
        for pid in leavers {
            let _ = self.room.stand_up(&pid);
        }
        if had_leavers {
            self.notify_if_empty();
        }
    }

    fn maybe_schedule_auto_start(&mut self) {
        if self.room.state.status != Status::Waiting {
            return;
        }
        if self.room.startable_seat_count() >= 2 {
            self.schedule(TimerKind::AutoStart, Duration::from_secs(self.room.config.auto_start_grace_secs));
        }
    }

    fn on_auto_start_fired(&mut self) {
        if self.room.startable_seat_count() < 2 {
            return;
        }
        if self.room.variant.profile().family == Family::Ofc {
            self.start_ofc_hand();
            return;
        }
        if engine::start_hand(&mut self.room).is_ok() {
            self.broadcast_game_started();
            if let Some(seat_index) = self.room.state.active_player_index {
                self.issue_your_turn(seat_index);
            }
        }
    }
}
