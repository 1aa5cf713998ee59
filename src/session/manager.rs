//! §4.8 Room Manager: the process-wide registry of rooms and the only
//! place that creates, seeds or deletes one. Mirrors the teacher's
//! `hosting::Casino` — a `RwLock<HashMap<RoomId, RoomHandle>>` guarding
//! concurrent-safe lookup while every mutation of a room's own state still
//! goes through that room's single-writer actor queue.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::RwLock;

use crate::errors::{AuthorizationError, IntegrityError};
use crate::gameplay::config::RoomConfig;
use crate::gameplay::room::{Room, RoomId};
use crate::gameplay::variant::GameVariant;

use super::controller::RoomHandle;

const ROOM_ID_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const ROOM_ID_LEN: usize = 6;

fn max_seats_for(variant: GameVariant) -> usize {
    if variant == GameVariant::Ofc {
        3
    } else {
        9
    }
}

/// One entry in the process-wide registry: the live actor handle plus the
/// bits a lobby listing needs without asking the actor (which would mean
/// round-tripping through its queue for every `get-room-list` poll).
struct Entry {
    handle: RoomHandle,
    variant: GameVariant,
    seat_count: usize,
    is_private: bool,
    is_preset: bool,
}

/// Public-facing summary for `get-room-list` (spec §6).
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub variant: GameVariant,
    pub seat_count: usize,
    pub is_private: bool,
}

/// The central registry of live rooms (spec §4.8). Lookup is concurrent-safe
/// under a reader-writer lock; mutating a room's own state always happens
/// through that room's serialized [`RoomHandle`], never here.
pub struct RoomManager {
    rooms: RwLock<HashMap<RoomId, Entry>>,
    reap_tx: UnboundedSender<RoomId>,
}

impl Default for RoomManager {
    fn default() -> Self {
        // A manager constructed bare (e.g. in unit tests) has no reaper
        // task; `on_empty` signals are simply dropped. `shared()` is the
        // constructor real deployments use, which wires the receiver up.
        let (reap_tx, _reap_rx) = mpsc::unbounded_channel();
        Self { rooms: RwLock::new(HashMap::new()), reap_tx }
    }
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the manager wrapped in the `Arc` every room handle shares,
    /// and spawns the background reaper that drains `on_empty` signals
    /// from room actors to delete non-preset rooms (spec §4.8).
    pub fn shared() -> Arc<Self> {
        let (reap_tx, mut reap_rx) = mpsc::unbounded_channel();
        let manager = Arc::new(Self { rooms: RwLock::new(HashMap::new()), reap_tx });
        let reaper = manager.clone();
        tokio::spawn(async move {
            while let Some(id) = reap_rx.recv().await {
                reaper.remove_if_empty_and_not_preset(&id).await;
            }
        });
        manager
    }

    /// Seeds the server's public, un-deletable preset rooms at startup
    /// (spec §4.8, §3 "preset marker"). Called once from `main`.
    pub async fn seed_presets(&self, presets: Vec<(RoomId, GameVariant, RoomConfig)>) {
        for (id, variant, config) in presets {
            let seat_count = max_seats_for(variant);
            let room = Room::new(id.clone(), seat_count, variant, config, true);
            self.insert(id, room, variant, seat_count, false, true).await;
        }
    }

    async fn insert(&self, id: RoomId, room: Room, variant: GameVariant, seat_count: usize, is_private: bool, is_preset: bool) -> RoomHandle {
        let handle = RoomHandle::spawn_with_notifier(room, Some(self.reap_tx.clone()));
        self.rooms.write().await.insert(id, Entry { handle: handle.clone(), variant, seat_count, is_private, is_preset });
        handle
    }

    fn random_room_id() -> RoomId {
        let mut rng = rand::rng();
        (0..ROOM_ID_LEN).map(|_| ROOM_ID_ALPHABET[rng.random_range(0..ROOM_ID_ALPHABET.len())] as char).collect()
    }

    /// §4.8 `createRoom`: generates (or validates a caller-supplied) 6-char
    /// id, rejects collisions, and spawns the room's actor.
    pub async fn create_room(
        &self,
        host_id: Option<String>,
        variant: GameVariant,
        config: RoomConfig,
        custom_id: Option<String>,
        is_private: bool,
    ) -> Result<RoomId, IntegrityError> {
        let id = match custom_id {
            Some(id) => {
                if id.len() != ROOM_ID_LEN {
                    return Err(IntegrityError::DuplicateRoomId);
                }
                if self.rooms.read().await.contains_key(&id) {
                    return Err(IntegrityError::DuplicateRoomId);
                }
                id
            }
            None => loop {
                let candidate = Self::random_room_id();
                if !self.rooms.read().await.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        let seat_count = max_seats_for(variant);
        let mut room = Room::new(id.clone(), seat_count, variant, config, false);
        room.host_seat_id = host_id;
        self.insert(id.clone(), room, variant, seat_count, is_private, false).await;
        Ok(id)
    }

    pub async fn get(&self, id: &str) -> Option<RoomHandle> {
        self.rooms.read().await.get(id).map(|e| e.handle.clone())
    }

    pub async fn check_password(&self, expected: &Option<String>, supplied: &Option<String>) -> Result<(), AuthorizationError> {
        match (expected, supplied) {
            (Some(want), Some(got)) if want == got => Ok(()),
            (Some(_), _) => Err(AuthorizationError::WrongPassword),
            (None, _) => Ok(()),
        }
    }

    /// §4.8: a non-preset room is deleted once its last seat empties. The
    /// session controller calls this after observing `room.is_empty()`
    /// post-standUp, since only it sees that transition as it happens.
    pub async fn remove_if_empty_and_not_preset(&self, id: &str) {
        let mut rooms = self.rooms.write().await;
        if let Some(entry) = rooms.get(id) {
            if !entry.is_preset {
                rooms.remove(id);
                log::info!("[room {id}] deleted (last seat left)");
            }
        }
    }

    pub async fn list(&self) -> Vec<RoomSummary> {
        self.rooms
            .read()
            .await
            .iter()
            .map(|(id, e)| RoomSummary {
                room_id: id.clone(),
                variant: e.variant,
                seat_count: e.seat_count,
                is_private: e.is_private,
            })
            .collect()
    }
}

pub type SharedRoomManager = Arc<RoomManager>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::config::RoomConfig;

    #[tokio::test]
    async fn create_room_rejects_duplicate_custom_id() {
        let mgr = RoomManager::new();
        let cfg = RoomConfig::new(5, 10);
        mgr.create_room(None, GameVariant::Nlh, cfg.clone(), Some("ABC123".into()), false).await.unwrap();
        let err = mgr.create_room(None, GameVariant::Nlh, cfg, Some("ABC123".into()), false).await.unwrap_err();
        assert_eq!(err, IntegrityError::DuplicateRoomId);
    }

    #[tokio::test]
    async fn ofc_rooms_are_capped_at_three_seats() {
        let mgr = RoomManager::new();
        let cfg = RoomConfig::new(5, 10);
        let id = mgr.create_room(None, GameVariant::Ofc, cfg, None, false).await.unwrap();
        let summary = mgr.list().await.into_iter().find(|r| r.room_id == id).unwrap();
        assert_eq!(summary.seat_count, 3);
    }

    #[tokio::test]
    async fn preset_rooms_survive_removal_attempts() {
        let mgr = RoomManager::new();
        let cfg = RoomConfig::new(5, 10);
        mgr.seed_presets(vec![("PRESET".into(), GameVariant::Nlh, cfg)]).await;
        mgr.remove_if_empty_and_not_preset("PRESET").await;
        assert!(mgr.get("PRESET").await.is_some());
    }
}
