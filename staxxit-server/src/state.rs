//! Server state management
//!
//! One `Room` per match, keyed by a short join code. All room mutation
//! goes through the rooms write lock, so actions for a room are applied
//! one at a time, never concurrently.

use rand::Rng;
use staxxit_core::{MatchState, Player};
use std::collections::HashMap;
use std::sync::RwLock;

/// One hosted match with its seated players
#[derive(Clone, Debug)]
pub struct Room {
    pub game: MatchState,
    /// player id -> seat color
    pub seats: HashMap<String, Player>,
    /// Bumped on every accepted mutation; drives client polling
    pub version: u64,
}

impl Room {
    pub fn new() -> Self {
        Self {
            game: MatchState::new(),
            seats: HashMap::new(),
            version: 0,
        }
    }

    pub fn seat_of(&self, player_id: &str) -> Option<Player> {
        self.seats.get(player_id).copied()
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= 2
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

/// Server-wide shared state
pub struct ServerState {
    pub rooms: RwLock<HashMap<String, Room>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

const ID_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn random_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect()
}

/// Short join code shown to the other player
pub fn generate_room_id() -> String {
    random_id(6)
}

/// Per-seat credential; knowing it is what authorizes moves for a color
pub fn generate_player_id() -> String {
    random_id(16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_seating() {
        let mut room = Room::new();
        assert!(!room.is_full());
        room.seats.insert("a".into(), Player::White);
        room.seats.insert("b".into(), Player::Black);
        assert!(room.is_full());
        assert_eq!(room.seat_of("a"), Some(Player::White));
        assert_eq!(room.seat_of("c"), None);
    }

    #[test]
    fn test_id_shapes() {
        let room_id = generate_room_id();
        assert_eq!(room_id.len(), 6);
        assert!(room_id.bytes().all(|b| ID_CHARS.contains(&b)));
        assert_eq!(generate_player_id().len(), 16);
    }
}
