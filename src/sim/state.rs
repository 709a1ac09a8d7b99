//! Game state and core simulation types
//!
//! Everything the Game scene mutates while a run is live lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::timer::Timer;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::world_center;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// A skeleton touched the player; the run is over
    Caught,
}

/// Skeleton behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkeletonKind {
    /// Falls downward, then stops at the first world edge it touches
    Static,
    /// Drifts at a random velocity, bouncing off the world edges
    Wanderer,
    /// Steers toward the player, faster as the score grows
    Chaser,
}

/// An enemy entity
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: u32,
    pub kind: SkeletonKind,
    pub body: Body,
}

/// A collectible that adds to the score
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub body: Body,
}

/// The player sprite
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
}

impl Player {
    pub fn spawn(world: Vec2) -> Self {
        Self {
            body: Body::new(world_center(world), PLAYER_SIZE).with_world_bounds(0.0),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }
}

/// Things that happened during a tick, drained by the caller (audio, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The score timer fired
    ScoreTick { score: u64 },
    PowerUpSpawned { id: u32 },
    PowerUpCollected { id: u32, bonus: u64, score: u64 },
    /// A skeleton touched the player
    PlayerCaught { score: u64 },
}

/// Complete state of one run (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// World size in pixels
    pub world: Vec2,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Seconds survived plus power-up bonuses
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score_timer: Timer,
    pub power_up_timer: Timer,
    pub player: Player,
    /// Sorted by id
    pub skeletons: Vec<Skeleton>,
    /// Sorted by id
    pub power_ups: Vec<PowerUp>,
    /// Pending events for this frame
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run and populate the skeletons
    pub fn new(seed: u64, world: Vec2, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            world,
            score_timer: Timer::from_millis(tuning.score_interval_ms, SIM_DT),
            power_up_timer: Timer::from_millis(tuning.power_up_interval_ms, SIM_DT),
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            player: Player::spawn(world),
            skeletons: Vec::new(),
            power_ups: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        super::spawn::spawn_skeletons(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Score shown on the HUD
    pub fn display_time(&self) -> u64 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Caught
    }

    pub fn count_of(&self, kind: SkeletonKind) -> usize {
        self.skeletons.iter().filter(|s| s.kind == kind).count()
    }

    /// Change the world size, pulling bounded bodies back inside
    pub fn resize(&mut self, world: Vec2) {
        self.world = world;
        self.player.body.keep_in_world(world);
        for skeleton in &mut self.skeletons {
            skeleton.body.keep_in_world(world);
        }
        for power_up in &mut self.power_ups {
            power_up.body.keep_in_world(world);
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure deterministic iteration order
    pub fn normalize_order(&mut self) {
        self.skeletons.sort_by_key(|s| s.id);
        self.power_ups.sort_by_key(|p| p.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Vec2 {
        Vec2::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
    }

    #[test]
    fn test_new_run() {
        let state = GameState::new(42, world(), Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos(), Vec2::new(400.0, 300.0));
        assert_eq!(state.skeletons.len(), 15);
        assert_eq!(state.count_of(SkeletonKind::Static), 5);
        assert_eq!(state.count_of(SkeletonKind::Wanderer), 5);
        assert_eq!(state.count_of(SkeletonKind::Chaser), 5);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique_and_sorted() {
        let state = GameState::new(7, world(), Tuning::default());
        let ids: Vec<u32> = state.skeletons.iter().map(|s| s.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_resize_pulls_player_inside() {
        let mut state = GameState::new(1, world(), Tuning::default());
        state.resize(Vec2::new(300.0, 200.0));
        let aabb = state.player.body.aabb();
        assert!(aabb.max.x <= 300.0 && aabb.max.y <= 200.0);
    }
}
