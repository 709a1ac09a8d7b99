//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use body::Body;
pub use collision::{Aabb, BoundsContact, velocity_toward};
pub use spawn::{spawn_power_up, spawn_skeletons};
pub use state::{GameEvent, GamePhase, GameState, Player, PowerUp, Skeleton, SkeletonKind};
pub use tick::{Cursors, TickInput, player_velocity, tick};
pub use timer::Timer;
