//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run deterministically.

use glam::Vec2;

use super::collision::velocity_toward;
use super::spawn::spawn_power_up;
use super::state::{GameEvent, GamePhase, GameState, SkeletonKind};

/// Held arrow keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursors {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub cursors: Cursors,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Skeletons closer than this push the autopilot away
const DANGER_RADIUS: f32 = 180.0;
/// Edge distance at which the autopilot starts avoiding walls
const WALL_MARGIN: f32 = 60.0;
/// Steering magnitude needed before a key is pressed
const STEER_DEAD_ZONE: f32 = 0.15;

/// Player velocity for the held keys (left beats right, up beats down)
pub fn player_velocity(cursors: Cursors, speed: f32) -> Vec2 {
    let x = if cursors.left {
        -speed
    } else if cursors.right {
        speed
    } else {
        0.0
    };
    let y = if cursors.up {
        -speed
    } else if cursors.down {
        speed
    } else {
        0.0
    };
    Vec2::new(x, y)
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::Caught => {}
        }
    }

    // Don't tick if paused or caught
    if state.phase != GamePhase::Playing {
        return;
    }

    let cursors = if input.idle_mode {
        autopilot(state)
    } else {
        input.cursors
    };

    state.time_ticks += 1;

    // Looping timers
    if state.score_timer.advance() {
        state.score += 1;
        state.events.push(GameEvent::ScoreTick { score: state.score });
    }
    if state.power_up_timer.advance() {
        if let Some(id) = spawn_power_up(state) {
            state.events.push(GameEvent::PowerUpSpawned { id });
        }
    }

    state.player.body.vel = player_velocity(cursors, state.tuning.player_speed);

    // Chasers speed up as the score grows
    let target = state.player.pos();
    let chase_speed = state.tuning.chase_speed(state.score);
    for skeleton in &mut state.skeletons {
        if skeleton.kind == SkeletonKind::Chaser {
            skeleton.body.vel = velocity_toward(skeleton.body.pos, target, chase_speed);
        }
    }

    // Integrate
    let world = state.world;
    state.player.body.integrate(dt, world);
    for skeleton in &mut state.skeletons {
        let contact = skeleton.body.integrate(dt, world);
        if skeleton.kind == SkeletonKind::Static && contact.any() {
            skeleton.body.vel = Vec2::ZERO;
        }
    }
    for power_up in &mut state.power_ups {
        power_up.body.integrate(dt, world);
    }

    // Capture ends the run before anything else is scored
    if state
        .skeletons
        .iter()
        .any(|s| s.body.overlaps(&state.player.body))
    {
        state.phase = GamePhase::Caught;
        state.events.push(GameEvent::PlayerCaught { score: state.score });
        log::info!("Player caught at score {}", state.score);
        return;
    }

    // Collect power-ups
    let bonus = state.tuning.power_up_bonus;
    let player = state.player.body.clone();
    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        if p.body.overlaps(&player) {
            collected.push(p.id);
            false
        } else {
            true
        }
    });
    for id in collected {
        state.score += bonus;
        state.events.push(GameEvent::PowerUpCollected {
            id,
            bonus,
            score: state.score,
        });
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Demo-mode steering: flee nearby skeletons and walls, grab power-ups when safe
fn autopilot(state: &GameState) -> Cursors {
    let pos = state.player.pos();
    let mut steer = Vec2::ZERO;
    let mut threatened = false;

    for skeleton in &state.skeletons {
        // Lead chasers slightly since they keep coming
        let lead = if skeleton.kind == SkeletonKind::Chaser {
            0.25
        } else {
            0.1
        };
        let predicted = skeleton.body.pos + skeleton.body.vel * lead;
        let away = pos - predicted;
        let dist = away.length();
        if dist < DANGER_RADIUS {
            threatened = true;
            let strength = (DANGER_RADIUS / dist.max(1.0)).powi(2);
            steer += away.normalize_or_zero() * strength;
        }
    }

    // Walls
    let world = state.world;
    if pos.x < WALL_MARGIN {
        steer.x += (WALL_MARGIN - pos.x) / WALL_MARGIN * 2.0;
    } else if pos.x > world.x - WALL_MARGIN {
        steer.x -= (pos.x - (world.x - WALL_MARGIN)) / WALL_MARGIN * 2.0;
    }
    if pos.y < WALL_MARGIN {
        steer.y += (WALL_MARGIN - pos.y) / WALL_MARGIN * 2.0;
    } else if pos.y > world.y - WALL_MARGIN {
        steer.y -= (pos.y - (world.y - WALL_MARGIN)) / WALL_MARGIN * 2.0;
    }

    // If safe, go grab the nearest power-up
    if !threatened {
        let nearest = state.power_ups.iter().min_by(|a, b| {
            let da = a.body.pos.distance_squared(pos);
            let db = b.body.pos.distance_squared(pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        if let Some(power_up) = nearest {
            steer += (power_up.body.pos - pos).normalize_or_zero();
        }
    }

    let dir = steer.normalize_or_zero();
    Cursors {
        left: dir.x < -STEER_DEAD_ZONE,
        right: dir.x > STEER_DEAD_ZONE,
        up: dir.y < -STEER_DEAD_ZONE,
        down: dir.y > STEER_DEAD_ZONE,
    }
}
