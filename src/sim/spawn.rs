//! Randomized spawning of skeletons and power-ups

use glam::Vec2;

use super::body::Body;
use super::state::{GameState, PowerUp, Skeleton, SkeletonKind};
use crate::consts::*;
use crate::random_between;

/// Random spawn point; `top` is the smallest allowed y
fn random_point(state: &mut GameState, top: f32) -> Vec2 {
    let w = state.world.x as i32;
    let h = state.world.y as i32;
    let top = (top as i32).min(h);
    let x = random_between(&mut state.rng, 0, w);
    let y = random_between(&mut state.rng, top, h);
    Vec2::new(x as f32, y as f32)
}

/// Random velocity with each component in [-max, max]
fn random_velocity(state: &mut GameState, max: f32) -> Vec2 {
    let max = max as i32;
    let vx = random_between(&mut state.rng, -max, max);
    let vy = random_between(&mut state.rng, -max, max);
    Vec2::new(vx as f32, vy as f32)
}

/// Populate the three skeleton classes for a new run
pub fn spawn_skeletons(state: &mut GameState) {
    let margin = state.tuning.spawn_top_margin;

    for _ in 0..state.tuning.static_count {
        let pos = random_point(state, margin);
        let fall = Vec2::new(0.0, state.tuning.static_fall_speed);
        let body = Body::new(pos, SKELETON_SIZE)
            .with_velocity(fall)
            .with_world_bounds(0.0);
        push_skeleton(state, SkeletonKind::Static, body);
    }

    let wander_max = state.tuning.wander_max_speed;
    for _ in 0..state.tuning.wanderer_count {
        let pos = random_point(state, margin);
        let vel = random_velocity(state, wander_max);
        let body = Body::new(pos, SKELETON_SIZE)
            .with_velocity(vel)
            .with_world_bounds(1.0);
        push_skeleton(state, SkeletonKind::Wanderer, body);
    }

    // Chasers ignore the world edges; they are steered every tick
    for _ in 0..state.tuning.chaser_count {
        let pos = random_point(state, margin);
        let body = Body::new(pos, SKELETON_SIZE);
        push_skeleton(state, SkeletonKind::Chaser, body);
    }

    log::debug!(
        "Spawned {} skeletons in {}x{} world",
        state.skeletons.len(),
        state.world.x,
        state.world.y
    );
}

fn push_skeleton(state: &mut GameState, kind: SkeletonKind, body: Body) {
    let id = state.next_entity_id();
    state.skeletons.push(Skeleton { id, kind, body });
}

/// Drop a bouncing power-up somewhere on screen
///
/// Returns the new id, or `None` when the live cap is reached.
pub fn spawn_power_up(state: &mut GameState) -> Option<u32> {
    if state.power_ups.len() >= state.tuning.max_power_ups {
        log::debug!("Power-up cap ({}) reached, skipping spawn", state.tuning.max_power_ups);
        return None;
    }

    let max_speed = state.tuning.power_up_max_speed;
    let pos = random_point(state, 0.0);
    let vel = random_velocity(state, max_speed);
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        body: Body::new(pos, POWER_UP_SIZE)
            .with_velocity(vel)
            .with_world_bounds(1.0),
    });
    Some(id)
}
