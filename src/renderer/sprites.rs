//! Sprite geometry for a run and the world-to-screen mapping

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GameState, SkeletonKind};

const CIRCLE_SEGMENTS: u32 = 20;

/// Map world pixels (origin top-left, y down) to normalized device coordinates
///
/// The world is scaled uniformly to fit the viewport and centered, leaving
/// letterbox bars on the longer axis.
pub fn world_to_ndc(p: Vec2, world: Vec2, viewport: Vec2) -> Vec2 {
    if world.x <= 0.0 || world.y <= 0.0 || viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (viewport.x / world.x).min(viewport.y / world.y);
    let fitted = world * scale;
    let offset = (viewport - fitted) * 0.5;

    // Viewport pixels, then NDC with y up
    let px = offset + p * scale;
    Vec2::new(px.x / viewport.x * 2.0 - 1.0, 1.0 - px.y / viewport.y * 2.0)
}

fn skeleton_color(kind: SkeletonKind) -> [f32; 4] {
    match kind {
        SkeletonKind::Static => colors::SKELETON_STATIC,
        SkeletonKind::Wanderer => colors::SKELETON_WANDERER,
        SkeletonKind::Chaser => colors::SKELETON_CHASER,
    }
}

/// All sprites for the current run, in world coordinates
///
/// Draw order: playfield, power-ups, skeletons, player on top.
pub fn scene_vertices(state: &GameState, time_secs: f32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        6 + (state.power_ups.len() + state.skeletons.len() + 2) * CIRCLE_SEGMENTS as usize * 6,
    );

    vertices.extend(shapes::rect(Vec2::ZERO, state.world, colors::PLAYFIELD));

    // Power-ups pulse gently
    let pulse = 1.0 + (time_secs * 6.0).sin() * 0.1;
    for power_up in &state.power_ups {
        let r = power_up.body.half_extents.x;
        vertices.extend(shapes::circle(
            power_up.body.pos,
            r * pulse,
            colors::POWER_UP_GLOW,
            CIRCLE_SEGMENTS,
        ));
        vertices.extend(shapes::diamond(power_up.body.pos, r * 0.8, colors::POWER_UP));
    }

    for skeleton in &state.skeletons {
        vertices.extend(shapes::circle(
            skeleton.body.pos,
            skeleton.body.half_extents.x,
            skeleton_color(skeleton.kind),
            CIRCLE_SEGMENTS,
        ));
    }

    let player = &state.player.body;
    let r = player.half_extents.x;
    vertices.extend(shapes::circle(player.pos, r, colors::PLAYER, CIRCLE_SEGMENTS));
    vertices.extend(shapes::ring(
        player.pos,
        r - 3.0,
        r,
        colors::PLAYER_OUTLINE,
        CIRCLE_SEGMENTS,
    ));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_same_aspect_fills_viewport() {
        let world = Vec2::new(800.0, 600.0);
        let viewport = Vec2::new(1600.0, 1200.0);
        assert!(close(world_to_ndc(Vec2::ZERO, world, viewport), Vec2::new(-1.0, 1.0)));
        assert!(close(world_to_ndc(world, world, viewport), Vec2::new(1.0, -1.0)));
        assert!(close(
            world_to_ndc(world * 0.5, world, viewport),
            Vec2::ZERO
        ));
    }

    #[test]
    fn test_wider_viewport_is_letterboxed() {
        let world = Vec2::new(800.0, 600.0);
        let viewport = Vec2::new(1600.0, 600.0);
        // Fitted width is 800 of 1600, centered
        assert!(close(world_to_ndc(Vec2::ZERO, world, viewport), Vec2::new(-0.5, 1.0)));
        assert!(close(world_to_ndc(world, world, viewport), Vec2::new(0.5, -1.0)));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(world_to_ndc(Vec2::ONE, Vec2::ZERO, Vec2::ONE), Vec2::ZERO);
    }

    #[test]
    fn test_scene_draws_every_sprite() {
        let state = GameState::new(1, Vec2::new(800.0, 600.0), Tuning::default());
        let vertices = scene_vertices(&state, 0.0);
        let per_circle = CIRCLE_SEGMENTS as usize * 3;
        let expected = 6 + state.skeletons.len() * per_circle + per_circle + per_circle * 2;
        assert_eq!(vertices.len(), expected);
        assert_eq!(vertices.len() % 3, 0);
    }
}
