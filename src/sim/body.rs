//! Arcade body: a moving box with optional world-bounds collision

use glam::Vec2;

use super::collision::{Aabb, BoundsContact, bounce_off_walls, clamp_to_world};

/// A sprite's physical body (position is the box center)
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_extents: Vec2,
    /// Keep the body inside the world rectangle
    pub collide_world_bounds: bool,
    /// Restitution applied to velocity components that hit a wall
    pub bounce: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half_extents: Vec2::splat(size / 2.0),
            collide_world_bounds: false,
            bounce: 0.0,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_world_bounds(mut self, bounce: f32) -> Self {
        self.collide_world_bounds = true;
        self.bounce = bounce;
        self
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_extents)
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.aabb().overlaps(&other.aabb())
    }

    /// Advance one step and resolve world bounds
    pub fn integrate(&mut self, dt: f32, world: Vec2) -> BoundsContact {
        self.pos += self.vel * dt;
        self.keep_in_world(world)
    }

    /// Clamp into the world without moving (used after a resize)
    pub fn keep_in_world(&mut self, world: Vec2) -> BoundsContact {
        if !self.collide_world_bounds {
            return BoundsContact::default();
        }
        let (pos, contact) = clamp_to_world(self.pos, self.half_extents, world);
        self.pos = pos;
        if contact.any() {
            self.vel = bounce_off_walls(self.vel, contact, self.bounce);
        }
        contact
    }
}
