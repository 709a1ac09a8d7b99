//! Collision detection and response for axis-aligned sprites
//!
//! Every sprite is a box centered on its position. Overlap tests are strict:
//! boxes that merely touch along an edge do not overlap.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box centered on `center` with the given half extents
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Which world edges blocked a body during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundsContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl BoundsContact {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Clamp a box center so the box lies inside `[0, world.x] x [0, world.y]`
///
/// Returns the clamped center and the sides that were hit. A box larger than
/// the world is centered on that axis.
pub fn clamp_to_world(center: Vec2, half_extents: Vec2, world: Vec2) -> (Vec2, BoundsContact) {
    let mut pos = center;
    let mut contact = BoundsContact::default();

    if half_extents.x * 2.0 >= world.x {
        pos.x = world.x * 0.5;
    } else if pos.x - half_extents.x < 0.0 {
        pos.x = half_extents.x;
        contact.left = true;
    } else if pos.x + half_extents.x > world.x {
        pos.x = world.x - half_extents.x;
        contact.right = true;
    }

    if half_extents.y * 2.0 >= world.y {
        pos.y = world.y * 0.5;
    } else if pos.y - half_extents.y < 0.0 {
        pos.y = half_extents.y;
        contact.top = true;
    } else if pos.y + half_extents.y > world.y {
        pos.y = world.y - half_extents.y;
        contact.bottom = true;
    }

    (pos, contact)
}

/// Reflect the velocity components that point into blocked walls
///
/// `bounce` of 1.0 is a perfect reflection, 0.0 stops the component.
pub fn bounce_off_walls(vel: Vec2, contact: BoundsContact, bounce: f32) -> Vec2 {
    let mut v = vel;
    if (contact.left && v.x < 0.0) || (contact.right && v.x > 0.0) {
        v.x = -v.x * bounce;
    }
    if (contact.top && v.y < 0.0) || (contact.bottom && v.y > 0.0) {
        v.y = -v.y * bounce;
    }
    v
}

/// Velocity of magnitude `speed` pointing from `from` to `to`
///
/// Zero when the points coincide.
#[inline]
pub fn velocity_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::from_center(Vec2::new(10.0, 10.0), Vec2::splat(5.0));
        let b = Aabb::from_center(Vec2::new(14.0, 12.0), Vec2::splat(5.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_center(Vec2::new(10.0, 10.0), Vec2::splat(5.0));
        let b = Aabb::from_center(Vec2::new(20.0, 10.0), Vec2::splat(5.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_clamp_to_world_left_and_bottom() {
        let world = Vec2::new(100.0, 100.0);
        let (pos, contact) = clamp_to_world(Vec2::new(2.0, 99.0), Vec2::splat(5.0), world);
        assert_eq!(pos, Vec2::new(5.0, 95.0));
        assert!(contact.left && contact.bottom);
        assert!(!contact.right && !contact.top);
    }

    #[test]
    fn test_clamp_inside_is_untouched() {
        let world = Vec2::new(100.0, 100.0);
        let (pos, contact) = clamp_to_world(Vec2::new(50.0, 50.0), Vec2::splat(5.0), world);
        assert_eq!(pos, Vec2::new(50.0, 50.0));
        assert!(!contact.any());
    }

    #[test]
    fn test_box_larger_than_world_is_centered() {
        let world = Vec2::new(8.0, 100.0);
        let (pos, contact) = clamp_to_world(Vec2::new(1.0, 50.0), Vec2::splat(5.0), world);
        assert_eq!(pos.x, 4.0);
        assert!(!contact.left);
    }

    #[test]
    fn test_bounce_reflects_only_into_wall() {
        let contact = BoundsContact {
            right: true,
            ..Default::default()
        };
        let v = bounce_off_walls(Vec2::new(50.0, 20.0), contact, 1.0);
        assert_eq!(v, Vec2::new(-50.0, 20.0));

        // Already moving away from the wall
        let v = bounce_off_walls(Vec2::new(-50.0, 20.0), contact, 1.0);
        assert_eq!(v, Vec2::new(-50.0, 20.0));
    }

    #[test]
    fn test_zero_bounce_stops_component() {
        let contact = BoundsContact {
            bottom: true,
            ..Default::default()
        };
        let v = bounce_off_walls(Vec2::new(0.0, 100.0), contact, 0.0);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_velocity_toward() {
        let v = velocity_toward(Vec2::ZERO, Vec2::new(3.0, 4.0), 10.0);
        assert!((v - Vec2::new(6.0, 8.0)).length() < 0.001);
        assert_eq!(velocity_toward(Vec2::ONE, Vec2::ONE, 10.0), Vec2::ZERO);
    }
}
