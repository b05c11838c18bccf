//! Physics-facing collaborators of the controller.
//!
//! The controller only needs three things from the outside world: a ray
//! through the cursor, a ground intersection along that ray, and a
//! collision-aware move that tells it whether the character ended up on the
//! ground. Each is a trait so the core can run against the engine's physics,
//! against [`GroundPlane`], or against a test double.
use bevy::math::{Vec2, Vec3};

/// Layer the ground geometry lives on.
pub const GROUND_LAYER: u32 = 6;

/// A ray in world space. `direction` does not need to be normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Result of a collision-aware move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub position: Vec3,
    pub grounded: bool,
}

/// Ground raycasts against a layer mask.
pub trait SceneQuery {
    /// First intersection with ground on any layer in `layer_mask`, no
    /// further than `max_distance` along the ray.
    fn raycast_ground(&self, ray: AimRay, max_distance: f32, layer_mask: u32) -> Option<Vec3>;
}

/// Turns a screen-space cursor into a world ray (the camera's job).
pub trait CursorProjector {
    fn cursor_ray(&self, cursor: Vec2) -> Option<AimRay>;
}

/// Collision-aware move primitive.
pub trait CharacterMotor {
    fn move_and_collide(&mut self, from: Vec3, displacement: Vec3) -> MoveOutcome;
}

/// An infinite horizontal ground plane on a single layer.
///
/// Serves as both the ground query and the character motor for the arena,
/// which is a flat floor with nothing else to collide with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub height: f32,
    pub layer: u32,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self { height: 0.0, layer: GROUND_LAYER }
    }
}

impl GroundPlane {
    #[must_use]
    pub const fn new(height: f32) -> Self {
        Self { height, layer: GROUND_LAYER }
    }

    fn layer_bit(&self) -> u32 {
        1u32.checked_shl(self.layer).unwrap_or(0)
    }
}

impl SceneQuery for GroundPlane {
    fn raycast_ground(&self, ray: AimRay, max_distance: f32, layer_mask: u32) -> Option<Vec3> {
        if layer_mask & self.layer_bit() == 0 {
            return None;
        }
        let dir = ray.direction.normalize_or_zero();
        if dir.y.abs() <= f32::EPSILON {
            return None;
        }
        let t = (self.height - ray.origin.y) / dir.y;
        if t < 0.0 || t > max_distance {
            return None;
        }
        Some(ray.origin + dir * t)
    }
}

impl CharacterMotor for GroundPlane {
    fn move_and_collide(&mut self, from: Vec3, displacement: Vec3) -> MoveOutcome {
        let mut position = from + displacement;
        let grounded = position.y <= self.height;
        if grounded {
            position.y = self.height;
        }
        MoveOutcome { position, grounded }
    }
}
