//! Player agent state and the systems that drive it each tick.
//!
//! - `locomotion`: intent to displacement, gravity, blend parameters
//! - `aim`: cursor anchor, full-body facing, upper-body yaw
//! - `detection`: enemy proximity, prompt, finisher trigger
//! - `finisher`: the locked finishing sequence
//!
//! Facing convention: a yaw of `θ` radians faces `(sin θ, 0, cos θ)`, i.e.
//! the character's local +Z axis.
pub mod aim;
pub mod detection;
pub mod finisher;
pub mod locomotion;

use bevy::math::{Quat, Vec3};
use std::time::Duration;

use crate::deferred::DeferredQueue;

pub use aim::*;
pub use detection::*;
pub use finisher::*;
pub use locomotion::*;

/// Equipped weapon; exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weapon {
    Melee,
    #[default]
    Ranged,
}

/// Where the finishing sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinisherPhase {
    Executing { started_at: Duration, ends_at: Duration },
}

/// Who owns the agent's transform this tick.
///
/// `Free`: locomotion, orientation, detection and the upper-body pass run.
/// `Locked`: only the finisher may move, turn or re-equip the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    #[default]
    Free,
    Locked(FinisherPhase),
}

#[derive(Debug)]
pub struct PlayerAgent {
    pub position: Vec3,
    /// Yaw-only world rotation.
    pub rotation: Quat,
    /// Gravity accumulator, persists across ticks.
    pub vertical_velocity: f32,
    /// Last point the cursor hit on the ground; never cleared.
    pub aim_anchor: Vec3,
    pub weapon: Weapon,
    /// World yaw of the upper-body joint, radians.
    pub upper_body_yaw: f32,
    pub prompt_visible: bool,
    mode: ControlMode,
    finisher_timers: DeferredQueue<FinisherStep>,
}

impl PlayerAgent {
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            vertical_velocity: 0.0,
            aim_anchor: position + Vec3::Z,
            weapon: Weapon::default(),
            upper_body_yaw: 0.0,
            prompt_visible: false,
            mode: ControlMode::Free,
            finisher_timers: DeferredQueue::default(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.mode == ControlMode::Free
    }

    /// Current yaw in radians, in `(-PI, PI]`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        yaw_of(self.rotation)
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Yaw of a rotation about +Y, read off the rotated +Z axis.
#[must_use]
pub fn yaw_of(rotation: Quat) -> f32 {
    let f = rotation * Vec3::Z;
    f.x.atan2(f.z)
}

/// Yaw that faces along `direction` on the horizontal plane, or `None` when
/// the direction has no horizontal component.
#[must_use]
pub fn look_yaw(direction: Vec3) -> Option<f32> {
    if direction.x.abs() <= f32::EPSILON && direction.z.abs() <= f32::EPSILON {
        return None;
    }
    Some(direction.x.atan2(direction.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn new_agent_is_free_with_rifle_out() {
        let p = PlayerAgent::new(Vec3::ZERO);
        assert!(p.is_free());
        assert_eq!(p.weapon, Weapon::Ranged);
        assert_eq!(p.vertical_velocity, 0.0);
        assert!(p.forward().abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn yaw_round_trips_through_rotation() {
        assert_relative_eq!(yaw_of(Quat::from_rotation_y(FRAC_PI_2)), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(yaw_of(Quat::from_rotation_y(-2.0)), -2.0, epsilon = 1e-6);
    }

    #[test]
    fn look_yaw_ignores_height_and_degenerate_directions() {
        assert_eq!(look_yaw(Vec3::new(0.0, 5.0, 0.0)), None);
        assert_relative_eq!(look_yaw(Vec3::new(1.0, 3.0, 0.0)).unwrap_or_default(), FRAC_PI_2);
    }
}
