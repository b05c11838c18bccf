//! Locomotion and gravity integration.
//!
//! Turns the per-tick movement intent into a displacement, hands it to the
//! collision-aware motor, then updates the gravity accumulator from the
//! grounded flag the motor reports. The accumulator has no terminal velocity:
//! a long fall keeps accelerating.

use bevy::math::{Quat, Vec2, Vec3};

use crate::anim::{AnimationSink, PARAM_HORIZONTAL, PARAM_VERTICAL};
use crate::player::PlayerAgent;
use crate::scene::{CharacterMotor, MoveOutcome};
use crate::settings::PlayerSettings;

/// Express a world-space intent in the character's own frame by undoing its
/// yaw. `x` is sideways, `y` is forward.
#[must_use]
pub fn local_intent(yaw: f32, intent: Vec2) -> Vec2 {
    let local = Quat::from_rotation_y(-yaw) * Vec3::new(intent.x, 0.0, intent.y);
    Vec2::new(local.x, local.z)
}

/// Step the agent's movement and gravity for one tick.
///
/// Extracted helper so the encounter tick and benchmarks exercise identical
/// logic.
///
/// # Arguments
/// * `agent` - the player agent to move
/// * `intent` - normalized movement intent (`x` maps to world x, `y` to world z)
/// * `dt` - frame delta in seconds
/// * `settings` - speed and gravity tuning
/// * `motor` - collision-aware move primitive
/// * `animator` - receives the local-frame blend parameters
pub fn locomotion_step(
    agent: &mut PlayerAgent,
    intent: Vec2,
    dt: f32,
    settings: &PlayerSettings,
    motor: &mut dyn CharacterMotor,
    animator: &mut dyn AnimationSink,
) -> MoveOutcome {
    let velocity = Vec3::new(
        intent.x * settings.move_speed,
        agent.vertical_velocity,
        intent.y * settings.move_speed,
    );
    let outcome = motor.move_and_collide(agent.position, velocity * dt);
    agent.position = outcome.position;

    if outcome.grounded {
        agent.vertical_velocity = settings.grounded_vertical_velocity;
    } else {
        agent.vertical_velocity -= settings.gravity * dt;
    }

    let blend = local_intent(agent.yaw(), intent);
    animator.set_float(PARAM_HORIZONTAL, blend.x);
    animator.set_float(PARAM_VERTICAL, blend.y);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::AnimatorParams;
    use crate::scene::GroundPlane;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 0.1;

    #[test]
    fn moves_at_configured_speed_on_ground() {
        let mut agent = PlayerAgent::new(Vec3::ZERO);
        let mut ground = GroundPlane::default();
        let mut anim = AnimatorParams::default();
        let settings = PlayerSettings::default();

        let out = locomotion_step(&mut agent, Vec2::X, DT, &settings, &mut ground, &mut anim);
        assert!(out.grounded);
        assert_relative_eq!(agent.position.x, 0.5, epsilon = 1e-6);
        assert_eq!(agent.position.y, 0.0);
        assert_eq!(agent.vertical_velocity, -1.0);
    }

    #[test]
    fn grounded_resets_accumulator_regardless_of_history() {
        let mut agent = PlayerAgent::new(Vec3::ZERO);
        let mut ground = GroundPlane::default();
        let mut anim = AnimatorParams::default();
        let settings = PlayerSettings::default();
        for previous in [-250.0, 0.0, 3.0, -1.0] {
            agent.vertical_velocity = previous;
            locomotion_step(&mut agent, Vec2::ZERO, DT, &settings, &mut ground, &mut anim);
            assert_eq!(agent.vertical_velocity, settings.grounded_vertical_velocity);
        }
    }

    #[test]
    fn falling_accumulates_without_clamp() {
        let mut agent = PlayerAgent::new(Vec3::new(0.0, 10_000.0, 0.0));
        let mut ground = GroundPlane::default();
        let mut anim = AnimatorParams::default();
        let settings = PlayerSettings::default();
        for _ in 0..100 {
            locomotion_step(&mut agent, Vec2::ZERO, DT, &settings, &mut ground, &mut anim);
        }
        // 100 ticks of 20 u/s^2 over 0.1 s each
        assert_relative_eq!(agent.vertical_velocity, -200.0, epsilon = 1e-3);
        assert!(agent.position.y < 10_000.0);
    }

    #[test]
    fn zero_intent_still_updates_blend() {
        let mut agent = PlayerAgent::new(Vec3::ZERO);
        let mut ground = GroundPlane::default();
        let mut anim = AnimatorParams::default();
        anim.set_float(PARAM_VERTICAL, 1.0);
        locomotion_step(&mut agent, Vec2::ZERO, DT, &PlayerSettings::default(), &mut ground, &mut anim);
        assert_eq!(agent.position.x, 0.0);
        assert_eq!(agent.position.z, 0.0);
        assert_eq!(anim.float(PARAM_VERTICAL), Some(0.0));
        assert_eq!(anim.float(PARAM_HORIZONTAL), Some(0.0));
    }

    #[test]
    fn blend_is_relative_to_facing() {
        // facing +X, moving +X is straight ahead
        let ahead = local_intent(FRAC_PI_2, Vec2::X);
        assert_relative_eq!(ahead.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(ahead.y, 1.0, epsilon = 1e-6);

        // facing +X, moving +Z is a strafe to the left
        let strafe = local_intent(FRAC_PI_2, Vec2::Y);
        assert_relative_eq!(strafe.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(strafe.y, 0.0, epsilon = 1e-6);
    }
}
