//! Aim anchor resolution and body orientation.
//!
//! The anchor is where the cursor meets the ground. A miss keeps the previous
//! anchor, so aiming off the edge of the world leaves the character facing
//! the last valid point. The anchor is always flattened to the agent's own
//! height, which keeps every facing computation on the horizontal plane.
//!
//! Full-body facing snaps to the anchor while moving. Standing still, it only
//! turns once the anchor drifts past the deadzone, and then turns smoothly.
//! The upper body tracks the anchor on its own every tick, which lets the
//! character aim inside the deadzone without shuffling its feet.

use bevy::math::{Quat, Vec2, Vec3};

use crate::player::{PlayerAgent, look_yaw};
use crate::scene::{CursorProjector, SceneQuery};
use crate::settings::AimSettings;

/// Re-resolve the aim anchor from the cursor.
///
/// Returns `true` if the ground was hit and the anchor moved to the new
/// point. On a miss the stale anchor is kept. Either way the anchor's height
/// is forced to the agent's.
pub fn resolve_aim_anchor(
    agent: &mut PlayerAgent,
    cursor: Option<Vec2>,
    projector: &dyn CursorProjector,
    scene: &dyn SceneQuery,
    settings: &AimSettings,
) -> bool {
    let hit = cursor
        .and_then(|c| projector.cursor_ray(c))
        .and_then(|ray| scene.raycast_ground(ray, settings.max_ray_distance, settings.layer_mask));
    if let Some(point) = hit {
        agent.aim_anchor = point;
    }
    agent.aim_anchor.y = agent.position.y;
    hit.is_some()
}

/// Turn the whole body toward the anchor.
///
/// With movement intent the agent faces the anchor on the same tick. Without
/// it the agent slerps toward the anchor at `rotation_speed`, but only while
/// the angle to the anchor exceeds `deadzone_degrees`.
pub fn orient_body(agent: &mut PlayerAgent, intent: Vec2, dt: f32, settings: &AimSettings) {
    let to_anchor = agent.aim_anchor - agent.position;
    let Some(target_yaw) = look_yaw(to_anchor) else {
        return;
    };
    let target = Quat::from_rotation_y(target_yaw);

    if intent != Vec2::ZERO {
        agent.rotation = target;
        return;
    }

    let off_by = agent.forward().angle_between(Vec3::new(to_anchor.x, 0.0, to_anchor.z)).to_degrees();
    if off_by > settings.deadzone_degrees {
        let t = (settings.rotation_speed * dt).clamp(0.0, 1.0);
        agent.rotation = agent.rotation.slerp(target, t).normalize();
    }
}

/// World yaw for the upper-body joint facing the anchor, corrected by the
/// rig's rest-pose offset.
#[must_use]
pub fn upper_body_yaw(agent: &PlayerAgent, settings: &AimSettings) -> f32 {
    let joint = agent.position + agent.rotation * settings.upper_body_offset();
    let to_anchor = agent.aim_anchor - joint;
    to_anchor.x.atan2(to_anchor.z) - settings.upper_body_yaw_offset_degrees.to_radians()
}

/// World yaw the aim actually points along: the stored joint yaw with the
/// rest-pose offset added back.
#[must_use]
pub fn upper_body_aim_yaw(agent: &PlayerAgent, settings: &AimSettings) -> f32 {
    agent.upper_body_yaw + settings.upper_body_yaw_offset_degrees.to_radians()
}

/// Torso yaw relative to the body root, for a pivot parented to the root that
/// carries no rest offset of its own.
#[must_use]
pub fn torso_local_yaw(agent: &PlayerAgent, settings: &AimSettings) -> f32 {
    upper_body_aim_yaw(agent, settings) - agent.yaw()
}

/// Late pass: aim the upper body after the full body has settled.
pub fn apply_upper_body(agent: &mut PlayerAgent, settings: &AimSettings) {
    agent.upper_body_yaw = upper_body_yaw(agent, settings);
}
