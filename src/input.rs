//! Per-tick input snapshot handed to the encounter.
use bevy::math::{Vec2, Vec3};
use bevy::prelude::Resource;

/// What the player asked for this tick.
///
/// - `axis`: world-space movement intent on the x/z plane (`y` maps to
///   world z), length at most 1.
/// - `cursor`: cursor position in viewport pixels, `None` when the cursor is
///   outside the window.
/// - `activate_pressed`: the finish key went down this tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub axis: Vec2,
    pub cursor: Option<Vec2>,
    pub activate_pressed: bool,
}

/// Rotate a raw keyboard axis (`x` right, `y` forward) into world space
/// using the camera's forward and right vectors flattened onto the ground.
///
/// The result is normalized, so diagonals are not faster than straight
/// movement. A zero axis, or a camera looking straight down with no usable
/// basis, gives zero intent.
#[must_use]
pub fn camera_relative_axis(raw: Vec2, cam_forward: Vec3, cam_right: Vec3) -> Vec2 {
    let forward = Vec2::new(cam_forward.x, cam_forward.z).normalize_or_zero();
    let right = Vec2::new(cam_right.x, cam_right.z).normalize_or_zero();
    (right * raw.x + forward * raw.y).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn forward_follows_camera_heading() {
        // camera behind the player looking toward +Z, tilted down
        let fwd = Vec3::new(0.0, -0.8, 0.6);
        let right = Vec3::NEG_X;
        let axis = camera_relative_axis(Vec2::Y, fwd, right);
        assert_relative_eq!(axis.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(axis.y, 1.0, epsilon = 1e-6);

        let strafe = camera_relative_axis(Vec2::X, fwd, right);
        assert_relative_eq!(strafe.x, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn diagonal_is_normalized() {
        let axis = camera_relative_axis(Vec2::ONE, Vec3::Z, Vec3::X);
        assert_relative_eq!(axis.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn no_input_is_zero() {
        assert_eq!(camera_relative_axis(Vec2::ZERO, Vec3::Z, Vec3::X), Vec2::ZERO);
        assert_eq!(camera_relative_axis(Vec2::Y, Vec3::NEG_Y, Vec3::ZERO), Vec2::ZERO);
    }
}
