//! Keyboard and cursor sampling into the per-tick `FrameInput`.
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use finisher_arena::input::{FrameInput, camera_relative_axis};
use finisher_arena::settings::Settings;

use crate::MainCamera;

/// Build this frame's `FrameInput` from the configured keybinds, the camera
/// heading and the cursor position.
///
/// # Arguments
/// - `keys`: Keyboard state.
/// - `windows`: Primary window, for the cursor position.
/// - `cameras`: Main camera transform, for camera-relative movement.
/// - `settings`: Keybind map.
/// - `input`: The resource the encounter step reads.
#[allow(clippy::needless_pass_by_value)]
pub fn gather_frame_input(
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<&GlobalTransform, With<MainCamera>>,
    settings: Res<Settings>,
    mut input: ResMut<FrameInput>,
) {
    let controls = &settings.controls;
    let held = |action: &str, default: KeyCode| keys.pressed(controls.key_for(action, default));

    let mut raw = Vec2::ZERO;
    if held("forward", KeyCode::KeyW) { raw.y += 1.0; }
    if held("back", KeyCode::KeyS) { raw.y -= 1.0; }
    if held("right", KeyCode::KeyD) { raw.x += 1.0; }
    if held("left", KeyCode::KeyA) { raw.x -= 1.0; }

    // default rig looks down +Z, which puts screen-right on -X
    let (forward, right) = cameras
        .get_single()
        .map_or((Vec3::Z, Vec3::NEG_X), |t| (*t.forward(), *t.right()));

    *input = FrameInput {
        axis: camera_relative_axis(raw, forward, right),
        cursor: windows.get_single().ok().and_then(Window::cursor_position),
        activate_pressed: keys.just_pressed(controls.key_for("finish", KeyCode::Space)),
    };
}
