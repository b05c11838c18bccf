use bevy::prelude::*;
use finisher_arena::encounter::Encounter;
use finisher_arena::settings::Settings;

use crate::MainCamera;

/// Put the lens at the smoothed follow point plus the configured view
/// offset, looking at the follow point.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_camera_rig(
    encounter: Res<Encounter>,
    settings: Res<Settings>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let focus = encounter.camera.position;
    for mut t in &mut cameras {
        *t = Transform::from_translation(focus + settings.camera.view_offset()).looking_at(focus, Vec3::Y);
    }
}
