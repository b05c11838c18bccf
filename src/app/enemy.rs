use bevy::prelude::*;
use finisher_arena::anim::AnimatorParams;
use finisher_arena::encounter::Encounter;
use finisher_arena::enemy::EnemyPhase;
use std::f32::consts::FRAC_PI_2;

use crate::{EnemyBody, EnemyModel};

/// Place the enemy rig and pose it for its lifecycle phase: upright while
/// alive, reeling once hit, lying flat once its animator has been stopped.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_enemy_visuals(
    encounter: Res<Encounter>,
    mut bodies: Query<(&mut Transform, &AnimatorParams), (With<EnemyBody>, Without<EnemyModel>)>,
    mut models: Query<&mut Transform, (With<EnemyModel>, Without<EnemyBody>)>,
) {
    let Ok((mut root, params)) = bodies.get_single_mut() else { return };
    root.translation = encounter.enemy.position;

    let pose = if !params.enabled {
        Transform::from_xyz(0.0, 0.4, 0.0).with_rotation(Quat::from_rotation_x(FRAC_PI_2))
    } else if encounter.enemy.phase() == EnemyPhase::Hit {
        Transform::from_xyz(0.0, 0.9, 0.0).with_rotation(Quat::from_rotation_x(-0.35))
    } else {
        Transform::from_xyz(0.0, 0.9, 0.0)
    };
    for mut model in &mut models {
        *model = pose;
    }
}
