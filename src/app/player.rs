//! Player rig sync.
//!
//! Pushes the simulated player into the rig transforms each frame: root
//! position and facing, a small lean from the locomotion blend parameters,
//! the torso yaw and which weapon is drawn.
use bevy::prelude::*;
use finisher_arena::anim::{AnimatorParams, PARAM_HORIZONTAL, PARAM_VERTICAL};
use finisher_arena::encounter::Encounter;
use finisher_arena::player::{Weapon, torso_local_yaw};

use crate::{PlayerBody, PlayerModel, RifleVisual, SwordVisual, UpperBody};

const LEAN_RADIANS: f32 = 0.15;

/// Move the player rig to match the encounter.
///
/// # Arguments
/// - `encounter`: Simulated player state.
/// - `bodies`: Rig root with its animator parameters.
/// - `models`: The leaning body mesh.
/// - `torsos`: The upper-body pivot.
#[allow(clippy::needless_pass_by_value, clippy::type_complexity)]
pub fn sync_player_visuals(
    encounter: Res<Encounter>,
    mut bodies: Query<(&mut Transform, &AnimatorParams), (With<PlayerBody>, Without<PlayerModel>, Without<UpperBody>)>,
    mut models: Query<&mut Transform, (With<PlayerModel>, Without<PlayerBody>, Without<UpperBody>)>,
    mut torsos: Query<&mut Transform, (With<UpperBody>, Without<PlayerBody>, Without<PlayerModel>)>,
) {
    let player = &encounter.player;
    let Ok((mut root, params)) = bodies.get_single_mut() else { return };
    root.translation = player.position;
    root.rotation = player.rotation;

    let forward = params.float(PARAM_VERTICAL).unwrap_or(0.0);
    let sideways = params.float(PARAM_HORIZONTAL).unwrap_or(0.0);
    for mut model in &mut models {
        model.rotation = Quat::from_rotation_x(forward * LEAN_RADIANS) * Quat::from_rotation_z(-sideways * LEAN_RADIANS);
    }

    // the primitive pivot has no rest pose, so the rig offset goes back in
    let local_yaw = torso_local_yaw(player, &encounter.settings.aim);
    for mut torso in &mut torsos {
        torso.rotation = Quat::from_rotation_y(local_yaw);
    }
}

/// Show exactly one of the sword and the rifle.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_weapon_visuals(
    encounter: Res<Encounter>,
    mut swords: Query<&mut Visibility, (With<SwordVisual>, Without<RifleVisual>)>,
    mut rifles: Query<&mut Visibility, (With<RifleVisual>, Without<SwordVisual>)>,
) {
    let (sword, rifle) = match encounter.player.weapon {
        Weapon::Melee => (Visibility::Inherited, Visibility::Hidden),
        Weapon::Ranged => (Visibility::Hidden, Visibility::Inherited),
    };
    for mut vis in &mut swords {
        *vis = sword;
    }
    for mut vis in &mut rifles {
        *vis = rifle;
    }
}
