//! Startup scene: light, ground slab, player and enemy rigs, camera.
//!
//! Everything is built from primitive meshes. The rigs are plain transform
//! hierarchies; the per-frame sync systems drive them from the `Encounter`
//! resource.
use bevy::prelude::*;
use finisher_arena::anim::AnimatorParams;
use finisher_arena::encounter::Encounter;
use finisher_arena::settings::Settings;

use crate::{EnemyBody, EnemyModel, MainCamera, PlayerBody, PlayerModel, RifleVisual, SwordVisual, UpperBody};

const ARENA_SIZE: f32 = 40.0;

/// Spawn the arena.
///
/// # Arguments
/// - `commands`: Commands used to spawn entities.
/// - `meshes`: Asset storage for the primitive meshes.
/// - `materials`: Asset storage for standard materials.
/// - `encounter`: Start positions of both agents and the camera.
/// - `settings`: Upper-body joint offset and camera view offset.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    encounter: Res<Encounter>,
    settings: Res<Settings>,
) {
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            shadows_enabled: true,
            illuminance: 8000.0,
            ..default()
        },
        transform: Transform::from_xyz(4.0, 10.0, -6.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Plane3d::default().mesh().size(ARENA_SIZE, ARENA_SIZE)),
            material: materials.add(Color::srgb(0.32, 0.36, 0.30)),
            ..default()
        },
        Name::new("ground"),
    ));

    let body_mat = materials.add(Color::srgb(0.25, 0.45, 0.85));
    let marker_mat = materials.add(Color::srgb(0.95, 0.95, 0.95));
    let steel_mat = materials.add(Color::srgb(0.8, 0.82, 0.85));
    let gun_mat = materials.add(Color::srgb(0.15, 0.15, 0.15));
    let enemy_mat = materials.add(Color::srgb(0.8, 0.2, 0.2));

    let player = &encounter.player;
    commands
        .spawn((
            SpatialBundle::from_transform(
                Transform::from_translation(player.position).with_rotation(player.rotation),
            ),
            PlayerBody,
            AnimatorParams::default(),
            Name::new("player"),
        ))
        .with_children(|rig| {
            rig.spawn((
                PbrBundle {
                    mesh: meshes.add(Capsule3d::new(0.4, 1.0)),
                    material: body_mat,
                    transform: Transform::from_xyz(0.0, 0.9, 0.0),
                    ..default()
                },
                PlayerModel,
            ));
            // facing marker
            rig.spawn(PbrBundle {
                mesh: meshes.add(Cuboid::new(0.2, 0.1, 0.2)),
                material: marker_mat,
                transform: Transform::from_xyz(0.0, 0.3, 0.45),
                ..default()
            });
            rig.spawn((
                SpatialBundle::from_transform(Transform::from_translation(settings.aim.upper_body_offset())),
                UpperBody,
            ))
            .with_children(|torso| {
                torso.spawn((
                    PbrBundle {
                        mesh: meshes.add(Cuboid::new(0.12, 0.12, 0.9)),
                        material: gun_mat,
                        transform: Transform::from_xyz(0.3, -0.2, 0.45),
                        ..default()
                    },
                    RifleVisual,
                ));
                torso.spawn((
                    PbrBundle {
                        mesh: meshes.add(Cuboid::new(0.06, 0.06, 1.3)),
                        material: steel_mat,
                        transform: Transform::from_xyz(0.35, -0.2, 0.65),
                        visibility: Visibility::Hidden,
                        ..default()
                    },
                    SwordVisual,
                ));
            });
        });

    commands
        .spawn((
            SpatialBundle::from_transform(Transform::from_translation(encounter.enemy.position)),
            EnemyBody,
            AnimatorParams::default(),
            Name::new("enemy"),
        ))
        .with_children(|rig| {
            rig.spawn((
                PbrBundle {
                    mesh: meshes.add(Cuboid::new(0.8, 1.8, 0.8)),
                    material: enemy_mat,
                    transform: Transform::from_xyz(0.0, 0.9, 0.0),
                    ..default()
                },
                EnemyModel,
            ));
        });

    let focus = encounter.camera.position;
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(focus + settings.camera.view_offset())
                .looking_at(focus, Vec3::Y),
            ..default()
        },
        MainCamera,
    ));
}
