//! The per-frame encounter step.
//!
//! Wires the ECS side of the world into the encounter's collaborator seams:
//! the flat arena floor is both motor and ground query, the main camera
//! projects the cursor, and the rigs' `AnimatorParams` receive animation
//! commands.
use bevy::prelude::*;
use finisher_arena::anim::{AnimationSink, AnimatorParams};
use finisher_arena::encounter::{Collaborators, Encounter, EncounterEvent};
use finisher_arena::input::FrameInput;
use finisher_arena::scene::{AimRay, CursorProjector, GroundPlane};

use crate::{EnemyBody, MainCamera, PlayerBody, SpawnRng};

/// Casts cursor rays through the main camera. With no camera there is no ray.
pub struct ViewportProjector<'a> {
    pub view: Option<(&'a Camera, &'a GlobalTransform)>,
}

impl CursorProjector for ViewportProjector<'_> {
    fn cursor_ray(&self, cursor: Vec2) -> Option<AimRay> {
        let (camera, transform) = self.view?;
        let ray = camera.viewport_to_world(transform, cursor)?;
        Some(AimRay { origin: ray.origin, direction: *ray.direction })
    }
}

/// Tick the encounter by this frame's delta and publish what happened.
///
/// # Arguments
/// - `time`: Frame delta.
/// - `input`: This frame's `FrameInput`.
/// - `encounter`: The simulation.
/// - `rng`: Respawn randomness.
/// - `cameras`: Main camera, for cursor projection.
/// - `player_anim` / `enemy_anim`: The rigs' animator parameters.
/// - `events`: Receives every `EncounterEvent` from the tick.
#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
pub fn step_encounter(
    time: Res<Time>,
    input: Res<FrameInput>,
    mut encounter: ResMut<Encounter>,
    mut rng: ResMut<SpawnRng>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut player_anim: Query<&mut AnimatorParams, (With<PlayerBody>, Without<EnemyBody>)>,
    mut enemy_anim: Query<&mut AnimatorParams, (With<EnemyBody>, Without<PlayerBody>)>,
    mut events: EventWriter<EncounterEvent>,
) {
    let mut ground = GroundPlane::new(0.0);
    let floor = ground;
    let projector = ViewportProjector { view: cameras.get_single().ok() };

    // rigs may not exist yet on the very first frame
    let mut player_spare = AnimatorParams::default();
    let mut enemy_spare = AnimatorParams::default();
    let mut player_slot = player_anim.get_single_mut().ok();
    let mut enemy_slot = enemy_anim.get_single_mut().ok();
    let player_animator: &mut dyn AnimationSink = match player_slot.as_mut() {
        Some(params) => &mut **params,
        None => &mut player_spare,
    };
    let enemy_animator: &mut dyn AnimationSink = match enemy_slot.as_mut() {
        Some(params) => &mut **params,
        None => &mut enemy_spare,
    };

    let mut io = Collaborators {
        motor: &mut ground,
        scene: &floor,
        projector: &projector,
        player_animator,
        enemy_animator,
        rng: &mut rng.0,
    };
    let fired = encounter.tick(time.delta_seconds(), &input, &mut io);
    events.send_batch(fired);
}
