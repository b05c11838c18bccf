//! Shared collaborator doubles for the integration tests.
#![allow(dead_code)]

use bevy::math::{Vec2, Vec3};
use finisher_arena::anim::AnimatorParams;
use finisher_arena::encounter::{Collaborators, Encounter, EncounterEvent};
use finisher_arena::input::FrameInput;
use finisher_arena::scene::{AimRay, CursorProjector, GroundPlane};
use finisher_arena::settings::Settings;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const DT: f32 = 1.0 / 50.0;

/// Cursor rays straight down from above the cursor; screen units are world
/// units on the x/z plane.
pub struct Overhead;

impl CursorProjector for Overhead {
    fn cursor_ray(&self, cursor: Vec2) -> Option<AimRay> {
        Some(AimRay { origin: Vec3::new(cursor.x, 50.0, cursor.y), direction: Vec3::NEG_Y })
    }
}

/// An encounter plus everything it needs to tick.
pub struct Harness {
    pub encounter: Encounter,
    pub ground: GroundPlane,
    pub player_anim: AnimatorParams,
    pub enemy_anim: AnimatorParams,
    pub rng: StdRng,
    pub log: Vec<EncounterEvent>,
}

impl Harness {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            encounter: Encounter::new(settings),
            ground: GroundPlane::default(),
            player_anim: AnimatorParams::default(),
            enemy_anim: AnimatorParams::default(),
            rng: StdRng::seed_from_u64(seed),
            log: Vec::new(),
        }
    }

    /// Player at the origin, enemy `distance` ahead on +Z.
    pub fn facing_enemy_at(distance: f32) -> Self {
        let mut settings = Settings::default();
        settings.player.start_position = [0.0, 0.0, 0.0];
        settings.enemy.start_position = [0.0, 0.0, distance];
        Self::new(&settings, 7)
    }

    pub fn tick(&mut self, dt: f32, input: FrameInput) -> Vec<EncounterEvent> {
        let floor = self.ground;
        let mut io = Collaborators {
            motor: &mut self.ground,
            scene: &floor,
            projector: &Overhead,
            player_animator: &mut self.player_anim,
            enemy_animator: &mut self.enemy_anim,
            rng: &mut self.rng,
        };
        let events = self.encounter.tick(dt, &input, &mut io);
        self.log.extend(events.iter().copied());
        events
    }

    pub fn idle(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick(DT, FrameInput::default());
        }
    }

    pub fn press(&mut self) -> Vec<EncounterEvent> {
        self.tick(DT, FrameInput { activate_pressed: true, ..FrameInput::default() })
    }

    pub fn count(&self, wanted: EncounterEvent) -> usize {
        self.log.iter().filter(|e| **e == wanted).count()
    }
}
