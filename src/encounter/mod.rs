//! The encounter: one player, one enemy, one clock.
//!
//! `Encounter::tick` is the whole simulation step. The engine layer gathers
//! input, hands over its scene collaborators and reads the resulting state
//! back; nothing in here touches the ECS directly.
//!
//! Order within a tick:
//! 1. advance the clock
//! 2. fire due deferred tasks (enemy lifecycle, finisher completion)
//! 3. resolve the aim anchor
//! 4. while free: locomotion, full-body orientation, detection, upper body
//! 5. deliver a pending hit to the enemy
//! 6. move the follow camera
use bevy::log::debug;
use bevy::prelude::{Event, Resource};
use rand::RngCore;
use std::time::Duration;

use crate::anim::AnimationSink;
use crate::camera::FollowCamera;
use crate::deferred;
use crate::enemy::{Enemy, EnemyEvent, HitOutcome};
use crate::input::FrameInput;
use crate::player::{
    PlayerAgent, apply_upper_body, detect_enemy, locomotion_step, orient_body, resolve_aim_anchor,
};
use crate::scene::{CharacterMotor, CursorProjector, SceneQuery};
use crate::settings::Settings;

/// Everything the tick borrows from the outside world for one step.
pub struct Collaborators<'a> {
    pub motor: &'a mut dyn CharacterMotor,
    pub scene: &'a dyn SceneQuery,
    pub projector: &'a dyn CursorProjector,
    pub player_animator: &'a mut dyn AnimationSink,
    pub enemy_animator: &'a mut dyn AnimationSink,
    pub rng: &'a mut dyn RngCore,
}

/// Notable things that happened during a tick.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum EncounterEvent {
    FinisherStarted,
    FinisherEnded,
    Enemy(EnemyEvent),
    /// A hit reached an enemy that was already dead.
    HitIgnored,
    PromptChanged(bool),
}

#[derive(Resource, Debug)]
pub struct Encounter {
    pub player: PlayerAgent,
    pub enemy: Enemy,
    pub camera: FollowCamera,
    pub settings: Settings,
    clock: Duration,
}

impl Encounter {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let player = PlayerAgent::new(settings.player.start_position());
        let camera = FollowCamera::new(player.position);
        Self {
            enemy: Enemy::new(settings.enemy.start_position(), &settings.enemy),
            player,
            camera,
            settings: settings.clone(),
            clock: Duration::ZERO,
        }
    }

    /// Encounter time. Only advances inside [`Encounter::tick`].
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Advance the encounter by `dt` seconds.
    pub fn tick(&mut self, dt: f32, input: &FrameInput, io: &mut Collaborators<'_>) -> Vec<EncounterEvent> {
        let mut events = Vec::new();
        self.clock += deferred::seconds(dt);
        let now = self.clock;

        events.extend(
            self.enemy
                .process_due(now, &mut *io.enemy_animator, &mut *io.rng)
                .into_iter()
                .map(EncounterEvent::Enemy),
        );
        if self.player.process_finisher(now) {
            events.push(EncounterEvent::FinisherEnded);
        }

        resolve_aim_anchor(&mut self.player, input.cursor, io.projector, io.scene, &self.settings.aim);

        let mut pending_hit = None;
        if self.player.is_free() {
            locomotion_step(
                &mut self.player,
                input.axis,
                dt,
                &self.settings.player,
                &mut *io.motor,
                &mut *io.player_animator,
            );
            orient_body(&mut self.player, input.axis, dt, &self.settings.aim);

            let prompt_before = self.player.prompt_visible;
            pending_hit = detect_enemy(
                &mut self.player,
                self.enemy.view(),
                input.activate_pressed,
                now,
                &self.settings.finisher,
                &mut *io.player_animator,
            );
            if self.player.prompt_visible != prompt_before {
                events.push(EncounterEvent::PromptChanged(self.player.prompt_visible));
            }
            if pending_hit.is_some() {
                events.push(EncounterEvent::FinisherStarted);
            }

            apply_upper_body(&mut self.player, &self.settings.aim);
        }

        if let Some(hit) = pending_hit {
            match self.enemy.hit(hit, now) {
                HitOutcome::Registered => events.push(EncounterEvent::Enemy(EnemyEvent::Hit)),
                HitOutcome::IgnoredWhileDead => events.push(EncounterEvent::HitIgnored),
            }
        }

        self.camera.follow(self.player.position, self.settings.camera.follow_speed, dt);

        if !events.is_empty() {
            debug!("tick at {:.3}s produced {} event(s)", now.as_secs_f32(), events.len());
        }
        events
    }
}
