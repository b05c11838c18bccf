//! Enemy lifecycle: alive, struck down, and respawned somewhere new.
//!
//! A hit schedules two independent deferred transitions measured from the
//! same instant: a short one that stops the animator (the visual death) and a
//! longer one that revives the enemy at a random spot inside the spawn
//! rectangle. The enemy is the only writer of its own state; the player side
//! only reads an [`EnemyView`] and sends [`RequestHit`] messages.
use bevy::log::{debug, info, warn};
use bevy::math::{Vec2, Vec3};
use rand::Rng;
use std::time::Duration;

use crate::anim::AnimationSink;
use crate::deferred::{self, DeferredQueue};
use crate::settings::EnemySettings;

/// Lifecycle phase. Everything but `Alive` counts as dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyPhase {
    #[default]
    Alive,
    /// Hit registered, death animation still playing.
    Hit,
    /// Animator stopped, waiting for the respawn.
    Dying,
}

/// Message asking the enemy to register a killing blow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHit;

/// What a [`RequestHit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Registered,
    /// The enemy was already dead; nothing was scheduled.
    IgnoredWhileDead,
}

/// Lifecycle transitions, reported to whoever ticks the enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyEvent {
    Hit,
    Died,
    Respawned { position: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifecycleTask {
    Die,
    Respawn,
}

/// Read-only snapshot used by detection and the finisher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub position: Vec3,
    pub is_dead: bool,
}

#[derive(Debug)]
pub struct Enemy {
    pub position: Vec3,
    phase: EnemyPhase,
    timers: DeferredQueue<LifecycleTask>,
    spawn_range: Vec2,
    die_delay: Duration,
    respawn_delay: Duration,
}

impl Enemy {
    #[must_use]
    pub fn new(position: Vec3, settings: &EnemySettings) -> Self {
        Self {
            position,
            phase: EnemyPhase::Alive,
            timers: DeferredQueue::default(),
            spawn_range: settings.spawn_range(),
            die_delay: deferred::seconds(settings.die_delay_seconds),
            respawn_delay: deferred::seconds(settings.respawn_delay_seconds),
        }
    }

    #[must_use]
    pub fn phase(&self) -> EnemyPhase {
        self.phase
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.phase != EnemyPhase::Alive
    }

    #[must_use]
    pub fn view(&self) -> EnemyView {
        EnemyView { position: self.position, is_dead: self.is_dead() }
    }

    /// Number of lifecycle transitions still waiting to fire.
    #[must_use]
    pub fn pending_transitions(&self) -> usize {
        self.timers.len()
    }

    /// When the next scheduled lifecycle transition lands, if one is pending.
    #[must_use]
    pub fn next_transition_at(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Register a hit at `now`.
    ///
    /// A dead enemy ignores further hits, so the die/respawn pair scheduled by
    /// the first hit can never overlap with a second one.
    pub fn hit(&mut self, _request: RequestHit, now: Duration) -> HitOutcome {
        if self.is_dead() {
            warn!("hit on an enemy that is already dead ignored");
            return HitOutcome::IgnoredWhileDead;
        }
        self.phase = EnemyPhase::Hit;
        self.timers.schedule(now + self.die_delay, LifecycleTask::Die);
        self.timers.schedule(now + self.respawn_delay, LifecycleTask::Respawn);
        info!("enemy hit at {:.2}s", now.as_secs_f32());
        HitOutcome::Registered
    }

    /// Fire every lifecycle transition due at `now`.
    pub fn process_due<R: Rng + ?Sized>(
        &mut self,
        now: Duration,
        animator: &mut dyn AnimationSink,
        rng: &mut R,
    ) -> Vec<EnemyEvent> {
        self.timers
            .drain_due(now)
            .into_iter()
            .map(|task| match task {
                LifecycleTask::Die => {
                    animator.set_enabled(false);
                    if self.phase == EnemyPhase::Hit {
                        self.phase = EnemyPhase::Dying;
                    }
                    debug!("enemy down");
                    EnemyEvent::Died
                }
                LifecycleTask::Respawn => {
                    animator.set_enabled(true);
                    self.phase = EnemyPhase::Alive;
                    self.position = sample_spawn_position(rng, self.spawn_range, self.position.y);
                    info!("enemy respawned at {:?}", self.position);
                    EnemyEvent::Respawned { position: self.position }
                }
            })
            .collect()
    }
}

/// Uniform point in `[-range.x, range.x] x [-range.y, range.y]` on the x/z
/// plane at height `y`. A non-finite axis collapses to zero.
pub fn sample_spawn_position<R: Rng + ?Sized>(rng: &mut R, range: Vec2, y: f32) -> Vec3 {
    Vec3::new(spawn_axis(rng, range.x), y, spawn_axis(rng, range.y))
}

fn spawn_axis<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if !extent.is_finite() {
        return 0.0;
    }
    // scaling a unit sample keeps huge extents from overflowing the range width
    extent.abs() * rng.gen_range(-1.0f32..=1.0)
}
