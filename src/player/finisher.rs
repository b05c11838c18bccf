//! Finishing move: a timed sequence that owns the agent while it runs.
//!
//! Starting the finisher locks control, fires the animation trigger, puts
//! the agent exactly `finishing_distance` from the enemy in a single step,
//! faces the enemy, draws the melee weapon and asks the enemy to register the
//! hit, all on the starting tick. The kill lands at the start of the
//! sequence, not at the end of the animation. When the configured duration
//! has passed, a deferred step puts the rifle back and releases control.
//! Nothing cancels or restarts a running finisher.

use bevy::log::{info, warn};
use bevy::math::{Quat, Vec3};
use std::time::Duration;
use thiserror::Error;

use crate::anim::{AnimationSink, TRIGGER_FINISHING};
use crate::deferred;
use crate::enemy::{EnemyView, RequestHit};
use crate::player::{ControlMode, FinisherPhase, PlayerAgent, Weapon, look_yaw};
use crate::settings::FinisherSettings;

/// Deferred steps of the finishing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinisherStep {
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FinisherError {
    #[error("a finisher is already running")]
    AlreadyRunning,
}

/// Where a one-shot lerp toward `target` lands when it stops
/// `finishing_distance` short of it.
///
/// The lerp factor is `1 - finishing_distance / distance`. Starting closer
/// than `finishing_distance` gives a negative factor, which backs the agent
/// out to the same distance. Starting on top of the target leaves the agent
/// where it is.
#[must_use]
pub fn finishing_position(from: Vec3, target: Vec3, finishing_distance: f32) -> Vec3 {
    let distance = from.distance(target);
    if distance <= f32::EPSILON {
        return from;
    }
    from.lerp(target, 1.0 - finishing_distance / distance)
}

impl PlayerAgent {
    /// Start the finishing sequence against `enemy` at `now`.
    ///
    /// Returns the hit request to deliver to the enemy on this same tick.
    ///
    /// # Errors
    /// [`FinisherError::AlreadyRunning`] if control is already locked; the
    /// running sequence is left untouched.
    pub fn begin_finisher(
        &mut self,
        enemy: EnemyView,
        now: Duration,
        settings: &FinisherSettings,
        animator: &mut dyn AnimationSink,
    ) -> Result<RequestHit, FinisherError> {
        if !self.is_free() {
            warn!("finisher requested while one is running, ignored");
            return Err(FinisherError::AlreadyRunning);
        }

        let ends_at = now + deferred::seconds(settings.duration_seconds);
        self.mode = ControlMode::Locked(FinisherPhase::Executing { started_at: now, ends_at });
        animator.set_trigger(TRIGGER_FINISHING);

        self.position = finishing_position(self.position, enemy.position, settings.finishing_distance);
        if let Some(yaw) = look_yaw(enemy.position - self.position) {
            self.rotation = Quat::from_rotation_y(yaw);
        }
        self.weapon = Weapon::Melee;
        self.finisher_timers.schedule(ends_at, FinisherStep::Complete);

        info!("finisher started at {:.2}s", now.as_secs_f32());
        Ok(RequestHit)
    }

    /// When control comes back, if a finisher is running.
    #[must_use]
    pub fn unlock_at(&self) -> Option<Duration> {
        self.finisher_timers.next_deadline()
    }

    /// Run finisher steps due at `now`. Returns `true` if the sequence ended.
    pub fn process_finisher(&mut self, now: Duration) -> bool {
        let mut ended = false;
        for step in self.finisher_timers.drain_due(now) {
            match step {
                FinisherStep::Complete => {
                    self.weapon = Weapon::Ranged;
                    self.mode = ControlMode::Free;
                    ended = true;
                    info!("finisher finished at {:.2}s", now.as_secs_f32());
                }
            }
        }
        ended
    }
}
