//! Animation sink: the one-way channel from the simulation to whatever plays
//! animations.
//!
//! The core never reads anything back from the animator. `AnimatorParams` is
//! a parameter blackboard implementing the sink; the binary attaches one to
//! the player and one to the enemy, and tests use it to observe what was sent.
use bevy::prelude::Component;
use std::collections::HashMap;

/// Locomotion blend parameter for sideways motion in the character's frame.
pub const PARAM_HORIZONTAL: &str = "Horizontal";
/// Locomotion blend parameter for forward/back motion in the character's frame.
pub const PARAM_VERTICAL: &str = "Vertical";
/// Trigger fired when the finishing move starts.
pub const TRIGGER_FINISHING: &str = "Finishing";

/// Fire-and-forget animation commands.
pub trait AnimationSink {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_trigger(&mut self, name: &str);
    fn set_enabled(&mut self, enabled: bool);
}

/// Recorded animator state.
///
/// Floats keep their latest value, triggers queue until drained and
/// `enabled` mirrors the last `set_enabled` call.
#[derive(Component, Debug, Clone)]
pub struct AnimatorParams {
    pub floats: HashMap<String, f32>,
    pub pending_triggers: Vec<String>,
    pub enabled: bool,
}

impl Default for AnimatorParams {
    fn default() -> Self {
        Self {
            floats: HashMap::new(),
            pending_triggers: Vec::new(),
            enabled: true,
        }
    }
}

impl AnimatorParams {
    #[must_use]
    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// Take every trigger fired since the last drain.
    pub fn drain_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_triggers)
    }
}

impl AnimationSink for AnimatorParams {
    fn set_float(&mut self, name: &str, value: f32) {
        if let Some(slot) = self.floats.get_mut(name) {
            *slot = value;
        } else {
            self.floats.insert(name.to_string(), value);
        }
    }

    fn set_trigger(&mut self, name: &str) {
        self.pending_triggers.push(name.to_string());
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
