//! Smoothed follow camera.
//!
//! Only the followed point is tracked here; the binary adds the configured
//! view offset when it places the actual lens.

use bevy::math::Vec3;

/// Point the camera rig chases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FollowCamera {
    pub position: Vec3,
}

impl FollowCamera {
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Lerp toward `target` by `speed * dt`, clamped so a long frame lands on
    /// the target instead of overshooting it.
    ///
    /// Public so benchmarks/systems can call the same logic.
    pub fn follow(&mut self, target: Vec3, speed: f32, dt: f32) {
        let t = (speed * dt).clamp(0.0, 1.0);
        self.position = self.position.lerp(target, t);
    }
}
