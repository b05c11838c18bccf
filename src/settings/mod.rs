//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and read once at
//! startup (see `loader`). Every field has a serde default, so a file only
//! needs to mention what it changes. Values are scene-time constants: nothing
//! reconfigures them while the arena is running.
use bevy::math::{Vec2, Vec3};
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::scene::GROUND_LAYER;

/// Movement and gravity tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default = "PlayerSettings::default_move_speed")]
    pub move_speed: f32, // World units per second at full stick.
    #[serde(default = "PlayerSettings::default_gravity")]
    pub gravity: f32, // Downward acceleration while airborne.
    #[serde(default = "PlayerSettings::default_grounded_vertical_velocity")]
    pub grounded_vertical_velocity: f32, // Keeps the character pressed to the floor.
    #[serde(default)]
    pub start_position: [f32; 3],
}

impl PlayerSettings {
    fn default_move_speed() -> f32 { 5.0 }
    fn default_gravity() -> f32 { 20.0 }
    fn default_grounded_vertical_velocity() -> f32 { -1.0 }

    #[must_use]
    pub fn start_position(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            move_speed: Self::default_move_speed(),
            gravity: Self::default_gravity(),
            grounded_vertical_velocity: Self::default_grounded_vertical_velocity(),
            start_position: [0.0; 3],
        }
    }
}

/// Cursor aiming and body orientation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimSettings {
    #[serde(default = "AimSettings::default_layer_mask")]
    pub layer_mask: u32, // Layers the cursor ray may hit.
    #[serde(default = "AimSettings::default_max_ray_distance")]
    pub max_ray_distance: f32,
    #[serde(default = "AimSettings::default_deadzone_degrees")]
    pub deadzone_degrees: f32, // Idle turn starts only past this angle to the anchor.
    #[serde(default = "AimSettings::default_rotation_speed")]
    pub rotation_speed: f32, // Slerp rate for idle turning, per second.
    #[serde(default = "AimSettings::default_upper_body_yaw_offset_degrees")]
    pub upper_body_yaw_offset_degrees: f32, // Rest-pose yaw baked into the rig's spine.
    #[serde(default = "AimSettings::default_upper_body_offset")]
    pub upper_body_offset: [f32; 3], // Spine joint position relative to the feet.
}

impl AimSettings {
    fn default_layer_mask() -> u32 { 1 << GROUND_LAYER }
    fn default_max_ray_distance() -> f32 { 100.0 }
    fn default_deadzone_degrees() -> f32 { 70.0 }
    fn default_rotation_speed() -> f32 { 5.0 }
    fn default_upper_body_yaw_offset_degrees() -> f32 { 80.0 }
    fn default_upper_body_offset() -> [f32; 3] { [0.0, 1.4, 0.0] }

    #[must_use]
    pub fn upper_body_offset(&self) -> Vec3 {
        Vec3::from_array(self.upper_body_offset)
    }
}

impl Default for AimSettings {
    fn default() -> Self {
        Self {
            layer_mask: Self::default_layer_mask(),
            max_ray_distance: Self::default_max_ray_distance(),
            deadzone_degrees: Self::default_deadzone_degrees(),
            rotation_speed: Self::default_rotation_speed(),
            upper_body_yaw_offset_degrees: Self::default_upper_body_yaw_offset_degrees(),
            upper_body_offset: Self::default_upper_body_offset(),
        }
    }
}

/// Finishing move reach and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinisherSettings {
    #[serde(default = "FinisherSettings::default_approach_distance")]
    pub approach_distance: f32, // Prompt shows and the finisher is allowed inside this range.
    #[serde(default = "FinisherSettings::default_finishing_distance")]
    pub finishing_distance: f32, // Where the player lands relative to the enemy.
    #[serde(default = "FinisherSettings::default_duration_seconds")]
    pub duration_seconds: f32, // Control stays locked this long.
}

impl FinisherSettings {
    fn default_approach_distance() -> f32 { 3.0 }
    fn default_finishing_distance() -> f32 { 1.0 }
    fn default_duration_seconds() -> f32 { 1.35 }
}

impl Default for FinisherSettings {
    fn default() -> Self {
        Self {
            approach_distance: Self::default_approach_distance(),
            finishing_distance: Self::default_finishing_distance(),
            duration_seconds: Self::default_duration_seconds(),
        }
    }
}

/// Enemy death and respawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySettings {
    #[serde(default = "EnemySettings::default_spawn_range")]
    pub spawn_range: [f32; 2], // Half extents on x and z around the origin.
    #[serde(default = "EnemySettings::default_die_delay_seconds")]
    pub die_delay_seconds: f32,
    #[serde(default = "EnemySettings::default_respawn_delay_seconds")]
    pub respawn_delay_seconds: f32,
    #[serde(default = "EnemySettings::default_start_position")]
    pub start_position: [f32; 3],
}

impl EnemySettings {
    fn default_spawn_range() -> [f32; 2] { [10.0, 10.0] }
    fn default_die_delay_seconds() -> f32 { 0.8 }
    fn default_respawn_delay_seconds() -> f32 { 5.0 }
    fn default_start_position() -> [f32; 3] { [0.0, 0.0, 6.0] }

    #[must_use]
    pub fn spawn_range(&self) -> Vec2 {
        Vec2::from_array(self.spawn_range)
    }

    #[must_use]
    pub fn start_position(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            spawn_range: Self::default_spawn_range(),
            die_delay_seconds: Self::default_die_delay_seconds(),
            respawn_delay_seconds: Self::default_respawn_delay_seconds(),
            start_position: Self::default_start_position(),
        }
    }
}

/// Follow camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    #[serde(default = "CameraSettings::default_follow_speed")]
    pub follow_speed: f32,
    #[serde(default = "CameraSettings::default_view_offset")]
    pub view_offset: [f32; 3], // Lens position relative to the followed point.
}

impl CameraSettings {
    fn default_follow_speed() -> f32 { 5.0 }
    fn default_view_offset() -> [f32; 3] { [0.0, 12.0, -9.0] }

    #[must_use]
    pub fn view_offset(&self) -> Vec3 {
        Vec3::from_array(self.view_offset)
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            follow_speed: Self::default_follow_speed(),
            view_offset: Self::default_view_offset(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Action name -> key identifier.
}

impl ControlsSettings {
    fn default_keybinds() -> HashMap<String, String> {
        [
            ("forward", "W"),
            ("back", "S"),
            ("left", "A"),
            ("right", "D"),
            ("finish", "Space"),
        ]
        .into_iter()
        .map(|(action, key)| (action.to_string(), key.to_string()))
        .collect()
    }

    /// Key bound to `action`, or `default` if unbound or unparseable.
    #[must_use]
    pub fn key_for(&self, action: &str, default: KeyCode) -> KeyCode {
        self.keybinds
            .get(action)
            .and_then(|s| Settings::keycode_from_str(s))
            .unwrap_or(default)
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { keybinds: Self::default_keybinds() }
    }
}

/// A setting combination the arena cannot run with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("`{field}` must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("spawn range must not be negative, got ({x}, {z})")]
    NegativeSpawnRange { x: f32, z: f32 },
    #[error("finishing distance {finishing} must be below the approach distance {approach}")]
    FinishingOutsideApproach { finishing: f32, approach: f32 },
    #[error("respawn delay {respawn}s must not be shorter than the die delay {die}s")]
    RespawnBeforeDie { die: f32, respawn: f32 },
    #[error("aim layer mask is empty, the cursor ray could never hit the ground")]
    EmptyLayerMask,
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub aim: AimSettings,
    #[serde(default)]
    pub finisher: FinisherSettings,
    #[serde(default)]
    pub enemy: EnemySettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Check that the values describe a playable arena.
    ///
    /// # Errors
    /// Returns the first inconsistency found, see [`SettingsError`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        let [psx, psy, psz] = self.player.start_position;
        let [esx, esy, esz] = self.enemy.start_position;
        let [sx, sz] = self.enemy.spawn_range;
        let [ux, uy, uz] = self.aim.upper_body_offset;
        let [vx, vy, vz] = self.camera.view_offset;
        let finites = [
            ("player.grounded_vertical_velocity", self.player.grounded_vertical_velocity),
            ("player.start_position.x", psx),
            ("player.start_position.y", psy),
            ("player.start_position.z", psz),
            ("aim.deadzone_degrees", self.aim.deadzone_degrees),
            ("aim.upper_body_yaw_offset_degrees", self.aim.upper_body_yaw_offset_degrees),
            ("aim.upper_body_offset.x", ux),
            ("aim.upper_body_offset.y", uy),
            ("aim.upper_body_offset.z", uz),
            ("enemy.spawn_range.x", sx),
            ("enemy.spawn_range.z", sz),
            ("enemy.start_position.x", esx),
            ("enemy.start_position.y", esy),
            ("enemy.start_position.z", esz),
            ("camera.view_offset.x", vx),
            ("camera.view_offset.y", vy),
            ("camera.view_offset.z", vz),
        ];
        if let Some((field, value)) = finites.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SettingsError::NonFinite { field, value });
        }

        let positives = [
            ("player.move_speed", self.player.move_speed),
            ("player.gravity", self.player.gravity),
            ("aim.max_ray_distance", self.aim.max_ray_distance),
            ("aim.rotation_speed", self.aim.rotation_speed),
            ("finisher.approach_distance", self.finisher.approach_distance),
            ("finisher.finishing_distance", self.finisher.finishing_distance),
            ("finisher.duration_seconds", self.finisher.duration_seconds),
            ("enemy.die_delay_seconds", self.enemy.die_delay_seconds),
            ("enemy.respawn_delay_seconds", self.enemy.respawn_delay_seconds),
            ("camera.follow_speed", self.camera.follow_speed),
        ];
        if let Some((field, value)) = positives.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SettingsError::NonFinite { field, value });
        }
        if let Some((field, value)) = positives.into_iter().find(|(_, v)| *v <= 0.0) {
            return Err(SettingsError::NonPositive { field, value });
        }

        if sx < 0.0 || sz < 0.0 {
            return Err(SettingsError::NegativeSpawnRange { x: sx, z: sz });
        }

        let (finishing, approach) = (self.finisher.finishing_distance, self.finisher.approach_distance);
        if finishing >= approach {
            return Err(SettingsError::FinishingOutsideApproach { finishing, approach });
        }

        let (die, respawn) = (self.enemy.die_delay_seconds, self.enemy.respawn_delay_seconds);
        if respawn < die {
            return Err(SettingsError::RespawnBeforeDie { die, respawn });
        }

        if self.aim.layer_mask == 0 {
            return Err(SettingsError::EmptyLayerMask);
        }
        Ok(())
    }

    /// Convert a key identifier from `controls.keybinds` (e.g. "W", "Space",
    /// "Up") into a `KeyCode`. Matching is case-insensitive.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        const LETTERS: [KeyCode; 26] = [
            KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
            KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
            KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
            KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
            KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
            KeyCode::KeyZ,
        ];
        const DIGITS: [KeyCode; 10] = [
            KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
            KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
        ];

        let s = name.trim().to_ascii_uppercase();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_uppercase() {
                return LETTERS.get(usize::from(c as u8 - b'A')).copied();
            }
            if c.is_ascii_digit() {
                return DIGITS.get(usize::from(c as u8 - b'0')).copied();
            }
        }

        Some(match s.as_str() {
            "SPACE" => KeyCode::Space,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "TAB" => KeyCode::Tab,
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,
            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,
            _ => return None,
        })
    }
}

pub mod loader;
