//! User interface: the finisher prompt, a debug overlay and debug gizmos.
//!
//! The prompt mirrors `PlayerAgent::prompt_visible` every frame. The overlay
//! (F1) periodically shows FPS, the encounter clock and both agents' state.
//! The aim gizmos (F2) draw the aim anchor, the upper-body aim line and the
//! approach radius around the enemy.

use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use std::time::Duration;

use crate::encounter::Encounter;
use crate::player::{ControlMode, Weapon, upper_body_aim_yaw};
use crate::settings::Settings;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

#[derive(Resource, Default)]
pub struct AimGizmosVisible(pub bool);

#[derive(Component)]
pub struct PromptText;

#[derive(Component)]
pub struct DebugOverlayText;

/// Insert debug overlay resources.
///
/// # Arguments
/// * `commands` - `Commands` to insert resources (timer, state, gizmo visibility)
pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(0.5, TimerMode::Repeating)));
    commands.insert_resource(DebugOverlayState::default());
    commands.insert_resource(AimGizmosVisible::default());
}

/// Spawn the prompt (hidden) and the empty debug overlay text.
///
/// # Arguments
/// * `commands` - `Commands` for spawning the UI text nodes
/// * `settings` - the prompt names the key bound to `finish`
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_hud(mut commands: Commands, settings: Res<Settings>) {
    let key = settings
        .controls
        .keybinds
        .get("finish")
        .map_or("Space", String::as_str)
        .to_uppercase();

    commands.spawn((
        TextBundle::from_section(
            format!("[{key}] Finish"),
            TextStyle { font_size: 28.0, color: Color::srgb(1.0, 0.85, 0.3), ..default() },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(48.0),
            left: Val::Percent(45.0),
            ..default()
        }),
        Visibility::Hidden,
        PromptText,
    ));

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle { font_size: 18.0, color: Color::srgb(1.0, 1.0, 0.0), ..default() },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        }),
        DebugOverlayText,
    ));
}

/// Show the prompt exactly while the encounter says so.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_prompt(encounter: Res<Encounter>, mut query: Query<&mut Visibility, With<PromptText>>) {
    let desired = if encounter.player.prompt_visible { Visibility::Inherited } else { Visibility::Hidden };
    for mut vis in &mut query {
        if *vis != desired {
            *vis = desired;
        }
    }
}

/// Toggle the debug overlay visibility when F1 is pressed.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(mut state: ResMut<DebugOverlayState>, input: Res<ButtonInput<KeyCode>>) {
    if input.just_pressed(KeyCode::F1) {
        state.visible = !state.visible;
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn toggle_aim_gizmos(mut gizmos: ResMut<AimGizmosVisible>, input: Res<ButtonInput<KeyCode>>) {
    if input.just_pressed(KeyCode::F2) {
        gizmos.0 = !gizmos.0;
    }
}

/// Text shown by the debug overlay for the current encounter state.
#[must_use]
pub fn overlay_text(encounter: &Encounter, fps: f64, frame_time: f64) -> String {
    let player = &encounter.player;
    let mode = match player.mode() {
        ControlMode::Free => "free".to_string(),
        ControlMode::Locked(phase) => format!("locked {phase:?}"),
    };
    let weapon = match player.weapon {
        Weapon::Melee => "sword",
        Weapon::Ranged => "rifle",
    };
    let now = encounter.now();
    let countdown = |at: Option<Duration>| match at {
        Some(at) => format!(", {:.2} s left", at.saturating_sub(now).as_secs_f32()),
        None => String::new(),
    };
    let p = player.position;
    let e = encounter.enemy.position;
    format!(
        "FPS: {:.1}\nFrame Time: {:.2} ms\nClock: {:.2} s\nPlayer: ({:.1}, {:.1}, {:.1}) yaw {:.0} deg\nMode: {}{}\nWeapon: {}\nEnemy: ({:.1}, {:.1}, {:.1}) {:?}{}",
        fps,
        frame_time * 1000.0,
        now.as_secs_f32(),
        p.x,
        p.y,
        p.z,
        player.yaw().to_degrees(),
        mode,
        countdown(player.unlock_at()),
        weapon,
        e.x,
        e.y,
        e.z,
        encounter.enemy.phase(),
        countdown(encounter.enemy.next_transition_at()),
    )
}

/// Refresh the overlay text once every interval.
///
/// # Arguments
/// * `diagnostics` - diagnostics store (frame time / FPS)
/// * `state` - overlay visibility state
/// * `encounter` - simulation state to print
/// * `time` - time resource for the interval timer
/// * `timer` - overlay interval timer
/// * `query` - the overlay text node
#[allow(clippy::needless_pass_by_value)]
pub fn update_debug_overlay(
    diagnostics: Res<DiagnosticsStore>,
    state: Res<DebugOverlayState>,
    encounter: Res<Encounter>,
    time: Res<Time>,
    mut timer: ResMut<DebugOverlayTimer>,
    mut query: Query<&mut Text, With<DebugOverlayText>>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let Ok(mut text) = query.get_single_mut() else { return };

    if !state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    text.sections[0].value = overlay_text(&encounter, fps, frame_time);
}

/// Draw the aim anchor, the upper-body aim line and the approach radius.
#[allow(clippy::needless_pass_by_value)]
pub fn render_aim_gizmos(visible: Res<AimGizmosVisible>, encounter: Res<Encounter>, mut gizmos: Gizmos) {
    if !visible.0 {
        return;
    }
    let player = &encounter.player;
    let aim = &encounter.settings.aim;

    gizmos.circle(player.aim_anchor, Dir3::Y, 0.25, Color::srgb(1.0, 0.2, 0.2));

    let joint = player.position + player.rotation * aim.upper_body_offset();
    let yaw = upper_body_aim_yaw(player, aim);
    let aim_dir = Vec3::new(yaw.sin(), 0.0, yaw.cos());
    gizmos.line(joint, joint + aim_dir * 2.0, Color::srgb(1.0, 0.6, 0.0));

    let ring = if encounter.enemy.is_dead() { Color::srgb(0.4, 0.4, 0.4) } else { Color::srgb(0.0, 1.0, 0.0) };
    gizmos.circle(encounter.enemy.position, Dir3::Y, encounter.settings.finisher.approach_distance, ring);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_reports_mode_and_weapon() {
        let enc = Encounter::new(&Settings::default());
        let text = overlay_text(&enc, 60.0, 0.016);
        assert!(text.contains("FPS: 60.0"));
        assert!(text.contains("Mode: free"));
        assert!(text.contains("Weapon: rifle"));
        assert!(text.contains("Alive"));
        assert!(!text.contains("left"));
    }

    #[test]
    fn overlay_counts_down_to_unlock_and_respawn() {
        let mut enc = Encounter::new(&Settings::default());
        let mut anim = crate::anim::AnimatorParams::default();
        let finisher = enc.settings.finisher.clone();
        let (now, target) = (enc.now(), enc.enemy.view());
        let request = enc.player.begin_finisher(target, now, &finisher, &mut anim);
        let request = request.expect("finisher starts from a free player");
        enc.enemy.hit(request, now);

        let text = overlay_text(&enc, 60.0, 0.016);
        assert!(text.contains("Weapon: sword"), "{text}");
        assert!(text.contains("1.35 s left\nWeapon"), "{text}");
        assert!(text.contains("Hit, 0.80 s left"), "{text}");
    }
}
