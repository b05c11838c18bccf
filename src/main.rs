use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use finisher_arena::encounter::{Encounter, EncounterEvent};
use finisher_arena::input::FrameInput;
use finisher_arena::settings::loader as settings_loader;
use finisher_arena::ui::{
    render_aim_gizmos, setup_debug_overlay, spawn_hud, sync_prompt, toggle_aim_gizmos,
    toggle_debug_overlay, update_debug_overlay,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

mod app;
use app::{
    drain_animation_triggers, gather_frame_input, log_encounter_events, report_settings, setup,
    step_encounter, sync_camera_rig, sync_enemy_visuals, sync_player_visuals, sync_weapon_visuals,
};

/// Root of the player rig; carries the player's animator parameters.
#[derive(Component)]
struct PlayerBody;

/// Leaning body mesh under `PlayerBody`.
#[derive(Component)]
struct PlayerModel;

/// Torso pivot, yawed independently toward the aim anchor.
#[derive(Component)]
struct UpperBody;

#[derive(Component)]
struct SwordVisual;

#[derive(Component)]
struct RifleVisual;

/// Root of the enemy rig; carries the enemy's animator parameters.
#[derive(Component)]
struct EnemyBody;

#[derive(Component)]
struct EnemyModel;

#[derive(Component)]
struct MainCamera;

/// Randomness for respawn positions.
#[derive(Resource)]
struct SpawnRng(StdRng);

/// Why the shipped settings were rejected, if they were. Logged at startup
/// once the log plugin is up.
#[derive(Resource, Default)]
struct SettingsReport(Option<String>);

fn main() {
    let (settings, settings_error) = settings_loader::load_validated_settings("data/settings");
    let encounter = Encounter::new(&settings);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Finisher Arena".into(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin);

    app.add_event::<EncounterEvent>();

    app.insert_resource(settings);
    app.insert_resource(encounter);
    app.insert_resource(FrameInput::default());
    app.insert_resource(SpawnRng(StdRng::from_entropy()));
    app.insert_resource(SettingsReport(settings_error.map(|e| e.to_string())));

    app.add_systems(Startup, (setup_debug_overlay, spawn_hud, setup, report_settings));
    app.add_systems(
        Update,
        (
            gather_frame_input,
            step_encounter,
            (sync_player_visuals, sync_weapon_visuals, sync_enemy_visuals, sync_camera_rig, sync_prompt),
            (log_encounter_events, drain_animation_triggers),
        )
            .chain(),
    );
    app.add_systems(Update, (toggle_debug_overlay, toggle_aim_gizmos));
    app.add_systems(Update, update_debug_overlay);
    app.add_systems(Update, render_aim_gizmos);

    app.run();
}
