//! Log output for things the simulation reports.
use bevy::prelude::*;
use finisher_arena::anim::AnimatorParams;
use finisher_arena::encounter::EncounterEvent;
use finisher_arena::enemy::EnemyEvent;
use finisher_arena::settings::Settings;

use crate::SettingsReport;

/// Log the settings in use, or why the shipped ones were rejected.
#[allow(clippy::needless_pass_by_value)]
pub fn report_settings(report: Res<SettingsReport>, settings: Res<Settings>) {
    if let Some(err) = &report.0 {
        warn!("settings rejected ({err}), running with defaults");
    }
    info!(
        "arena ready: speed {} approach {} finisher {}s respawn {}s",
        settings.player.move_speed,
        settings.finisher.approach_distance,
        settings.finisher.duration_seconds,
        settings.enemy.respawn_delay_seconds,
    );
}

pub fn log_encounter_events(mut events: EventReader<EncounterEvent>) {
    for ev in events.read() {
        match ev {
            EncounterEvent::FinisherStarted => info!("finisher started"),
            EncounterEvent::FinisherEnded => info!("finisher ended, control returned"),
            EncounterEvent::Enemy(EnemyEvent::Hit) => info!("enemy hit"),
            EncounterEvent::Enemy(EnemyEvent::Died) => info!("enemy died"),
            EncounterEvent::Enemy(EnemyEvent::Respawned { position }) => {
                info!("enemy respawned at ({:.1}, {:.1})", position.x, position.z);
            }
            EncounterEvent::HitIgnored => warn!("hit ignored, enemy already dead"),
            EncounterEvent::PromptChanged(shown) => debug!("prompt {}", if *shown { "shown" } else { "hidden" }),
        }
    }
}

/// Consume fired animation triggers. The primitive rigs have no clips to
/// play, so triggers are only logged.
pub fn drain_animation_triggers(mut rigs: Query<(&mut AnimatorParams, &Name)>) {
    for (mut params, name) in &mut rigs {
        for trigger in params.drain_triggers() {
            debug!("{name}: trigger {trigger}");
        }
    }
}
