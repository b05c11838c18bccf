//! Enemy proximity check and finisher trigger.
//!
//! Re-evaluated every free tick: the prompt follows the distance check
//! directly, so standing right on the approach radius can flicker it.

use bevy::log::debug;
use std::time::Duration;

use crate::anim::AnimationSink;
use crate::enemy::{EnemyView, RequestHit};
use crate::player::PlayerAgent;
use crate::settings::FinisherSettings;

/// `true` when a live enemy is strictly inside the approach radius.
#[must_use]
pub fn in_finisher_range(agent: &PlayerAgent, enemy: &EnemyView, approach_distance: f32) -> bool {
    !enemy.is_dead && agent.position.distance(enemy.position) < approach_distance
}

/// Update the prompt and, on the activate edge, start the finisher.
///
/// Returns the hit to deliver if a finisher started this tick.
pub fn detect_enemy(
    agent: &mut PlayerAgent,
    enemy: EnemyView,
    activate_pressed: bool,
    now: Duration,
    settings: &FinisherSettings,
    animator: &mut dyn AnimationSink,
) -> Option<RequestHit> {
    agent.prompt_visible = in_finisher_range(agent, &enemy, settings.approach_distance);
    if !(agent.prompt_visible && activate_pressed) {
        return None;
    }
    match agent.begin_finisher(enemy, now, settings, animator) {
        Ok(hit) => Some(hit),
        Err(err) => {
            debug!("finisher trigger swallowed: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{AnimatorParams, TRIGGER_FINISHING};
    use crate::player::Weapon;
    use bevy::math::Vec3;

    fn enemy(z: f32, is_dead: bool) -> EnemyView {
        EnemyView { position: Vec3::new(0.0, 0.0, z), is_dead }
    }

    #[test]
    fn prompt_follows_distance_and_liveness() {
        let mut agent = PlayerAgent::new(Vec3::ZERO);
        let mut anim = AnimatorParams::default();
        let settings = FinisherSettings::default();

        detect_enemy(&mut agent, enemy(2.9, false), false, Duration::ZERO, &settings, &mut anim);
        assert!(agent.prompt_visible);
        // boundary is exclusive
        detect_enemy(&mut agent, enemy(3.0, false), false, Duration::ZERO, &settings, &mut anim);
        assert!(!agent.prompt_visible);
        detect_enemy(&mut agent, enemy(1.0, true), false, Duration::ZERO, &settings, &mut anim);
        assert!(!agent.prompt_visible);
    }

    #[test]
    fn activate_in_range_starts_finisher() {
        let mut agent = PlayerAgent::new(Vec3::ZERO);
        let mut anim = AnimatorParams::default();
        let hit = detect_enemy(&mut agent, enemy(2.0, false), true, Duration::ZERO, &FinisherSettings::default(), &mut anim);
        assert_eq!(hit, Some(RequestHit));
        assert!(!agent.is_free());
        assert_eq!(agent.weapon, Weapon::Melee);
        assert_eq!(anim.drain_triggers(), vec![TRIGGER_FINISHING.to_string()]);
    }

    #[test]
    fn activate_out_of_range_or_on_dead_enemy_does_nothing() {
        let mut agent = PlayerAgent::new(Vec3::ZERO);
        let mut anim = AnimatorParams::default();
        let settings = FinisherSettings::default();
        assert_eq!(detect_enemy(&mut agent, enemy(5.0, false), true, Duration::ZERO, &settings, &mut anim), None);
        assert_eq!(detect_enemy(&mut agent, enemy(1.0, true), true, Duration::ZERO, &settings, &mut anim), None);
        assert!(agent.is_free());
        assert!(anim.drain_triggers().is_empty());
    }

    #[test]
    fn activate_while_running_is_swallowed() {
        let mut agent = PlayerAgent::new(Vec3::ZERO);
        let mut anim = AnimatorParams::default();
        let settings = FinisherSettings::default();
        detect_enemy(&mut agent, enemy(2.0, false), true, Duration::ZERO, &settings, &mut anim);
        let again = detect_enemy(&mut agent, enemy(1.0, false), true, Duration::from_millis(50), &settings, &mut anim);
        assert_eq!(again, None);
    }
}
