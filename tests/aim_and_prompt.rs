mod common;

use approx::assert_relative_eq;
use bevy::math::Vec2;
use common::{DT, Harness};
use finisher_arena::encounter::EncounterEvent;
use finisher_arena::input::FrameInput;
use std::f32::consts::FRAC_PI_2;

fn aim_at(x: f32, z: f32) -> FrameInput {
    FrameInput { cursor: Some(Vec2::new(x, z)), ..FrameInput::default() }
}

#[test]
fn moving_faces_the_cursor_immediately() {
    let mut h = Harness::facing_enemy_at(20.0);
    // walking along the aim line keeps the expected yaw exact
    h.tick(DT, FrameInput { axis: Vec2::X, cursor: Some(Vec2::new(5.0, 0.0)), activate_pressed: false });
    assert_relative_eq!(h.encounter.player.yaw(), FRAC_PI_2, epsilon = 1e-4);
}

#[test]
fn idle_small_offsets_leave_the_feet_alone_but_turn_the_torso() {
    let mut h = Harness::facing_enemy_at(20.0);
    // about 45 degrees to the right, inside the 70 degree deadzone
    for _ in 0..50 {
        h.tick(DT, aim_at(4.0, 4.0));
    }
    assert_relative_eq!(h.encounter.player.yaw(), 0.0, epsilon = 1e-6);

    let offset = h.encounter.settings.aim.upper_body_yaw_offset_degrees.to_radians();
    let joint_yaw = h.encounter.player.upper_body_yaw + offset;
    assert_relative_eq!(joint_yaw, 45f32.to_radians(), epsilon = 1e-3);
}

#[test]
fn idle_large_offsets_turn_smoothly_until_inside_the_deadzone() {
    let mut h = Harness::facing_enemy_at(20.0);
    let mut previous = 0.0f32;
    let mut steps = 0;
    // straight behind the player
    for _ in 0..200 {
        h.tick(DT, aim_at(0.01, -6.0));
        let yaw = h.encounter.player.yaw().abs();
        assert!(yaw >= previous - 1e-5, "turn should be monotonic");
        if yaw > previous + 1e-5 {
            steps += 1;
        }
        previous = yaw;
    }
    // the turn takes several ticks and stops once inside the deadzone
    assert!(steps > 3);
    let off = std::f32::consts::PI - previous;
    assert!(off.to_degrees() <= 70.5);
    assert!(off.to_degrees() > 1.0);
}

#[test]
fn cursor_off_the_ground_keeps_the_last_anchor() {
    let mut h = Harness::facing_enemy_at(20.0);
    h.tick(DT, aim_at(6.0, 0.0));
    let anchor = h.encounter.player.aim_anchor;
    h.tick(DT, FrameInput::default());
    assert_eq!(h.encounter.player.aim_anchor, anchor);

    // a ray beyond the max distance misses too
    h.encounter.settings.aim.max_ray_distance = 10.0;
    h.tick(DT, aim_at(-6.0, 0.0));
    assert_eq!(h.encounter.player.aim_anchor, anchor);
}

#[test]
fn prompt_tracks_the_approach_radius_every_tick() {
    let mut h = Harness::facing_enemy_at(4.0);
    assert!(!h.encounter.player.prompt_visible);

    // walk toward the enemy; prompt appears once strictly inside 3 units
    let mut shown_at = None;
    for i in 0..25 {
        h.tick(DT, FrameInput { axis: Vec2::Y, ..FrameInput::default() });
        if h.encounter.player.prompt_visible && shown_at.is_none() {
            shown_at = Some(i);
        }
    }
    assert!(shown_at.is_some());
    let dist = h.encounter.player.position.distance(h.encounter.enemy.position);
    assert!(dist < 3.0);

    // back off past the radius and it hides again
    for _ in 0..40 {
        h.tick(DT, FrameInput { axis: Vec2::NEG_Y, ..FrameInput::default() });
    }
    assert!(!h.encounter.player.prompt_visible);
    assert_eq!(h.count(EncounterEvent::PromptChanged(true)), 1);
    assert_eq!(h.count(EncounterEvent::PromptChanged(false)), 1);
}

#[test]
fn rotation_stays_yaw_only() {
    let mut h = Harness::facing_enemy_at(20.0);
    for i in 0..300 {
        let a = i as f32 * 0.1;
        h.tick(DT, FrameInput { axis: Vec2::new(a.cos(), a.sin()) * 0.5, cursor: Some(Vec2::new(a.sin() * 7.0, a.cos() * 7.0)), activate_pressed: false });
        let r = h.encounter.player.rotation;
        let up = r * bevy::math::Vec3::Y;
        assert!(up.abs_diff_eq(bevy::math::Vec3::Y, 1e-4));
        assert_relative_eq!(r.length(), 1.0, epsilon = 1e-4);
    }
}
