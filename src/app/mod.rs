pub mod camera;
pub mod enemy;
pub mod input;
pub mod logging;
pub mod player;
pub mod setup;
pub mod step;

pub use camera::sync_camera_rig;
pub use enemy::sync_enemy_visuals;
pub use input::gather_frame_input;
pub use logging::{drain_animation_triggers, log_encounter_events, report_settings};
pub use player::{sync_player_visuals, sync_weapon_visuals};
pub use setup::setup;
pub use step::step_encounter;
