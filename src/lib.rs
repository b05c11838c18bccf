pub mod anim;
pub mod camera;
pub mod deferred;
pub mod encounter;
pub mod enemy;
pub mod input;
pub mod player;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod scene;
pub mod settings;
pub mod ui;
