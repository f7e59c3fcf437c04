#![warn(missing_docs)]

//! Sprite-sheet clips and a frame player for Macroquad.

mod animation;
mod clock;
mod error;
mod loader {
    pub mod json_loader;
}
mod player;
mod render {
    pub mod draw;
}
mod spritesheet;

pub use animation::{Animation, ClipOption};
pub use clock::FixedClock;
pub use error::AnimationError;
pub use loader::json_loader::{decode_manifest_file, decode_manifest_str, Manifest};
pub use player::{AnimationSet, SwitchMode};
pub use render::draw::draw_layered;
pub use spritesheet::Spritesheet;
