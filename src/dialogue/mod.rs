//! Dialogue module: named text resources, line splitting and timed reveal playback.
pub mod errors;
pub mod events;
pub mod library;
pub mod lines;
pub mod plugin;
pub mod sequencer;
pub mod settings;
pub mod systems;
pub mod timing;

pub use plugin::DialoguePlugin;
