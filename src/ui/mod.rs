// src/ui/mod.rs
//
// UI module providing screen-space elements for dialogue playback.

pub mod dialogue_text;

// Re-export the main plugin
pub use dialogue_text::UiPlugin;
