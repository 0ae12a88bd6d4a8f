// src/ui/dialogue_text/mod.rs
//
// Dialogue text module: the bottom panel that progressively reveals dialogue lines.
//
// - The text entity is the playback display sink (`DialogueTextSink`)
// - Unrevealed text stays in a transparent child span so wrapping never shifts
// - Font size shrinks with line length when auto sizing is enabled

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::UiPlugin;
