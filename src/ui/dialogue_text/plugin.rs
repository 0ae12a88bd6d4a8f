// src/ui/dialogue_text/plugin.rs
//
// UiPlugin registers the dialogue text panel and its render system.

use bevy::prelude::*;

use crate::dialogue::systems::advance_dialogue_sequencer;

use super::systems::{render_dialogue_text, spawn_dialogue_text};

/// Plugin providing the on-screen display sink for dialogue playback.
///
/// # System Ordering
///
/// 1. `spawn_dialogue_text` - Startup, before playback starts in PostStartup
/// 2. `render_dialogue_text` - Update, after the sequencer has written this frame's reveal
///
/// # Dependencies
///
/// - `DialoguePlugin` must be registered (provides `DialogueSettings`)
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.add_systems(Startup, spawn_dialogue_text).add_systems(
            Update,
            render_dialogue_text.after(advance_dialogue_sequencer),
        );
    }
}
