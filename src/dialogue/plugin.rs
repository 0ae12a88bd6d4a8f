//! Dialogue plugin wiring the library, sequencer and playback systems.
use std::path::PathBuf;

use bevy::prelude::*;

use super::{
    events::{DialogueLineRevealed, DialogueLineStarted, DialoguePlaybackFinished},
    library::{load_entries, DialogueLibrary},
    sequencer::DialogueSequencer,
    settings::{DialogueSettings, SettingsOverrides},
    systems::{advance_dialogue_sequencer, log_playback_progress, start_dialogue_playback},
};

/// Registers dialogue playback.
///
/// # Dependencies
///
/// - `TimePlugin` (part of `DefaultPlugins`) must be registered first; the
///   configured time scale becomes the relative speed of `Time<Virtual>`.
/// - `UiPlugin` spawns the display sink during `Startup`; playback starts in
///   `PostStartup` so the sink already exists.
pub struct DialoguePlugin {
    config_path: PathBuf,
    overrides: SettingsOverrides,
}

impl DialoguePlugin {
    pub fn new(config_path: PathBuf, overrides: SettingsOverrides) -> Self {
        Self {
            config_path,
            overrides,
        }
    }
}

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        let settings = DialogueSettings::load_or_default(&self.config_path)
            .with_overrides(self.overrides.clone());
        let library = DialogueLibrary::configure(load_entries(
            &settings.library.directory,
            &settings.library.files,
        ));
        info!(
            "DialoguePlugin initialised with {} dialogue files from {} (playing {}, {} reveal)",
            library.len(),
            settings.library.directory.display(),
            settings.dialogue,
            settings.reveal_mode
        );

        match app.world_mut().get_resource_mut::<Time<Virtual>>() {
            Some(mut time) => time.set_relative_speed(settings.time_scale),
            None => warn!("DialoguePlugin: no virtual clock registered; time scale ignored"),
        }

        app.insert_resource(DialogueSequencer::new(
            settings.reveal_mode,
            settings.timing,
        ))
        .insert_resource(library)
        .insert_resource(settings)
        .add_message::<DialogueLineStarted>()
        .add_message::<DialogueLineRevealed>()
        .add_message::<DialoguePlaybackFinished>()
        .add_systems(PostStartup, start_dialogue_playback)
        .add_systems(
            Update,
            (advance_dialogue_sequencer, log_playback_progress).chain(),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use bevy::time::TimePlugin;

    use super::*;

    #[test]
    fn configured_time_scale_sets_virtual_speed() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("dialogue.toml");
        fs::write(
            &config,
            format!(
                "[playback]\ntime_scale = 2.5\n\n[library]\ndirectory = {:?}\n",
                dir.path().display().to_string()
            ),
        )
        .unwrap();
        fs::write(dir.path().join("intro.txt"), "Hello").unwrap();

        let mut app = App::new();
        app.add_plugins((
            TimePlugin,
            DialoguePlugin::new(config, SettingsOverrides::default()),
        ));

        let time = app.world().resource::<Time<Virtual>>();
        assert_eq!(time.relative_speed(), 2.5);
        assert_eq!(app.world().resource::<DialogueLibrary>().len(), 1);
    }

    #[test]
    fn invalid_time_scale_keeps_real_speed() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("dialogue.toml");
        fs::write(&config, "[playback]\ntime_scale = inf\n").unwrap();

        let mut app = App::new();
        app.add_plugins((
            TimePlugin,
            DialoguePlugin::new(config, SettingsOverrides::default()),
        ));

        assert_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), 1.0);
    }
}
