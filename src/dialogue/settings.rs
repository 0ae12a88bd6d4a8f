//! Dialogue configuration loaded from `config/dialogue.toml`.
use std::{
    fs,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::Deserialize;

use super::library::DialogueSelection;
use super::timing::{
    RevealMode, RevealTiming, DEFAULT_CHAR_DELAY, DEFAULT_MAX_CHAR_COUNT, DEFAULT_MAX_LINE_DELAY,
    DEFAULT_MIN_LINE_DELAY, DEFAULT_WORD_DELAY,
};

pub const DEFAULT_CONFIG_PATH: &str = "config/dialogue.toml";
pub const DEFAULT_TIME_SCALE: f32 = 1.0;
pub const MAX_TIME_SCALE: f32 = 100.0;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawDialogueConfig {
    #[serde(default)]
    playback: RawPlayback,
    #[serde(default)]
    line_timing: RawLineTiming,
    #[serde(default)]
    library: RawLibrary,
    #[serde(default)]
    display: RawDisplay,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlayback {
    dialogue_name: String,
    dialogue_index: Option<usize>,
    reveal_mode: RevealMode,
    char_delay: f32,
    word_delay: f32,
    time_scale: f32,
}

impl Default for RawPlayback {
    fn default() -> Self {
        Self {
            dialogue_name: "intro".to_string(),
            dialogue_index: None,
            reveal_mode: RevealMode::Characters,
            char_delay: DEFAULT_CHAR_DELAY,
            word_delay: DEFAULT_WORD_DELAY,
            time_scale: DEFAULT_TIME_SCALE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawLineTiming {
    min_line_delay: f32,
    max_line_delay: f32,
    max_char_count: usize,
}

impl Default for RawLineTiming {
    fn default() -> Self {
        Self {
            min_line_delay: DEFAULT_MIN_LINE_DELAY,
            max_line_delay: DEFAULT_MAX_LINE_DELAY,
            max_char_count: DEFAULT_MAX_CHAR_COUNT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawLibrary {
    directory: String,
    files: Vec<String>,
}

impl Default for RawLibrary {
    fn default() -> Self {
        Self {
            directory: "assets/dialogue".to_string(),
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDisplay {
    auto_size: bool,
    min_font_size: f32,
    max_font_size: f32,
    fit_char_count: usize,
    bottom_offset: f32,
    side_offset: f32,
    padding: f32,
}

impl Default for RawDisplay {
    fn default() -> Self {
        Self {
            auto_size: true,
            min_font_size: 18.0,
            max_font_size: 32.0,
            fit_char_count: 80,
            bottom_offset: 40.0,
            side_offset: 60.0,
            padding: 16.0,
        }
    }
}

/// Runtime configuration derived from `config/dialogue.toml`.
#[derive(Resource, Debug, Clone)]
pub struct DialogueSettings {
    /// Dialogue resource played at startup.
    pub dialogue: DialogueSelection,
    pub reveal_mode: RevealMode,
    pub timing: RevealTiming,
    /// Relative speed of virtual time, always finite and in `(0, MAX_TIME_SCALE]`.
    pub time_scale: f32,
    pub library: LibrarySettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone)]
pub struct LibrarySettings {
    pub directory: PathBuf,
    /// Ordered file list; empty means scan `directory` for `.txt` files.
    pub files: Vec<String>,
}

/// Layout and content-fit sizing for the dialogue text panel.
#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub auto_size: bool,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Line length at which auto sizing reaches `min_font_size`.
    pub fit_char_count: usize,
    pub bottom_offset: f32,
    pub side_offset: f32,
    pub padding: f32,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub dialogue_name: Option<String>,
    /// Takes precedence over `dialogue_name` when both are given.
    pub dialogue_index: Option<usize>,
    pub reveal_mode: Option<RevealMode>,
}

impl DialogueSettings {
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => Self::parse_or_default(&data, path),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawDialogueConfig::default().into()
            }
        }
    }

    fn parse_or_default(data: &str, path: &Path) -> Self {
        match toml::from_str::<RawDialogueConfig>(data) {
            Ok(raw) => raw.into(),
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawDialogueConfig::default().into()
            }
        }
    }

    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(name) = overrides.dialogue_name {
            self.dialogue = DialogueSelection::Name(name);
        }
        if let Some(index) = overrides.dialogue_index {
            self.dialogue = DialogueSelection::Index(index);
        }
        if let Some(mode) = overrides.reveal_mode {
            self.reveal_mode = mode;
        }
        self
    }
}

impl Default for DialogueSettings {
    fn default() -> Self {
        RawDialogueConfig::default().into()
    }
}

impl From<RawDialogueConfig> for DialogueSettings {
    fn from(value: RawDialogueConfig) -> Self {
        let playback = value.playback;
        let line_timing = value.line_timing;
        let display = value.display;

        let min_line = line_timing.min_line_delay.max(0.0);
        let max_line = line_timing.max_line_delay.max(0.0);

        let timing = RevealTiming {
            char_delay: playback.char_delay.max(0.0),
            word_delay: playback.word_delay.max(0.0),
            min_line_delay: min_line.min(max_line),
            max_line_delay: min_line.max(max_line),
            max_char_count: line_timing.max_char_count.max(1),
        };

        let min_font = display.min_font_size.max(1.0);
        let max_font = display.max_font_size.max(1.0);

        let dialogue = match playback.dialogue_index {
            Some(index) => DialogueSelection::Index(index),
            None => DialogueSelection::Name(playback.dialogue_name),
        };

        Self {
            dialogue,
            reveal_mode: playback.reveal_mode,
            timing,
            time_scale: sanitise_time_scale(playback.time_scale),
            library: LibrarySettings {
                directory: PathBuf::from(value.library.directory),
                files: value
                    .library
                    .files
                    .iter()
                    .map(|file| file.trim().to_string())
                    .filter(|file| !file.is_empty())
                    .collect(),
            },
            display: DisplaySettings {
                auto_size: display.auto_size,
                min_font_size: min_font.min(max_font),
                max_font_size: min_font.max(max_font),
                fit_char_count: display.fit_char_count.max(1),
                bottom_offset: display.bottom_offset.max(0.0),
                side_offset: display.side_offset.max(0.0),
                padding: display.padding.max(0.0),
            },
        }
    }
}

fn sanitise_time_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale.min(MAX_TIME_SCALE)
    } else {
        warn!(
            "Invalid playback time_scale {}. Using {}.",
            scale, DEFAULT_TIME_SCALE
        );
        DEFAULT_TIME_SCALE
    }
}
