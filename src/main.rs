use std::{path::PathBuf, process::ExitCode};

use bevy::prelude::*;
use clap::{Parser, Subcommand};

mod dialogue;
mod scaffold;
mod ui;

use crate::{
    dialogue::{
        settings::{SettingsOverrides, DEFAULT_CONFIG_PATH},
        timing::RevealMode,
        DialoguePlugin,
    },
    scaffold::{FileTemplate, DEFAULT_ASSET_ROOT},
    ui::UiPlugin,
};

#[derive(Parser)]
#[command(name = "dialogue_reel")]
#[command(about = "Typewriter-style dialogue playback")]
struct Cli {
    /// Dialogue configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Dialogue resource to play, overriding the config file
    #[arg(long)]
    dialogue: Option<String>,

    /// Dialogue to play by position in the library (takes precedence over --dialogue)
    #[arg(long)]
    dialogue_index: Option<usize>,

    /// Reveal granularity, overriding the config file
    #[arg(long, value_enum)]
    mode: Option<RevealMode>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty text, JSON, CSV or XML file
    NewFile {
        #[arg(value_enum)]
        kind: FileTemplate,

        /// Selected file or directory; files resolve to their parent
        #[arg(long = "in")]
        selection: Option<PathBuf>,

        /// File name without extension
        #[arg(long)]
        name: Option<String>,

        /// Directory used when nothing is selected
        #[arg(long, default_value = DEFAULT_ASSET_ROOT)]
        root: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(Command::NewFile {
        kind,
        selection,
        name,
        root,
    }) = cli.command
    {
        return match scaffold::execute(kind, selection.as_deref(), name.as_deref(), &root) {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Failed to create {}: {}", kind, err);
                ExitCode::FAILURE
            }
        };
    }

    let overrides = SettingsOverrides {
        dialogue_name: cli.dialogue,
        dialogue_index: cli.dialogue_index,
        reveal_mode: cli.mode,
    };

    App::new()
        .add_plugins((
            DefaultPlugins,
            DialoguePlugin::new(cli.config, overrides), // After DefaultPlugins to apply the time scale
            UiPlugin, // After DialoguePlugin to read DialogueSettings
        ))
        .run();

    ExitCode::SUCCESS
}
