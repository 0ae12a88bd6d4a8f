//! Systems that start dialogue playback and advance it every frame.
use bevy::{
    ecs::{query::QuerySingleError, system::SystemParam},
    prelude::*,
};

use crate::ui::dialogue_text::components::DialogueTextSink;

use super::{
    errors::{DialogueCollaborator, DialogueError, DialogueErrorKind},
    events::{
        DialogueLineRevealed, DialogueLineStarted, DialoguePlaybackFinished, PlaybackMessage,
    },
    library::DialogueLibrary,
    sequencer::{DialogueSequencer, SequencerEvent},
    settings::DialogueSettings,
};

#[derive(SystemParam)]
pub struct PlaybackWriters<'w> {
    started: MessageWriter<'w, DialogueLineStarted>,
    revealed: MessageWriter<'w, DialogueLineRevealed>,
    finished: MessageWriter<'w, DialoguePlaybackFinished>,
}

impl PlaybackWriters<'_> {
    fn publish(&mut self, events: Vec<SequencerEvent>, lines: &[String], dialogue: &str) {
        for event in events {
            match PlaybackMessage::from_sequencer(event, lines, dialogue) {
                PlaybackMessage::LineStarted(message) => {
                    self.started.write(message);
                }
                PlaybackMessage::LineRevealed(message) => {
                    self.revealed.write(message);
                }
                PlaybackMessage::Finished(message) => {
                    self.finished.write(message);
                }
            }
        }
    }
}

/// Validates collaborators, loads the configured dialogue and starts playback.
///
/// A missing library, or anything but exactly one display, aborts startup;
/// a missing dialogue leaves the sequencer idle. All are logged, none panic.
pub fn start_dialogue_playback(
    settings: Res<DialogueSettings>,
    library: Option<Res<DialogueLibrary>>,
    mut sequencer: ResMut<DialogueSequencer>,
    mut sinks: Query<&mut DialogueTextSink>,
    mut writers: PlaybackWriters,
) {
    let mut sink = match sinks.single_mut() {
        Ok(sink) => sink,
        Err(QuerySingleError::NoEntities(_)) => {
            error!(
                "{}",
                DialogueError::sequencer(DialogueErrorKind::configuration(
                    DialogueCollaborator::DisplaySink
                ))
            );
            return;
        }
        Err(QuerySingleError::MultipleEntities(_)) => {
            error!(
                "{}",
                DialogueError::sequencer(DialogueErrorKind::ambiguous(
                    DialogueCollaborator::DisplaySink
                ))
            );
            return;
        }
    };

    let Some(library) = library else {
        error!(
            "{}",
            DialogueError::sequencer(DialogueErrorKind::configuration(
                DialogueCollaborator::Library
            ))
        );
        return;
    };

    match sequencer.load_selection(&library, &settings.dialogue) {
        Ok(line_count) => info!(
            "Loaded dialogue {} ({} lines, {} reveal)",
            settings.dialogue,
            line_count,
            sequencer.mode()
        ),
        Err(err) => {
            error!("{}", err);
            return;
        }
    }

    let events = sequencer.play(&mut *sink);
    writers.publish(events, sequencer.lines(), &settings.dialogue.to_string());
}

/// Feeds the virtual frame delta into the sequencer. `DialoguePlugin` sets the
/// virtual clock's relative speed from the configured time scale.
pub fn advance_dialogue_sequencer(
    time: Res<Time>,
    settings: Res<DialogueSettings>,
    mut sequencer: ResMut<DialogueSequencer>,
    mut sinks: Query<&mut DialogueTextSink>,
    mut writers: PlaybackWriters,
) {
    if !sequencer.is_playing() {
        return;
    }

    let Ok(mut sink) = sinks.single_mut() else {
        return;
    };

    let events = sequencer.tick(time.delta_secs(), &mut *sink);
    if !events.is_empty() {
        writers.publish(events, sequencer.lines(), &settings.dialogue.to_string());
    }
}

pub fn log_playback_progress(
    mut started: MessageReader<DialogueLineStarted>,
    mut revealed: MessageReader<DialogueLineRevealed>,
    mut finished: MessageReader<DialoguePlaybackFinished>,
) {
    for message in started.read() {
        debug!("Dialogue line {}: \"{}\"", message.index, message.text);
    }

    for message in revealed.read() {
        debug!("Dialogue line {} fully revealed", message.index);
    }

    for message in finished.read() {
        info!(
            "Dialogue {} finished after {} lines",
            message.dialogue, message.lines_played
        );
    }
}
