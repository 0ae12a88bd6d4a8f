//! Messages emitted while dialogue playback runs.
use bevy::prelude::Message;

use super::sequencer::SequencerEvent;

/// Fired when a line is loaded into the display with nothing visible yet.
#[derive(Message, Debug, Clone)]
pub struct DialogueLineStarted {
    pub index: usize,
    pub text: String,
}

/// Fired once a line is fully revealed and its hold begins.
#[derive(Message, Debug, Clone)]
pub struct DialogueLineRevealed {
    pub index: usize,
}

/// Fired after the final line's hold elapses.
#[derive(Message, Debug, Clone)]
pub struct DialoguePlaybackFinished {
    /// Display label of the dialogue selection, e.g. `'intro'` or `#2`.
    pub dialogue: String,
    pub lines_played: usize,
}

/// Converts sequencer progress into the message that announces it.
pub(crate) enum PlaybackMessage {
    LineStarted(DialogueLineStarted),
    LineRevealed(DialogueLineRevealed),
    Finished(DialoguePlaybackFinished),
}

impl PlaybackMessage {
    pub(crate) fn from_sequencer(
        event: SequencerEvent,
        lines: &[String],
        dialogue: &str,
    ) -> Self {
        match event {
            SequencerEvent::LineStarted { index } => Self::LineStarted(DialogueLineStarted {
                index,
                text: lines.get(index).cloned().unwrap_or_default(),
            }),
            SequencerEvent::LineRevealed { index } => {
                Self::LineRevealed(DialogueLineRevealed { index })
            }
            SequencerEvent::Finished => Self::Finished(DialoguePlaybackFinished {
                dialogue: dialogue.to_string(),
                lines_played: lines.len(),
            }),
        }
    }
}
