//! Tick-driven dialogue playback.
//!
//! The sequencer walks the loaded lines one at a time: it pre-loads the full
//! line into the display with nothing visible, runs the reveal steps for the
//! active mode with a unit delay after each, holds the finished line for a
//! length-based duration and then moves on. All pending state (line, step,
//! remaining wait) lives in the struct, and the host advances it by calling
//! [`DialogueSequencer::tick`] with elapsed seconds.
use bevy::prelude::*;

use super::{
    errors::DialogueError,
    library::{DialogueLibrary, DialogueSelection},
    lines::split_dialogue_lines,
    timing::{reveal_steps, RevealMode, RevealTiming},
};

/// Text surface that receives progressive reveal updates.
pub trait DisplaySink {
    /// Replaces the displayed text. Layout is computed against this string.
    fn set_full_text(&mut self, text: &str);

    /// Sets how many leading units of the text are visible. Implementations
    /// clamp the count to the text length.
    fn set_visible_units(&mut self, count: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerPhase {
    /// Nothing loaded or playback not started.
    #[default]
    Idle,
    Revealing,
    Holding,
    Finished,
}

/// Progress notifications returned from [`DialogueSequencer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    LineStarted { index: usize },
    /// The last reveal step of the line has elapsed; the hold begins.
    LineRevealed { index: usize },
    Finished,
}

#[derive(Resource, Debug, Clone)]
pub struct DialogueSequencer {
    mode: RevealMode,
    timing: RevealTiming,
    lines: Vec<String>,
    line_index: usize,
    line_len: usize,
    steps: Vec<usize>,
    next_step: usize,
    cursor: usize,
    wait_remaining: f32,
    phase: SequencerPhase,
}

impl DialogueSequencer {
    pub fn new(mode: RevealMode, timing: RevealTiming) -> Self {
        Self {
            mode,
            timing,
            lines: Vec::new(),
            line_index: 0,
            line_len: 0,
            steps: Vec::new(),
            next_step: 0,
            cursor: 0,
            wait_remaining: 0.0,
            phase: SequencerPhase::Idle,
        }
    }

    /// Loads the named dialogue from `library` and splits it into lines.
    ///
    /// On failure the line list is left empty so a later [`play`] does
    /// nothing. Returns the number of lines loaded.
    ///
    /// [`play`]: DialogueSequencer::play
    pub fn load_file(
        &mut self,
        library: &DialogueLibrary,
        name: &str,
    ) -> Result<usize, DialogueError> {
        self.load_text(library.lookup_by_name(name))
    }

    /// Like [`load_file`](DialogueSequencer::load_file), for either kind of
    /// selection.
    pub fn load_selection(
        &mut self,
        library: &DialogueLibrary,
        selection: &DialogueSelection,
    ) -> Result<usize, DialogueError> {
        match selection {
            DialogueSelection::Name(name) => self.load_file(library, name),
            DialogueSelection::Index(_) => self.load_text(selection.resolve(library)),
        }
    }

    fn load_text(&mut self, text: Result<&str, DialogueError>) -> Result<usize, DialogueError> {
        self.lines.clear();
        self.phase = SequencerPhase::Idle;

        self.lines = split_dialogue_lines(text?);
        Ok(self.lines.len())
    }

    /// Starts playback from the first line, writing its initial state to
    /// `sink` immediately. Restarts if playback is already running.
    pub fn play<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        self.line_index = 0;
        self.wait_remaining = 0.0;

        if self.lines.is_empty() {
            self.phase = SequencerPhase::Idle;
            return events;
        }

        self.start_line(0, sink, &mut events);
        events
    }

    /// Advances playback by `delta_seconds`.
    ///
    /// Waits that expire run the next step and carry any overshoot forward,
    /// so one large delta may run several steps, in order.
    pub fn tick<S: DisplaySink + ?Sized>(
        &mut self,
        delta_seconds: f32,
        sink: &mut S,
    ) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        if !self.is_playing() {
            return events;
        }

        self.wait_remaining -= delta_seconds.max(0.0);
        while self.wait_remaining <= 0.0 {
            match self.phase {
                SequencerPhase::Revealing => self.run_step(sink, &mut events),
                SequencerPhase::Holding => {
                    let next = self.line_index + 1;
                    if next < self.lines.len() {
                        self.start_line(next, sink, &mut events);
                    } else {
                        self.phase = SequencerPhase::Finished;
                        self.wait_remaining = 0.0;
                        events.push(SequencerEvent::Finished);
                        break;
                    }
                }
                SequencerPhase::Idle | SequencerPhase::Finished => break,
            }
        }

        events
    }

    fn start_line<S: DisplaySink + ?Sized>(
        &mut self,
        index: usize,
        sink: &mut S,
        events: &mut Vec<SequencerEvent>,
    ) {
        let line = &self.lines[index];
        let line_len = line.chars().count();
        let steps = reveal_steps(line, self.mode);
        sink.set_full_text(line);
        sink.set_visible_units(0);

        self.line_index = index;
        self.line_len = line_len;
        self.steps = steps;
        self.next_step = 0;
        self.cursor = 0;
        self.phase = SequencerPhase::Revealing;
        events.push(SequencerEvent::LineStarted { index });

        self.run_step(sink, events);
    }

    fn run_step<S: DisplaySink + ?Sized>(
        &mut self,
        sink: &mut S,
        events: &mut Vec<SequencerEvent>,
    ) {
        match self.steps.get(self.next_step).copied() {
            Some(visible) => {
                self.cursor = visible.min(self.line_len).max(self.cursor);
                sink.set_visible_units(self.cursor);
                self.next_step += 1;
                self.wait_remaining += self.timing.unit_delay(self.mode);
            }
            None => {
                self.phase = SequencerPhase::Holding;
                self.wait_remaining += self.timing.line_hold_seconds(self.line_len);
                events.push(SequencerEvent::LineRevealed {
                    index: self.line_index,
                });
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(
            self.phase,
            SequencerPhase::Revealing | SequencerPhase::Holding
        )
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_finished(&self) -> bool {
        self.phase == SequencerPhase::Finished
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn phase(&self) -> SequencerPhase {
        self.phase
    }

    pub fn mode(&self) -> RevealMode {
        self.mode
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// Line currently being revealed or held, if playback is running.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn current_line(&self) -> Option<&str> {
        if self.is_playing() {
            self.lines.get(self.line_index).map(String::as_str)
        } else {
            None
        }
    }

    /// Visible units on the current line, never beyond its length.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn reveal_cursor(&self) -> usize {
        self.cursor
    }

    /// Seconds left before the next step runs.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn remaining_wait(&self) -> f32 {
        self.wait_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{errors::DialogueErrorKind, library::DialogueEntry};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SinkWrite {
        Text(String),
        Visible(usize),
    }

    #[derive(Debug, Default)]
    struct RecordingSink {
        writes: Vec<SinkWrite>,
    }

    impl RecordingSink {
        /// Visible counts written since the most recent text reset, excluding
        /// the reset's own zero.
        fn reveal_states_for(&self, text: &str) -> Vec<usize> {
            let start = self
                .writes
                .iter()
                .rposition(|write| *write == SinkWrite::Text(text.to_string()))
                .expect("line was never shown");
            self.writes[start + 2..]
                .iter()
                .take_while(|write| matches!(write, SinkWrite::Visible(_)))
                .map(|write| match write {
                    SinkWrite::Visible(count) => *count,
                    SinkWrite::Text(_) => unreachable!(),
                })
                .collect()
        }
    }

    impl DisplaySink for RecordingSink {
        fn set_full_text(&mut self, text: &str) {
            self.writes.push(SinkWrite::Text(text.to_string()));
        }

        fn set_visible_units(&mut self, count: usize) {
            self.writes.push(SinkWrite::Visible(count));
        }
    }

    fn intro_library() -> DialogueLibrary {
        DialogueLibrary::configure(vec![DialogueEntry::new("intro", "Hello world\nGoodbye")])
    }

    fn fast_timing() -> RevealTiming {
        RevealTiming {
            char_delay: 0.01,
            ..RevealTiming::default()
        }
    }

    #[test]
    fn load_file_splits_lines() {
        let mut sequencer = DialogueSequencer::new(RevealMode::Characters, fast_timing());
        let count = sequencer.load_file(&intro_library(), "intro").unwrap();

        assert_eq!(count, 2);
        assert_eq!(sequencer.lines(), ["Hello world", "Goodbye"]);
    }

    #[test]
    fn plays_intro_character_by_character() {
        let mut sequencer = DialogueSequencer::new(RevealMode::Characters, fast_timing());
        sequencer.load_file(&intro_library(), "intro").unwrap();
        let mut sink = RecordingSink::default();

        let events = sequencer.play(&mut sink);
        assert_eq!(events, vec![SequencerEvent::LineStarted { index: 0 }]);
        assert_eq!(
            sink.writes[..3],
            [
                SinkWrite::Text("Hello world".to_string()),
                SinkWrite::Visible(0),
                SinkWrite::Visible(0),
            ]
        );

        for expected in 1..=11 {
            assert!(sequencer.tick(0.01, &mut sink).is_empty());
            assert_eq!(sequencer.reveal_cursor(), expected);
        }
        assert_eq!(
            sink.reveal_states_for("Hello world"),
            (0..=11).collect::<Vec<_>>()
        );

        // Trailing wait after the full reveal, then the hold starts.
        let events = sequencer.tick(0.01, &mut sink);
        assert_eq!(events, vec![SequencerEvent::LineRevealed { index: 0 }]);
        assert_eq!(sequencer.phase(), SequencerPhase::Holding);
        let hold = fast_timing().line_hold_seconds(11);
        assert!((sequencer.remaining_wait() - hold).abs() < 1e-5);

        let events = sequencer.tick(hold, &mut sink);
        assert_eq!(events, vec![SequencerEvent::LineStarted { index: 1 }]);
        assert_eq!(sequencer.current_line(), Some("Goodbye"));

        for _ in 1..=7 {
            sequencer.tick(0.01, &mut sink);
        }
        assert_eq!(
            sink.reveal_states_for("Goodbye"),
            (0..=7).collect::<Vec<_>>()
        );

        let events = sequencer.tick(0.01, &mut sink);
        assert_eq!(events, vec![SequencerEvent::LineRevealed { index: 1 }]);
        let hold = fast_timing().line_hold_seconds(7);
        let events = sequencer.tick(hold, &mut sink);
        assert_eq!(events, vec![SequencerEvent::Finished]);
        assert!(sequencer.is_finished());
        assert_eq!(sequencer.current_line(), None);

        assert!(sequencer.tick(10.0, &mut sink).is_empty());
    }

    #[test]
    fn words_mode_clamps_final_overshoot() {
        let library =
            DialogueLibrary::configure(vec![DialogueEntry::new("line", "Hello brave world")]);
        let mut sequencer = DialogueSequencer::new(RevealMode::Words, RevealTiming::default());
        sequencer.load_file(&library, "line").unwrap();
        let mut sink = RecordingSink::default();

        sequencer.play(&mut sink);
        assert_eq!(sequencer.reveal_cursor(), 6);
        sequencer.tick(0.2, &mut sink);
        assert_eq!(sequencer.reveal_cursor(), 12);
        sequencer.tick(0.2, &mut sink);
        assert_eq!(sequencer.reveal_cursor(), 17);

        assert_eq!(sink.reveal_states_for("Hello brave world"), vec![6, 12, 17]);

        // Final word still waits before the hold.
        assert_eq!(sequencer.phase(), SequencerPhase::Revealing);
        let events = sequencer.tick(0.2, &mut sink);
        assert_eq!(events, vec![SequencerEvent::LineRevealed { index: 0 }]);
    }

    #[test]
    fn large_delta_runs_steps_in_order() {
        let mut sequencer = DialogueSequencer::new(RevealMode::Characters, fast_timing());
        sequencer.load_file(&intro_library(), "intro").unwrap();
        let mut sink = RecordingSink::default();
        sequencer.play(&mut sink);

        let events = sequencer.tick(100.0, &mut sink);
        assert_eq!(
            events,
            vec![
                SequencerEvent::LineRevealed { index: 0 },
                SequencerEvent::LineStarted { index: 1 },
                SequencerEvent::LineRevealed { index: 1 },
                SequencerEvent::Finished,
            ]
        );
        assert_eq!(sink.reveal_states_for("Goodbye"), (0..=7).collect::<Vec<_>>());
    }

    #[test]
    fn play_restarts_from_first_line() {
        let mut sequencer = DialogueSequencer::new(RevealMode::Characters, fast_timing());
        sequencer.load_file(&intro_library(), "intro").unwrap();
        let mut sink = RecordingSink::default();
        sequencer.play(&mut sink);
        sequencer.tick(100.0, &mut sink);
        assert!(sequencer.is_finished());

        let events = sequencer.play(&mut sink);
        assert_eq!(events, vec![SequencerEvent::LineStarted { index: 0 }]);
        assert_eq!(sequencer.line_index(), 0);
        assert_eq!(sequencer.reveal_cursor(), 0);
        assert_eq!(sequencer.current_line(), Some("Hello world"));
    }

    #[test]
    fn missing_resource_makes_play_a_no_op() {
        let mut sequencer = DialogueSequencer::new(RevealMode::Characters, fast_timing());
        let error = sequencer.load_file(&intro_library(), "missing").unwrap_err();
        assert_eq!(error.kind, DialogueErrorKind::resource_not_found("missing"));

        let mut sink = RecordingSink::default();
        assert!(sequencer.play(&mut sink).is_empty());
        assert!(sequencer.tick(5.0, &mut sink).is_empty());
        assert!(sink.writes.is_empty());
        assert_eq!(sequencer.phase(), SequencerPhase::Idle);
    }

    #[test]
    fn loads_by_index_selection() {
        let library = DialogueLibrary::configure(vec![
            DialogueEntry::new("intro", "Hello world\nGoodbye"),
            DialogueEntry::new("level_2", "Onward"),
        ]);
        let mut sequencer = DialogueSequencer::new(RevealMode::Characters, fast_timing());

        assert_eq!(
            sequencer.load_selection(&library, &DialogueSelection::Index(1)),
            Ok(1)
        );
        assert_eq!(sequencer.lines(), ["Onward"]);

        let error = sequencer
            .load_selection(&library, &DialogueSelection::Index(5))
            .unwrap_err();
        assert_eq!(error.kind, DialogueErrorKind::index_out_of_range(5, 2));
        assert!(sequencer.lines().is_empty());
    }

    #[test]
    fn failed_reload_clears_previous_lines() {
        let mut sequencer = DialogueSequencer::new(RevealMode::Characters, fast_timing());
        let library = intro_library();
        sequencer.load_file(&library, "intro").unwrap();
        assert!(sequencer.load_file(&library, "missing").is_err());
        assert!(sequencer.lines().is_empty());
    }

    #[test]
    fn cursor_never_decreases_within_a_line() {
        let library = DialogueLibrary::configure(vec![DialogueEntry::new(
            "line",
            "one  two three",
        )]);
        let mut sequencer = DialogueSequencer::new(RevealMode::Words, RevealTiming::default());
        sequencer.load_file(&library, "line").unwrap();
        let mut sink = RecordingSink::default();
        sequencer.play(&mut sink);

        let mut last = sequencer.reveal_cursor();
        while sequencer.phase() == SequencerPhase::Revealing {
            sequencer.tick(0.2, &mut sink);
            assert!(sequencer.reveal_cursor() >= last);
            assert!(sequencer.reveal_cursor() <= "one  two three".len());
            last = sequencer.reveal_cursor();
        }
    }
}
