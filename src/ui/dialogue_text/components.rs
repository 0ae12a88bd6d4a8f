// src/ui/dialogue_text/components.rs
//
// Components for the dialogue text panel that acts as the playback display sink.

use bevy::prelude::*;

use crate::dialogue::{sequencer::DisplaySink, settings::DisplaySettings};

/// Display sink state for the dialogue text panel.
///
/// Holds the full line so layout can be computed against it, plus how many
/// leading characters are currently visible.
#[derive(Component, Debug, Default, Clone)]
pub struct DialogueTextSink {
    /// The complete line being revealed.
    full_text: String,

    /// Character count of `full_text`, cached for clamping.
    char_count: usize,

    /// Visible leading characters, never more than `char_count`.
    visible: usize,
}

impl DialogueTextSink {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn visible_units(&self) -> usize {
        self.visible
    }

    /// The revealed prefix of the line.
    pub fn visible_text(&self) -> &str {
        &self.full_text[..self.split_offset()]
    }

    /// The not-yet-revealed remainder, rendered transparently.
    pub fn hidden_text(&self) -> &str {
        &self.full_text[self.split_offset()..]
    }

    fn split_offset(&self) -> usize {
        self.full_text
            .char_indices()
            .nth(self.visible)
            .map(|(offset, _)| offset)
            .unwrap_or(self.full_text.len())
    }
}

impl DisplaySink for DialogueTextSink {
    fn set_full_text(&mut self, text: &str) {
        self.full_text = text.to_string();
        self.char_count = text.chars().count();
        self.visible = self.visible.min(self.char_count);
    }

    fn set_visible_units(&mut self, count: usize) {
        self.visible = count.min(self.char_count);
    }
}

/// Marker for the child span holding the hidden remainder of the line.
#[derive(Component, Debug)]
pub struct DialogueHiddenSpan;

/// Marker for the panel node containing the dialogue text.
#[derive(Component, Debug)]
pub struct DialogueTextPanel;

/// Font size that fits a line of `char_count` characters.
///
/// Shrinks linearly from `max_font_size` to `min_font_size` as the line
/// grows to `fit_char_count`; fixed at `max_font_size` when auto sizing is off.
pub fn fit_font_size(char_count: usize, settings: &DisplaySettings) -> f32 {
    if !settings.auto_size {
        return settings.max_font_size;
    }

    let t = (char_count as f32 / settings.fit_char_count.max(1) as f32).clamp(0.0, 1.0);
    settings.max_font_size - (settings.max_font_size - settings.min_font_size) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::settings::DialogueSettings;

    #[test]
    fn clamps_visible_count_to_text_length() {
        let mut sink = DialogueTextSink::default();
        sink.set_full_text("Hello brave world");
        sink.set_visible_units(18);

        assert_eq!(sink.visible_units(), 17);
        assert_eq!(sink.visible_text(), "Hello brave world");
        assert_eq!(sink.hidden_text(), "");
    }

    #[test]
    fn splits_on_character_boundaries() {
        let mut sink = DialogueTextSink::default();
        sink.set_full_text("héllo");
        sink.set_visible_units(2);

        assert_eq!(sink.visible_text(), "hé");
        assert_eq!(sink.hidden_text(), "llo");
        assert_eq!(sink.char_count(), 5);
    }

    #[test]
    fn shorter_text_clamps_existing_visible_count() {
        let mut sink = DialogueTextSink::default();
        sink.set_full_text("Hello world");
        sink.set_visible_units(11);
        sink.set_full_text("Bye");

        assert_eq!(sink.visible_units(), 3);
        assert_eq!(sink.hidden_text(), "");
    }

    #[test]
    fn font_shrinks_with_line_length() {
        let display = DialogueSettings::default().display;

        assert_eq!(fit_font_size(0, &display), display.max_font_size);
        assert_eq!(
            fit_font_size(display.fit_char_count * 2, &display),
            display.min_font_size
        );

        let mid = fit_font_size(display.fit_char_count / 2, &display);
        assert!(mid < display.max_font_size && mid > display.min_font_size);
    }

    #[test]
    fn font_is_fixed_without_auto_size() {
        let mut display = DialogueSettings::default().display;
        display.auto_size = false;
        assert_eq!(fit_font_size(500, &display), display.max_font_size);
    }
}
