//! Reveal pacing: per-unit reveal schedules and the post-line hold heuristic.
use std::fmt;

use serde::Deserialize;

pub const DEFAULT_CHAR_DELAY: f32 = 0.05;
pub const DEFAULT_WORD_DELAY: f32 = 0.2;
pub const DEFAULT_MIN_LINE_DELAY: f32 = 1.0;
pub const DEFAULT_MAX_LINE_DELAY: f32 = 3.5;
pub const DEFAULT_MAX_CHAR_COUNT: usize = 40;

/// Granularity at which a line is exposed to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RevealMode {
    #[default]
    Characters,
    Words,
}

impl RevealMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Words => "words",
        }
    }
}

impl fmt::Display for RevealMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Delays (seconds) driving reveal steps and line holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTiming {
    pub char_delay: f32,
    pub word_delay: f32,
    pub min_line_delay: f32,
    pub max_line_delay: f32,
    /// Character count at or above which a line gets the full hold.
    pub max_char_count: usize,
}

impl RevealTiming {
    /// Wait after each reveal step in `mode`.
    pub fn unit_delay(&self, mode: RevealMode) -> f32 {
        match mode {
            RevealMode::Characters => self.char_delay,
            RevealMode::Words => self.word_delay,
        }
    }

    /// Hold after a fully revealed line of `char_count` characters.
    ///
    /// Interpolates linearly from `min_line_delay` at zero characters to
    /// `max_line_delay` at `max_char_count` or more.
    pub fn line_hold_seconds(&self, char_count: usize) -> f32 {
        let t = if self.max_char_count == 0 {
            1.0
        } else {
            (char_count as f32 / self.max_char_count as f32).clamp(0.0, 1.0)
        };
        self.min_line_delay + (self.max_line_delay - self.min_line_delay) * t
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            char_delay: DEFAULT_CHAR_DELAY,
            word_delay: DEFAULT_WORD_DELAY,
            min_line_delay: DEFAULT_MIN_LINE_DELAY,
            max_line_delay: DEFAULT_MAX_LINE_DELAY,
            max_char_count: DEFAULT_MAX_CHAR_COUNT,
        }
    }
}

/// Visible-unit counts written to the display, one per timed reveal step.
///
/// Character mode yields `0..=len`, so the complete line is followed by one
/// more wait. Word mode adds each word's length plus one separator, which
/// overshoots the line length by one on the final word; callers clamp.
pub fn reveal_steps(line: &str, mode: RevealMode) -> Vec<usize> {
    match mode {
        RevealMode::Characters => (0..=line.chars().count()).collect(),
        RevealMode::Words => line
            .split(' ')
            .scan(0usize, |visible, word| {
                *visible += word.chars().count() + 1;
                Some(*visible)
            })
            .collect(),
    }
}
