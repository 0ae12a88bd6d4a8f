//! Splits a dialogue resource into the lines played back one at a time.

/// Splits `text` on line feeds and drops empty segments.
///
/// Blank lines used for spacing in the source are removed along with them.
/// A carriage return before the line feed stays part of the line.
pub fn split_dialogue_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
