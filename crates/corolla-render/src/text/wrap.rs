//! Greedy word wrapping against a measured width.

use super::{TextMeasurer, TextStyle, measure_width_or_estimate};

/// Splits `text` on whitespace and fills lines word by word.
///
/// After each word is appended the whole line is measured. When it exceeds `max_width_px` and
/// holds more than one word, the word moves to a fresh line. A single word is never broken,
/// even when it alone is wider than the limit. Whitespace-only input yields no lines.
pub fn wrap_words_greedy(
    text: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
    fallback_char_width: f64,
) -> Vec<String> {
    wrap_words_greedy_with(text, max_width_px, |line| {
        measure_width_or_estimate(measurer, line, style, fallback_char_width)
    })
}

/// [`wrap_words_greedy`] with an arbitrary width function.
pub fn wrap_words_greedy_with(
    text: &str,
    max_width_px: f64,
    mut width_of: impl FnMut(&str) -> f64,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut line: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        line.push(word);
        let candidate = line.join(" ");
        if width_of(&candidate) > max_width_px && line.len() > 1 {
            line.pop();
            out.push(line.join(" "));
            line.clear();
            line.push(word);
        }
    }

    if !line.is_empty() {
        out.push(line.join(" "));
    }
    out
}
