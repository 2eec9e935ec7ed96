//! Text measurement for label fitting.
//!
//! Measurement is an injected, fallible capability: a surface that is not attached to a live
//! view cannot report metrics. Callers recover with a fixed per-character estimate (see
//! [`measure_width_or_estimate`]).

pub mod wrap;

pub use wrap::{wrap_words_greedy, wrap_words_greedy_with};

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn is_bold(&self) -> bool {
        match self.font_weight.as_deref().map(str::trim) {
            Some("bold") | Some("bolder") => true,
            Some(w) => w.parse::<u32>().is_ok_and(|n| n >= 600),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeasureError {
    #[error("text metrics unavailable: {reason}")]
    Unavailable { reason: String },
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, MeasureError>;
}

/// Font-free measurer: every display column is `font_size × char_width_factor` wide, bold text
/// is widened by `bold_factor`.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
    pub bold_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, MeasureError> {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };
        let bold_factor = if self.bold_factor == 0.0 {
            1.1
        } else {
            self.bold_factor
        };

        let font_size = style.font_size.max(1.0);
        let lines: Vec<&str> = text.split('\n').collect();
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        let mut width = max_cols as f64 * font_size * char_width_factor;
        if style.is_bold() {
            width *= bold_factor;
        }
        let height = lines.len() as f64 * font_size * line_height_factor;
        Ok(TextMetrics {
            width,
            height,
            line_count: lines.len(),
        })
    }
}

/// Stand-in for a surface that is not attached to a view: every measurement fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTextMeasurer;

impl TextMeasurer for UnavailableTextMeasurer {
    fn measure(&self, _text: &str, _style: &TextStyle) -> Result<TextMetrics, MeasureError> {
        Err(MeasureError::Unavailable {
            reason: "surface is not attached".to_string(),
        })
    }
}

/// Width of `text` in px, or `chars × fallback_char_width` when the measurer cannot answer.
pub fn measure_width_or_estimate(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    fallback_char_width: f64,
) -> f64 {
    match measurer.measure(text, style) {
        Ok(m) if m.width.is_finite() => m.width,
        Ok(_) => text.chars().count() as f64 * fallback_char_width,
        Err(err) => {
            tracing::trace!(%err, text, "falling back to estimated text width");
            text.chars().count() as f64 * fallback_char_width
        }
    }
}

#[cfg(test)]
mod tests;
