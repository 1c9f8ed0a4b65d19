// File: crates/axis-core/src/text.rs
// Summary: Text measurement seam used to size tick labels; the host supplies the real font metrics.

/// Measures a single line of label text, returning `(width, height)` in pixels.
pub trait TextMeasure {
    fn measure_text(&self, text: &str) -> (f32, f32);
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> (f32, f32),
{
    fn measure_text(&self, text: &str) -> (f32, f32) {
        self(text)
    }
}

/// Fixed-advance metrics: every char is `char_width` wide. Good enough for
/// headless layout and monospace fonts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub char_width: f32,
    pub line_height: f32,
}

impl FixedAdvance {
    pub const fn new(char_width: f32, line_height: f32) -> Self {
        Self { char_width, line_height }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(7.0, 13.0)
    }
}

impl TextMeasure for FixedAdvance {
    fn measure_text(&self, text: &str) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        (text.chars().count() as f32 * self.char_width, self.line_height)
    }
}
