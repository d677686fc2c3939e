use crate::foundation::core::Point;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.5;

/// Width measurement for a run of text in the active font.
pub trait TextMeasure {
    /// Rendered advance width of `text`, in pixels, trailing whitespace included.
    fn measure(&mut self, text: &str) -> f64;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &mut M {
    fn measure(&mut self, text: &str) -> f64 {
        (**self).measure(text)
    }
}

/// One committed line and the top-left origin it is drawn at.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub origin: Point,
}

/// Output of [`wrap_text`]: the placed lines of one text block, top to bottom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrapResult {
    pub lines: Vec<PlacedLine>,
}

impl WrapResult {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.lines.iter()
    }
}

/// Greedily wrap `text` into lines no wider than `max_width`.
///
/// Words are separated by single spaces; a word is never split, so a word wider than
/// `max_width` overflows its line. Lines start at `origin` and advance by
/// `font_size * LINE_HEIGHT`. At least one line is always produced.
pub fn wrap_text<M: TextMeasure>(
    mut measure: M,
    text: &str,
    origin: Point,
    max_width: f64,
    font_size: f64,
) -> WrapResult {
    let line_advance = font_size * LINE_HEIGHT;
    let mut out = WrapResult::default();
    let mut y = origin.y;
    let mut line: Vec<&str> = Vec::new();

    let commit = |line: &[&str], y: f64| PlacedLine {
        text: line.join(" "),
        origin: Point::new(origin.x, y),
    };

    for word in text.split(' ') {
        let candidate = candidate_line(&line, word);
        if measure.measure(&candidate) > max_width && !line.is_empty() {
            out.lines.push(commit(&line, y));
            line.clear();
            line.push(word);
            y += line_advance;
        } else {
            line.push(word);
        }
    }
    out.lines.push(commit(&line, y));

    out
}

// `line + word + " "`, with the trailing separator a canvas measurement would include.
fn candidate_line(line: &[&str], word: &str) -> String {
    let mut s = String::new();
    for w in line {
        s.push_str(w);
        s.push(' ');
    }
    s.push_str(word);
    s.push(' ');
    s
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
