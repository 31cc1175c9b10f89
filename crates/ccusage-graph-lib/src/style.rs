//! Logical colours. The renderers only name a tone, a [`Painter`] decides how
//! that looks on the terminal.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Yellow,
    Red,
    Cyan,
    Blue,
    Gray,
    White,
    Dim,
}

pub trait Painter {
    fn paint(&self, tone: Tone, text: &str) -> String;

    fn bold(&self, tone: Tone, text: &str) -> String {
        self.paint(tone, text)
    }
}

/// Leaves text untouched. Used when colour is off and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPainter;

impl Painter for PlainPainter {
    fn paint(&self, _tone: Tone, text: &str) -> String {
        text.to_string()
    }
}
