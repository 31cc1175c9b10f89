use ccusage_graph_core::{Painter, PlainPainter, Tone};
use crossterm::style::{StyledContent, Stylize};
use std::io::IsTerminal;

/// Maps tones onto ANSI colours through crossterm.
pub struct AnsiPainter;

impl AnsiPainter {
    fn styled<'a>(&self, tone: Tone, text: &'a str) -> StyledContent<&'a str> {
        match tone {
            Tone::Green => text.green(),
            Tone::Yellow => text.yellow(),
            Tone::Red => text.red(),
            Tone::Cyan => text.cyan(),
            Tone::Blue => text.blue(),
            Tone::Gray => text.grey(),
            Tone::White => text.white(),
            Tone::Dim => text.dim(),
        }
    }
}

impl Painter for AnsiPainter {
    fn paint(&self, tone: Tone, text: &str) -> String {
        self.styled(tone, text).to_string()
    }

    fn bold(&self, tone: Tone, text: &str) -> String {
        self.styled(tone, text).bold().to_string()
    }
}

/// Colour is used only on a terminal, and never with `--no-color` or `NO_COLOR`.
pub fn choose_painter(no_color: bool) -> Box<dyn Painter> {
    let disabled = no_color
        || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
        || !std::io::stdout().is_terminal();

    if disabled {
        Box::new(PlainPainter)
    } else {
        Box::new(AnsiPainter)
    }
}
