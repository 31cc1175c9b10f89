use crate::data_structures::{RenderOptions, Thresholds, Tier, UsageDataset};
use crate::format::{date_label, format_amount, format_cost};
use crate::scale::select_scale;
use crate::style::{Painter, Tone};
use tracing::debug;

pub const FILL_GLYPH: char = '█';
pub const MARKER_GLYPH: char = '│';

/// Which threshold a marker cell stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Pro,
    ProMax,
}

impl Marker {
    fn tone(&self) -> Tone {
        match self {
            Marker::Pro => Tone::Yellow,
            Marker::ProMax => Tone::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Fill(Tier),
    Marker(Marker),
}

impl Cell {
    fn glyph(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Fill(_) => FILL_GLYPH,
            Cell::Marker(_) => MARKER_GLYPH,
        }
    }

    fn tone(&self) -> Option<Tone> {
        match self {
            Cell::Empty => None,
            Cell::Fill(tier) => Some(tier_tone(*tier)),
            Cell::Marker(marker) => Some(marker.tone()),
        }
    }
}

pub fn tier_tone(tier: Tier) -> Tone {
    match tier {
        Tier::Pro => Tone::Green,
        Tier::ExceedsPro => Tone::Yellow,
        Tier::ExceedsProMax => Tone::Red,
    }
}

/// Geometry shared by every row of one chart: the scale, the row width and
/// the marker columns.
#[derive(Debug, Clone)]
pub struct BarLayout {
    scale: f64,
    width: usize,
    thresholds: Thresholds,
    markers: Vec<(usize, Marker)>,
}

impl BarLayout {
    pub fn new(scale: f64, width: usize, thresholds: Thresholds, show_threshold: bool) -> Self {
        let mut layout = Self {
            scale,
            width,
            thresholds,
            markers: Vec::new(),
        };

        if show_threshold {
            // ProMax is pushed last so it wins a shared column.
            let candidates = [
                (thresholds.pro(), Marker::Pro),
                (thresholds.pro_max(), Marker::ProMax),
            ];
            layout.markers = candidates
                .into_iter()
                .filter_map(|(amount, marker)| {
                    layout.marker_column(amount).map(|column| (column, marker))
                })
                .collect();
        }

        layout
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Filled cells for `cost`: rounded up so any spend is visible, capped at
    /// the row width.
    pub fn bar_length(&self, cost: f64) -> usize {
        if self.width == 0 || self.scale <= 0.0 || cost <= 0.0 {
            return 0;
        }

        let cells = (cost * self.width as f64 / self.scale).ceil();
        (cells as usize).min(self.width)
    }

    /// Column of a threshold marker, or `None` when the amount lies beyond the
    /// scale. An amount equal to the scale sits on the last cell.
    pub fn marker_column(&self, amount: f64) -> Option<usize> {
        if self.width == 0 || self.scale < amount || amount <= 0.0 {
            return None;
        }

        let column = (amount * self.width as f64 / self.scale).floor() as usize;
        Some(column.min(self.width - 1))
    }

    pub fn markers(&self) -> &[(usize, Marker)] {
        &self.markers
    }

    /// Cells of one row. Fill always takes precedence over a marker.
    pub fn row(&self, cost: f64) -> Vec<Cell> {
        let tier = self.thresholds.tier(cost);
        let filled = self.bar_length(cost);

        let mut cells = vec![Cell::Empty; self.width];
        for (column, marker) in &self.markers {
            if *column >= filled {
                cells[*column] = Cell::Marker(*marker);
            }
        }
        for cell in cells.iter_mut().take(filled) {
            *cell = Cell::Fill(tier);
        }

        cells
    }
}

/// Paints runs of identical cells in one go to keep escape sequences short.
fn paint_cells(cells: &[Cell], painter: &dyn Painter) -> String {
    let mut out = String::new();
    let mut start = 0;

    while start < cells.len() {
        let cell = cells[start];
        let run = cells[start..]
            .iter()
            .take_while(|other| **other == cell)
            .count();
        let text: String = std::iter::repeat(cell.glyph()).take(run).collect();

        match cell.tone() {
            Some(tone) => out.push_str(&painter.paint(tone, &text)),
            None => out.push_str(&text),
        }
        start += run;
    }

    out
}

pub struct BarChart;

impl BarChart {
    pub fn render(
        dataset: &UsageDataset,
        options: &RenderOptions,
        painter: &dyn Painter,
    ) -> Vec<String> {
        let max_cost = dataset.max_cost();
        let scale = select_scale(max_cost);
        debug!(max_cost, scale, width = options.width, "bar chart scale selected");

        let layout = BarLayout::new(
            scale,
            options.width,
            options.thresholds,
            options.show_threshold,
        );

        let mut lines: Vec<String> = dataset
            .records()
            .iter()
            .map(|record| {
                let crown = if dataset.is_peak(record) { "👑" } else { "  " };
                let label = format!("{} {}  ", date_label(record.date()), crown);
                format!(
                    "{} {} {}",
                    painter.paint(Tone::Gray, &label),
                    paint_cells(&layout.row(record.cost()), painter),
                    painter.paint(Tone::White, &format_cost(record.cost()))
                )
            })
            .collect();

        if options.show_threshold {
            lines.extend(Self::legend(&layout, &options.thresholds, painter));
        }

        lines
    }

    /// Tier colours, plus one line per threshold that fits on the scale.
    pub fn legend(
        layout: &BarLayout,
        thresholds: &Thresholds,
        painter: &dyn Painter,
    ) -> Vec<String> {
        let fill = FILL_GLYPH.to_string();
        let marker = MARKER_GLYPH.to_string();
        let pro = format_amount(thresholds.pro());
        let pro_max = format_amount(thresholds.pro_max());
        let scale = format_amount(layout.scale());

        let mut lines = vec![
            String::new(),
            painter.paint(Tone::Dim, "Legend:"),
            format!(
                "{} < {} ({})",
                painter.paint(Tone::Green, &fill),
                pro,
                Tier::Pro.description()
            ),
        ];

        if layout.scale() >= thresholds.pro() {
            lines.push(format!(
                "{} {}-{} ({}) {} {} line (scale {})",
                painter.paint(Tone::Yellow, &fill),
                pro,
                pro_max,
                Tier::ExceedsPro.description(),
                painter.paint(Marker::Pro.tone(), &marker),
                pro,
                scale
            ));
        }

        if layout.scale() >= thresholds.pro_max() {
            lines.push(format!(
                "{} ≥ {} ({}) {} {} line (scale {})",
                painter.paint(Tone::Red, &fill),
                pro_max,
                Tier::ExceedsProMax.description(),
                painter.paint(Marker::ProMax.tone(), &marker),
                pro_max,
                scale
            ));
        }

        lines
    }
}
