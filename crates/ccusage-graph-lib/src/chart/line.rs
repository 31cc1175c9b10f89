use crate::data_structures::{RenderOptions, UsageDataset};
use crate::format::{date_label, format_cost};
use crate::style::{Painter, Tone};

const AXIS: char = '┤';
const AXIS_ORIGIN: char = '┼';
const FLAT: char = '─';
const DOWN_END: char = '╰';
const UP_END: char = '╭';
const DOWN_START: char = '╮';
const UP_START: char = '╯';
const VERTICAL: char = '│';

/// Width the axis labels are right-aligned to.
const LABEL_WIDTH: usize = 8;

pub struct LineChart;

impl LineChart {
    /// Plots `series` as a connected line, top row first.
    ///
    /// Values are scaled so the span between the minimum and maximum covers
    /// `height` steps; every row carries its value on the left axis. A flat
    /// series collapses to a single row.
    pub fn plot(series: &[f64], height: usize) -> Vec<String> {
        if series.is_empty() {
            return Vec::new();
        }

        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let ratio = if range > 0.0 { height as f64 / range } else { 1.0 };

        let min2 = (min * ratio).round() as i64;
        let max2 = (max * ratio).round() as i64;
        let rows = (max2 - min2).unsigned_abs() as usize;
        let level = |value: f64| (((value * ratio).round() as i64 - min2).max(0) as usize).min(rows);
        // Level counts from the bottom, grid rows from the top.
        let row_of = |level: usize| rows - level;

        let columns = series.len() - 1;
        let mut grid = vec![vec![' '; columns]; rows + 1];

        for (x, pair) in series.windows(2).enumerate() {
            let y0 = level(pair[0]);
            let y1 = level(pair[1]);

            if y0 == y1 {
                grid[row_of(y0)][x] = FLAT;
                continue;
            }

            let falling = y0 > y1;
            grid[row_of(y1)][x] = if falling { DOWN_END } else { UP_END };
            grid[row_of(y0)][x] = if falling { DOWN_START } else { UP_START };
            for y in y0.min(y1) + 1..y0.max(y1) {
                grid[row_of(y)][x] = VERTICAL;
            }
        }

        let origin_row = row_of(level(series[0]));
        grid.into_iter()
            .enumerate()
            .map(|(row, cells)| {
                let value = if rows > 0 {
                    max - row as f64 * range / rows as f64
                } else {
                    max
                };
                let axis = if row == origin_row { AXIS_ORIGIN } else { AXIS };
                let plot: String = cells.into_iter().collect();
                format!("{:>width$.2} {}{}", value, axis, plot, width = LABEL_WIDTH)
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    /// Plot of daily cost followed by an indexed list of the values.
    /// Thresholds are never drawn here.
    pub fn render(
        dataset: &UsageDataset,
        options: &RenderOptions,
        painter: &dyn Painter,
    ) -> Vec<String> {
        let costs: Vec<f64> = dataset.records().iter().map(|r| r.cost()).collect();

        let mut lines: Vec<String> = Self::plot(&costs, options.height)
            .iter()
            .map(|line| painter.paint(Tone::Green, line))
            .collect();

        lines.push(String::new());
        lines.push(painter.paint(Tone::Dim, "Dates:"));
        for (index, record) in dataset.records().iter().enumerate() {
            let crown = if dataset.is_peak(record) { " 👑" } else { "" };
            lines.push(painter.paint(
                Tone::Dim,
                &format!(
                    "  [{}] {}: {}{}",
                    index,
                    date_label(record.date()),
                    format_cost(record.cost()),
                    crown
                ),
            ));
        }

        lines
    }
}
