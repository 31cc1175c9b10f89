use crate::calculator::{Calculator, Totals};
use crate::chart::{BarChart, LineChart};
use crate::data_structures::{ChartKind, RenderOptions, UsageDataset};
use crate::format::{format_cost, format_number};
use crate::style::{Painter, Tone};
use tracing::debug;

pub const REPORT_TITLE: &str = "📊 Claude Usage Report";

pub struct TotalsSummary;

impl TotalsSummary {
    pub fn render(totals: &Totals, painter: &dyn Painter) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            painter.bold(
                Tone::Yellow,
                &format!("💰 Total Cost: {}", format_cost(totals.cost())),
            ),
        ];

        if let Some(tokens) = totals.tokens() {
            lines.push(painter.bold(
                Tone::Blue,
                &format!("🔢 Total Tokens: {}", format_number(tokens)),
            ));
        }

        lines
    }
}

/// The whole report, built in memory so nothing reaches stdout unless
/// rendering as a whole succeeded.
pub struct Report;

impl Report {
    pub fn render(
        dataset: &UsageDataset,
        options: &RenderOptions,
        painter: &dyn Painter,
    ) -> Vec<String> {
        debug!(
            kind = %options.chart_kind,
            period = %options.period,
            records = dataset.len(),
            "rendering report"
        );

        let mut lines = vec![
            String::new(),
            painter.bold(Tone::Cyan, REPORT_TITLE),
            String::new(),
        ];

        lines.extend(match options.chart_kind {
            ChartKind::Bar => BarChart::render(dataset, options, painter),
            ChartKind::Line => LineChart::render(dataset, options, painter),
        });

        let totals = Calculator::new().summarize(dataset);
        debug!(source = ?totals.source(), "totals resolved");
        lines.extend(TotalsSummary::render(&totals, painter));

        lines
    }
}
