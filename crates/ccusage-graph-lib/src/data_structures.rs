use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One day of metered usage in the canonical shape every renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    date: NaiveDate,
    cost: f64,
    tokens: Option<u64>,
}

impl UsageRecord {
    pub fn new(date: NaiveDate, cost: f64, tokens: Option<u64>) -> Self {
        Self { date, cost, tokens }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn tokens(&self) -> Option<u64> {
        self.tokens
    }
}

/// Aggregate totals as supplied by the input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageTotal {
    cost: f64,
    #[serde(default)]
    tokens: Option<u64>,
}

impl UsageTotal {
    pub fn new(cost: f64, tokens: Option<u64>) -> Self {
        Self { cost, tokens }
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn tokens(&self) -> Option<u64> {
        self.tokens
    }
}

/// Chronologically sorted records plus the optional precomputed total.
#[derive(Debug, Clone)]
pub struct UsageDataset {
    records: Vec<UsageRecord>,
    total: Option<UsageTotal>,
}

impl UsageDataset {
    /// Sorts `records` ascending by date. Equal dates keep their input order.
    pub fn new(mut records: Vec<UsageRecord>, total: Option<UsageTotal>) -> Self {
        records.sort_by_key(|record| record.date);
        Self { records, total }
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn total(&self) -> Option<&UsageTotal> {
        self.total.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest cost among all records, `0.0` for an empty dataset.
    pub fn max_cost(&self) -> f64 {
        self.records
            .iter()
            .map(|record| record.cost)
            .fold(0.0, f64::max)
    }

    /// Every record sharing the maximum cost counts as a peak.
    pub fn is_peak(&self, record: &UsageRecord) -> bool {
        !self.records.is_empty() && record.cost == self.max_cost()
    }
}

/// The two plan caps drawn as reference markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pro: f64,
    pro_max: f64,
}

impl Thresholds {
    pub const DEFAULT_PRO: f64 = 20.0;
    pub const DEFAULT_PRO_MAX: f64 = 200.0;

    pub fn new(pro: f64, pro_max: f64) -> Self {
        Self { pro, pro_max }
    }

    pub fn pro(&self) -> f64 {
        self.pro
    }

    pub fn pro_max(&self) -> f64 {
        self.pro_max
    }

    pub fn tier(&self, cost: f64) -> Tier {
        if cost >= self.pro_max {
            Tier::ExceedsProMax
        } else if cost >= self.pro {
            Tier::ExceedsPro
        } else {
            Tier::Pro
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PRO, Self::DEFAULT_PRO_MAX)
    }
}

/// Cost bracket of a single day, relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Pro,
    ExceedsPro,
    ExceedsProMax,
}

impl Tier {
    pub fn description(&self) -> &'static str {
        match self {
            Tier::Pro => "below Pro plan",
            Tier::ExceedsPro => "exceeds Pro plan",
            Tier::ExceedsProMax => "exceeds Pro Max plan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            other => Err(format!("unknown graph type '{}' (expected bar or line)", other)),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Line => write!(f, "line"),
        }
    }
}

/// Reporting period. Accepted for compatibility, rendering ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(format!(
                "unknown period '{}' (expected day, week or month)",
                other
            )),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day => write!(f, "day"),
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub chart_kind: ChartKind,
    pub period: Period,
    pub show_threshold: bool,
    pub thresholds: Thresholds,
    /// Character cells per bar row.
    pub width: usize,
    /// Rows of the line plot.
    pub height: usize,
}

impl RenderOptions {
    pub const DEFAULT_WIDTH: usize = 50;
    pub const DEFAULT_HEIGHT: usize = 15;
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chart_kind: ChartKind::Bar,
            period: Period::Day,
            show_threshold: true,
            thresholds: Thresholds::default(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}
