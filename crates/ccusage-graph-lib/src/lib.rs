pub mod calculator;
pub mod chart;
pub mod data_structures;
pub mod error;
pub mod format;
pub mod loader;
pub mod scale;
pub mod style;
pub mod summary;

pub use calculator::{Calculator, Totals, TotalsSource};
pub use data_structures::{
    ChartKind, Period, RenderOptions, Thresholds, Tier, UsageDataset, UsageRecord, UsageTotal,
};
pub use error::{GraphError, Result};
pub use loader::{DataLoader, UsageSchema};
pub use scale::select_scale;
pub use style::{Painter, PlainPainter, Tone};
pub use summary::{Report, TotalsSummary};

pub mod prelude {
    pub use crate::data_structures::{ChartKind, Period, RenderOptions, Thresholds, UsageDataset};
    pub use crate::error::{GraphError, Result};
    pub use crate::loader::DataLoader;
    pub use crate::style::{Painter, PlainPainter, Tone};
    pub use crate::summary::Report;
}
