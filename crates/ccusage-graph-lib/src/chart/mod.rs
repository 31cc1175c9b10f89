//! Text renderers for the two chart kinds

pub mod bar;
pub mod line;

pub use bar::{BarChart, BarLayout, Cell, Marker};
pub use line::LineChart;
