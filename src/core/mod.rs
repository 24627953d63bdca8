pub mod cell;
pub mod chart_type;
pub mod coerce;
pub mod dataset;
pub mod palette;

pub use cell::CellValue;
pub use chart_type::{ChartFamily, ChartType};
pub use coerce::to_number;
pub use dataset::Dataset;
