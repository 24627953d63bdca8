//! sheetviz: spreadsheet visualization session engine.
//!
//! This crate models the chart-rendering lifecycle of a spreadsheet
//! analytics tool: load a dataset, pick axes and a chart type, generate a
//! 2D chart frame or a 3D scene graph (never both), and dispose it fully
//! before the next one. Rendering backends, history persistence, and
//! workbook parsing sit behind traits so the session itself stays headless
//! and deterministic.

pub mod core;
pub mod error;
pub mod export;
pub mod history;
pub mod ingest;
pub mod render;
pub mod session;
pub mod telemetry;

pub use error::{VizError, VizResult};
pub use session::{Axis, AxisSelection, RenderReport, SessionState, VisualizationSession};
