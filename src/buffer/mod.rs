pub mod chart_window;
pub mod recorder;

pub use chart_window::{AxisCharts, ChartPoint, ChartWindow};
pub use recorder::SessionRecorder;
