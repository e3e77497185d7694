pub mod source;

pub use source::{BufferedSource, ReplaySource, SensorSource, open_source};
