mod motion;

pub use motion::{GRAVITY, MotionConfig, SimulatedSource};
