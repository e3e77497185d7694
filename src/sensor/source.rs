use std::collections::VecDeque;
use std::path::Path;
use std::thread;

use anyhow::Context;

use crate::config::SensorDelay;
use crate::error::VibroError;
use crate::export::read_export;
use crate::sample::RawSample;

/// Producer of raw accelerometer samples
///
/// `Ok(None)` means the source is exhausted and the session should stop.
pub trait SensorSource: Send {
    fn next_sample(&mut self) -> anyhow::Result<Option<RawSample>>;
    fn delay(&self) -> SensorDelay;
}

/// Samples held in memory, delivered without pacing
pub struct BufferedSource {
    samples: VecDeque<RawSample>,
    delay: SensorDelay,
}

impl BufferedSource {
    pub fn new(samples: Vec<RawSample>) -> Self {
        Self {
            samples: samples.into(),
            delay: SensorDelay::Fastest,
        }
    }
}

impl SensorSource for BufferedSource {
    fn next_sample(&mut self) -> anyhow::Result<Option<RawSample>> {
        Ok(self.samples.pop_front())
    }

    fn delay(&self) -> SensorDelay {
        self.delay
    }
}

/// Replays a previously exported session as raw samples
///
/// Exported values are calibrated, so a replay run without calibration
/// reproduces the recorded display.
pub struct ReplaySource {
    inner: BufferedSource,
    delay: SensorDelay,
    paced: bool,
}

impl ReplaySource {
    pub fn open<P: AsRef<Path>>(path: P, delay: SensorDelay) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let readings = read_export(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;

        log::info!(
            "Replaying {} readings from {}",
            readings.len(),
            path.display()
        );

        let samples = readings
            .iter()
            .map(|r| RawSample::new(r.x, r.y, r.z, r.timestamp_ms))
            .collect();

        Ok(Self {
            inner: BufferedSource::new(samples),
            delay,
            paced: true,
        })
    }

    /// Deliver samples as fast as they are requested
    pub fn unpaced(mut self) -> Self {
        self.paced = false;
        self
    }

    pub fn remaining(&self) -> usize {
        self.inner.samples.len()
    }
}

impl SensorSource for ReplaySource {
    fn next_sample(&mut self) -> anyhow::Result<Option<RawSample>> {
        if self.paced {
            let interval = self.delay.interval();
            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        self.inner.next_sample()
    }

    fn delay(&self) -> SensorDelay {
        self.delay
    }
}

/// Select a sample source
///
/// A replay file takes precedence over the simulator. Without either there
/// is no accelerometer to read from and `SensorUnavailable` is returned.
pub fn open_source(
    input: Option<&Path>,
    simulate: bool,
    delay: SensorDelay,
) -> anyhow::Result<Box<dyn SensorSource>> {
    if let Some(path) = input {
        return Ok(Box::new(ReplaySource::open(path, delay)?));
    }

    if simulate {
        #[cfg(feature = "simulation")]
        {
            let config = crate::simulation::MotionConfig {
                delay,
                ..Default::default()
            };
            return Ok(Box::new(crate::simulation::SimulatedSource::new(config)?));
        }
        #[cfg(not(feature = "simulation"))]
        {
            return Err(VibroError::SensorUnavailable(
                "built without the simulation feature".into(),
            )
            .into());
        }
    }

    Err(VibroError::SensorUnavailable("no accelerometer source configured".into()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_source_drains_in_order() {
        let mut source = BufferedSource::new(vec![
            RawSample::new(1.0, 0.0, 0.0, 1),
            RawSample::new(2.0, 0.0, 0.0, 2),
        ]);
        assert_eq!(source.next_sample().unwrap().unwrap().timestamp, 1);
        assert_eq!(source.next_sample().unwrap().unwrap().timestamp, 2);
        assert!(source.next_sample().unwrap().is_none());
    }

    #[test]
    fn test_no_source_is_unavailable() {
        let err = open_source(None, false, SensorDelay::Ui).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<VibroError>(),
            Some(VibroError::SensorUnavailable(_))
        ));
    }
}
