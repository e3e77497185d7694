use std::collections::VecDeque;

use crate::constants::RECORDER_CAPACITY;
use crate::error::Result;
use crate::export::export_readings;
use crate::sample::RecordedReading;

/// Capacity-capped log of processed readings
///
/// Survives session stop/start; only [`SessionRecorder::clear`] drains it.
/// When full, the oldest reading is evicted before the newest is appended.
#[derive(Debug, Clone)]
pub struct SessionRecorder {
    readings: VecDeque<RecordedReading>,
    capacity: usize,
    evicted: u64,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self::with_capacity(RECORDER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            evicted: 0,
        }
    }

    pub fn record(&mut self, reading: RecordedReading) {
        if self.readings.len() == self.capacity {
            self.readings.pop_front();
            self.evicted += 1;
            if self.evicted == 1 {
                log::info!(
                    "Recorder reached {} readings, evicting oldest",
                    self.capacity
                );
            }
        }
        self.readings.push_back(reading);
    }

    /// Serialize all held readings as CSV, header first
    ///
    /// Returns [`crate::VibroError::NothingToExport`] when no readings are
    /// held. Serializes in place; callers sharing the recorder behind a lock
    /// can take a [`SessionRecorder::snapshot`] and use
    /// [`export_readings`] outside it instead.
    pub fn export(&self) -> Result<Vec<u8>> {
        export_readings(&self.readings)
    }

    /// Private copy of the readings, oldest to newest
    pub fn snapshot(&self) -> Vec<RecordedReading> {
        self.readings.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.readings.clear();
        self.evicted = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordedReading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Readings dropped by eviction since the last clear
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

impl Default for SessionRecorder {
    fn default() -> Self {
        Self::new()
    }
}
