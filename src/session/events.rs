use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::Serialize;

use super::lock;
use crate::config::CoordinateMode;
use crate::processing::ProcessedSample;
use crate::sample::{DisplaySample, Vector3};

/// Per-sample readout for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayEvent {
    pub display: DisplaySample,
    pub mode: CoordinateMode,
    pub magnitude: f32,
    pub current_max: f32,
}

impl From<&ProcessedSample> for DisplayEvent {
    fn from(sample: &ProcessedSample) -> Self {
        Self {
            display: sample.display,
            mode: sample.mode,
            magnitude: sample.magnitude,
            current_max: sample.max_magnitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Requested,
    SourceExhausted,
    SourceError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started,
    Sample(DisplayEvent),
    Calibrated(Vector3),
    SourceError(String),
    Stopped { samples: u64, reason: StopReason },
}

/// Fan-out of session events to any number of listeners
#[derive(Clone, Default)]
pub(crate) struct EventBus {
    subscribers: Arc<Mutex<Vec<Sender<SessionEvent>>>>,
}

impl EventBus {
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = unbounded();
        lock(&self.subscribers).push(tx);
        rx
    }

    pub fn emit(&self, event: SessionEvent) {
        let mut subscribers = lock(&self.subscribers);
        if subscribers.is_empty() {
            return;
        }
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
