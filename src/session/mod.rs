//! Session coordinator.
//!
//! [`SensorSession`] owns the pipeline behind a single mutex and drives it
//! from one ingestion thread per sensing session. Control operations from
//! the UI (calibration, mode changes, export) take the same lock, so they
//! land between two samples and are never observed half-applied.

mod events;
mod registry;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};

pub use events::{DisplayEvent, SessionEvent, StopReason};
pub use registry::ModeRegistry;

use events::EventBus;

use crate::buffer::ChartPoint;
use crate::config::{CoordinateMode, PipelineConfig};
use crate::error::{Result, VibroError};
use crate::export::{SessionSummary, export_readings, write_export};
use crate::processing::{ProcessedSample, SignalPipeline};
use crate::sample::{RawSample, Vector3};
use crate::sensor::SensorSource;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Worker {
    handle: thread::JoinHandle<()>,
    stop_requested: Arc<AtomicBool>,
    /// Disconnects when the worker returns
    finished: Receiver<()>,
}

enum Ingestion {
    Idle,
    /// Samples are pushed by the caller through [`SensorSession::ingest`]
    Push { samples: u64 },
    /// Samples are pulled from a source on a worker thread
    Streaming(Worker),
}

pub struct SensorSession {
    config: PipelineConfig,
    pipeline: Arc<Mutex<SignalPipeline>>,
    modes: Mutex<ModeRegistry>,
    events: EventBus,
    ingestion: Mutex<Ingestion>,
    auto_calibrate_after: Mutex<Option<u64>>,
}

impl SensorSession {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let pipeline = SignalPipeline::new(&config);
        Ok(Self {
            config,
            pipeline: Arc::new(Mutex::new(pipeline)),
            modes: Mutex::new(ModeRegistry::default()),
            events: EventBus::default(),
            ingestion: Mutex::new(Ingestion::Idle),
            auto_calibrate_after: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Calibrate automatically once this many samples of a session have
    /// been processed
    pub fn set_auto_calibration(&self, after_samples: Option<u64>) {
        *lock(&self.auto_calibrate_after) = after_samples.filter(|&n| n > 0);
    }

    /// Start a session pulling samples from `source` on a worker thread
    ///
    /// Filter, peak and chart windows start clean; calibration and the
    /// recorder carry over from earlier sessions.
    pub fn start_session(&self, source: Box<dyn SensorSource>) -> Result<()> {
        let mut ingestion = lock(&self.ingestion);
        ensure_idle(&mut ingestion)?;

        lock(&self.pipeline).begin_session();

        let stop_requested = Arc::new(AtomicBool::new(false));
        let (finished_tx, finished) = bounded(0);
        let context = WorkerContext {
            pipeline: Arc::clone(&self.pipeline),
            events: self.events.clone(),
            stop_requested: Arc::clone(&stop_requested),
            auto_calibrate_after: *lock(&self.auto_calibrate_after),
            _finished: finished_tx,
        };

        log::info!("Starting sensor session (delay {})", source.delay());
        self.events.emit(SessionEvent::Started);

        let handle = thread::Builder::new()
            .name("vibrolab-ingest".into())
            .spawn(move || context.run(source))?;

        *ingestion = Ingestion::Streaming(Worker {
            handle,
            stop_requested,
            finished,
        });
        Ok(())
    }

    /// Start a session fed by [`SensorSession::ingest`] calls
    pub fn start_push_session(&self) -> Result<()> {
        let mut ingestion = lock(&self.ingestion);
        ensure_idle(&mut ingestion)?;

        lock(&self.pipeline).begin_session();
        log::info!("Starting sensor session (push)");
        self.events.emit(SessionEvent::Started);

        *ingestion = Ingestion::Push { samples: 0 };
        Ok(())
    }

    /// Process one sample delivered by a sensor callback
    pub fn ingest(&self, raw: &RawSample) -> Result<ProcessedSample> {
        let auto_calibrate_after = *lock(&self.auto_calibrate_after);
        let mut ingestion = lock(&self.ingestion);
        let Ingestion::Push { samples } = &mut *ingestion else {
            return Err(VibroError::SessionState(
                "ingest requires an active push session".into(),
            ));
        };

        *samples += 1;
        let (processed, calibrated) =
            process_one(&self.pipeline, raw, *samples, auto_calibrate_after);
        drop(ingestion);

        if let Some(offset) = calibrated {
            self.events.emit(SessionEvent::Calibrated(offset));
        }
        self.events
            .emit(SessionEvent::Sample(DisplayEvent::from(&processed)));
        Ok(processed)
    }

    /// Stop admitting samples and wait for the worker to finish
    ///
    /// Stopping an idle session is a no-op.
    pub fn stop_session(&self) -> Result<()> {
        let previous = std::mem::replace(&mut *lock(&self.ingestion), Ingestion::Idle);
        match previous {
            Ingestion::Idle => {
                log::debug!("Stop requested with no active session");
            }
            Ingestion::Push { samples } => {
                log::info!("Sensor session stopped after {} samples", samples);
                self.events.emit(SessionEvent::Stopped {
                    samples,
                    reason: StopReason::Requested,
                });
            }
            Ingestion::Streaming(worker) => {
                worker.stop_requested.store(true, Ordering::Relaxed);
                join_worker(worker)?;
            }
        }
        Ok(())
    }

    /// Block until the streaming worker returns, then reap it
    ///
    /// The session stays active while waiting, so a concurrent
    /// [`SensorSession::stop_session`] still reaches the worker and a new
    /// session cannot start underneath it. Push sessions and idle sessions
    /// return immediately.
    pub fn wait(&self) -> Result<()> {
        let (finished, worker_id) = match &*lock(&self.ingestion) {
            Ingestion::Streaming(worker) => {
                (worker.finished.clone(), worker.handle.thread().id())
            }
            _ => return Ok(()),
        };

        // Never receives a value; returns once the worker drops its sender
        let _ = finished.recv();

        let mut ingestion = lock(&self.ingestion);
        let same_worker = matches!(
            &*ingestion,
            Ingestion::Streaming(worker) if worker.handle.thread().id() == worker_id
        );
        if same_worker
            && let Ingestion::Streaming(worker) =
                std::mem::replace(&mut *ingestion, Ingestion::Idle)
        {
            join_worker(worker)?;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        match &*lock(&self.ingestion) {
            Ingestion::Idle => false,
            Ingestion::Push { .. } => true,
            Ingestion::Streaming(worker) => !worker.handle.is_finished(),
        }
    }

    /// Use the latest filtered sample as the zero baseline
    ///
    /// Also resets the peak magnitude. Returns `None` if nothing has been
    /// filtered yet.
    pub fn calibrate(&self) -> Option<Vector3> {
        let offset = lock(&self.pipeline).calibrate();
        match offset {
            Some(o) => {
                log::info!("Calibrated at ({:.3}, {:.3}, {:.3})", o.x, o.y, o.z);
                self.events.emit(SessionEvent::Calibrated(o));
            }
            None => log::warn!("Calibration requested before any sample; baseline unchanged"),
        }
        offset
    }

    pub fn reset_calibration(&self) {
        lock(&self.pipeline).reset_calibration();
        log::info!("Calibration reset");
    }

    /// Switch the display coordinate system from the next sample on
    pub fn set_coordinate_mode(&self, mode: CoordinateMode) {
        let mut pipeline = lock(&self.pipeline);
        pipeline.set_mode(mode);
        let notified = lock(&self.modes).publish(mode);
        drop(pipeline);
        log::info!("Coordinate mode set to {} ({} listeners)", mode, notified);
    }

    pub fn coordinate_mode(&self) -> CoordinateMode {
        lock(&self.modes).current()
    }

    pub fn subscribe_mode(&self) -> Receiver<CoordinateMode> {
        lock(&self.modes).subscribe()
    }

    pub fn subscribe_events(&self) -> Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Serialize the recorded readings without touching the recorder
    ///
    /// Only the snapshot is taken under the pipeline lock; ingestion is not
    /// held up while the CSV is written.
    pub fn export_bytes(&self) -> Result<Vec<u8>> {
        let snapshot = lock(&self.pipeline).recorder().snapshot();
        export_readings(&snapshot)
    }

    /// Write the recorded readings to a new file in the export directory
    pub fn export_session(&self) -> Result<PathBuf> {
        let bytes = self.export_bytes()?;
        let now_ms = chrono::Utc::now().timestamp_millis();
        write_export(&self.config.recorder.export_dir, now_ms, &bytes)
    }

    /// Drop all recorded readings
    pub fn clear_session(&self) {
        lock(&self.pipeline).clear_recorder();
        log::info!("Recorded readings cleared");
    }

    pub fn chart_snapshot(&self) -> [Vec<ChartPoint>; 3] {
        lock(&self.pipeline).charts().snapshot()
    }

    pub fn current_max(&self) -> f32 {
        lock(&self.pipeline).current_max()
    }

    pub fn recorded_count(&self) -> usize {
        lock(&self.pipeline).recorder().len()
    }

    pub fn calibration_offset(&self) -> Vector3 {
        lock(&self.pipeline).calibration_offset()
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        let snapshot = lock(&self.pipeline).recorder().snapshot();
        SessionSummary::from_readings(&snapshot)
    }
}

impl Drop for SensorSession {
    fn drop(&mut self) {
        if let Err(e) = self.stop_session() {
            log::warn!("Failed to stop session on drop: {}", e);
        }
    }
}

/// Fail if a session is running; reap a worker whose source has ended
fn ensure_idle(ingestion: &mut Ingestion) -> Result<()> {
    let finished = match ingestion {
        Ingestion::Idle => return Ok(()),
        Ingestion::Push { .. } => false,
        Ingestion::Streaming(worker) => worker.handle.is_finished(),
    };
    if !finished {
        return Err(VibroError::SessionState(
            "a session is already active".into(),
        ));
    }
    if let Ingestion::Streaming(worker) = std::mem::replace(ingestion, Ingestion::Idle) {
        join_worker(worker)?;
    }
    Ok(())
}

fn join_worker(worker: Worker) -> Result<()> {
    worker
        .handle
        .join()
        .map_err(|_| VibroError::SessionState("ingestion thread panicked".into()))
}

/// Run one sample through the pipeline, calibrating when the configured
/// sample count is reached
fn process_one(
    pipeline: &Mutex<SignalPipeline>,
    raw: &RawSample,
    count: u64,
    auto_calibrate_after: Option<u64>,
) -> (ProcessedSample, Option<Vector3>) {
    let mut pipeline = lock(pipeline);
    let processed = pipeline.process_sample(raw);
    let calibrated = if auto_calibrate_after == Some(count) {
        pipeline.calibrate()
    } else {
        None
    };
    (processed, calibrated)
}

struct WorkerContext {
    pipeline: Arc<Mutex<SignalPipeline>>,
    events: EventBus,
    stop_requested: Arc<AtomicBool>,
    auto_calibrate_after: Option<u64>,
    _finished: Sender<()>,
}

impl WorkerContext {
    fn run(self, mut source: Box<dyn SensorSource>) {
        let mut samples: u64 = 0;

        let reason = loop {
            if self.stop_requested.load(Ordering::Relaxed) {
                break StopReason::Requested;
            }

            let raw = match source.next_sample() {
                Ok(Some(raw)) => raw,
                Ok(None) => break StopReason::SourceExhausted,
                Err(e) => {
                    log::warn!("Sensor source error: {:#}", e);
                    self.events.emit(SessionEvent::SourceError(format!("{:#}", e)));
                    break StopReason::SourceError;
                }
            };

            // A sample that arrives after stop was requested is discarded
            if self.stop_requested.load(Ordering::Relaxed) {
                break StopReason::Requested;
            }

            samples += 1;
            let (processed, calibrated) =
                process_one(&self.pipeline, &raw, samples, self.auto_calibrate_after);

            if let Some(offset) = calibrated {
                log::info!(
                    "Auto-calibrated after {} samples at ({:.3}, {:.3}, {:.3})",
                    samples,
                    offset.x,
                    offset.y,
                    offset.z
                );
                self.events.emit(SessionEvent::Calibrated(offset));
            }
            self.events
                .emit(SessionEvent::Sample(DisplayEvent::from(&processed)));
        };

        log::info!("Sensor session stopped after {} samples ({:?})", samples, reason);
        self.events.emit(SessionEvent::Stopped { samples, reason });
    }
}
