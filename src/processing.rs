use crate::buffer::{AxisCharts, SessionRecorder};
use crate::config::{CoordinateMode, PipelineConfig};
use crate::sample::{DisplaySample, RawSample, RecordedReading, Vector3};
use crate::signal_processing::{Calibrator, ExponentialFilter, Filter, PeakTracker, to_display};

/// Everything produced by one pass through the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessedSample {
    pub filtered: Vector3,
    pub calibrated: Vector3,
    pub display: DisplaySample,
    pub mode: CoordinateMode,
    pub magnitude: f32,
    pub max_magnitude: f32,
    pub reading: RecordedReading,
}

/// Single-owner sensor pipeline
///
/// Each raw sample runs filter → calibrator → display transform → peak
/// tracker → chart windows → recorder before the next one is accepted.
/// Filter, peak and charts are per sensing session; calibration and the
/// recorder outlive sessions.
pub struct SignalPipeline {
    filter: ExponentialFilter,
    calibrator: Calibrator,
    peak: PeakTracker,
    charts: AxisCharts,
    recorder: SessionRecorder,
    mode: CoordinateMode,
    session_origin_ms: Option<i64>,
}

impl SignalPipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            filter: ExponentialFilter::new(config.filter.alpha),
            calibrator: Calibrator::new(),
            peak: PeakTracker::new(),
            charts: AxisCharts::new(config.chart.capacity),
            recorder: SessionRecorder::with_capacity(config.recorder.capacity),
            mode: CoordinateMode::default(),
            session_origin_ms: None,
        }
    }

    pub fn process_sample(&mut self, raw: &RawSample) -> ProcessedSample {
        let filtered = self.filter.apply(raw.vector());
        let calibrated = self.calibrator.apply(filtered);
        let values = to_display(self.mode, calibrated);

        let origin = *self.session_origin_ms.get_or_insert(raw.timestamp);
        let time = raw.timestamp.saturating_sub(origin) as f32 / 1000.0;

        let magnitude = calibrated.magnitude();
        let max_magnitude = self.peak.observe(magnitude);

        self.charts.push(time, values);

        let reading = RecordedReading::new(raw.timestamp, calibrated);
        self.recorder.record(reading);

        log::trace!(
            "sample t={:.3}s filtered=({:.3}, {:.3}, {:.3}) |a|={:.3}",
            time,
            filtered.x,
            filtered.y,
            filtered.z,
            magnitude
        );

        ProcessedSample {
            filtered,
            calibrated,
            display: DisplaySample {
                v1: values.v1,
                v2: values.v2,
                v3: values.v3,
                time,
            },
            mode: self.mode,
            magnitude,
            max_magnitude,
            reading,
        }
    }

    /// Reset per-session state before a new sensing session
    ///
    /// Calibration and recorded readings are kept.
    pub fn begin_session(&mut self) {
        self.filter.reset();
        self.peak.reset();
        self.charts.clear();
        self.session_origin_ms = None;
    }

    /// Use the latest filtered estimate as the zero baseline and reset the peak
    ///
    /// Returns the captured offset, or `None` when no sample has been
    /// filtered yet, in which case the previous baseline is kept.
    pub fn calibrate(&mut self) -> Option<Vector3> {
        self.peak.reset();
        let last = self.filter.last()?;
        self.calibrator.calibrate(last);
        Some(last)
    }

    pub fn reset_calibration(&mut self) {
        self.calibrator.reset();
    }

    pub fn set_mode(&mut self, mode: CoordinateMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    pub fn calibration_offset(&self) -> Vector3 {
        self.calibrator.offset()
    }

    pub fn current_max(&self) -> f32 {
        self.peak.current()
    }

    pub fn charts(&self) -> &AxisCharts {
        &self.charts
    }

    pub fn recorder(&self) -> &SessionRecorder {
        &self.recorder
    }

    pub fn clear_recorder(&mut self) {
        self.recorder.clear();
    }
}
