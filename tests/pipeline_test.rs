mod test_samples;

use approx::assert_relative_eq;
use vibrolab::buffer::SessionRecorder;
use vibrolab::config::{CoordinateMode, PipelineConfig};
use vibrolab::constants::{CHART_WINDOW_CAPACITY, CSV_HEADER, RECORDER_CAPACITY};
use vibrolab::export::csv::read_readings;
use vibrolab::{RawSample, RecordedReading, SignalPipeline, Vector3};

fn pipeline() -> SignalPipeline {
    SignalPipeline::new(&PipelineConfig::default())
}

#[test]
fn test_steady_samples_pass_through_uncalibrated() {
    let mut pipeline = pipeline();
    pipeline.begin_session();

    let mut last = None;
    for raw in test_samples::constant_samples((1.0, 0.0, 0.0), 3, 1_000, 20) {
        last = Some(pipeline.process_sample(&raw));
    }
    let last = last.unwrap();

    assert_eq!(last.filtered, Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(last.calibrated, Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(last.magnitude, 1.0);
    assert_relative_eq!(last.max_magnitude, 1.0);
    assert_relative_eq!(last.display.time, 0.04);
    assert_eq!(pipeline.recorder().len(), 3);
    assert_eq!(pipeline.charts().len(), 3);
}

#[test]
fn test_export_has_header_and_one_row_per_reading() {
    let mut pipeline = pipeline();
    for raw in test_samples::constant_samples((1.0, 0.0, 0.0), 3, 1_000, 20) {
        pipeline.process_sample(&raw);
    }

    let bytes = pipeline.recorder().export().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines[1], "1000,1.0,0.0,0.0,1.0");
    assert_eq!(lines[3], "1040,1.0,0.0,0.0,1.0");

    let parsed = read_readings(text.as_bytes()).unwrap();
    assert_eq!(parsed, pipeline.recorder().snapshot());
}

#[test]
fn test_export_writes_every_reading_exactly() {
    let mut recorder = SessionRecorder::new();
    recorder.record(RecordedReading::new(1000, Vector3::new(1.0, 2.0, 3.0)));
    recorder.record(RecordedReading::new(2000, Vector3::new(4.0, 5.0, 6.0)));
    recorder.record(RecordedReading::new(3000, Vector3::ZERO));

    let text = String::from_utf8(recorder.export().unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Timestamp,X,Y,Z,Magnitude",
            "1000,1.0,2.0,3.0,3.7416575",
            "2000,4.0,5.0,6.0,8.774964",
            "3000,0.0,0.0,0.0,0.0",
        ]
    );
    assert!(text.ends_with('\n'));
}

#[test]
fn test_calibration_zeroes_steady_signal_and_resets_peak() {
    let mut pipeline = pipeline();
    pipeline.process_sample(&RawSample::new(3.0, 4.0, 0.0, 0));
    assert_relative_eq!(pipeline.current_max(), 5.0);

    let offset = pipeline.calibrate().unwrap();
    assert_eq!(offset, Vector3::new(3.0, 4.0, 0.0));
    assert_eq!(pipeline.current_max(), 0.0);

    let processed = pipeline.process_sample(&RawSample::new(3.0, 4.0, 0.0, 10));
    assert_relative_eq!(processed.calibrated.magnitude(), 0.0, epsilon = 1e-5);
    assert_relative_eq!(processed.max_magnitude, 0.0, epsilon = 1e-5);
    assert_relative_eq!(processed.reading.magnitude, 0.0, epsilon = 1e-5);
}

#[test]
fn test_calibrate_before_any_sample_keeps_baseline() {
    let mut pipeline = pipeline();
    assert!(pipeline.calibrate().is_none());
    assert_eq!(pipeline.calibration_offset(), Vector3::ZERO);
}

#[test]
fn test_polar_display_of_planar_vector() {
    let mut pipeline = pipeline();
    pipeline.set_mode(CoordinateMode::Polar);

    let processed = pipeline.process_sample(&RawSample::new(0.0, 2.0, 1.0, 0));
    assert_eq!(processed.mode, CoordinateMode::Polar);
    assert_relative_eq!(processed.display.v1, 2.0);
    assert_relative_eq!(processed.display.v2, 90.0, epsilon = 1e-4);
    assert_relative_eq!(processed.display.v3, 1.0);
    // Recorded values stay Cartesian
    assert_eq!(processed.reading.x, 0.0);
    assert_eq!(processed.reading.y, 2.0);
}

#[test]
fn test_mode_switch_applies_from_next_sample() {
    let mut pipeline = pipeline();
    let first = pipeline.process_sample(&RawSample::new(1.0, 1.0, 0.0, 0));
    pipeline.set_mode(CoordinateMode::Polar);
    let second = pipeline.process_sample(&RawSample::new(1.0, 1.0, 0.0, 10));

    assert_eq!(first.mode, CoordinateMode::Cartesian);
    assert_relative_eq!(first.display.v2, 1.0);
    assert_eq!(second.mode, CoordinateMode::Polar);
    assert_relative_eq!(second.display.v2, 45.0, epsilon = 1e-4);
}

#[test]
fn test_buffers_stay_bounded() {
    let mut pipeline = pipeline();
    let samples = test_samples::ramp_samples(RECORDER_CAPACITY + 50, 0.001, 0);
    for raw in &samples {
        pipeline.process_sample(raw);
    }

    assert_eq!(pipeline.charts().len(), CHART_WINDOW_CAPACITY);
    assert_eq!(pipeline.recorder().len(), RECORDER_CAPACITY);
    assert_eq!(pipeline.recorder().evicted(), 50);

    let oldest = pipeline.recorder().iter().next().unwrap();
    assert_eq!(oldest.timestamp_ms, samples[50].timestamp);
}

#[test]
fn test_new_session_resets_charts_but_keeps_recording() {
    let mut pipeline = pipeline();
    pipeline.process_sample(&RawSample::new(2.0, 0.0, 0.0, 0));
    pipeline.calibrate();
    pipeline.process_sample(&RawSample::new(3.0, 0.0, 0.0, 10));

    pipeline.begin_session();
    assert!(pipeline.charts().is_empty());
    assert_eq!(pipeline.current_max(), 0.0);
    assert_eq!(pipeline.recorder().len(), 2);
    assert_eq!(pipeline.calibration_offset(), Vector3::new(2.0, 0.0, 0.0));

    // Filter restarts from the first sample of the new session
    let processed = pipeline.process_sample(&RawSample::new(5.0, 0.0, 0.0, 5_000));
    assert_eq!(processed.filtered, Vector3::new(5.0, 0.0, 0.0));
    assert_eq!(processed.calibrated, Vector3::new(3.0, 0.0, 0.0));
    assert_eq!(processed.display.time, 0.0);
}

#[test]
fn test_clear_recorder_empties_export() {
    let mut pipeline = pipeline();
    pipeline.process_sample(&RawSample::new(1.0, 0.0, 0.0, 0));
    pipeline.clear_recorder();

    assert!(pipeline.recorder().is_empty());
    assert!(pipeline.recorder().export().unwrap_err().is_nothing_to_export());
}
