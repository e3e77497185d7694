//! Session CSV layout.
//!
//! ```text
//! Timestamp,X,Y,Z,Magnitude
//! 1000,1.0,2.0,3.0,3.7416575
//! ```
//!
//! Timestamps are epoch milliseconds. Floats always use `.` as the decimal
//! separator and are written in their shortest round-trip form.

use std::io::{BufRead, Write};

use crate::constants::CSV_HEADER;
use crate::error::{Result, VibroError};
use crate::sample::RecordedReading;

/// Format a float without exponent, always with a fractional part
pub fn format_float(value: f32) -> String {
    let mut s = format!("{}", value);
    if value.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// One CSV row, without line terminator
pub fn format_row(reading: &RecordedReading) -> String {
    format!(
        "{},{},{},{},{}",
        reading.timestamp_ms,
        format_float(reading.x),
        format_float(reading.y),
        format_float(reading.z),
        format_float(reading.magnitude)
    )
}

/// Write the header and one row per reading, in iteration order
pub fn write_readings<'a, W, I>(out: &mut W, readings: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a RecordedReading>,
{
    writeln!(out, "{}", CSV_HEADER)?;
    for reading in readings {
        writeln!(out, "{}", format_row(reading))?;
    }
    Ok(())
}

/// Parse an exported session back into readings
///
/// The header must match exactly; blank lines are skipped.
pub fn read_readings<R: BufRead>(reader: R) -> Result<Vec<RecordedReading>> {
    let mut lines = reader.lines();

    match lines.next() {
        Some(header) => {
            let header = header?;
            if header.trim_end() != CSV_HEADER {
                return Err(VibroError::InvalidRecord {
                    line: 1,
                    reason: format!("unexpected header: {}", header.trim_end()),
                });
            }
        }
        None => {
            return Err(VibroError::InvalidRecord {
                line: 1,
                reason: "missing header".into(),
            });
        }
    }

    let mut readings = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        let line_no = index + 2;
        if line.trim().is_empty() {
            continue;
        }
        readings.push(parse_row(&line, line_no)?);
    }
    Ok(readings)
}

fn parse_row(line: &str, line_no: usize) -> Result<RecordedReading> {
    let fields: Vec<&str> = line.trim_end().split(',').collect();
    if fields.len() != 5 {
        return Err(VibroError::InvalidRecord {
            line: line_no,
            reason: format!("expected 5 fields, got {}", fields.len()),
        });
    }

    let invalid = |name: &str, value: &str| VibroError::InvalidRecord {
        line: line_no,
        reason: format!("invalid {}: {}", name, value),
    };

    let timestamp_ms: i64 = fields[0]
        .trim()
        .parse()
        .map_err(|_| invalid("timestamp", fields[0]))?;
    let float = |i: usize, name: &str| -> Result<f32> {
        fields[i].trim().parse().map_err(|_| invalid(name, fields[i]))
    };

    Ok(RecordedReading {
        timestamp_ms,
        x: float(1, "x")?,
        y: float(2, "y")?,
        z: float(3, "z")?,
        magnitude: float(4, "magnitude")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(0.0000001), "0.0000001");
        assert_eq!(format_float(12345678.0), "12345678.0");
    }

    #[test]
    fn test_format_row() {
        let reading = RecordedReading {
            timestamp_ms: 1000,
            x: 1.0,
            y: 2.0,
            z: 3.0,
            magnitude: 3.75,
        };
        assert_eq!(format_row(&reading), "1000,1.0,2.0,3.0,3.75");
    }

    #[test]
    fn test_read_rejects_bad_header() {
        let err = read_readings(Cursor::new("time,x,y,z\n1,2,3,4\n")).unwrap_err();
        assert!(matches!(err, VibroError::InvalidRecord { line: 1, .. }));
    }

    #[test]
    fn test_read_reports_line_number() {
        let input = "Timestamp,X,Y,Z,Magnitude\n1000,1.0,2.0,3.0,3.7\n2000,abc,5.0,6.0,8.7\n";
        let err = read_readings(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, VibroError::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let input = "Timestamp,X,Y,Z,Magnitude\n\n1000,1.0,2.0,3.0,3.7\n";
        let readings = read_readings(Cursor::new(input)).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].timestamp_ms, 1000);
    }
}
