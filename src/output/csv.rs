use super::{Formatter, iso8601_timestamp};
use crate::session::DisplayEvent;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, event: &DisplayEvent) -> String {
        format!(
            "{},{},{:.3},{:.4},{:.4},{:.4},{:.4},{:.4}",
            iso8601_timestamp(),
            event.mode,
            event.display.time,
            event.display.v1,
            event.display.v2,
            event.display.v3,
            event.magnitude,
            event.current_max
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,mode,time,v1,v2,v3,magnitude,max")
    }
}
