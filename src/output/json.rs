use serde::Serialize;

use super::{Formatter, iso8601_timestamp};
use crate::session::DisplayEvent;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonLine<'a> {
    ts: String,
    #[serde(flatten)]
    event: &'a DisplayEvent,
}

impl Formatter for JsonFormatter {
    fn format(&self, event: &DisplayEvent) -> String {
        let line = JsonLine {
            ts: iso8601_timestamp(),
            event,
        };
        serde_json::to_string(&line).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
