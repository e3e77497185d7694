use super::Formatter;
use crate::session::DisplayEvent;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, event: &DisplayEvent) -> String {
        let [l1, l2, l3] = event.mode.axis_labels();
        let d = &event.display;
        if self.verbose {
            format!(
                "{}: {:>7.2}  {}: {:>7.2}  {}: {:>7.2}  |a|: {:>6.3}  max: {:>6.3}  [t={:.2}s, {}]",
                l1, d.v1, l2, d.v2, l3, d.v3, event.magnitude, event.current_max, d.time, event.mode
            )
        } else {
            format!(
                "{}: {:>6.1}  {}: {:>6.1}  {}: {:>6.1}  max: {:.3}",
                l1, d.v1, l2, d.v2, l3, d.v3, event.current_max
            )
        }
    }
}
