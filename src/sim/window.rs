/// Inclusive wall-clock window during which the battery may discharge.
///
/// Bounds are compared as plain strings, so they only behave as times when
/// both sides are zero-padded `HH:MM`. A window whose start sorts after its
/// end (one crossing midnight) matches nothing.
#[derive(Debug, Clone)]
pub struct StormWindow {
    start: String,
    end: String,
}

impl StormWindow {
    /// Creates a window from its bounds. The bounds are not validated.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns `true` when `time_of_day` falls inside the window.
    pub fn contains(&self, time_of_day: &str) -> bool {
        self.start.as_str() <= time_of_day && time_of_day <= self.end.as_str()
    }
}
