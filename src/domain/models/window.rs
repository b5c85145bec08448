use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// A configured lead-time range before the event, in whole minutes.
/// Boundaries are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadWindow {
    pub label: String,
    pub min_minutes_before: i64,
    pub max_minutes_before: i64,
}

impl LeadWindow {
    pub fn new(label: &str, min_minutes_before: i64, max_minutes_before: i64) -> Self {
        Self {
            label: label.to_string(),
            min_minutes_before,
            max_minutes_before,
        }
    }

    pub fn contains(&self, minutes_to_event: i64) -> bool {
        (self.min_minutes_before..=self.max_minutes_before).contains(&minutes_to_event)
    }

    pub fn defaults() -> Vec<LeadWindow> {
        vec![
            LeadWindow::new("24-hour", 1410, 1470),
            LeadWindow::new("30-minute", 29, 31),
        ]
    }
}

/// Picks the window the current instant falls into, if any.
///
/// The distance to the event is truncated to whole minutes and may be
/// negative once the event has passed; a past event matches nothing. When
/// ranges overlap, the first window in declared order wins.
pub fn classify<'a>(
    now: DateTime<Utc>,
    event_time: DateTime<FixedOffset>,
    windows: &'a [LeadWindow],
) -> Option<&'a LeadWindow> {
    let minutes_to_event = event_time.signed_duration_since(now).num_minutes();
    windows.iter().find(|w| w.contains(minutes_to_event))
}
