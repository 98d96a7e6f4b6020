use serde::Serialize;

use crate::EventRecord;

/// Snapshot of one `.event-card` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub record: EventRecord,
    /// Text of the card's visible heading, if it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub hidden: bool,
}

impl EventCard {
    /// Title shown for the card once it has moved to the past events.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.heading
            .as_deref()
            .or(self.record.title.as_deref())
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or("Past Event")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PastEvent {
    pub title: String,
    pub label: String,
    /// Whether the entry was derived from an expired card rather than curated.
    pub synthesized: bool,
}

/// Everything read from one page of the site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub events: Vec<EventCard>,
    pub past: Vec<PastEvent>,
    pub home: Vec<EventCard>,
}
