use chrono::{Local, NaiveDate};
use serde::Serialize;

pub const DEFAULT_TITLE: &str = "TMC Event";
pub const DEFAULT_TIME: &str = "2000";
pub const DEFAULT_LOCATION: &str = "Kelley School of Business, Indiana University";

/// One event as described by the attributes of an "add to calendar" button.
///
/// Fields hold the raw attribute values; the accessors apply the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl EventRecord {
    #[must_use]
    pub fn title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(DEFAULT_TITLE)
    }

    #[must_use]
    pub fn time(&self) -> &str {
        non_empty(self.time.as_deref()).unwrap_or(DEFAULT_TIME)
    }

    #[must_use]
    pub fn location(&self) -> &str {
        non_empty(self.location.as_deref()).unwrap_or(DEFAULT_LOCATION)
    }

    /// The raw date if it is a well-formed `YYYYMMDD` key.
    #[must_use]
    pub fn date_key(&self) -> Option<&str> {
        self.date.as_deref().filter(|date| is_date_key(date))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[must_use]
pub fn is_date_key(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}

#[must_use]
pub fn today_key(today: NaiveDate) -> String {
    today.format("%Y%m%d").to_string()
}

/// Today's key from the local clock. Evaluate once per page and pass it on.
#[must_use]
pub fn local_today_key() -> String {
    today_key(Local::now().date_naive())
}

/// Coarse "Spring 2025" style label for a `YYYYMMDD` key.
#[must_use]
pub fn season_label(date_key: &str) -> String {
    let year = date_key.get(0..4).unwrap_or_default();
    let month = date_key
        .get(4..6)
        .and_then(|month| month.parse::<u32>().ok())
        .unwrap_or_default();

    let season = match month {
        1..=5 => "Spring",
        8..=12 => "Fall",
        _ => "Summer",
    };

    format!("{season} {year}")
}
