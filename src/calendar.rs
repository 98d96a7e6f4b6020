//! `.ics` export of event records.

use std::time::Duration;

use ics::{
    parameters::TzIDParam,
    properties::{Description, DtEnd, DtStart, Location, RRule, Summary, TzName},
    Daylight, ICalendar, Standard, TimeZone,
};
use log::debug;

use crate::record::{is_date_key, EventRecord};

pub const MIME_TYPE: &str = "text/calendar;charset=utf-8";
pub const BATCH_FILE_NAME: &str = "TMC_Events.ics";
pub const PRODUCT_ID: &str = "-//TMC//Events//EN";
pub const TIMEZONE: &str = "America/New_York";
pub const DESCRIPTION: &str = "Technology Management Club";

const EVENT_MINUTES: u32 = 60;
const DEFAULT_START: u32 = 20 * 60;

/// Start and end of an event on a fixed one hour slot.
///
/// The end keeps the start's date, so an event starting at 23:30 ends at
/// 00:30 of the same day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    date: String,
    start: u32,
}

impl TimeSlot {
    /// `date` may contain `-` separators, `time` may contain `:`.
    pub fn new(date: &str, time: &str) -> Option<Self> {
        let date = date.replace('-', "");
        if !is_date_key(&date) {
            return None;
        }

        let start = parse_minutes(time).unwrap_or(DEFAULT_START);

        Some(Self { date, start })
    }

    #[must_use]
    pub fn start(&self) -> String {
        self.format(self.start)
    }

    #[must_use]
    pub fn end(&self) -> String {
        self.format(self.start + EVENT_MINUTES)
    }

    fn format(&self, minutes: u32) -> String {
        format!("{}T{:02}{:02}00", self.date, (minutes / 60) % 24, minutes % 60)
    }
}

/// Minutes after midnight for `HHMM`, `HH:MM` or `HH`.
fn parse_minutes(time: &str) -> Option<u32> {
    let digits = time.replace(':', "");
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour = digits.get(0..2)?.parse::<u32>().ok()?;
    let rest = &digits[2..];
    let minute = match &rest[..rest.len().min(2)] {
        "" => 0,
        minute => minute.parse::<u32>().ok()?,
    };

    (hour < 24 && minute < 60).then_some(hour * 60 + minute)
}

/// The US Eastern timezone block shared by every export.
#[must_use]
pub fn eastern_timezone<'a>() -> TimeZone<'a> {
    let mut edt_daylight = Daylight::new("20070311T020000", "-0500", "-0400");
    edt_daylight.push(RRule::new("FREQ=YEARLY;BYDAY=2SU;BYMONTH=3"));
    edt_daylight.push(TzName::new("EDT"));

    let mut est_standard = Standard::new("20071104T020000", "-0400", "-0500");
    est_standard.push(RRule::new("FREQ=YEARLY;BYDAY=1SU;BYMONTH=11"));
    est_standard.push(TzName::new("EST"));

    let mut timezone = TimeZone::daylight(TIMEZONE, edt_daylight);
    timezone.add_standard(est_standard);

    timezone
}

#[must_use]
pub fn ics_base<'a>() -> ICalendar<'a> {
    let mut icalendar = ICalendar::new("2.0", PRODUCT_ID);
    icalendar.add_timezone(eastern_timezone());
    icalendar
}

impl EventRecord {
    /// The record as a `VEVENT`, or `None` while its date is undetermined.
    #[must_use]
    pub fn to_ics(&self) -> Option<ics::Event<'_>> {
        let slot = TimeSlot::new(self.date.as_deref()?, self.time())?;

        let start = slot.start();
        let id = format!("{}_{}", start, self.title().replace(' ', "-"));

        let mut dtstart = DtStart::new(start.clone());
        dtstart.add(TzIDParam::new(TIMEZONE));

        let mut dtend = DtEnd::new(slot.end());
        dtend.add(TzIDParam::new(TIMEZONE));

        let mut ics_event = ics::Event::new(id, start);

        ics_event.push(dtstart);
        ics_event.push(dtend);
        ics_event.push(Summary::new(self.title()));
        ics_event.push(Location::new(self.location()));
        ics_event.push(Description::new(DESCRIPTION));

        Some(ics_event)
    }
}

/// A finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFile {
    pub file_name: String,
    pub content: String,
}

impl CalendarFile {
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.content.into_bytes()
    }
}

/// Short-lived message shown next to the button instead of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    DateTbd,
    NothingToDownload,
}

impl Notice {
    pub const DISMISS_AFTER: Duration = Duration::from_millis(2500);

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Notice::DateTbd => "Date TBD - check back soon!",
            Notice::NothingToDownload => "No events to download!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Export {
    Ready(CalendarFile),
    Notice(Notice),
}

#[must_use]
pub fn file_name_for(title: &str) -> String {
    let stem = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>();

    format!("{stem}.ics")
}

/// Calendar file for a single event.
#[must_use]
pub fn export_event(record: &EventRecord) -> Export {
    let Some(event) = record.to_ics() else {
        return Export::Notice(Notice::DateTbd);
    };

    let mut icalendar = ics_base();
    icalendar.add_event(event);

    Export::Ready(CalendarFile {
        file_name: file_name_for(record.title()),
        content: icalendar.to_string(),
    })
}

/// One calendar file holding every record with a well-formed date.
///
/// Returns `None` when no record qualifies.
#[must_use]
pub fn export_all<'a, I>(records: I) -> Option<CalendarFile>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut icalendar = ics_base();
    let mut count = 0usize;

    for record in records {
        if record.date_key().is_none() {
            continue;
        }

        if let Some(event) = record.to_ics() {
            icalendar.add_event(event);
            count += 1;
        }
    }

    debug!("exporting {count} events");

    (count > 0).then(|| CalendarFile {
        file_name: BATCH_FILE_NAME.to_string(),
        content: icalendar.to_string(),
    })
}

/// Like [`export_all`], with the notice to show when nothing qualifies.
#[must_use]
pub fn export_batch<'a, I>(records: I) -> Export
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    export_all(records).map_or(Export::Notice(Notice::NothingToDownload), Export::Ready)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: Option<&str>, time: Option<&str>) -> EventRecord {
        EventRecord {
            title: Some("Case Night".into()),
            date: date.map(Into::into),
            time: time.map(Into::into),
            ..Default::default()
        }
    }

    fn ready(export: Export) -> CalendarFile {
        match export {
            Export::Ready(file) => file,
            Export::Notice(notice) => panic!("expected a file, got {notice:?}"),
        }
    }

    fn markers(content: &str) -> Vec<&str> {
        content
            .lines()
            .filter(|line| line.starts_with("BEGIN:") || line.starts_with("END:"))
            .collect()
    }

    #[test]
    fn one_hour_slot() {
        let slot = TimeSlot::new("20250615", "1930").unwrap();
        assert_eq!(slot.start(), "20250615T193000");
        assert_eq!(slot.end(), "20250615T203000");
    }

    #[test]
    fn separators_are_stripped() {
        let slot = TimeSlot::new("2025-06-15", "09:05").unwrap();
        assert_eq!(slot.start(), "20250615T090500");
        assert_eq!(slot.end(), "20250615T100500");
    }

    #[test]
    fn hour_only_time() {
        let slot = TimeSlot::new("20250615", "18").unwrap();
        assert_eq!(slot.start(), "20250615T180000");
        assert_eq!(slot.end(), "20250615T190000");
    }

    #[test]
    fn unusable_time_falls_back_to_eight_pm() {
        for time in ["", "noon", "2575", "7"] {
            let slot = TimeSlot::new("20250615", time).unwrap();
            assert_eq!(slot.start(), "20250615T200000", "time {time:?}");
        }
    }

    #[test]
    fn late_events_wrap_without_changing_the_date() {
        let slot = TimeSlot::new("20250615", "2330").unwrap();
        assert_eq!(slot.end(), "20250615T003000");
    }

    #[test]
    fn malformed_dates_have_no_slot() {
        assert_eq!(TimeSlot::new("2025061", "2000"), None);
        assert_eq!(TimeSlot::new("202506150", "2000"), None);
        assert_eq!(TimeSlot::new("June 15", "2000"), None);
    }

    #[test]
    fn single_event_payload() {
        let file = ready(export_event(&record(Some("20250615"), Some("1930"))));
        let content = &file.content;

        assert_eq!(file.file_name, "Case_Night.ics");
        assert_eq!(file.mime_type(), "text/calendar;charset=utf-8");

        assert!(content.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(content.contains("\r\nVERSION:2.0\r\n"));
        assert!(content.contains("\r\nPRODID:-//TMC//Events//EN\r\n"));
        assert!(content.contains("\r\nTZID:America/New_York\r\n"));
        assert!(content.contains("\r\nDTSTART;TZID=America/New_York:20250615T193000\r\n"));
        assert!(content.contains("\r\nDTEND;TZID=America/New_York:20250615T203000\r\n"));
        assert!(content.contains("\r\nSUMMARY:Case Night\r\n"));
        assert!(content.contains(
            "\r\nLOCATION:Kelley School of Business, Indiana University\r\n"
        ));
        assert!(content.contains("\r\nDESCRIPTION:Technology Management Club\r\n"));
        assert!(content.trim_end().ends_with("END:VCALENDAR"));

        assert_eq!(
            markers(content),
            [
                "BEGIN:VCALENDAR",
                "BEGIN:VTIMEZONE",
                "BEGIN:DAYLIGHT",
                "END:DAYLIGHT",
                "BEGIN:STANDARD",
                "END:STANDARD",
                "END:VTIMEZONE",
                "BEGIN:VEVENT",
                "END:VEVENT",
                "END:VCALENDAR",
            ]
        );
    }

    #[test]
    fn timezone_rules() {
        let content = ready(export_event(&record(Some("20250615"), None))).content;

        for line in [
            "DTSTART:20070311T020000",
            "RRULE:FREQ=YEARLY;BYDAY=2SU;BYMONTH=3",
            "TZNAME:EDT",
            "DTSTART:20071104T020000",
            "RRULE:FREQ=YEARLY;BYDAY=1SU;BYMONTH=11",
            "TZNAME:EST",
            "TZOFFSETFROM:-0500",
            "TZOFFSETTO:-0400",
            "TZOFFSETFROM:-0400",
            "TZOFFSETTO:-0500",
        ] {
            assert!(content.lines().any(|l| l == line), "missing {line}");
        }
    }

    #[test]
    fn missing_time_defaults_to_eight_pm() {
        let content = ready(export_event(&record(Some("20250615"), None))).content;

        assert!(content.contains("DTSTART;TZID=America/New_York:20250615T200000"));
        assert!(content.contains("DTEND;TZID=America/New_York:20250615T210000"));
    }

    #[test]
    fn free_text_is_not_escaped() {
        let mut event = record(Some("20250615"), None);
        event.location = Some("Hodge Hall; Room 2, Bloomington".into());

        let content = ready(export_event(&event)).content;

        assert!(content.contains("\r\nLOCATION:Hodge Hall; Room 2, Bloomington\r\n"));
    }

    #[test]
    fn file_name_replaces_punctuation() {
        assert_eq!(file_name_for("Fall Kickoff: 2025!"), "Fall_Kickoff__2025_.ics");
        assert_eq!(file_name_for(""), ".ics");
    }

    #[test]
    fn undated_single_export_is_a_notice() {
        assert_eq!(
            export_event(&record(None, Some("1930"))),
            Export::Notice(Notice::DateTbd)
        );
        assert_eq!(Notice::DateTbd.message(), "Date TBD - check back soon!");
    }

    #[test]
    fn batch_holds_one_timezone_and_every_dated_event() {
        let records = [
            record(Some("20250615"), Some("1930")),
            record(None, None),
            record(Some("20251101"), None),
        ];

        let file = export_all(&records).unwrap();
        let content = &file.content;

        assert_eq!(file.file_name, "TMC_Events.ics");
        assert_eq!(content.matches("BEGIN:VTIMEZONE").count(), 1);
        assert_eq!(content.matches("BEGIN:VEVENT").count(), 2);
        assert!(content.find("END:VTIMEZONE") < content.find("BEGIN:VEVENT"));
        assert!(content.contains("DTSTART;TZID=America/New_York:20251101T200000"));
    }

    #[test]
    fn batch_skips_malformed_dates() {
        let records = [
            record(Some("2025061"), None),
            record(Some("202506150"), None),
            record(Some("2025-06-15"), None),
            record(None, None),
        ];

        assert_eq!(export_all(&records), None);
        assert_eq!(
            export_batch(&records),
            Export::Notice(Notice::NothingToDownload)
        );
    }

    #[test]
    fn notices_dismiss_after_two_and_a_half_seconds() {
        assert_eq!(Notice::DISMISS_AFTER, Duration::from_millis(2500));
        assert_eq!(Notice::NothingToDownload.message(), "No events to download!");
    }
}
