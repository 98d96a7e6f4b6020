macro_rules! selector {
    ($query:expr) => {{
        static SELECTOR: ::once_cell::sync::Lazy<::scraper::Selector> =
            ::once_cell::sync::Lazy::new(|| ::scraper::Selector::parse($query).unwrap());
        &SELECTOR
    }};
}

pub mod calendar;
pub mod classify;
pub mod filter;
pub mod form;
mod markup;
mod record;
mod structs;
pub mod timeline;

pub use calendar::{export_all, export_batch, export_event, CalendarFile, Export, Notice};
pub use classify::{partition_past_events, select_upcoming, CardAction, Partition, UPCOMING_LIMIT};
pub use filter::{apply_filter, initial_view, Filter, FilterView};
pub use markup::parse_page;
pub use record::{
    is_date_key, local_today_key, season_label, today_key, EventRecord, DEFAULT_LOCATION,
    DEFAULT_TIME, DEFAULT_TITLE,
};
pub use structs::{EventCard, Page, PastEvent};
