use scraper::{ElementRef, Html};

use crate::structs::{EventCard, Page, PastEvent};
use crate::EventRecord;

pub fn parse_page<S: AsRef<str>>(s: S) -> Page {
    let html = Html::parse_document(s.as_ref());

    let events = html
        .select(selector!("#eventsList .event-card"))
        .map(parse_card)
        .collect();

    let home = html
        .select(selector!("#homeUpcomingEvents .event-card"))
        .map(parse_card)
        .collect();

    let past = html
        .select(selector!("#pastEventsGrid .past-event"))
        .filter_map(parse_past_event)
        .collect();

    Page { events, past, home }
}

fn parse_card(element: ElementRef) -> EventCard {
    let button = element.select(selector!(".add-to-cal")).next();
    let attr = |name: &str| {
        button
            .and_then(|button| button.value().attr(name))
            .map(str::to_string)
    };

    let record = EventRecord {
        title: attr("data-event-title"),
        date: attr("data-event-date"),
        time: attr("data-event-time"),
        location: attr("data-event-location"),
        kind: element.value().attr("data-type").map(str::to_string),
    };

    let heading = element
        .select(selector!(".event-card__title, .timeline__card-title"))
        .next()
        .map(inner_text);

    EventCard {
        record,
        heading,
        hidden: is_hidden(element),
    }
}

fn parse_past_event(element: ElementRef) -> Option<PastEvent> {
    let title = element
        .select(selector!(".past-event__title"))
        .next()
        .map(inner_text)?;

    let label = element
        .select(selector!(".past-event__date"))
        .next()
        .map(inner_text)
        .unwrap_or_default();

    Some(PastEvent {
        title,
        label,
        synthesized: false,
    })
}

fn inner_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Whether the element carries an inline `display: none`.
fn is_hidden(element: ElementRef) -> bool {
    let Some(style) = element.value().attr("style") else {
        return false;
    };

    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .any(|(name, value)| {
            name.trim().eq_ignore_ascii_case("display") && value.trim().eq_ignore_ascii_case("none")
        })
}
