//! Splitting event cards into past and upcoming.
//!
//! Date keys are compared as strings; for fixed-width `YYYYMMDD` keys that
//! is the same as comparing the dates.

use std::collections::HashSet;

use log::debug;
use serde::Serialize;

use crate::record::season_label;
use crate::structs::{EventCard, PastEvent};

pub const UPCOMING_LIMIT: usize = 3;

/// What a renderer should do with a card after partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Keep,
    /// Expired and already shown among the past events.
    Drop,
    /// Expired; a new entry was put at the front of the past events.
    MoveToPast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub upcoming: Vec<EventCard>,
    pub past: Vec<PastEvent>,
    /// One action per input card, in input order.
    pub actions: Vec<CardAction>,
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

#[must_use]
pub fn partition_past_events(cards: &[EventCard], curated: &[PastEvent], today: &str) -> Partition {
    let mut seen = curated
        .iter()
        .map(|entry| normalize_title(&entry.title))
        .collect::<HashSet<_>>();

    let mut upcoming = Vec::new();
    let mut synthesized = Vec::new();
    let mut actions = Vec::with_capacity(cards.len());

    for card in cards {
        let Some(date) = card.record.date_key().filter(|date| *date < today) else {
            upcoming.push(card.clone());
            actions.push(CardAction::Keep);
            continue;
        };

        let title = card.display_title();
        if !seen.insert(normalize_title(title)) {
            debug!("dropping expired event {title:?}, already listed");
            actions.push(CardAction::Drop);
            continue;
        }

        debug!("moving expired event {title:?} to past events");
        synthesized.push(PastEvent {
            title: title.to_string(),
            label: season_label(date),
            synthesized: true,
        });
        actions.push(CardAction::MoveToPast);
    }

    // each new entry went in front of the previous one
    let past = synthesized
        .into_iter()
        .rev()
        .chain(curated.iter().cloned())
        .collect();

    Partition {
        upcoming,
        past,
        actions,
    }
}

/// A revealed card and its 1-based stagger position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staggered<'a> {
    pub index: usize,
    pub card: &'a EventCard,
    pub stagger: usize,
}

/// The nearest `limit` dated cards on or after `today`, earliest first.
///
/// Every card not returned is meant to be hidden.
#[must_use]
pub fn select_upcoming<'a>(cards: &'a [EventCard], today: &str, limit: usize) -> Vec<Staggered<'a>> {
    let mut future = cards
        .iter()
        .enumerate()
        .filter_map(|(index, card)| {
            let date = card.record.date_key()?;
            (date >= today).then_some((index, date, card))
        })
        .collect::<Vec<_>>();

    // stable, so equal dates keep their markup order
    future.sort_by(|a, b| a.1.cmp(b.1));

    future
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(position, (index, _, card))| Staggered {
            index,
            card,
            stagger: position + 1,
        })
        .collect()
}
