use crate::structs::EventCard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Type(String),
}

impl Filter {
    pub fn parse<S: AsRef<str>>(s: S) -> Self {
        match s.as_ref().trim() {
            "" | "all" => Filter::All,
            kind => Filter::Type(kind.to_string()),
        }
    }

    #[must_use]
    pub fn matches(&self, card: &EventCard) -> bool {
        match self {
            Filter::All => true,
            Filter::Type(kind) => card.record.kind.as_deref() == Some(kind.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterView {
    /// Visibility per input card.
    pub visible: Vec<bool>,
    pub visible_count: usize,
}

impl FilterView {
    fn new(visible: Vec<bool>) -> Self {
        let visible_count = visible.iter().filter(|shown| **shown).count();

        Self {
            visible,
            visible_count,
        }
    }

    /// Whether the "no events" message should be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }

    /// The cards this view shows, in markup order.
    pub fn shown<'a>(&'a self, cards: &'a [EventCard]) -> impl Iterator<Item = &'a EventCard> + 'a {
        cards
            .iter()
            .zip(&self.visible)
            .filter_map(|(card, shown)| shown.then_some(card))
    }
}

/// Visibility before any filter was picked: whatever the markup's inline
/// style says.
#[must_use]
pub fn initial_view(cards: &[EventCard]) -> FilterView {
    FilterView::new(cards.iter().map(|card| !card.hidden).collect())
}

/// Visibility after a filter was picked. The filter decides alone, so it
/// also reveals cards the markup hid.
#[must_use]
pub fn apply_filter(cards: &[EventCard], filter: &Filter) -> FilterView {
    FilterView::new(cards.iter().map(|card| filter.matches(card)).collect())
}
