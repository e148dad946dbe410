// src/kanban.rs
//! Kanban cards: the board-level view over interpreted database pages.

use crate::constants::UNTITLED_CARD;
use crate::model::{PropertyValue, Record};
use crate::types::well_known;
use chrono::NaiveDate;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub status: Option<String>,
    /// Names of the people assigned, for display.
    pub responsible: Vec<String>,
    /// User ids of the people assigned, for filtering.
    pub responsible_ids: Vec<String>,
    pub due: Option<String>,
}

impl Card {
    /// Projects a card from the raw and display interpretations of one page.
    pub fn from_records(raw: &Record, display: &Record) -> Self {
        let text = |record: &Record, key: &str| {
            record
                .custom(key)
                .and_then(PropertyValue::as_str)
                .map(str::to_string)
        };
        let texts = |record: &Record, key: &str| {
            record
                .custom(key)
                .map(|v| v.texts().into_iter().map(str::to_string).collect::<Vec<_>>())
                .unwrap_or_default()
        };

        Self {
            id: display.id().or_else(|| raw.id()).unwrap_or_default().to_string(),
            title: text(display, well_known::NAME)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNTITLED_CARD.to_string()),
            status: text(display, well_known::STATUS),
            responsible: texts(display, well_known::RESPONSIBLE),
            responsible_ids: texts(raw, well_known::RESPONSIBLE),
            due: text(display, well_known::DUE_DATE),
        }
    }

    /// Start date of the due range, if it parses.
    pub fn due_date(&self) -> Option<NaiveDate> {
        let due = self.due.as_deref()?;
        NaiveDate::parse_from_str(due.get(..10)?, "%Y-%m-%d").ok()
    }
}

/// Optional predicates, combined with AND. An empty filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub responsible_id: Option<String>,
    pub status_name: Option<String>,
}

impl CardFilter {
    pub fn matches(&self, card: &Card) -> bool {
        let responsible_ok = self
            .responsible_id
            .as_ref()
            .map_or(true, |id| card.responsible_ids.iter().any(|r| r == id));
        let status_ok = self
            .status_name
            .as_ref()
            .map_or(true, |name| card.status.as_ref() == Some(name));
        responsible_ok && status_ok
    }
}

pub fn filter_cards(cards: Vec<Card>, filter: &CardFilter) -> Vec<Card> {
    cards.into_iter().filter(|c| filter.matches(c)).collect()
}

/// Newest due date first; cards without a usable date go last, in their
/// original order.
pub fn sort_by_due_date(cards: &mut [Card]) {
    cards.sort_by(compare_due_dates);
}

/// Ordering behind [`sort_by_due_date`].
pub fn compare_due_dates(a: &Card, b: &Card) -> Ordering {
    match (a.due_date(), b.due_date()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
