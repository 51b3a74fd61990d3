//! In-memory card corpus that compiled queries run against.

use tracing::{debug, info};

use crate::ast::ParsedQuery;
use crate::card::Card;
use crate::compiler;

/// A searchable collection of cards, kept in load order.
#[derive(Debug, Default)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    /// Build a store from raw card records, normalizing each one
    /// (face merging, token-name derivation).
    pub fn from_cards(mut cards: Vec<Card>) -> Self {
        for card in &mut cards {
            card.normalize();
        }
        info!(cards = cards.len(), "card store loaded");
        CardStore { cards }
    }

    /// Parse cards out of a JSON array (the bulk-data file format).
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        let cards: Vec<Card> = serde_json::from_str(data)?;
        Ok(Self::from_cards(cards))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Run a parsed query, returning a page of matches in load order.
    pub fn search(&self, parsed: &ParsedQuery, limit: usize, offset: usize) -> Vec<&Card> {
        let predicates = compiler::compile(parsed);
        debug!(query = %parsed.raw_query, limit, offset, "executing search");
        self.cards
            .iter()
            .filter(|card| predicates.matches(card))
            .skip(offset)
            .take(limit)
            .collect()
    }

    /// Total number of matches, ignoring pagination.
    pub fn count_matches(&self, parsed: &ParsedQuery) -> usize {
        let predicates = compiler::compile(parsed);
        self.cards
            .iter()
            .filter(|card| predicates.matches(card))
            .count()
    }

    /// Look up a single card by name, case-insensitively.
    pub fn get_card_by_name(&self, name: &str) -> Option<&Card> {
        self.cards
            .iter()
            .find(|card| card.name.eq_ignore_ascii_case(name))
    }
}
