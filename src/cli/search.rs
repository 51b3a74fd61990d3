//! Execute card search queries against a bulk JSON card list.

use serde::Serialize;

use super::CliError;
use crate::card::Card;
use crate::parser;
use crate::store::CardStore;

/// Options for the search command.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// The search query.
    pub query: String,
    /// JSON array of card records to search.
    pub cards_json: String,
    /// Maximum results to return.
    pub limit: usize,
    /// Results to skip, for pagination.
    pub offset: usize,
}

/// One page of results plus the unlimited match count.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub total_matches: usize,
    pub cards: Vec<Card>,
}

/// Parse the query, load the cards, and run the search.
pub fn execute_search(options: &SearchOptions) -> Result<SearchOutput, CliError> {
    let parsed = parser::parse(&options.query)?;
    let store = CardStore::from_json(&options.cards_json)?;
    let total_matches = store.count_matches(&parsed);
    let cards = store
        .search(&parsed, options.limit, options.offset)
        .into_iter()
        .cloned()
        .collect();
    Ok(SearchOutput {
        total_matches,
        cards,
    })
}
