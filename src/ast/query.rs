use std::fmt;

use crate::ast::filters::Filters;

/// Structured representation of a parsed query.
///
/// A bare query is the flat AND-map in `filters`. When the query contains
/// an `OR`, `or_groups` holds one AND-group per alternative and the
/// cross-group relation is OR; `filters` still records every clause seen,
/// but execution goes through the groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    pub filters: Filters,
    pub or_groups: Vec<Filters>,
    pub has_or_clause: bool,
    pub raw_query: String,
}

impl ParsedQuery {
    /// True when the query has no filters at all (matches everything).
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && !self.has_or_clause
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .filters
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        if self.has_or_clause {
            parts.push(format!("OR groups: {}", self.or_groups.len()));
        }
        write!(f, "ParsedQuery({})", parts.join(", "))
    }
}
