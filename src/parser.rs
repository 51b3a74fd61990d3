//! Boolean structure: assembling clause filters into a [`ParsedQuery`].
//!
//! The parser walks the token stream left to right, folding clause
//! tokens into the flat filter map while `OR`, `-`, and parentheses
//! shape the result into OR groups. Parenthesized sub-queries are
//! parsed recursively; filters outside an OR group distribute into
//! every group so that `(t:elf OR t:goblin) c:green` means
//! `(elf AND green) OR (goblin AND green)`.

use tracing::debug;

use crate::ast::{Filters, ParsedQuery, Token};
use crate::clause;
use crate::error::QueryError;
use crate::lexer;

/// Where the OR structure of the query came from. Group assembly at
/// the end of a token run differs between an `OR` keyword at the top
/// level and OR groups hoisted out of a parenthesized sub-query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrContext {
    /// No OR clause seen yet.
    None,
    /// A top-level `OR` keyword separates the groups.
    Keyword,
    /// The OR groups were lifted from a parenthesized sub-query;
    /// trailing loose filters distribute into each group.
    Parens,
}

/// Parse a query string into its boolean filter structure.
pub fn parse(query: &str) -> Result<ParsedQuery, QueryError> {
    let query = query.trim();
    debug!(query, "parsing query");

    if query.is_empty() {
        debug!("empty query");
        return Ok(ParsedQuery {
            raw_query: query.to_string(),
            ..ParsedQuery::default()
        });
    }

    let tokens = lexer::tokenize(query)?;
    debug!(tokens = tokens.len(), "tokenized");
    let result = parse_tokens(&tokens, query)?;
    debug!(filters = result.filter_count(), "parsed");
    Ok(result)
}

fn parse_tokens(tokens: &[Token], raw_query: &str) -> Result<ParsedQuery, QueryError> {
    let mut filters = Filters::new();
    let mut or_groups: Vec<Filters> = Vec::new();
    let mut current_group = Filters::new();
    let mut or_context = OrContext::None;
    let mut negated = false;

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Negation => {
                negated = true;
                i += 1;
                continue;
            }
            Token::Or => {
                if or_context == OrContext::None {
                    or_context = OrContext::Keyword;
                }
                if !current_group.is_empty() {
                    or_groups.push(std::mem::take(&mut current_group));
                }
                i += 1;
                continue;
            }
            Token::LParen => {
                // Find the matching close, honoring nesting.
                let mut depth = 1usize;
                let mut j = i + 1;
                while j < tokens.len() && depth > 0 {
                    match tokens[j] {
                        Token::LParen => depth += 1,
                        Token::RParen => depth -= 1,
                        _ => {}
                    }
                    j += 1;
                }
                if depth > 0 {
                    return Err(QueryError::new(
                        "Unbalanced parentheses: missing closing ')'",
                        "Check that all opening parentheses have matching closing parentheses",
                    ));
                }

                let inner = parse_tokens(&tokens[i + 1..j - 1], raw_query)?;
                if inner.has_or_clause {
                    or_context = OrContext::Parens;
                    // Filters collected before the parentheses belong in
                    // every inner OR group.
                    if !current_group.is_empty() {
                        let prefix = std::mem::take(&mut current_group);
                        for group in inner.or_groups {
                            let mut group = group;
                            group.merge(prefix.clone());
                            or_groups.push(group);
                        }
                    } else {
                        or_groups.extend(inner.or_groups);
                    }
                } else {
                    filters.merge(inner.filters.clone());
                    current_group.merge(inner.filters);
                }

                i = j;
                negated = false;
                continue;
            }
            Token::RParen => {
                return Err(QueryError::new(
                    "Unbalanced parentheses: extra closing ')'",
                    "Check that all closing parentheses have matching opening parentheses",
                ));
            }
            token => {
                if let Some((key, value)) = clause::interpret(token, negated) {
                    filters.insert(key, value.clone());
                    current_group.insert(key, value);
                }
                negated = false;
                i += 1;
            }
        }
    }

    match or_context {
        OrContext::Parens if !current_group.is_empty() && !or_groups.is_empty() => {
            // Loose filters after the parentheses AND into each group.
            for group in &mut or_groups {
                group.merge(current_group.clone());
            }
        }
        OrContext::Keyword | OrContext::Parens => {
            if !current_group.is_empty() {
                or_groups.push(current_group);
            }
        }
        OrContext::None => {}
    }

    Ok(ParsedQuery {
        filters,
        or_groups,
        has_or_clause: or_context != OrContext::None,
        raw_query: raw_query.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FilterKey, FilterKind, FilterValue};

    fn text(parsed: &ParsedQuery, kind: FilterKind) -> Option<&FilterValue> {
        parsed.filters.get(FilterKey::new(kind))
    }

    #[test]
    fn test_simple_and_query() {
        let parsed = parse("t:creature r:rare").unwrap();
        assert!(!parsed.has_or_clause);
        assert_eq!(
            text(&parsed, FilterKind::Type),
            Some(&FilterValue::Texts(vec!["creature".to_string()]))
        );
        assert_eq!(
            text(&parsed, FilterKind::Rarity),
            Some(&FilterValue::Text("rare".to_string()))
        );
    }

    #[test]
    fn test_or_splits_groups() {
        let parsed = parse("t:elf OR t:goblin").unwrap();
        assert!(parsed.has_or_clause);
        assert_eq!(parsed.or_groups.len(), 2);
    }

    #[test]
    fn test_paren_or_distributes_trailing_filter() {
        let parsed = parse("(t:elf OR t:goblin) c:green").unwrap();
        assert!(parsed.has_or_clause);
        assert_eq!(parsed.or_groups.len(), 2);
        for group in &parsed.or_groups {
            assert!(group.contains_key(FilterKey::new(FilterKind::Colors)));
        }
    }

    #[test]
    fn test_unbalanced_open_paren() {
        let err = parse("(t:elf OR t:goblin").unwrap_err();
        assert!(err.to_string().contains("missing closing"));
    }

    #[test]
    fn test_unbalanced_close_paren() {
        let err = parse("t:elf)").unwrap_err();
        assert!(err.to_string().contains("extra closing"));
    }

    #[test]
    fn test_negation_consumed_by_next_clause() {
        let parsed = parse("-t:creature t:artifact").unwrap();
        let negated = FilterKey::negated(FilterKind::Type);
        assert_eq!(
            parsed.filters.get(negated),
            Some(&FilterValue::Texts(vec!["creature".to_string()]))
        );
        assert_eq!(
            text(&parsed, FilterKind::Type),
            Some(&FilterValue::Texts(vec!["artifact".to_string()]))
        );
    }
}
