//! Validate a query without executing it.

use super::CliError;
use crate::ast::ParsedQuery;
use crate::parser;

/// Parse the query and return its structure for display.
pub fn execute_check(query: &str) -> Result<ParsedQuery, CliError> {
    Ok(parser::parse(query)?)
}
