//! CLI support for tutor-lang
//!
//! Provides programmatic access to the search and check commands for
//! embedding in other tools.

mod check;
mod search;

pub use check::execute_check;
pub use search::{execute_search, SearchOptions, SearchOutput};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Query error: {}", format_query_failure(.0))]
    Query(#[from] crate::QueryError),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("No card data provided. Use --cards or pipe a JSON array to stdin.")]
    NoInput,
}

/// Parse failures surface the full self-correction context: the
/// message, the hint, and every supported-syntax line.
fn format_query_failure(err: &crate::QueryError) -> String {
    let mut out = format!("{err}\nSupported syntax:");
    for line in err.supported_syntax {
        out.push_str("\n  ");
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::CliError;
    use crate::{parse, SUPPORTED_SYNTAX};

    #[test]
    fn test_query_error_lists_supported_syntax() {
        let err = parse("c:blue #").unwrap_err();
        let message = err.message.clone();
        let hint = err.hint.clone();
        let shown = CliError::from(err).to_string();
        assert!(shown.contains(&message));
        assert!(shown.contains(&hint));
        for line in SUPPORTED_SYNTAX {
            assert!(shown.contains(line));
        }
    }
}
