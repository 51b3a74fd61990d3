//! # Tutor Query Language - Abstract Syntax Tree
//!
//! This module defines the structured representation of a Tutor search
//! query: the lexical tokens, the canonical filter entries they interpret
//! into, and the final [`ParsedQuery`] the filter compiler consumes.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the tokenizer
//! - **[operators]** - Comparison and mana-cost operators
//! - **[filters]** - Canonical filter keys, typed filter values, colors
//! - **[query]** - The structured query (AND-map plus OR-groups)
//!
//! ## The query language
//!
//! A query is a sequence of clauses joined by implicit AND, with `OR`,
//! `-` (negation) and parentheses for boolean structure:
//!
//! ```text
//! c:blue t:instant cmc<=2 -o:damage
//! (t:elf OR t:goblin) c:green
//! !"Lightning Bolt"
//! ```
//!
//! Clauses interpret into canonical filter entries (`colors`, `cmc`,
//! `type`, ... with a `_not` suffix for negation). A parenthesized OR is
//! flattened into top-level OR-groups, and any loose filters around it are
//! distributed into every group, so `c:green (t:elf OR t:goblin)` means
//! `(green AND elf) OR (green AND goblin)`. The language supports exactly
//! one level of OR-grouping combined with global ANDs, not arbitrary
//! nested boolean trees.

pub mod filters;
pub mod operators;
pub mod query;
pub mod tokens;

pub use filters::{Color, ColorSet, FilterKey, FilterKind, FilterValue, Filters, StatValue};
pub use operators::{CmpOp, ManaOp};
pub use query::ParsedQuery;
pub use tokens::Token;
