pub mod ast;
pub mod card;
pub mod clause;
pub mod cli;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod predicate;
pub mod store;

pub use ast::{
    CmpOp, Color, ColorSet, FilterKey, FilterKind, FilterValue, Filters, ManaOp, ParsedQuery,
    StatValue, Token,
};
pub use card::{Card, CardFace, RelatedCard};
pub use compiler::{compile, compile_filters};
pub use error::{QueryError, SUPPORTED_SYNTAX, SYNTAX_SUMMARY};
pub use lexer::tokenize;
pub use parser::parse;
pub use predicate::{Predicate, PredicateSet};
pub use store::CardStore;
