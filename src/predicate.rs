//! Typed predicate model produced by the compiler.
//!
//! A [`PredicateSet`] is the executable form of a parsed query: either
//! one conjunction, or a disjunction of conjunctions when the query had
//! OR groups. Each [`Predicate`] tests a single card property; the
//! evaluator in [`crate::evaluator`] gives them meaning against a card.

use rust_decimal::Decimal;

use crate::ast::CmpOp;

/// Card text fields a predicate can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    TypeLine,
    OracleText,
    FlavorText,
    Artist,
    SetCode,
    Rarity,
    Watermark,
    Layout,
    ManaCost,
    CollectorNumber,
}

/// Card fields compared numerically.
///
/// `Power`, `Toughness`, and `CollectorNumber` are stored as strings on
/// the card; comparison uses the leading numeric prefix (a value with no
/// numeric prefix counts as 0, a missing value fails the comparison).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Cmc,
    Power,
    Toughness,
    Loyalty,
    Year,
    CollectorNumber,
}

/// Stat fields that may hold the variable marker `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Power,
    Toughness,
}

/// Card list fields a predicate can test membership against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayField {
    Colors,
    ColorIdentity,
    Keywords,
    ProducedMana,
    Tokens,
}

/// A single compiled test against one card.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match on a text field.
    Contains { field: TextField, needle: String },
    /// Field absent or does not contain the needle.
    NotContains { field: TextField, needle: String },
    /// Case-insensitive equality on a text field.
    Eq { field: TextField, value: String },
    /// Field differs from the value; `missing_ok` decides whether an
    /// absent field passes.
    NotEq {
        field: TextField,
        value: String,
        missing_ok: bool,
    },
    /// Byte-exact equality on a text field (`m={2}{U}{U}`).
    EqStrict { field: TextField, value: String },
    /// Field absent or differs byte-exactly from the value.
    NotEqStrict { field: TextField, value: String },
    /// Case-sensitive exact name match (`!"Name"`).
    NameStrict(String),
    /// Numeric comparison on a card field.
    Cmp {
        field: NumericField,
        op: CmpOp,
        value: f64,
    },
    /// The stat is literally `*` (or, negated, is present and not `*`).
    VariableStat { field: StatField, negated: bool },
    /// The list field contains the element (case-insensitive).
    HasElement { field: ArrayField, element: String },
    /// The list field is absent or lacks the element.
    LacksElement { field: ArrayField, element: String },
    /// The list field is absent or empty.
    IsEmpty(ArrayField),
    /// The list field has at least one entry.
    IsNonEmpty(ArrayField),
    /// The card's set code is one of the given codes.
    SetIn(&'static [&'static str]),
    /// The card's set code is none of the given codes.
    SetNotIn(&'static [&'static str]),
    /// The card is legal in the format.
    LegalIn(String),
    /// The card is not legal in the format (missing legality passes).
    NotLegalIn(String),
    /// The card is banned in the format.
    BannedIn(String),
    /// The card is not banned in the format.
    NotBannedIn(String),
    /// Compare the card's price in a currency against a decimal value.
    /// Cards without a price in that currency fail.
    PriceCmp {
        currency: String,
        op: CmpOp,
        value: Decimal,
    },
    /// At least one inner predicate matches.
    Any(Vec<Predicate>),
    /// Matches no card. Produced for contradictions such as an unknown
    /// price currency or an unknown block name.
    Nothing,
}

/// The executable form of a whole query.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateSet {
    /// Every predicate must match. Empty means match everything.
    All(Vec<Predicate>),
    /// At least one group must match in full. Empty means match nothing.
    AnyGroup(Vec<Vec<Predicate>>),
}

impl PredicateSet {
    /// Number of individual predicates across the whole set.
    pub fn predicate_count(&self) -> usize {
        match self {
            PredicateSet::All(preds) => preds.len(),
            PredicateSet::AnyGroup(groups) => groups.iter().map(Vec::len).sum(),
        }
    }

    /// True when the set matches every card unconditionally.
    pub fn is_match_all(&self) -> bool {
        matches!(self, PredicateSet::All(preds) if preds.is_empty())
    }
}
