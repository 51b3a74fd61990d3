use std::fmt;

/// Comparison operator attached to a clause.
///
/// `Colon` is the Scryfall shorthand: it means `=` for every comparison
/// clause except colors and color identity, where it means "has at least
/// these colors" (same as `>=`), and mana cost, where it means "contains".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Colon,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CmpOp {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ":" => Some(CmpOp::Colon),
            "=" => Some(CmpOp::Eq),
            "!=" => Some(CmpOp::Ne),
            "<" => Some(CmpOp::Lt),
            ">" => Some(CmpOp::Gt),
            "<=" => Some(CmpOp::Le),
            ">=" => Some(CmpOp::Ge),
            _ => None,
        }
    }

    /// Collapse `:` into `=` for clauses where the two are synonyms.
    pub fn normalized(self) -> Self {
        match self {
            CmpOp::Colon => CmpOp::Eq,
            other => other,
        }
    }

    /// Operator for the negated form of a numeric clause.
    ///
    /// `-cmc>=5` compiles to `cmc < 5`, not `NOT(cmc >= 5)`, so cards with
    /// an unknown value fail the comparison in both the positive and the
    /// negated case.
    pub fn inverted(self) -> Self {
        match self {
            CmpOp::Colon | CmpOp::Eq => CmpOp::Ne,
            CmpOp::Ne => CmpOp::Eq,
            CmpOp::Lt => CmpOp::Ge,
            CmpOp::Gt => CmpOp::Le,
            CmpOp::Le => CmpOp::Gt,
            CmpOp::Ge => CmpOp::Lt,
        }
    }

    /// Apply the comparison to two ordered values.
    pub fn compare<T: PartialOrd>(self, left: &T, right: &T) -> bool {
        match self {
            CmpOp::Colon | CmpOp::Eq => left == right,
            CmpOp::Ne => left != right,
            CmpOp::Lt => left < right,
            CmpOp::Gt => left > right,
            CmpOp::Le => left <= right,
            CmpOp::Ge => left >= right,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Colon => ":",
            CmpOp::Eq => "=",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::Le => "<=",
            CmpOp::Ge => ">=",
        };
        f.write_str(s)
    }
}

/// Matching mode for a mana cost clause.
///
/// `m:{R}{R}` matches any cost containing that run of symbols; `m={R}{R}`
/// requires the whole serialized cost to be exactly that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManaOp {
    Contains,
    Exact,
}
