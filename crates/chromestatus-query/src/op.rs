//! Comparison operators for operator predicates.
//!
//! The [`Comparator`] enum covers the ordered comparisons the query language
//! accepts after a field name (`<`, `<=`, `>`, `>=`, `=`, `==`).

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading decimal number, the way a browser's `parseFloat` reads it.
static NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?))")
        .expect("number prefix pattern is valid")
});

/// Ordered comparison operator.
///
/// `=` and `==` are synonyms and both parse to [`Comparator::Eq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Equal.
    Eq,
}

impl Comparator {
    /// Parses an operator token. Returns `None` for anything unrecognized.
    pub fn parse(token: &str) -> Option<Comparator> {
        match token {
            "<" => Some(Comparator::Lt),
            "<=" => Some(Comparator::Lte),
            ">" => Some(Comparator::Gt),
            ">=" => Some(Comparator::Gte),
            "=" | "==" => Some(Comparator::Eq),
            _ => None,
        }
    }

    /// Evaluates the operator given the ordering of `field` relative to
    /// the operand.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Comparator::Eq => ordering == Ordering::Equal,
            Comparator::Gt => ordering == Ordering::Greater,
            Comparator::Gte => ordering != Ordering::Less,
            Comparator::Lt => ordering == Ordering::Less,
            Comparator::Lte => ordering != Ordering::Greater,
        }
    }

    /// Compares two floats. Any NaN makes the comparison false.
    pub fn compare(self, field: f64, operand: f64) -> bool {
        match field.partial_cmp(&operand) {
            Some(ordering) => self.eval_ordering(ordering),
            None => false,
        }
    }
}

/// Parses the numeric operand of an operator predicate.
///
/// Reads the longest leading number and ignores whatever follows, so
/// `"50px"` yields `50.0`. Returns `None` when no number prefix exists,
/// which compiles to a predicate that never matches.
pub fn parse_operand(raw: &str) -> Option<f64> {
    let caps = NUMBER_PREFIX.captures(raw)?;
    let text = caps.get(1)?.as_str();
    match text {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => text.parse::<f64>().ok(),
    }
}
