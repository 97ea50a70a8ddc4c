//! Groups tokens into condition specs.
//!
//! Classification is a single greedy left-to-right pass over adjacent token
//! pairs. A token whose separator is `:` and that has a successor becomes
//! the field of a property spec; one whose separator is a comparison
//! operator becomes the field of an operator spec. Either way both tokens
//! are consumed, so a token never serves as the value of one spec and the
//! field of the next. Everything else is a keyword.

use crate::op::Comparator;
use crate::token::Token;

/// An uncompiled condition, as written in the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionSpec {
    /// Free-text term matched against the keyword fields.
    Keyword { value: String },
    /// `field:value` substring match.
    Property { field: String, value: String },
    /// `field<op>value` numeric comparison. `op` is kept as written.
    Operator {
        field: String,
        op: String,
        value: String,
    },
}

impl ConditionSpec {
    /// Creates a keyword spec.
    pub fn keyword(value: impl Into<String>) -> Self {
        ConditionSpec::Keyword {
            value: value.into(),
        }
    }

    /// Creates a property spec.
    pub fn property(field: impl Into<String>, value: impl Into<String>) -> Self {
        ConditionSpec::Property {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an operator spec.
    pub fn operator(
        field: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ConditionSpec::Operator {
            field: field.into(),
            op: op.into(),
            value: value.into(),
        }
    }
}

/// Classifies a token stream into condition specs.
///
/// ```
/// use chromestatus_query::{classify, tokenize, ConditionSpec};
///
/// let specs = classify(&tokenize("css name:grid milestone>=100"));
/// assert_eq!(
///     specs,
///     vec![
///         ConditionSpec::keyword("css"),
///         ConditionSpec::property("name", "grid"),
///         ConditionSpec::operator("milestone", ">=", "100"),
///     ]
/// );
/// ```
pub fn classify(tokens: &[Token<'_>]) -> Vec<ConditionSpec> {
    let mut specs = Vec::with_capacity(tokens.len());
    let mut index = 0;

    while index < tokens.len() {
        let current = &tokens[index];
        let next = tokens.get(index + 1);

        match (current.trimmed_separator(), next) {
            (Some(":"), Some(next)) => {
                specs.push(ConditionSpec::property(current.unit, next.unit));
                index += 2;
            }
            (Some(op), Some(next)) if Comparator::parse(op).is_some() => {
                specs.push(ConditionSpec::operator(current.unit, op, next.unit));
                index += 2;
            }
            _ => {
                specs.push(ConditionSpec::keyword(current.unit));
                index += 1;
            }
        }
    }

    specs
}
