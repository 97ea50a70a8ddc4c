//! Compiled filter conditions.
//!
//! A [`FilterCondition`] is the compiled form of a [`ConditionSpec`]: a pure
//! predicate over a single feature record. It holds no reference to the
//! collection being filtered and no mutable state.

use std::borrow::Cow;
use std::fmt;

use log::warn;
use regex::{Regex, RegexBuilder};

use crate::classify::ConditionSpec;
use crate::error::Result;
use crate::op::{parse_operand, Comparator};
use crate::options::FilterOptions;
use crate::record::FeatureRecord;
use crate::token::is_separator;

/// Case-insensitive literal text pattern.
///
/// The text is escaped before compiling, so regex metacharacters in a query
/// (`C++`, `a.b`, `(x)`) match themselves.
#[derive(Debug, Clone)]
pub struct LiteralPattern {
    text: String,
    regex: Option<Regex>,
}

impl LiteralPattern {
    /// Compiles a literal pattern, failing only if the escaped text exceeds
    /// the regex size limits.
    pub fn try_new(text: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            text: text.to_string(),
            regex: Some(regex),
        })
    }

    /// Compiles a literal pattern. A pattern that cannot be compiled never
    /// matches.
    pub fn new(text: &str) -> Self {
        Self::try_new(text).unwrap_or_else(|err| {
            warn!("pattern {:?} disabled: {}", text, err);
            Self {
                text: text.to_string(),
                regex: None,
            }
        })
    }

    /// The literal text, as written in the query.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Tests the pattern against a haystack.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(haystack))
    }
}

/// A compiled predicate over one feature record.
#[derive(Debug, Clone)]
pub enum FilterCondition {
    /// Matches if the keyword text contains the pattern.
    Keyword {
        /// Fields joined with `\n` to build the searched text.
        fields: Vec<String>,
        pattern: LiteralPattern,
    },
    /// Matches if the display text at `path` contains the pattern.
    Property {
        path: String,
        pattern: LiteralPattern,
    },
    /// Matches if the number at `path` compares true against the operand.
    Operator {
        path: String,
        /// Operator as written in the query.
        op: String,
        /// `None` for an unrecognized operator.
        comparator: Option<Comparator>,
        /// Operand as written in the query.
        value: String,
        /// `None` when `value` has no number prefix.
        operand: Option<f64>,
    },
}

impl FilterCondition {
    /// Compiles a spec into a predicate.
    pub fn compile(spec: &ConditionSpec, options: &FilterOptions) -> Self {
        match spec {
            ConditionSpec::Keyword { value } => FilterCondition::Keyword {
                fields: options.keyword_fields.clone(),
                pattern: LiteralPattern::new(value),
            },
            ConditionSpec::Property { field, value } => FilterCondition::Property {
                path: field.clone(),
                pattern: LiteralPattern::new(value),
            },
            ConditionSpec::Operator { field, op, value } => {
                let comparator = Comparator::parse(op);
                if comparator.is_none() {
                    warn!("unknown operator {:?} on {:?}, condition never matches", op, field);
                }
                FilterCondition::Operator {
                    path: field.clone(),
                    op: op.clone(),
                    comparator,
                    value: value.clone(),
                    operand: parse_operand(value),
                }
            }
        }
    }

    /// Returns `true` if this condition can never match any record.
    pub fn is_unsatisfiable(&self) -> bool {
        match self {
            FilterCondition::Operator {
                comparator,
                operand,
                ..
            } => comparator.is_none() || operand.is_none(),
            FilterCondition::Keyword { pattern, .. } | FilterCondition::Property { pattern, .. } => {
                pattern.regex.is_none()
            }
        }
    }

    /// Evaluates this condition against a record.
    pub fn matches<T: FeatureRecord + ?Sized>(&self, record: &T) -> bool {
        match self {
            FilterCondition::Keyword { fields, pattern } => {
                pattern.is_match(&keyword_text(record, fields))
            }
            FilterCondition::Property { path, pattern } => {
                match record.property(path).display_text() {
                    Some(text) => pattern.is_match(&text),
                    // Absence is never a match, not even for an empty pattern.
                    None => false,
                }
            }
            FilterCondition::Operator {
                path,
                comparator,
                operand,
                ..
            } => {
                let (Some(comparator), Some(operand)) = (comparator, operand) else {
                    return false;
                };
                match record.property(path).numeric() {
                    Some(field) => comparator.compare(field, *operand),
                    None => false,
                }
            }
        }
    }
}

/// Builds the text keyword terms search: the keyword fields' display texts
/// joined with `\n`, missing fields contributing an empty line.
pub fn keyword_text<T: FeatureRecord + ?Sized>(record: &T, fields: &[String]) -> String {
    let parts: Vec<Cow<'_, str>> = fields
        .iter()
        .map(|field| record.property(field).display_text().unwrap_or_default())
        .collect();
    parts.join("\n")
}

/// Writes a unit so that tokenizing it yields the same unit back.
fn write_unit(f: &mut fmt::Formatter<'_>, unit: &str) -> fmt::Result {
    if unit.is_empty() || unit.starts_with('"') || unit.contains(is_separator) {
        write!(f, "\"{}\"", unit)
    } else {
        f.write_str(unit)
    }
}

fn write_head(f: &mut fmt::Formatter<'_>, unit: &str, quote: bool) -> fmt::Result {
    if quote {
        write!(f, "\"{}\"", unit)
    } else {
        write_unit(f, unit)
    }
}

impl FilterCondition {
    /// Writes the query text for this condition. With `quote_head` the
    /// first unit (keyword or field) is always quoted.
    pub(crate) fn write_canonical(&self, f: &mut fmt::Formatter<'_>, quote_head: bool) -> fmt::Result {
        match self {
            FilterCondition::Keyword { pattern, .. } => write_head(f, pattern.as_str(), quote_head),
            FilterCondition::Property { path, pattern } => {
                write_head(f, path, quote_head)?;
                f.write_str(":")?;
                write_unit(f, pattern.as_str())
            }
            FilterCondition::Operator {
                path, op, value, ..
            } => {
                write_head(f, path, quote_head)?;
                f.write_str(op)?;
                write_unit(f, value)
            }
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_canonical(f, false)
    }
}
