//! Runtime value types for property comparison.
//!
//! The [`PropertyValue`] enum represents whatever a property path resolved to
//! inside a feature record. Feature records wrap many fields in "enum-like"
//! objects (`{"val": 3, "text": "Shipped"}`); those resolve to
//! [`PropertyValue::EnumLike`] and are compared through their `text`.

use std::borrow::Cow;

/// Value resolved from a property path, borrowed from the source record.
///
/// # Example
///
/// ```
/// use chromestatus_query::{FeatureRecord, PropertyValue};
/// use serde_json::json;
///
/// let feature = json!({
///     "name": "Container queries",
///     "browsers": {"chrome": {"status": {"val": 5, "text": "Enabled by default"}}}
/// });
///
/// assert_eq!(feature.property("name"), PropertyValue::String("Container queries"));
/// assert_eq!(
///     feature.property("browsers.chrome.status").display_text().as_deref(),
///     Some("Enabled by default"),
/// );
/// assert!(feature.property("browsers.chrome.bug").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Object exposing a `text` field, such as `{"val": 3, "text": "Shipped"}`.
    EnumLike { text: &'a str },
    /// Sequence of values.
    List(Vec<PropertyValue<'a>>),
    /// Object without a `text` field. Not displayable.
    Object,
    /// Path not present, or `null`.
    None,
}

impl<'a> PropertyValue<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, PropertyValue::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the text a property predicate matches against.
    ///
    /// Enum-like objects unwrap to their `text`. Lists join their items'
    /// texts with `,`. Plain objects and missing values have no display
    /// text and therefore never match.
    pub fn display_text(&self) -> Option<Cow<'a, str>> {
        match self {
            PropertyValue::String(s) => Some(Cow::Borrowed(*s)),
            PropertyValue::EnumLike { text, .. } => Some(Cow::Borrowed(*text)),
            PropertyValue::Number(n) => Some(Cow::Owned(n.to_string())),
            PropertyValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            PropertyValue::List(items) => {
                let parts: Vec<Cow<'a, str>> = items
                    .iter()
                    .map(|item| item.display_text().unwrap_or(Cow::Borrowed("")))
                    .collect();
                Some(Cow::Owned(parts.join(",")))
            }
            PropertyValue::Object | PropertyValue::None => None,
        }
    }

    /// Coerces the value to a number for ordered comparison.
    ///
    /// Strings and enum-like texts must be a whole decimal number
    /// (surrounding whitespace allowed) or exactly `Infinity`; an empty or
    /// non-numeric text yields `None`.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(n.to_f64()),
            PropertyValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            PropertyValue::String(s) | PropertyValue::EnumLike { text: s } => parse_decimal(s),
            PropertyValue::List(_) | PropertyValue::Object | PropertyValue::None => None,
        }
    }

    /// Returns `true` if this is a list containing `needle` as an exact
    /// string item.
    pub fn list_contains(&self, needle: &str) -> bool {
        match self {
            PropertyValue::List(items) => items.iter().any(|item| item.as_str() == Some(needle)),
            _ => false,
        }
    }
}

/// Numeric property value.
///
/// Integers keep their own variants so display text shows every digit of
/// large ids; ordered comparison goes through [`Number::to_f64`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Converts a JSON number, preferring integer variants.
    pub fn from_json(n: &serde_json::Number) -> Option<Number> {
        if let Some(i) = n.as_i64() {
            Some(Number::I64(i))
        } else if let Some(u) = n.as_u64() {
            Some(Number::U64(u))
        } else {
            n.as_f64().map(Number::F64)
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

/// Parses a stored text as a number.
///
/// Rust's float parser also takes `inf`, `infinity` and `nan` in any case;
/// only the exact spelling `Infinity` is a number here.
fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    match trimmed {
        "" => None,
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => {
            let unsigned = trimmed.trim_start_matches(['+', '-']);
            if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
                return None;
            }
            trimmed.parse::<f64>().ok()
        }
    }
}
