//! Feature records and property-path resolution.
//!
//! [`FeatureRecord`] is the seam between the query engine and the data it
//! filters. The engine never mutates a record; it only asks for the value at
//! a dot-separated property path.

use serde_json::{Map, Value};

use crate::error::{QueryError, Result};
use crate::value::{Number, PropertyValue};

/// Trait for records that can be filtered by a query.
///
/// Implemented for [`serde_json::Value`] and [`serde_json::Map`], which is
/// how feature records arrive from the REST API. Other record types can
/// implement it by hand.
///
/// # Manual Implementation
///
/// ```
/// use chromestatus_query::{FeatureRecord, Number, PropertyValue};
///
/// struct Launch {
///     name: String,
///     milestone: Option<u32>,
/// }
///
/// impl FeatureRecord for Launch {
///     fn property(&self, path: &str) -> PropertyValue<'_> {
///         match path {
///             "name" => PropertyValue::String(&self.name),
///             "milestone" => match self.milestone {
///                 Some(m) => PropertyValue::Number(Number::U64(m as u64)),
///                 None => PropertyValue::None,
///             },
///             _ => PropertyValue::None,
///         }
///     }
/// }
/// ```
pub trait FeatureRecord {
    /// Returns the value at a dot-separated property path, or
    /// [`PropertyValue::None`] when the path does not resolve.
    fn property(&self, path: &str) -> PropertyValue<'_>;
}

impl FeatureRecord for Value {
    fn property(&self, path: &str) -> PropertyValue<'_> {
        resolve_path(self, path)
            .map(to_property_value)
            .unwrap_or(PropertyValue::None)
    }
}

impl FeatureRecord for Map<String, Value> {
    fn property(&self, path: &str) -> PropertyValue<'_> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let Some(first) = self.get(head) else {
            return PropertyValue::None;
        };
        match rest {
            Some(rest) => first.property(rest),
            None => to_property_value(first),
        }
    }
}

impl<T: FeatureRecord + ?Sized> FeatureRecord for &T {
    fn property(&self, path: &str) -> PropertyValue<'_> {
        (**self).property(path)
    }
}

/// Walks a dot-separated path through objects and arrays.
///
/// Array elements are addressed by numeric segments (`owners.0`).
fn resolve_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn to_property_value(value: &Value) -> PropertyValue<'_> {
    match value {
        Value::Null => PropertyValue::None,
        Value::Bool(b) => PropertyValue::Bool(*b),
        Value::Number(n) => Number::from_json(n)
            .map(PropertyValue::Number)
            .unwrap_or(PropertyValue::None),
        Value::String(s) => PropertyValue::String(s),
        Value::Array(items) => PropertyValue::List(items.iter().map(to_property_value).collect()),
        Value::Object(map) => match map.get("text") {
            Some(Value::String(text)) => PropertyValue::EnumLike { text },
            _ => PropertyValue::Object,
        },
    }
}

/// Extracts the feature collection from a decoded JSON payload.
///
/// Accepts a bare array of records, or an object holding the array under
/// `"features"` (the shape the feature list endpoint returns). Anything
/// else is rejected.
///
/// ```
/// use chromestatus_query::features_from_json;
/// use serde_json::json;
///
/// let features = features_from_json(json!({"total_count": 1, "features": [{"name": "a"}]})).unwrap();
/// assert_eq!(features.len(), 1);
///
/// assert!(features_from_json(json!("not a list")).is_err());
/// ```
pub fn features_from_json(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("features") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(QueryError::NotACollection {
                found: json_kind(&other),
            }),
            None => Err(QueryError::NotACollection { found: "object" }),
        },
        other => Err(QueryError::NotACollection {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "Anchor positioning",
            "milestone": 125,
            "ratio": 0.5,
            "enabled": true,
            "bug": null,
            "owners": ["a@example.com", "b@example.com"],
            "browsers": {
                "chrome": {
                    "desktop": 125,
                    "status": {"val": 5, "text": "Enabled by default"},
                    "blink_components": ["Blink>CSS"]
                },
                "ff": {"view": {"text": "No signal"}}
            },
            "meta": {"extra": 1}
        })
    }

    #[test]
    fn resolves_primitives() {
        let f = sample();
        assert_eq!(f.property("name"), PropertyValue::String("Anchor positioning"));
        assert_eq!(
            f.property("milestone"),
            PropertyValue::Number(Number::I64(125))
        );
        assert_eq!(f.property("ratio"), PropertyValue::Number(Number::F64(0.5)));
        assert_eq!(f.property("enabled"), PropertyValue::Bool(true));
    }

    #[test]
    fn resolves_nested_paths() {
        let f = sample();
        assert_eq!(
            f.property("browsers.chrome.desktop"),
            PropertyValue::Number(Number::I64(125))
        );
    }

    #[test]
    fn resolves_enum_like_objects() {
        let f = sample();
        assert_eq!(
            f.property("browsers.chrome.status"),
            PropertyValue::EnumLike {
                text: "Enabled by default"
            }
        );
        assert_eq!(
            f.property("browsers.ff.view"),
            PropertyValue::EnumLike { text: "No signal" }
        );
    }

    #[test]
    fn missing_and_null_resolve_to_none() {
        let f = sample();
        assert!(f.property("bug").is_none());
        assert!(f.property("browsers.chrome.bug").is_none());
        assert!(f.property("name.length").is_none());
        assert!(f.property("").is_none());
    }

    #[test]
    fn objects_without_text_are_opaque() {
        let f = sample();
        assert_eq!(f.property("meta"), PropertyValue::Object);
    }

    #[test]
    fn arrays_resolve_to_lists_and_index() {
        let f = sample();
        assert!(f
            .property("browsers.chrome.blink_components")
            .list_contains("Blink>CSS"));
        assert_eq!(f.property("owners.1"), PropertyValue::String("b@example.com"));
        assert!(f.property("owners.9").is_none());
    }

    #[test]
    fn map_records_resolve_like_values() {
        let f = sample();
        let map = f.as_object().unwrap();
        assert_eq!(
            map.property("browsers.chrome.desktop"),
            f.property("browsers.chrome.desktop")
        );
        assert!(map.property("nope").is_none());
    }

    #[test]
    fn collection_from_bare_array() {
        let features = features_from_json(json!([{"name": "a"}, {"name": "b"}])).unwrap();
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn collection_from_payload_object() {
        let features =
            features_from_json(json!({"total_count": 2, "features": [{}, {}]})).unwrap();
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn non_collections_are_rejected() {
        let err = features_from_json(json!(42)).unwrap_err();
        assert!(matches!(err, QueryError::NotACollection { found: "number" }));

        let err = features_from_json(json!({"name": "x"})).unwrap_err();
        assert!(matches!(err, QueryError::NotACollection { found: "object" }));

        let err = features_from_json(json!({"features": "x"})).unwrap_err();
        assert!(matches!(err, QueryError::NotACollection { found: "string" }));
    }
}
