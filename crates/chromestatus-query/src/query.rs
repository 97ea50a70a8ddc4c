//! Parsed queries and their execution.
//!
//! [`Query::parse`] runs the whole front end: the component shortcut check,
//! then tokenize, classify and compile. The resulting [`Query`] is a plain
//! value that can be matched against any [`FeatureRecord`].

use std::fmt;

use log::{debug, trace};

use crate::classify::classify;
use crate::condition::FilterCondition;
use crate::options::FilterOptions;
use crate::record::FeatureRecord;
use crate::token::tokenize;

/// A parsed query.
///
/// The match logic is:
///
/// ```text
/// All                  -> every record
/// Component { .. }     -> records whose component list contains `name` exactly
/// Conditions { c1..cn } -> records matching c1 AND c2 AND .. AND cn
/// ```
///
/// # Example
///
/// ```
/// use chromestatus_query::{FilterOptions, Query};
/// use serde_json::json;
///
/// let features = vec![
///     json!({"name": "Container queries", "browsers": {"chrome": {"desktop": 105}}}),
///     json!({"name": "Subgrid", "browsers": {"chrome": {"desktop": 117}}}),
/// ];
///
/// let query = Query::parse("browsers.chrome.desktop>=110", &FilterOptions::default());
/// let results = query.filter(&features);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0]["name"], "Subgrid");
/// ```
#[derive(Debug, Clone)]
pub enum Query {
    /// Empty query. Matches everything.
    All,
    /// Component shortcut. Exact membership in the list at `path`.
    Component {
        /// Query prefix that selected the shortcut.
        prefix: String,
        path: String,
        name: String,
    },
    /// Conjunction of compiled conditions.
    Conditions {
        /// Component prefix in effect when the query was parsed.
        prefix: String,
        conditions: Vec<FilterCondition>,
    },
}

impl Query {
    /// Parses a raw query string.
    ///
    /// Never fails: malformed parts of a query compile to conditions that
    /// match nothing.
    pub fn parse(raw: &str, options: &FilterOptions) -> Query {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Query::All;
        }

        if let Some(name) = component_name(trimmed, &options.component_prefix) {
            debug!("component shortcut for {:?}", name);
            return Query::Component {
                prefix: options.component_prefix.clone(),
                path: options.component_path.clone(),
                name: name.to_string(),
            };
        }

        let tokens = tokenize(trimmed);
        trace!("tokens: {:?}", tokens);
        let specs = classify(&tokens);
        trace!("specs: {:?}", specs);

        let conditions: Vec<FilterCondition> = specs
            .iter()
            .map(|spec| FilterCondition::compile(spec, options))
            .collect();
        debug!("compiled {} condition(s) from {:?}", conditions.len(), raw);

        if conditions.is_empty() {
            // Only separators, e.g. ":::"
            Query::All
        } else {
            Query::Conditions {
                prefix: options.component_prefix.clone(),
                conditions,
            }
        }
    }

    /// Returns `true` if this query matches every record.
    pub fn is_empty(&self) -> bool {
        matches!(self, Query::All)
    }

    /// Returns the compiled conditions (empty for `All` and `Component`).
    pub fn conditions(&self) -> &[FilterCondition] {
        match self {
            Query::Conditions { conditions, .. } => conditions,
            _ => &[],
        }
    }

    /// Tests if a single record matches this query.
    pub fn matches<T: FeatureRecord + ?Sized>(&self, item: &T) -> bool {
        match self {
            Query::All => true,
            Query::Component { path, name, .. } => item.property(path).list_contains(name),
            Query::Conditions { conditions, .. } => conditions.iter().all(|c| c.matches(item)),
        }
    }

    /// Filters a slice, returning references to matching records in their
    /// original order.
    pub fn filter<'a, T: FeatureRecord>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Filters and clones matching records.
    pub fn filter_cloned<T: FeatureRecord + Clone>(&self, items: &[T]) -> Vec<T> {
        self.filter(items).into_iter().cloned().collect()
    }

    /// Counts the number of matching records.
    pub fn count<T: FeatureRecord>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }

    /// Returns `true` if any record matches.
    pub fn any<T: FeatureRecord>(&self, items: &[T]) -> bool {
        items.iter().any(|item| self.matches(item))
    }

    /// Finds the first matching record.
    pub fn find<'a, T: FeatureRecord>(&self, items: &'a [T]) -> Option<&'a T> {
        items.iter().find(|item| self.matches(*item))
    }

    /// Finds the first matching record and returns its index.
    pub fn position<T: FeatureRecord>(&self, items: &[T]) -> Option<usize> {
        items.iter().position(|item| self.matches(item))
    }
}

/// Renders the canonical query text. Parsing it again with the same
/// options yields an equivalent query.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::All => Ok(()),
            Query::Component { prefix, name, .. } => {
                f.write_str(prefix)?;
                if name.is_empty() || name.starts_with('"') || name.contains(char::is_whitespace) {
                    write!(f, "\"{}\"", name)
                } else {
                    f.write_str(name)
                }
            }
            Query::Conditions { prefix, conditions } => {
                for (i, condition) in conditions.iter().enumerate() {
                    if i == 0 {
                        // A bare head that reads as the prefix would reparse
                        // as a component lookup.
                        let quote_head = condition.to_string().starts_with(prefix.as_str());
                        condition.write_canonical(f, quote_head)?;
                    } else {
                        write!(f, " {}", condition)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Extracts the component name if the whole query is a component lookup.
///
/// The prefix may be followed by one whitespace character. The name is the
/// next word, or the content of a quoted string; anything after it is
/// ignored.
fn component_name<'a>(query: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = query.strip_prefix(prefix)?;
    let rest = match rest.chars().next() {
        Some(c) if c.is_whitespace() => &rest[c.len_utf8()..],
        _ => rest,
    };

    if let Some(body) = rest.strip_prefix('"') {
        return Some(match body.find('"') {
            Some(end) => &body[..end],
            None => body,
        });
    }

    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(&rest[..end])
}
