//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Fields joined into the text that keyword terms search.
pub const DEFAULT_KEYWORD_FIELDS: [&str; 3] = ["name", "summary", "comments"];

/// Prefix that turns a whole query into a component lookup.
pub const DEFAULT_COMPONENT_PREFIX: &str = "component:";

/// Path of the Blink component list on a feature record.
pub const DEFAULT_COMPONENT_PATH: &str = "browsers.chrome.blink_components";

/// Options controlling how queries are interpreted.
///
/// Every field has a default, so a partial options file deserializes into
/// a complete value.
///
/// # Example
///
/// ```
/// use chromestatus_query::FilterOptions;
///
/// let options = FilterOptions::default()
///     .keyword_fields(["name", "summary"])
///     .component_path("components");
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Property paths searched by keyword terms, in order.
    pub keyword_fields: Vec<String>,
    /// Query prefix selecting the component lookup.
    pub component_prefix: String,
    /// Property path of the component list.
    pub component_path: String,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            keyword_fields: DEFAULT_KEYWORD_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            component_prefix: DEFAULT_COMPONENT_PREFIX.to_string(),
            component_path: DEFAULT_COMPONENT_PATH.to_string(),
        }
    }
}

impl FilterOptions {
    /// Creates options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keyword fields.
    pub fn keyword_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyword_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the component shortcut prefix.
    pub fn component_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.component_prefix = prefix.into();
        self
    }

    /// Sets the component list path.
    pub fn component_path(mut self, path: impl Into<String>) -> Self {
        self.component_path = path.into();
        self
    }

    /// Checks that the options can drive a query.
    pub fn validate(&self) -> Result<()> {
        if self.component_prefix.trim().is_empty() {
            return Err(QueryError::options("component prefix must not be empty"));
        }
        if self.component_prefix.starts_with('"') {
            return Err(QueryError::options("component prefix must not start with a quote"));
        }
        if self.component_path.trim().is_empty() {
            return Err(QueryError::options("component path must not be empty"));
        }
        if let Some(field) = self.keyword_fields.iter().find(|f| f.trim().is_empty()) {
            return Err(QueryError::options(format!(
                "keyword field {:?} is empty",
                field
            )));
        }
        Ok(())
    }
}
