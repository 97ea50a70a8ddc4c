//! The feature filter entry point.
//!
//! [`FeatureFilter`] is what a caller holding a feature collection talks
//! to: hand it the raw query text and the collection, get back the matching
//! records. The match count is reported to the caller through a
//! notification callback, once per call, so a view can render "N features"
//! or a "no results" message.

use log::debug;

use crate::error::Result;
use crate::options::FilterOptions;
use crate::query::Query;
use crate::record::FeatureRecord;

/// Filters feature collections by query text.
///
/// Stateless across calls: every call parses the query afresh and scans
/// the whole collection. Nothing is cached and no reference to the
/// collection is kept.
///
/// # Example
///
/// ```
/// use chromestatus_query::FeatureFilter;
/// use serde_json::json;
///
/// let features = vec![
///     json!({"name": "C++ features"}),
///     json!({"name": "Rust features"}),
/// ];
///
/// let filter = FeatureFilter::new();
/// let mut shown = None;
/// let results = filter.filter_notify("c++", &features, |count| shown = Some(count));
/// assert_eq!(results.len(), 1);
/// assert_eq!(shown, Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureFilter {
    options: FilterOptions,
}

impl FeatureFilter {
    /// Creates a filter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter with the given options, validating them first.
    pub fn with_options(options: FilterOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Returns the options this filter uses.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Parses a query with this filter's options.
    pub fn parse(&self, query: &str) -> Query {
        Query::parse(query, &self.options)
    }

    /// Filters `features` by `query`.
    ///
    /// The match count is logged at debug level.
    pub fn filter<'a, T: FeatureRecord>(&self, query: &str, features: &'a [T]) -> Vec<&'a T> {
        self.filter_notify(query, features, |_| {})
    }

    /// Filters `features` by `query` and passes the match count to `notify`.
    ///
    /// An empty query returns every record, in order.
    pub fn filter_notify<'a, T, N>(&self, query: &str, features: &'a [T], notify: N) -> Vec<&'a T>
    where
        T: FeatureRecord,
        N: FnOnce(usize),
    {
        let parsed = self.parse(query);
        let results = parsed.filter(features);
        debug!(
            "query {:?} matched {} of {} feature(s)",
            query,
            results.len(),
            features.len()
        );
        notify(results.len());
        results
    }
}
