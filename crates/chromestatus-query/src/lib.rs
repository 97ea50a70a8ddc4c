//! Query language for filtering web-platform feature launch records.
//!
//! A search box on a feature list accepts a small free-text language. This
//! crate turns that text into predicates and applies them to an in-memory
//! collection of feature records:
//!
//! - Bare words and quoted phrases match the feature's name, summary and
//!   comments
//! - `field:value` matches a substring of any property (dot paths reach
//!   into nested records)
//! - `field>=10` and friends compare a property numerically
//! - `component:Blink>CSS` selects features owned by a Blink component
//!
//! # Quick Start
//!
//! ```rust
//! use chromestatus_query::FeatureFilter;
//! use serde_json::json;
//!
//! let features = vec![
//!     json!({
//!         "name": "CSS Nesting",
//!         "summary": "Nest style rules",
//!         "browsers": {"chrome": {"desktop": 112, "status": {"val": 5, "text": "Enabled by default"}}}
//!     }),
//!     json!({
//!         "name": "Popover",
//!         "summary": "Top-layer UI primitive",
//!         "browsers": {"chrome": {"desktop": 114, "status": {"val": 3, "text": "Origin trial"}}}
//!     }),
//! ];
//!
//! let filter = FeatureFilter::new();
//! let results = filter.filter(
//!     r#"browsers.chrome.desktop>=110 browsers.chrome.status:"enabled by""#,
//!     &features,
//! );
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0]["name"], "CSS Nesting");
//! ```
//!
//! # Query Language
//!
//! | Form | Example | Meaning |
//! |------|---------|---------|
//! | bare words | `foo bar` | each word is a keyword; all must match |
//! | quoted phrase | `"foo bar"` | one keyword matching the phrase |
//! | field match | `name:foo` | case-insensitive substring of `name` |
//! | quoted field match | `name:"exact phrase"` | same, value taken verbatim |
//! | comparison | `browsers.chrome.desktop>=50` | numeric; `<` `<=` `>` `>=` `=` `==` |
//! | component | `component: Blink>CSS` | whole-query override, exact membership |
//!
//! All conditions are combined with AND. Malformed input never fails: a
//! comparison against something that is not a number, an unknown operator
//! or a missing property simply does not match.
//!
//! # Pipeline
//!
//! ```text
//! raw text ──tokenize──▶ [Token] ──classify──▶ [ConditionSpec]
//!          ──compile───▶ [FilterCondition] ──filter──▶ matching records
//! ```
//!
//! Each stage is exposed on its own ([`tokenize`], [`classify`],
//! [`FilterCondition::compile`]) so it can be inspected and tested
//! independently.

mod classify;
mod condition;
mod error;
mod filter;
mod op;
mod options;
mod query;
mod record;
mod token;
mod value;

// Re-export public API
pub use classify::{classify, ConditionSpec};
pub use condition::{keyword_text, FilterCondition, LiteralPattern};
pub use error::{QueryError, Result};
pub use filter::FeatureFilter;
pub use op::{parse_operand, Comparator};
pub use options::{
    FilterOptions, DEFAULT_COMPONENT_PATH, DEFAULT_COMPONENT_PREFIX, DEFAULT_KEYWORD_FIELDS,
};
pub use query::Query;
pub use record::{features_from_json, FeatureRecord};
pub use token::{is_separator, tokenize, Token, Tokenizer};
pub use value::{Number, PropertyValue};
