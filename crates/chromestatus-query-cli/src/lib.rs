//! `featurequery`: filter a feature collection from the command line.
//!
//! The binary is a thin caller of `chromestatus-query`. It loads a JSON
//! feature collection, runs one query through [`FeatureFilter`] and prints
//! the matching records. The match count goes to stderr.
//!
//! ```text
//! featurequery -f features.json 'browsers.chrome.desktop>=120 css'
//! curl -s $API/features | featurequery -o json component: Blink>CSS
//! ```

use std::borrow::Cow;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chromestatus_query::{
    features_from_json, FeatureFilter, FeatureRecord, FilterCondition, FilterOptions, Query,
};
use clap::{ArgAction, Parser, ValueEnum};
use log::{debug, info};

/// How matching features are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One feature name per line
    #[default]
    Names,
    /// Matching records as a pretty-printed JSON array
    Json,
    /// Matching records as YAML
    Yaml,
    /// Only the number of matches
    Count,
}

/// Filter web-platform feature records with a search query.
#[derive(Debug, Parser)]
#[command(name = "featurequery", version, about)]
pub struct Cli {
    /// Query words, joined with spaces
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// JSON feature collection to read ('-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub features: Option<PathBuf>,

    /// Filter options file (JSON, or YAML by .yaml/.yml extension)
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Override the component shortcut prefix
    #[arg(long, value_name = "PREFIX")]
    pub component_prefix: Option<String>,

    /// Override the component list path
    #[arg(long, value_name = "PATH")]
    pub component_path: Option<String>,

    /// Override the keyword fields (repeatable)
    #[arg(long = "keyword-field", value_name = "FIELD")]
    pub keyword_fields: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Names)]
    pub output: OutputFormat,

    /// Print the parsed query instead of filtering
    #[arg(long)]
    pub explain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The query text the positional words make up.
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Builds the filter options: the options file if given, then flag
/// overrides.
pub fn load_options(cli: &Cli) -> Result<FilterOptions> {
    let mut options = match &cli.options {
        Some(path) => read_options_file(path)?,
        None => FilterOptions::default(),
    };

    if let Some(prefix) = &cli.component_prefix {
        options = options.component_prefix(prefix.clone());
    }
    if let Some(path) = &cli.component_path {
        options = options.component_path(path.clone());
    }
    if !cli.keyword_fields.is_empty() {
        options = options.keyword_fields(cli.keyword_fields.iter().cloned());
    }

    options.validate()?;
    Ok(options)
}

fn read_options_file(path: &Path) -> Result<FilterOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading options file {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let options = if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing YAML options {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON options {}", path.display()))?
    };
    debug!("loaded options from {}", path.display());
    Ok(options)
}

/// Reads the feature collection from `path`, or from `stdin` when the path
/// is absent or `-`.
pub fn load_features<R: Read>(path: Option<&Path>, mut stdin: R) -> Result<Vec<serde_json::Value>> {
    let (text, source) = match path {
        Some(p) if p != Path::new("-") => (
            fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
            p.display().to_string(),
        ),
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("reading features from stdin")?;
            (buf, "stdin".to_string())
        }
    };

    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing JSON from {}", source))?;
    let features = features_from_json(value).with_context(|| format!("loading {}", source))?;
    info!("loaded {} feature(s) from {}", features.len(), source);
    Ok(features)
}

/// Runs one invocation.
///
/// Results go to `out`; the match count goes to `err`.
pub fn run<R, W, E>(cli: &Cli, stdin: R, out: &mut W, err: &mut E) -> Result<()>
where
    R: Read,
    W: Write,
    E: Write,
{
    let filter = FeatureFilter::with_options(load_options(cli)?)?;
    let query_text = cli.query_text();

    if cli.explain {
        return explain(&filter.parse(&query_text), filter.options(), out);
    }

    let features = load_features(cli.features.as_deref(), stdin)?;
    let mut count = 0;
    let results = filter.filter_notify(&query_text, &features, |n| count = n);

    match cli.output {
        OutputFormat::Names => {
            for feature in &results {
                writeln!(out, "{}", feature_name(*feature))?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?,
        OutputFormat::Yaml => write!(out, "{}", serde_yaml::to_string(&results)?)?,
        OutputFormat::Count => {
            writeln!(out, "{}", count)?;
            return Ok(());
        }
    }

    writeln!(
        err,
        "{} feature{} match",
        count,
        if count == 1 { "" } else { "s" }
    )?;
    Ok(())
}

fn feature_name(feature: &serde_json::Value) -> Cow<'_, str> {
    feature
        .property("name")
        .display_text()
        .unwrap_or(Cow::Borrowed("(unnamed)"))
}

/// Writes a human-readable breakdown of a parsed query.
pub fn explain<W: Write>(query: &Query, options: &FilterOptions, out: &mut W) -> Result<()> {
    match query {
        Query::All => writeln!(out, "empty query: matches every feature")?,
        Query::Component { path, name, .. } => {
            writeln!(out, "query: {}", query)?;
            writeln!(out, "component {:?} listed in {}", name, path)?;
        }
        Query::Conditions { conditions, .. } => {
            writeln!(out, "query: {}", query)?;
            writeln!(out, "all of:")?;
            for condition in conditions {
                writeln!(out, "  {}", describe(condition, options))?;
            }
        }
    }
    Ok(())
}

fn describe(condition: &FilterCondition, options: &FilterOptions) -> String {
    let text = match condition {
        FilterCondition::Keyword { pattern, .. } => format!(
            "{:?} in {}",
            pattern.as_str(),
            options.keyword_fields.join(", ")
        ),
        FilterCondition::Property { path, pattern } => {
            format!("{} contains {:?}", path, pattern.as_str())
        }
        FilterCondition::Operator {
            path, op, value, ..
        } => format!("{} {} {}", path, op, value),
    };
    if condition.is_unsatisfiable() {
        format!("{} (never matches)", text)
    } else {
        text
    }
}
