//! End-to-end tests of the query language against realistic feature records.

use chromestatus_query::{
    classify, tokenize, ConditionSpec, FeatureFilter, FilterOptions, Query,
};
use insta::assert_snapshot;
use serde_json::{json, Value};

// ============================================================================
// Fixtures
// ============================================================================

fn feature(name: &str, summary: &str, desktop: Option<i64>, components: &[&str]) -> Value {
    json!({
        "name": name,
        "summary": summary,
        "comments": null,
        "browsers": {
            "chrome": {
                "desktop": desktop,
                "blink_components": components,
                "status": {"val": 5, "text": "Enabled by default"}
            },
            "ff": {"view": {"val": 1, "text": "Shipped/Shipping"}}
        }
    })
}

fn catalog() -> Vec<Value> {
    vec![
        feature("C++ features", "the quick fox", Some(40), &["Blink>CSS"]),
        feature("Container queries", "size queries for components", Some(50), &["Blink>CSS", "Blink>Layout"]),
        feature("WebGPU", "modern graphics", Some(60), &["Blink>WebGPU"]),
        feature("Storage buckets", "quick storage partitioning", None, &["Blink>Storage"]),
    ]
}

fn names<'a>(results: &[&'a Value]) -> Vec<&'a str> {
    results
        .iter()
        .map(|f| f["name"].as_str().unwrap_or_default())
        .collect()
}

fn run<'a>(query: &str, features: &'a [Value]) -> Vec<&'a str> {
    names(&FeatureFilter::new().filter(query, features))
}

// ============================================================================
// Grammar forms
// ============================================================================

#[test]
fn every_grammar_form_classifies() {
    let cases = [
        ("foo bar", vec![ConditionSpec::keyword("foo"), ConditionSpec::keyword("bar")]),
        (r#""exact phrase""#, vec![ConditionSpec::keyword("exact phrase")]),
        ("field:value", vec![ConditionSpec::property("field", "value")]),
        (
            r#"field:"quoted value""#,
            vec![ConditionSpec::property("field", "quoted value")],
        ),
        ("field<=10", vec![ConditionSpec::operator("field", "<=", "10")]),
        ("field==10", vec![ConditionSpec::operator("field", "==", "10")]),
        ("field=10", vec![ConditionSpec::operator("field", "=", "10")]),
    ];

    for (query, expected) in cases {
        assert_eq!(classify(&tokenize(query)), expected, "query: {}", query);
    }
}

// ============================================================================
// Behavior
// ============================================================================

#[test]
fn quoted_literal_exactness() {
    let features = catalog();
    assert_eq!(run(r#""quick fox""#, &features), ["C++ features"]);
    assert!(run("quick dog", &features).is_empty());
    assert_eq!(run("quick", &features), ["C++ features", "Storage buckets"]);
}

#[test]
fn operator_correctness() {
    let features = catalog();
    assert_eq!(
        run("browsers.chrome.desktop>=50", &features),
        ["Container queries", "WebGPU"]
    );
    assert_eq!(run("browsers.chrome.desktop<50", &features), ["C++ features"]);
    assert_eq!(run("browsers.chrome.desktop==60", &features), ["WebGPU"]);
    assert_eq!(run("browsers.chrome.desktop=60", &features), ["WebGPU"]);
}

#[test]
fn operator_skips_null_values() {
    let features = catalog();
    // Storage buckets has a null desktop milestone.
    assert_eq!(run("browsers.chrome.desktop>-1", &features).len(), 3);
}

#[test]
fn invalid_numeric_operand_never_matches() {
    let features = catalog();
    assert!(run("browsers.chrome.desktop>=notanumber", &features).is_empty());
}

#[test]
fn null_property_never_matches() {
    let features = catalog();
    assert!(run("browsers.chrome.bug:anything", &features).is_empty());
    assert!(run(r#"browsers.chrome.bug:"""#, &features).is_empty());
    assert!(run("comments:x", &features).is_empty());
}

#[test]
fn enum_like_properties_match_their_text() {
    let features = catalog();
    assert_eq!(run("browsers.ff.view:shipping", &features).len(), 4);
    assert!(run("browsers.ff.view:val", &features).is_empty());
}

#[test]
fn component_shortcut_exactness_and_precedence() {
    let features = catalog();
    assert_eq!(
        run("component:Blink>CSS extra-ignored-text", &features),
        ["C++ features", "Container queries"]
    );
    assert_eq!(run("component: Blink>Layout", &features), ["Container queries"]);
    assert!(run("component:Blink", &features).is_empty());
}

#[test]
fn case_insensitivity() {
    let features = vec![json!({"name": "foo bar"})];
    assert_eq!(run("FOO", &features), ["foo bar"]);
    assert_eq!(run("name:BAR", &features), ["foo bar"]);
}

#[test]
fn regex_metacharacter_safety() {
    let features = catalog();
    assert_eq!(run("C++", &features), ["C++ features"]);
    assert!(run("C.+", &features).is_empty());
    assert!(run("(", &features).is_empty());
}

#[test]
fn unterminated_quote_is_one_phrase() {
    let features = catalog();
    assert_eq!(run(r#""quick fox"#, &features), ["C++ features"]);
}

#[test]
fn keywords_and_properties_combine() {
    let features = catalog();
    assert_eq!(
        run("queries browsers.chrome.desktop>=50 name:container", &features),
        ["Container queries"]
    );
}

#[test]
fn canonical_text_reparses_to_same_results() {
    let features = catalog();
    let options = FilterOptions::default();
    for raw in [
        r#"quick   "storage partitioning""#,
        "browsers.chrome.desktop >= 50",
        r#"name : "Container q" queries"#,
        "component: Blink>CSS",
    ] {
        let query = Query::parse(raw, &options);
        let reparsed = Query::parse(&query.to_string(), &options);
        assert_eq!(
            names(&query.filter(&features)),
            names(&reparsed.filter(&features)),
            "query: {}",
            raw
        );
    }
}

#[test]
fn filtering_already_filtered_references() {
    let features = catalog();
    let query = Query::parse("quick", &FilterOptions::default());
    let first = query.filter(&features);
    let second = query.filter(&first);
    assert_eq!(first.len(), second.len());
}

#[test]
fn canonical_text_snapshots() {
    let options = FilterOptions::default();
    let canonical = |raw: &str| Query::parse(raw, &options).to_string();

    assert_snapshot!(canonical(r#"  quick   "storage partitioning" "#), @r#"quick "storage partitioning""#);
    assert_snapshot!(canonical("browsers.chrome.desktop >= 50"), @"browsers.chrome.desktop>=50");
    assert_snapshot!(canonical(r#"name : "Container q" queries"#), @r#"name:"Container q" queries"#);
    assert_snapshot!(canonical("component: Blink>CSS trailing"), @"component:Blink>CSS");
    assert_snapshot!(canonical(r#"owner:"a:b""#), @r#"owner:"a:b""#);
    assert_snapshot!(canonical("component :x"), @r#""component":x"#);
    assert_snapshot!(canonical("component :x component :y"), @r#""component":x component:y"#);
}
