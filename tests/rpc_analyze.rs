use jslens::analyzer::FeatureReport;
use jslens::error::SummarizationError;
use jslens::rpc::{self, App};
use jslens::summarize::Summarizer;
use serde_json::{Value, json};

struct FixedSummarizer {
    reply: Result<String, String>,
}

impl Summarizer for FixedSummarizer {
    fn summarize(
        &self,
        _source: &str,
        _facts: &FeatureReport,
    ) -> Result<String, SummarizationError> {
        self.reply
            .clone()
            .map_err(SummarizationError::new)
    }
}

fn app_with(reply: Result<String, String>) -> App {
    App::new(Some(Box::new(FixedSummarizer { reply }))).unwrap()
}

#[test]
fn analyze_code_returns_basic_report() {
    let mut app = App::new(None).unwrap();
    let result = rpc::handle_method(
        &mut app,
        "analyze_code",
        json!({"code": "const a = [1,2,3]; const b = a.map(x => x*2);"}),
    )
    .unwrap();

    assert_eq!(result["num_variables"], 2);
    assert_eq!(result["num_arrow_functions"], 1);
    assert_eq!(result["array_operations"], json!(["map"]));
    assert!(result["suggestions"].is_array());
    // Basic variant carries no extended fields on the wire.
    assert!(result.get("loops").is_none());
    assert!(result.get("unique_identifiers").is_none());
}

#[test]
fn analyze_returns_facts_and_commentary() {
    let mut app = app_with(Ok("looks reasonable".to_string()));
    let result = rpc::handle_method(
        &mut app,
        "analyze",
        json!({"code": "function f(){} for (;;) {}"}),
    )
    .unwrap();

    assert_eq!(result["static_analysis"]["num_functions"], 1);
    assert_eq!(result["static_analysis"]["loops"], json!(["ForStatement"]));
    assert_eq!(result["ai_analysis"], json!("looks reasonable"));
}

#[test]
fn summarizer_failure_degrades_to_embedded_error() {
    let mut app = app_with(Err("quota exhausted".to_string()));
    let result = rpc::handle_method(&mut app, "analyze", json!({"code": "const a = 1;"})).unwrap();

    assert_eq!(result["static_analysis"]["num_variables"], 1);
    let message = result["ai_analysis"]["error"].as_str().unwrap();
    assert!(message.contains("quota exhausted"));
}

#[test]
fn missing_summarizer_is_reported_not_fatal() {
    let mut app = App::new(None).unwrap();
    let result = rpc::handle_method(&mut app, "analyze", json!({"code": "const a = 1;"})).unwrap();

    assert_eq!(result["static_analysis"]["num_variables"], 1);
    let message = result["ai_analysis"]["error"].as_str().unwrap();
    assert!(message.contains("no summarizer configured"));
}

#[test]
fn summarize_false_skips_commentary() {
    let mut app = app_with(Ok("unused".to_string()));
    let result = rpc::handle_method(
        &mut app,
        "analyze",
        json!({"code": "const a = 1;", "summarize": false}),
    )
    .unwrap();

    assert!(result.get("ai_analysis").is_none());
    assert!(result.get("static_analysis").is_some());
}

#[test]
fn empty_code_is_rejected() {
    let mut app = App::new(None).unwrap();
    for code in ["", "   ", "\n\t"] {
        let err = rpc::handle_method(&mut app, "analyze_code", json!({"code": code})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid code. Please provide a non-empty string."
        );
    }
}

#[test]
fn oversized_code_is_rejected() {
    // Same boundary check the CLI analyze path runs before parsing.
    let big = format!("// {}", "x".repeat(1_000_001));
    let err = rpc::validate_code(&big).unwrap_err();
    assert!(err.to_string().contains("code too large"));
}

#[test]
fn invalid_syntax_surfaces_as_parse_error() {
    let mut app = App::new(None).unwrap();
    let err = rpc::handle_method(&mut app, "analyze", json!({"code": "function f( {"})).unwrap_err();
    assert!(err.to_string().contains("parse error"));
}

#[test]
fn unknown_method_is_an_error() {
    let mut app = App::new(None).unwrap();
    let err = rpc::handle_method(&mut app, "bogus", json!({})).unwrap_err();
    assert!(err.to_string().contains("unknown method"));
}

#[test]
fn one_shot_call_wraps_result() {
    let response = rpc::call(
        "analyze_code".to_string(),
        r#"{"code":"function f(){}"}"#,
        "7",
        None,
    )
    .unwrap();
    let value: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["result"]["num_functions"], 1);
    assert!(value.get("error").is_none());
}

#[test]
fn one_shot_call_wraps_errors() {
    let response = rpc::call("analyze_code".to_string(), r#"{"code":""}"#, "1", None).unwrap();
    let value: Value = serde_json::from_str(&response).unwrap();
    assert!(value.get("result").is_none());
    assert!(
        value["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Invalid code")
    );
}

#[test]
fn list_methods_names_both_analyses() {
    let mut app = App::new(None).unwrap();
    let result = rpc::handle_method(&mut app, "list_methods", json!({})).unwrap();
    let names: Vec<&str> = result["names"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert!(names.contains(&"analyze"));
    assert!(names.contains(&"analyze_code"));
}
