use jslens::analyzer::{self, Variant};
use jslens::parser::JsParser;

const SUGGEST_FILTER_REDUCE: &str =
    "Consider using 'filter' or 'reduce' for more complex array transformations.";
const SUGGEST_ARROW_FUNCTIONS: &str =
    "Good use of arrow functions! They're great for short, simple functions.";
const SUGGEST_FUNCTIONAL_STYLE: &str =
    "Consider using array methods like map, filter, or reduce for more functional programming style.";

fn analyze(source: &str) -> analyzer::FeatureReport {
    let mut parser = JsParser::new().unwrap();
    let tree = parser.parse(source).unwrap();
    analyzer::extract(&tree, Variant::Basic).unwrap()
}

#[test]
fn map_with_arrow_function() {
    let report = analyze("const a = [1,2,3]; const b = a.map(x => x*2);");

    assert_eq!(report.num_variables, 2);
    assert_eq!(report.num_arrow_functions, 1);
    assert_eq!(report.array_operations, vec!["map"]);

    let suggestions = report.suggestions.as_deref().unwrap();
    assert!(suggestions.contains(&SUGGEST_FILTER_REDUCE.to_string()));
    assert!(suggestions.contains(&SUGGEST_ARROW_FUNCTIONS.to_string()));
    assert!(!suggestions.contains(&SUGGEST_FUNCTIONAL_STYLE.to_string()));
}

#[test]
fn plain_function_declarations() {
    let report = analyze("function f(){} function g(){}");

    assert_eq!(report.num_functions, 2);
    assert!(report.array_operations.is_empty());
    assert_eq!(
        report.suggestions.as_deref().unwrap(),
        &[SUGGEST_FUNCTIONAL_STYLE.to_string()]
    );
}

#[test]
fn function_expressions_not_counted_in_basic() {
    let report = analyze("const f = function() { return 1; };");
    assert_eq!(report.num_functions, 0);
    assert_eq!(report.num_variables, 1);
}

#[test]
fn array_operations_keep_source_order_and_duplicates() {
    let source = r#"
xs.map(double);
ys.map(triple);
zs.filter(keep);
items.forEach(print);
"#;
    let report = analyze(source);
    assert_eq!(report.array_operations, vec!["map", "map", "filter", "forEach"]);
    // filter is present, so the filter/reduce advisory must not fire.
    let suggestions = report.suggestions.as_deref().unwrap();
    assert!(suggestions.is_empty());
}

#[test]
fn non_array_member_calls_are_ignored() {
    let report = analyze("logger.warn('hi'); window.fetch('/x');");
    assert!(report.array_operations.is_empty());
}

#[test]
fn extraction_is_idempotent() {
    let mut parser = JsParser::new().unwrap();
    let tree = parser
        .parse("const a = [1]; a.map(x => x); function f(){}")
        .unwrap();
    let first = analyzer::extract(&tree, Variant::Basic).unwrap();
    let second = analyzer::extract(&tree, Variant::Basic).unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_syntax_is_a_parse_error() {
    let mut parser = JsParser::new().unwrap();
    let err = parser.parse("function f( {").unwrap_err();
    assert!(err.to_string().contains("parse error"));
}

#[test]
fn excessive_nesting_is_a_parse_error() {
    // Syntactically valid, but nested past the lowering bound. Must come
    // back as an error, never take down the process.
    let source = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
    let mut parser = JsParser::new().unwrap();
    let err = parser.parse(&source).unwrap_err();
    assert!(err.to_string().contains("parse error"));
    assert!(err.to_string().contains("nesting"));
}

#[test]
fn empty_source_parses_to_an_empty_report() {
    let report = analyze("");
    assert_eq!(report.num_functions, 0);
    assert_eq!(report.num_variables, 0);
    assert!(report.array_operations.is_empty());
}

#[test]
fn analyze_source_read_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "const nums = [1, 2, 3];").unwrap();
    writeln!(file, "nums.forEach(n => console.log(n));").unwrap();

    let source = std::fs::read_to_string(file.path()).unwrap();
    let report = analyze(&source);
    assert_eq!(report.num_variables, 1);
    assert_eq!(report.array_operations, vec!["forEach"]);
    assert_eq!(report.num_arrow_functions, 1);
}
