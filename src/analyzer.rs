use crate::ast::{AstNode, MAX_TREE_DEPTH};
use crate::error::AnalysisError;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;

/// Array-style methods whose call sites are recorded, in the fixed set the
/// advisory rules reason about.
const ARRAY_OPERATIONS: &[&str] = &["map", "filter", "reduce", "forEach"];

const SUGGEST_FILTER_REDUCE: &str =
    "Consider using 'filter' or 'reduce' for more complex array transformations.";
const SUGGEST_ARROW_FUNCTIONS: &str =
    "Good use of arrow functions! They're great for short, simple functions.";
const SUGGEST_FUNCTIONAL_STYLE: &str =
    "Consider using array methods like map, filter, or reduce for more functional programming style.";

/// Which of the two analysis profiles to run.
///
/// `Basic` counts function declarations only and derives advisory
/// suggestions. `Extended` also counts function expressions and tracks
/// loops, conditionals, and unique identifiers, without suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    Basic,
    Extended,
}

/// Structured facts extracted from one syntax tree. Fresh per call; fields
/// outside the requested variant serialize as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureReport {
    pub num_functions: u32,
    pub num_arrow_functions: u32,
    pub num_variables: u32,
    pub array_operations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loops: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditionals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_identifiers: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Run the feature extraction over `tree`. Pure and idempotent; safe to call
/// from independent call sites in parallel since each call owns its report.
///
/// The walk is depth-first pre-order over an explicit heap stack, so tree
/// depth never translates into call-stack depth. Parser output always fits
/// within [`MAX_TREE_DEPTH`] (the parser enforces the same bound); a deeper
/// hand-built tree fails with `AnalysisError`.
pub fn extract(tree: &AstNode, variant: Variant) -> Result<FeatureReport, AnalysisError> {
    let mut report = FeatureReport::default();
    let extended = variant == Variant::Extended;
    if extended {
        report.loops = Some(Vec::new());
        report.conditionals = Some(0);
        report.unique_identifiers = Some(BTreeSet::new());
    }

    // Children are pushed in reverse so pop order matches source order.
    let mut stack: Vec<(&AstNode, usize)> = vec![(tree, 0)];
    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_TREE_DEPTH {
            return Err(AnalysisError::new(format!(
                "tree nesting exceeds {MAX_TREE_DEPTH} levels"
            )));
        }
        match node {
            AstNode::Program { body } => push_children(&mut stack, body, depth + 1),
            AstNode::VariableDeclaration { declarations } => {
                report.num_variables += declarations.len() as u32;
                if extended {
                    for decl in declarations {
                        if let Some(name) = &decl.name {
                            record_identifier(&mut report, name);
                        }
                    }
                }
                for decl in declarations.iter().rev() {
                    push_children(&mut stack, &decl.children, depth + 1);
                }
            }
            AstNode::FunctionDeclaration { name, children } => {
                report.num_functions += 1;
                if extended {
                    if let Some(name) = name {
                        record_identifier(&mut report, name);
                    }
                }
                push_children(&mut stack, children, depth + 1);
            }
            AstNode::FunctionExpression { name, children } => {
                if extended {
                    report.num_functions += 1;
                    if let Some(name) = name {
                        record_identifier(&mut report, name);
                    }
                }
                push_children(&mut stack, children, depth + 1);
            }
            AstNode::ArrowFunction { children } => {
                report.num_arrow_functions += 1;
                push_children(&mut stack, children, depth + 1);
            }
            AstNode::CallExpression { callee, arguments } => {
                if let AstNode::MemberExpression {
                    property: Some(name),
                    ..
                } = callee.as_ref()
                {
                    if ARRAY_OPERATIONS.contains(&name.as_str()) {
                        report.array_operations.push(name.clone());
                    }
                }
                push_children(&mut stack, arguments, depth + 1);
                stack.push((callee, depth + 1));
            }
            AstNode::MemberExpression { object, property } => {
                if extended {
                    if let Some(name) = property {
                        record_identifier(&mut report, name);
                    }
                }
                stack.push((object, depth + 1));
            }
            AstNode::Loop { kind, children } => {
                if let Some(loops) = report.loops.as_mut() {
                    loops.push(kind.as_str().to_string());
                }
                push_children(&mut stack, children, depth + 1);
            }
            AstNode::Conditional { children } => {
                if let Some(count) = report.conditionals.as_mut() {
                    *count += 1;
                }
                push_children(&mut stack, children, depth + 1);
            }
            AstNode::Identifier { name } => {
                if extended {
                    record_identifier(&mut report, name);
                }
            }
            AstNode::Other { children, .. } => push_children(&mut stack, children, depth + 1),
        }
    }

    if variant == Variant::Basic {
        report.suggestions = Some(suggestions(&report));
    }
    Ok(report)
}

fn push_children<'a>(stack: &mut Vec<(&'a AstNode, usize)>, children: &'a [AstNode], depth: usize) {
    for child in children.iter().rev() {
        stack.push((child, depth));
    }
}

fn record_identifier(report: &mut FeatureReport, name: &str) {
    if name.is_empty() {
        return;
    }
    if let Some(set) = report.unique_identifiers.as_mut() {
        set.insert(name.to_string());
    }
}

/// Advisory rules, evaluated after traversal as pure functions of the final
/// counts. All applicable rules fire, in this fixed order.
fn suggestions(report: &FeatureReport) -> Vec<String> {
    let mut out = Vec::new();
    let has = |op: &str| report.array_operations.iter().any(|name| name == op);
    if has("map") && !has("filter") && !has("reduce") {
        out.push(SUGGEST_FILTER_REDUCE.to_string());
    }
    if report.num_arrow_functions > 0 {
        out.push(SUGGEST_ARROW_FUNCTIONS.to_string());
    }
    if report.array_operations.is_empty() {
        out.push(SUGGEST_FUNCTIONAL_STYLE.to_string());
    }
    out
}
