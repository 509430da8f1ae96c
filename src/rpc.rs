use crate::analyzer::{self, Variant};
use crate::config::Config;
use crate::parser::JsParser;
use crate::summarize::Summarizer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::{self, BufRead, Write};

#[derive(Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    id: Value,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Serialize)]
pub struct RpcResponse {
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Serialize)]
struct RpcError {
    message: String,
}

#[derive(Deserialize)]
struct AnalyzeCodeParams {
    #[serde(alias = "source", alias = "js")]
    code: String,
}

#[derive(Deserialize)]
struct AnalyzeParams {
    #[serde(alias = "source", alias = "js")]
    code: String,
    /// Forward code and facts to the configured commentary provider
    /// (default: true). Provider failure degrades to an embedded error.
    summarize: Option<bool>,
}

const METHOD_LIST: &[&str] = &["analyze", "analyze_code", "help", "list_methods"];

struct MethodDoc {
    name: &'static str,
    summary: &'static str,
    key_params: &'static [&'static str],
}

const METHOD_DOCS: &[MethodDoc] = &[
    MethodDoc {
        name: "analyze",
        summary: "Extended static analysis (functions, variables, loops, conditionals, identifiers, array method calls) plus AI commentary on the code.",
        key_params: &["code", "summarize"],
    },
    MethodDoc {
        name: "analyze_code",
        summary: "Basic static analysis with advisory suggestions derived from the extracted facts.",
        key_params: &["code"],
    },
    MethodDoc {
        name: "help",
        summary: "Show RPC help and examples.",
        key_params: &[],
    },
    MethodDoc {
        name: "list_methods",
        summary: "List supported methods with short descriptions.",
        key_params: &[],
    },
];

fn method_docs_json() -> Vec<Value> {
    METHOD_DOCS
        .iter()
        .map(|doc| {
            json!({
                "name": doc.name,
                "summary": doc.summary,
                "key_params": doc.key_params,
            })
        })
        .collect()
}

fn method_help() -> Value {
    json!({
        "summary": "jslens parses JavaScript, extracts syntax-tree facts, and serves JSONL RPC over stdin/stdout.",
        "methods": METHOD_LIST,
        "method_docs": method_docs_json(),
        "examples": [
            { "method": "analyze_code", "params": { "code": "const xs = [1,2,3].map(x => x * 2);" } },
            { "method": "analyze", "params": { "code": "function f() {}", "summarize": false } },
        ],
        "cli_examples": [
            r#"jslens analyze --code 'const a = 1;'"#,
            r#"jslens request --method analyze_code --params '{"code":"function f(){}"}'"#,
            "jslens serve",
        ]
    })
}

/// Boundary validation shared by the RPC methods and the CLI `analyze` path.
pub fn validate_code(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        anyhow::bail!("Invalid code. Please provide a non-empty string.");
    }
    let max_bytes = Config::get().max_code_bytes;
    if code.len() > max_bytes {
        eprintln!(
            "jslens: Security: code too large: {} bytes (max: {})",
            code.len(),
            max_bytes
        );
        anyhow::bail!("code too large: {} bytes (max: {})", code.len(), max_bytes);
    }
    Ok(())
}

/// Run the JSONL RPC loop over stdin/stdout until EOF. The parser and the
/// summarizer are constructed once up front and reused across requests.
pub fn serve(summarizer: Option<Box<dyn Summarizer>>) -> Result<()> {
    let mut app = App::new(summarizer)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(value) => value,
            Err(err) => {
                eprintln!("jslens: stdin error: {err}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RpcRequest>(&line) {
            Ok(request) => app.handle_request(request),
            Err(err) => error_response(Value::Null, &format!("invalid request: {err}")),
        };

        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }

    Ok(())
}

/// Run a single request and return the serialized response (CLI one-shot).
pub fn call(
    method: String,
    params_raw: &str,
    id_raw: &str,
    summarizer: Option<Box<dyn Summarizer>>,
) -> Result<String> {
    let params: Value = serde_json::from_str(params_raw).with_context(|| "parse params JSON")?;
    let id = parse_value(id_raw);
    let mut app = App::new(summarizer)?;
    let request = RpcRequest { id, method, params };
    let response = app.handle_request(request);
    Ok(serde_json::to_string(&response)?)
}

pub struct App {
    parser: JsParser,
    summarizer: Option<Box<dyn Summarizer>>,
}

impl App {
    pub fn new(summarizer: Option<Box<dyn Summarizer>>) -> Result<Self> {
        Ok(Self {
            parser: JsParser::new()?,
            summarizer,
        })
    }

    pub fn handle_request(&mut self, req: RpcRequest) -> RpcResponse {
        let id = req.id.clone();
        let result = handle_method(self, &req.method, req.params);

        match result {
            Ok(value) => RpcResponse {
                id,
                result: Some(value),
                error: None,
            },
            Err(err) => error_response(id, &err.to_string()),
        }
    }
}

pub fn handle_method(app: &mut App, method: &str, params: Value) -> Result<Value> {
    match method {
        "analyze_code" => {
            let params: AnalyzeCodeParams =
                serde_json::from_value(params).with_context(|| "analyze_code params")?;
            validate_code(&params.code)?;
            let tree = app.parser.parse(&params.code)?;
            let report = analyzer::extract(&tree, Variant::Basic)?;
            Ok(serde_json::to_value(report)?)
        }
        "analyze" => {
            let params: AnalyzeParams =
                serde_json::from_value(params).with_context(|| "analyze params")?;
            validate_code(&params.code)?;
            let tree = app.parser.parse(&params.code)?;
            let report = analyzer::extract(&tree, Variant::Extended)?;
            let commentary = if params.summarize.unwrap_or(true) {
                let ai = match app.summarizer.as_deref() {
                    Some(summarizer) => summarizer
                        .summarize(&params.code, &report)
                        .map(Value::String),
                    None => Err(crate::error::SummarizationError::new(
                        "no summarizer configured (set JSLENS_SUMMARIZER_CMD)",
                    )),
                };
                // Partial success: keep the facts, embed the provider error.
                Some(match ai {
                    Ok(text) => text,
                    Err(err) => json!({ "error": err.to_string() }),
                })
            } else {
                None
            };
            let mut combined = json!({ "static_analysis": report });
            if let Some(ai_value) = commentary {
                combined["ai_analysis"] = ai_value;
            }
            Ok(combined)
        }
        "help" => Ok(method_help()),
        "list_methods" => Ok(json!({
            "methods": method_docs_json(),
            "names": METHOD_LIST,
        })),
        other => anyhow::bail!("unknown method: {other}"),
    }
}

fn error_response(id: Value, message: &str) -> RpcResponse {
    RpcResponse {
        id,
        result: None,
        error: Some(RpcError {
            message: message.to_string(),
        }),
    }
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
