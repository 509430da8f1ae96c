use anyhow::Result;
use clap::Parser;
use jslens::summarize::{CommandSummarizer, Summarizer};
use jslens::{analyzer, cli, parser, rpc};
use serde_json::json;
use std::io::Read;

fn env_summarizer() -> Option<Box<dyn Summarizer>> {
    CommandSummarizer::from_config().map(|value| Box::new(value) as Box<dyn Summarizer>)
}

fn main() -> Result<()> {
    let args = cli::Args::parse();

    match args.command {
        cli::Command::Analyze {
            file,
            code,
            variant,
            summarize,
        } => {
            let source = match (file, code) {
                (Some(path), _) => std::fs::read_to_string(&path)?,
                (None, Some(inline)) => inline,
                (None, None) => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            rpc::validate_code(&source)?;
            let mut parser = parser::JsParser::new()?;
            let tree = parser.parse(&source)?;
            let report = analyzer::extract(&tree, variant)?;
            let output = if summarize {
                let ai = match env_summarizer() {
                    Some(summarizer) => match summarizer.summarize(&source, &report) {
                        Ok(text) => json!(text),
                        Err(err) => json!({ "error": err.to_string() }),
                    },
                    None => {
                        json!({ "error": "no summarizer configured (set JSLENS_SUMMARIZER_CMD)" })
                    }
                };
                json!({ "static_analysis": report, "ai_analysis": ai })
            } else {
                serde_json::to_value(&report)?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        cli::Command::Serve => rpc::serve(env_summarizer()),
        cli::Command::Request { method, params, id } => {
            let response = rpc::call(method, &params, &id, env_summarizer())?;
            println!("{response}");
            Ok(())
        }
    }
}
