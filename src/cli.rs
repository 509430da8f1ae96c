use crate::analyzer::Variant;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jslens",
    version,
    about = "JavaScript static analysis v1",
    after_help = r#"Examples:
  jslens analyze --code 'const xs = [1,2,3].map(x => x * 2);'
  jslens analyze --file src/app.js --variant extended
  jslens analyze --file src/app.js --variant extended --summarize
  jslens request --method analyze_code --params '{"code":"function f(){}"}'
  jslens serve
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a JavaScript source and print the report as JSON.
    Analyze {
        /// Read the source from a file.
        #[arg(long, conflicts_with = "code")]
        file: Option<PathBuf>,
        /// Inline source text. Reads stdin when neither flag is given.
        #[arg(long)]
        code: Option<String>,
        /// Analysis profile: basic (with suggestions) or extended.
        #[arg(long, value_enum, default_value = "basic")]
        variant: Variant,
        /// Also request AI commentary from the configured provider.
        #[arg(long)]
        summarize: bool,
    },
    /// Run JSONL RPC server over stdin/stdout.
    Serve,
    /// Run a single JSONL request and exit.
    Request {
        #[arg(long)]
        method: String,
        #[arg(long, default_value = "{}")]
        params: String,
        #[arg(long, default_value = "1")]
        id: String,
    },
}
