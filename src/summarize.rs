use crate::analyzer::FeatureReport;
use crate::config::Config;
use crate::error::SummarizationError;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Opaque provider of free-text commentary on a source file and its
/// extracted facts. The crate never inspects or validates the returned text.
pub trait Summarizer {
    fn summarize(&self, source: &str, facts: &FeatureReport)
    -> Result<String, SummarizationError>;
}

/// Render the review request handed to the provider: the code, the
/// serialized facts, and the commentary categories expected back as JSON.
pub fn build_prompt(source: &str, facts: &FeatureReport) -> String {
    let facts_json = serde_json::to_string_pretty(facts).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Analyze the following JavaScript code and provide insights:\n\n\
{source}\n\n\
Static analysis results:\n\
{facts_json}\n\n\
Please provide a detailed analysis including:\n\
1. Code quality assessment\n\
2. Potential improvements and best practices\n\
3. Performance considerations\n\
4. Security concerns (if any)\n\
5. Readability and maintainability suggestions\n\
6. Any design patterns or anti-patterns identified\n\
7. Suggestions for error handling and edge cases\n\
8. Scalability considerations\n\n\
Format your response as a JSON object with these categories as keys.\n"
    )
}

/// Summarizer backed by an external command. The prompt is piped to the
/// command's stdin and its stdout is returned verbatim, so any model CLI can
/// stand in for the hosted provider.
pub struct CommandSummarizer {
    command: Vec<String>,
}

impl CommandSummarizer {
    pub fn new(command_line: &str) -> Option<Self> {
        let command: Vec<String> = command_line
            .split_whitespace()
            .map(|part| part.to_string())
            .collect();
        if command.is_empty() {
            return None;
        }
        Some(Self { command })
    }

    /// Build from [`Config`]; `None` when no command is configured.
    pub fn from_config() -> Option<Self> {
        Config::get()
            .summarizer_cmd
            .as_deref()
            .and_then(Self::new)
    }
}

impl Summarizer for CommandSummarizer {
    fn summarize(
        &self,
        source: &str,
        facts: &FeatureReport,
    ) -> Result<String, SummarizationError> {
        let prompt = build_prompt(source, facts);
        let mut cmd = Command::new(&self.command[0]);
        cmd.args(&self.command[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = cmd.spawn().map_err(|err| {
            SummarizationError::new(format!("failed to start {}: {err}", self.command[0]))
        })?;
        // The prompt goes in from its own thread: stdout must be drained
        // while stdin is written or both pipes can fill and stall.
        let stdin = child.stdin.take();
        let prompt_writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(prompt.as_bytes())?;
            }
            Ok(())
        });
        let output = child.wait_with_output().map_err(|err| {
            SummarizationError::new(format!("{} did not finish: {err}", self.command[0]))
        })?;
        match prompt_writer.join() {
            // A provider may legitimately exit before reading the whole prompt.
            Ok(Err(err)) if err.kind() != io::ErrorKind::BrokenPipe => {
                return Err(SummarizationError::new(format!(
                    "failed to send prompt: {err}"
                )));
            }
            Ok(_) => {}
            Err(_) => {
                return Err(SummarizationError::new("prompt writer thread panicked"));
            }
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SummarizationError::new(format!(
                "{} exited with {}: {}",
                self.command[0],
                output.status,
                stderr.trim()
            )));
        }
        let text = String::from_utf8(output.stdout)
            .map_err(|_| SummarizationError::new("provider returned non-UTF8 output"))?;
        let text = text.trim();
        if text.is_empty() {
            return Err(SummarizationError::new("provider returned empty output"));
        }
        Ok(text.to_string())
    }
}
