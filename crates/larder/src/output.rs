use colored::*;
use larder_core::ValidationIssue;
use serde::Serialize;

/// How command results reach the editor's terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    /// One JSON document on stdout once the command finishes.
    Json,
    /// Errors and primary output only.
    Quiet,
}

/// One line of a `--json` run. `details` carries the document path of a
/// checklist issue, the webhook target, or a rendered outline.
#[derive(Debug, Serialize, Clone)]
pub struct JsonResultEntry {
    #[serde(rename = "type")]
    pub result_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub results: Vec<JsonResultEntry>,
}

/// Collects everything a command has to say about a document.
pub struct Reporter {
    mode: OutputMode,
    json_results: Vec<JsonResultEntry>,
}

impl Reporter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            json_results: Vec::new(),
        }
    }

    fn record(&mut self, kind: &str, message: &str, details: Option<&str>) {
        self.json_results.push(JsonResultEntry {
            result_type: kind.to_string(),
            message: message.to_string(),
            details: details.map(str::to_string),
        });
    }

    /// Failures that make the command exit non-zero. Shown even with `--quiet`.
    pub fn error(&mut self, message: &str) {
        match self.mode {
            OutputMode::Json => self.record("error", message, None),
            OutputMode::Human | OutputMode::Quiet => {
                eprintln!("{} {message}", "ERROR:".red());
            }
        }
    }

    /// Problems the command shrugs off, such as a webhook the site refused.
    pub fn warning(&mut self, message: &str) {
        match self.mode {
            OutputMode::Json => self.record("warning", message, None),
            OutputMode::Human => eprintln!("{} {message}", "WARNING:".yellow()),
            OutputMode::Quiet => {}
        }
    }

    pub fn success(&mut self, message: &str) {
        self.success_entry(message, None);
    }

    /// A success whose details only appear in `--json` output.
    pub fn success_with_details(&mut self, message: &str, details: &str) {
        self.success_entry(message, Some(details));
    }

    fn success_entry(&mut self, message: &str, details: Option<&str>) {
        match self.mode {
            OutputMode::Json => self.record("success", message, details),
            OutputMode::Human => println!("{} {message}", "✓".green()),
            OutputMode::Quiet => {}
        }
    }

    pub fn info(&mut self, message: &str) {
        match self.mode {
            OutputMode::Json => self.record("info", message, None),
            OutputMode::Human => println!("{} {message}", "INFO:".blue()),
            OutputMode::Quiet => {}
        }
    }

    /// A heading above a command's output; human mode only.
    pub fn section(&mut self, title: &str) {
        if self.mode == OutputMode::Human {
            println!("{}", format!("=== {title} ===").cyan());
        }
    }

    /// Reports every checklist issue as an error, in order.
    pub fn report_issues(&mut self, issues: &[ValidationIssue]) {
        for issue in issues {
            match self.mode {
                OutputMode::Json => self.record("error", &issue.message, Some(&issue.path)),
                OutputMode::Human | OutputMode::Quiet => {
                    eprintln!("{} {}: {}", "ERROR:".red(), issue.path.bold(), issue.message);
                }
            }
        }
    }

    /// Prints a command's primary output verbatim. Shown in quiet mode too.
    pub fn output(&mut self, title: &str, body: &str) {
        match self.mode {
            OutputMode::Human | OutputMode::Quiet => {
                print!("{body}");
                if !body.ends_with('\n') {
                    println!();
                }
            }
            OutputMode::Json => self.record("output", title, Some(body)),
        }
    }

    /// Flushes the `--json` document; a no-op in the other modes.
    pub fn finish(&self) {
        if self.mode != OutputMode::Json {
            return;
        }
        let output = JsonOutput {
            results: self.json_results.clone(),
        };
        if let Ok(json) = serde_json::to_string_pretty(&output) {
            println!("{json}");
        }
    }
}
