//! Output formatting for classification results

use crate::findings::FindingsReport;
use crate::generate::GenerationOutcome;
use anyhow::{Context, Result};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// Formatter for findings reports and generation outcomes.
pub struct OutputFormatter {
    format: OutputFormat,
    use_color: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            use_color: atty::is(atty::Stream::Stdout),
        }
    }

    pub fn format_report(&self, report: &FindingsReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize findings to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize findings to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(report)),
        }
    }

    pub fn format_outcome(&self, outcome: &GenerationOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(outcome)
                .context("Failed to serialize outcome to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(outcome).context("Failed to serialize outcome to YAML")
            }
            OutputFormat::Human => {
                let describe = |written: bool| if written { "written" } else { "skipped" };
                Ok(format!(
                    "Dockerfile: {}\n.dockerignore: {}",
                    describe(outcome.dockerfile_written),
                    describe(outcome.dockerignore_written)
                ))
            }
        }
    }

    fn format_human(&self, report: &FindingsReport) -> String {
        let mut out = String::new();
        out.push_str(&self.header("Classification"));
        out.push_str(&format!("  Language:     {}\n", report.language));
        out.push_str(&format!("  Framework:    {}\n", report.framework));
        if let Some(entry) = &report.entry_point {
            out.push_str(&format!("  Entry point:  {}\n", entry));
        }
        out.push_str(&format!("  Architecture: {}\n", report.architecture));
        out.push_str(&format!("  Confidence:   {:.2}\n", report.confidence));
        if let Some(provider) = &report.refined_by {
            out.push_str(&format!("  Refined by:   {}\n", provider));
        }
        if !report.detected_files.is_empty() {
            out.push_str(&format!(
                "  Signals:      {}\n",
                report.detected_files.join(", ")
            ));
        }
        if !report.dependencies.is_empty() {
            let shown: Vec<&str> = report
                .dependencies
                .iter()
                .take(10)
                .map(String::as_str)
                .collect();
            let suffix = if report.dependencies.len() > 10 {
                format!(" (+{} more)", report.dependencies.len() - 10)
            } else {
                String::new()
            };
            out.push_str(&format!("  Dependencies: {}{}\n", shown.join(", "), suffix));
        }
        out
    }

    fn header(&self, text: &str) -> String {
        if self.use_color {
            format!("\x1b[1m{}\x1b[0m\n", text)
        } else {
            format!("{}\n", text)
        }
    }
}
