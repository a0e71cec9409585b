//! Output formatting for build reports, lookups, validation results and
//! configuration, as JSON, YAML or human-readable text.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::RegistryConfig;
use crate::lookup::LookupResponse;
use crate::output::OutputSection;
use crate::pipeline::BuildReport;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Result of validating a single descriptor file
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub file: PathBuf,
    pub name: String,
    pub valid: bool,
    pub violations: Vec<String>,
}

impl ValidationOutcome {
    pub fn new(file: PathBuf, name: String, violations: Vec<String>) -> Self {
        Self {
            file,
            name,
            valid: violations.is_empty(),
            violations,
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &BuildReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "build report"),
            OutputFormat::Yaml => to_yaml(report, "build report"),
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    /// Lookups always print the response body; human output is pretty JSON
    pub fn format_lookup(&self, response: &LookupResponse) -> Result<String> {
        match self.format {
            OutputFormat::Yaml => to_yaml(response, "lookup response"),
            OutputFormat::Json | OutputFormat::Human => to_json(response, "lookup response"),
        }
    }

    pub fn format_validation(&self, outcome: &ValidationOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(outcome, "validation result"),
            OutputFormat::Yaml => to_yaml(outcome, "validation result"),
            OutputFormat::Human => Ok(self.format_validation_human(outcome)),
        }
    }

    pub fn format_config(&self, config: &RegistryConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&config.to_display_map(), "config"),
            OutputFormat::Yaml => to_yaml(&config.to_display_map(), "config"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_report_human(&self, report: &BuildReport) -> String {
        let mut output = String::new();

        if report.is_clean() {
            output.push_str("\u{2713} Registry Built\n");
        } else {
            output.push_str("\u{26A0} Registry Built (Items Skipped)\n");
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        output.push_str(&format!("Output:  {}\n", report.output_dir.display()));
        output.push_str(&format!("Index:   {}\n\n", report.index_path.display()));

        output.push_str("Items Written:\n");
        let sections = OutputSection::ALL;
        for (i, section) in sections.iter().enumerate() {
            let connector = if i == sections.len() - 1 { "\u{2514}" } else { "\u{251C}" };
            output.push_str(&format!(
                "{}\u{2500} {:<11} {}\n",
                connector,
                format!("{}:", section.dir_name()),
                report.written_in(*section)
            ));
        }

        if !report.skipped.is_empty() {
            output.push_str("\n\u{26A0} Skipped:\n");
            for skipped in &report.skipped {
                output.push_str(&format!(
                    "  - {} ({}): {}\n",
                    skipped.name,
                    skipped.section.dir_name(),
                    skipped.reason
                ));
            }
        }

        output.push_str(&format!("\nBuilt in {}ms\n", report.duration.as_millis()));
        output
    }

    fn format_validation_human(&self, outcome: &ValidationOutcome) -> String {
        let mut output = String::new();
        if outcome.valid {
            output.push_str(&format!(
                "\u{2713} {} is valid ({})\n",
                outcome.name,
                outcome.file.display()
            ));
        } else {
            output.push_str(&format!(
                "\u{2717} {} is invalid ({})\n",
                outcome.name,
                outcome.file.display()
            ));
            for violation in &outcome.violations {
                output.push_str(&format!("  - {}\n", violation));
            }
        }
        output
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::NotFound;
    use crate::output::WrittenItem;
    use crate::pipeline::SkippedItem;
    use std::time::Duration;

    fn report(skipped: Vec<SkippedItem>) -> BuildReport {
        BuildReport {
            output_dir: PathBuf::from("/ws/out"),
            index_path: PathBuf::from("/ws/out/index.json"),
            written: vec![WrittenItem {
                name: "orb".to_string(),
                section: OutputSection::Components,
                path: PathBuf::from("/ws/out/components/orb.json"),
            }],
            skipped,
            duration: Duration::from_millis(7),
        }
    }

    #[test]
    fn test_json_report() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_report(&report(vec![])).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["written"][0]["name"], "orb");
        assert_eq!(parsed["duration_ms"], 7);
    }

    #[test]
    fn test_yaml_report() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format_report(&report(vec![])).unwrap();
        assert!(output.contains("name: orb"));
        assert!(output.contains("section: components"));
    }

    #[test]
    fn test_human_report() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_report(&report(vec![])).unwrap();
        assert!(output.contains("Registry Built"));
        assert!(output.contains("components:"));
        assert!(output.contains("Built in 7ms"));
        assert!(!output.contains("Skipped"));
    }

    #[test]
    fn test_human_report_lists_skipped() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format_report(&report(vec![SkippedItem {
                name: "broken".to_string(),
                section: OutputSection::Blocks,
                reason: "[NonEmptyFiles] item has no files".to_string(),
            }]))
            .unwrap();
        assert!(output.contains("Items Skipped"));
        assert!(output.contains("broken (blocks): [NonEmptyFiles]"));
    }

    #[test]
    fn test_lookup_human_is_json() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let response = LookupResponse::NotFound(NotFound {
            error: "Component \"x\" not found.".to_string(),
            suggestions: "none".to_string(),
        });
        let output = formatter.format_lookup(&response).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["error"], "Component \"x\" not found.");
    }

    #[test]
    fn test_validation_human() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let ok = ValidationOutcome::new(PathBuf::from("orb.json"), "orb".to_string(), vec![]);
        assert!(formatter.format_validation(&ok).unwrap().contains("orb is valid"));

        let bad = ValidationOutcome::new(
            PathBuf::from("x.json"),
            "x".to_string(),
            vec!["[NonEmptyFiles] item has no files".to_string()],
        );
        assert!(!bad.valid);
        let output = formatter.format_validation(&bad).unwrap();
        assert!(output.contains("x is invalid"));
        assert!(output.contains("[NonEmptyFiles]"));
    }

    #[test]
    fn test_config_formats() {
        let config = RegistryConfig::for_root("/ws");
        let json = OutputFormatter::new(OutputFormat::Json)
            .format_config(&config)
            .unwrap();
        assert!(json.contains("\"library_slug\": \"elevenlabs-ui\""));

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_config(&config)
            .unwrap();
        assert!(human.contains("Registry Configuration:"));
    }
}
