//! Rendering of selections, warnings and criteria summaries

use anyhow::{Context, Result};
use colored::Colorize;
use fileselect_core::{MatchingCriteria, RuleErrors, Selection, SortType};

/// Output format for the `select` command
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse the configured default, falling back to text
    pub fn from_config(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "text" => Self::Text,
            other => {
                log::warn!("Unknown output format '{other}' in configuration, using text");
                Self::Text
            }
        }
    }
}

/// Render the selected paths
pub fn render_selection(selection: &Selection, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(selection
            .paths
            .iter()
            .map(|p| format!("{}\n", p.display()))
            .collect()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&selection.report())
                .context("Failed to serialize selection")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Render rule errors as warning lines
pub fn render_warnings(errors: &RuleErrors) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}\n", "warning".yellow().bold(), e))
        .collect()
}

/// Human readable summary of validated criteria
pub fn render_summary(criteria: &MatchingCriteria) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "Include:".bold()));
    for pattern in &criteria.include {
        output.push_str(&format!("  {pattern}\n"));
    }

    if !criteria.exclude.is_empty() {
        output.push_str(&format!("{}\n", "Exclude:".bold()));
        for pattern in &criteria.exclude {
            output.push_str(&format!("  {pattern}\n"));
        }
    }

    let ordering = &criteria.ordering_criteria;
    if ordering.sort_by.is_empty() {
        output.push_str("Ordering: none (all matches are selected)\n");
        return output;
    }

    output.push_str(&format!("{} {}\n", "Ordering regex:".bold(), ordering.regex));
    output.push_str(&format!("{}\n", "Sort rules (last listed is primary):".bold()));
    for (index, rule) in ordering.sort_by.iter().enumerate() {
        let direction = if rule.ascending {
            "ascending"
        } else {
            "descending"
        };
        let mut line = format!("  {index}. {}({}) {direction}", rule.sort_type, rule.regex_key);
        if rule.sort_type == SortType::Timestamp {
            line.push_str(&format!(
                " layout={} location={}",
                rule.layout.as_deref().unwrap_or_default(),
                rule.location.as_deref().filter(|l| !l.is_empty()).unwrap_or("UTC")
            ));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileselect_core::{RuleError, SortRuleConfig};
    use std::path::PathBuf;

    fn no_color() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_render_text_one_path_per_line() {
        let selection = Selection::new(vec![
            PathBuf::from("/var/log/a.log"),
            PathBuf::from("/var/log/b.log"),
        ]);
        let text = render_selection(&selection, OutputFormat::Text).unwrap();
        assert_eq!(text, "/var/log/a.log\n/var/log/b.log\n");
    }

    #[test]
    fn test_render_json_includes_errors() {
        let mut errors = RuleErrors::new();
        errors.push(RuleError::MissingLayout { index: 1 });
        let selection = Selection::with_errors(vec![PathBuf::from("/var/log/a.log")], errors);

        let json = render_selection(&selection, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["paths"][0], "/var/log/a.log");
        assert_eq!(value["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_render_warnings() {
        no_color();
        let mut errors = RuleErrors::new();
        errors.push(RuleError::MissingLayout { index: 0 });
        assert_eq!(
            render_warnings(&errors),
            "warning: sort rule 0 (timestamp): 'layout' must be specified\n"
        );
    }

    #[test]
    fn test_summary_lists_rules() {
        no_color();
        let criteria = MatchingCriteria::new(["/var/log/*.log"]).with_ordering(
            r"(?P<d>\d{8})\.(?P<n>\d+)",
            vec![
                SortRuleConfig::numeric("n").with_ascending(true),
                SortRuleConfig::timestamp("d", "%Y%m%d"),
            ],
        );

        let summary = render_summary(&criteria);
        assert!(summary.contains("  /var/log/*.log\n"));
        assert!(summary.contains("0. numeric(n) ascending"));
        assert!(summary.contains("1. timestamp(d) descending layout=%Y%m%d location=UTC"));
    }

    #[test]
    fn test_format_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from_config("yaml"), OutputFormat::Text);
    }
}
