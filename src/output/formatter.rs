//! Rendering of analysis and tailoring reports
//!
//! Console output is for humans reading a terminal; JSON mirrors the result
//! contract exposed to the UI layer; markdown is for saving alongside a
//! resume.

use crate::error::Result;
use crate::output::report::{AnalysisReport, TailoringReport};
use colored::Colorize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn parse(format: &str) -> std::result::Result<Self, String> {
        match format.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid output format: {}. Supported: console, json, markdown",
                format
            )),
        }
    }
}

pub fn format_analysis(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console_analysis(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Markdown => Ok(markdown_analysis(report)),
    }
}

pub fn format_tailoring(report: &TailoringReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console_tailoring(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Markdown => Ok(markdown_tailoring(report)),
    }
}

fn score_colored(score: u8) -> colored::ColoredString {
    let text = format!("{}%", score);
    if score >= 80 {
        text.green().bold()
    } else if score >= 60 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

fn console_analysis(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let result = &report.result;

    let _ = writeln!(out, "{}", "Resume Analysis".bold().underline());
    let _ = writeln!(out);
    if let Some(overall) = result.overall_match_score {
        let _ = writeln!(out, "  Overall match: {}", score_colored(overall));
    }
    let _ = writeln!(out, "  ATS score:     {}", score_colored(result.ats_score));

    if !result.matches.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Category breakdown".bold());
        for (category, category_match) in &result.matches {
            let _ = writeln!(
                out,
                "  {} — {} (weight {:.2})",
                category,
                score_colored(category_match.match_percentage),
                category_match.importance
            );
            if !category_match.matched_keywords.is_empty() {
                let matched: Vec<&str> = category_match
                    .matched_keywords
                    .iter()
                    .map(|k| k.display.as_str())
                    .collect();
                let _ = writeln!(out, "    matched: {}", matched.join(", ").green());
            }
            if !category_match.missing_keywords.is_empty() {
                let missing: Vec<&str> = category_match
                    .missing_keywords
                    .iter()
                    .map(|k| k.display.as_str())
                    .collect();
                let _ = writeln!(out, "    missing: {}", missing.join(", ").red());
            }
        }
    }

    if !result.suggestions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Suggestions".bold());
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, suggestion);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        format!(
            "Analyzed in {}ms against {} vocabulary terms",
            report.metadata.processing_time_ms, report.metadata.vocabulary_terms
        )
        .dimmed()
    );

    out
}

fn markdown_analysis(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let result = &report.result;

    let _ = writeln!(out, "# Resume Analysis");
    let _ = writeln!(out);
    if let Some(overall) = result.overall_match_score {
        let _ = writeln!(out, "- **Overall match:** {}%", overall);
    }
    let _ = writeln!(out, "- **ATS score:** {}%", result.ats_score);
    let _ = writeln!(out);

    if !result.matches.is_empty() {
        let _ = writeln!(out, "## Category breakdown");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Category | Match | Matched | Missing |");
        let _ = writeln!(out, "|---|---|---|---|");
        for (category, category_match) in &result.matches {
            let matched: Vec<&str> = category_match
                .matched_keywords
                .iter()
                .map(|k| k.display.as_str())
                .collect();
            let missing: Vec<&str> = category_match
                .missing_keywords
                .iter()
                .map(|k| k.display.as_str())
                .collect();
            let _ = writeln!(
                out,
                "| {} | {}% | {} | {} |",
                category,
                category_match.match_percentage,
                matched.join(", "),
                missing.join(", ")
            );
        }
        let _ = writeln!(out);
    }

    if !result.suggestions.is_empty() {
        let _ = writeln!(out, "## Suggestions");
        let _ = writeln!(out);
        for suggestion in &result.suggestions {
            let _ = writeln!(out, "1. {}", suggestion);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "---");
    let _ = writeln!(out, "Generated {}", report.metadata.generated_at.to_rfc3339());

    out
}

fn console_tailoring(report: &TailoringReport) -> String {
    let mut out = String::new();
    let result = &report.result;

    let _ = writeln!(out, "{}", "Resume Tailoring".bold().underline());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Match: {} -> {}",
        score_colored(result.baseline_match_score),
        score_colored(result.achieved_match_score)
    );
    let _ = writeln!(out, "  ATS score: {}", score_colored(result.ats_score));

    if !result.inserted_keywords.is_empty() {
        let _ = writeln!(out, "  Inserted: {}", result.inserted_keywords.join(", ").cyan());
    } else {
        let _ = writeln!(out, "  No changes needed");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Optimized resume".bold());
    let _ = writeln!(out, "{}", result.optimized_resume);

    out
}

fn markdown_tailoring(report: &TailoringReport) -> String {
    let mut out = String::new();
    let result = &report.result;

    let _ = writeln!(out, "# Resume Tailoring");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "- **Match:** {}% -> {}%",
        result.baseline_match_score, result.achieved_match_score
    );
    let _ = writeln!(out, "- **ATS score:** {}%", result.ats_score);
    if !result.inserted_keywords.is_empty() {
        let _ = writeln!(out, "- **Inserted:** {}", result.inserted_keywords.join(", "));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "## Optimized resume");
    let _ = writeln!(out);
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "{}", result.optimized_resume);
    let _ = writeln!(out, "```");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::processing::analyzer::AnalysisResult;
    use std::collections::BTreeMap;

    fn report() -> AnalysisReport {
        AnalysisReport {
            result: AnalysisResult {
                overall_match_score: Some(67),
                ats_score: 85,
                suggestions: vec!["Add \"Kubernetes\" (tools) to your resume".to_string()],
                matches: BTreeMap::new(),
            },
            metadata: ReportMetadata::new("resume.pdf".to_string(), None, 100, 3),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("MD").unwrap(), OutputFormat::Markdown);
        assert!(OutputFormat::parse("pdf").is_err());
    }

    #[test]
    fn test_json_output_round_trips() {
        let rendered = format_analysis(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["result"]["overall_match_score"], 67);
        assert_eq!(value["result"]["ats_score"], 85);
    }

    #[test]
    fn test_markdown_contains_scores() {
        let rendered = format_analysis(&report(), OutputFormat::Markdown).unwrap();
        assert!(rendered.contains("**Overall match:** 67%"));
        assert!(rendered.contains("**ATS score:** 85%"));
    }
}
