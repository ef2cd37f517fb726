//! ATS compatibility scoring
//!
//! Evaluates a resume on its own, with no job description, against a fixed
//! rubric of machine-parseability checks. Each failed check subtracts a
//! configured deduction from 100 and emits a candidate suggestion.

use crate::config::AtsRubricConfig;
use crate::processing::document::{ResumeDocument, SectionType};
use serde::{Deserialize, Serialize};

/// Severity buckets drive suggestion ordering: missing required sections
/// rank above layout problems, which rank above formatting nits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    MissingSection,
    Layout,
    Formatting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsFinding {
    pub check: String,
    pub severity: Severity,
    pub deduction: u8,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    /// 0-100, independent of any job description.
    pub score: u8,
    pub findings: Vec<AtsFinding>,
}

pub struct AtsScorer {
    config: AtsRubricConfig,
}

impl AtsScorer {
    pub fn new(config: AtsRubricConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, resume: &ResumeDocument) -> AtsReport {
        let mut findings = Vec::new();

        for section in [
            SectionType::Experience,
            SectionType::Education,
            SectionType::Skills,
        ] {
            if !resume.has_section(&section) {
                findings.push(AtsFinding {
                    check: format!("missing_{}_section", section.to_string().to_lowercase()),
                    severity: Severity::MissingSection,
                    deduction: self.config.missing_section_deduction,
                    suggestion: format!(
                        "Add a clear \"{}\" section header so parsers can locate it",
                        section
                    ),
                });
            }
        }

        if resume.layout.has_table_artifacts {
            findings.push(AtsFinding {
                check: "table_layout".to_string(),
                severity: Severity::Layout,
                deduction: self.config.table_layout_deduction,
                suggestion: "Replace tables and multi-column layout with linear text; many parsers read tables out of order"
                    .to_string(),
            });
        }

        if resume.layout.has_image_artifacts {
            findings.push(AtsFinding {
                check: "embedded_images".to_string(),
                severity: Severity::Layout,
                deduction: self.config.image_content_deduction,
                suggestion: "Remove embedded images and graphics; their content is invisible to parsers"
                    .to_string(),
            });
        }

        if resume.layout.contact_in_header_footer {
            findings.push(AtsFinding {
                check: "contact_in_header_footer".to_string(),
                severity: Severity::Layout,
                deduction: self.config.header_footer_contact_deduction,
                suggestion: "Move contact information out of the page header/footer into the document body"
                    .to_string(),
            });
        }

        if resume.layout.has_dates && !resume.layout.has_standard_dates {
            findings.push(AtsFinding {
                check: "nonstandard_dates".to_string(),
                severity: Severity::Formatting,
                deduction: self.config.nonstandard_dates_deduction,
                suggestion: "Use standard date formats such as \"Jan 2020 - Mar 2022\"".to_string(),
            });
        }

        if !resume.layout.has_bullet_points {
            findings.push(AtsFinding {
                check: "missing_bullets".to_string(),
                severity: Severity::Formatting,
                deduction: self.config.missing_bullets_deduction,
                suggestion: "Use bullet points to list achievements and responsibilities".to_string(),
            });
        }

        if resume.word_count < self.config.min_words {
            findings.push(AtsFinding {
                check: "too_short".to_string(),
                severity: Severity::Formatting,
                deduction: self.config.length_deduction,
                suggestion: "The resume is very short; it may have been truncated during conversion"
                    .to_string(),
            });
        } else if resume.word_count > self.config.max_words {
            findings.push(AtsFinding {
                check: "too_long".to_string(),
                severity: Severity::Formatting,
                deduction: self.config.length_deduction,
                suggestion: "Shorten the resume; very long documents get truncated by some systems"
                    .to_string(),
            });
        }

        let total: u32 = findings.iter().map(|f| f.deduction as u32).sum();
        let score = 100u32.saturating_sub(total) as u8;

        AtsReport { score, findings }
    }
}
