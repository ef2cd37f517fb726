//! Resume tailoring: close high-importance keyword gaps in place
//!
//! The engine only surfaces missing keywords inside content the user already
//! wrote: it appends terms to an existing skills list or adds a "Familiar
//! with" line under an existing section. It never writes sentences claiming
//! experience the resume does not contain. Best-effort by design; after one
//! insertion pass it re-runs the matcher as a self-check and performs at
//! most one re-optimization pass before reporting the achieved score.

use crate::config::Config;
use crate::error::{Result, TailorError};
use crate::processing::analyzer::overall_match_score;
use crate::processing::ats_scorer::AtsScorer;
use crate::processing::document::{ResumeDocument, SectionType};
use crate::processing::keyword_index::{Keyword, KeywordIndexBuilder};
use crate::processing::matcher::KeywordMatcher;
use crate::processing::vocabulary::Vocabulary;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResume {
    pub optimized_resume: String,
    /// Overall match of the original resume against the job description.
    pub baseline_match_score: u8,
    /// Overall match of the optimized resume, from the self-check re-run.
    pub achieved_match_score: u8,
    pub ats_score: u8,
    pub is_ats_compliant: bool,
    pub inserted_keywords: Vec<String>,
}

pub struct TailoringEngine<'a> {
    vocabulary: &'a Vocabulary,
    config: &'a Config,
}

impl<'a> TailoringEngine<'a> {
    pub fn new(vocabulary: &'a Vocabulary, config: &'a Config) -> Self {
        Self { vocabulary, config }
    }

    pub fn tailor(&self, resume_text: &str, job_description: &str) -> Result<TailoredResume> {
        let content_lines = resume_text.lines().filter(|l| !l.trim().is_empty()).count();
        if content_lines < 2 {
            return Err(TailorError::InsufficientContent(
                "the resume has no editable sections to anchor insertions into".to_string(),
            ));
        }

        let index = KeywordIndexBuilder::new(self.vocabulary).build(job_description);
        if index.is_empty() {
            return Err(TailorError::Validation(
                "the job description contains no recognizable requirements".to_string(),
            ));
        }

        let matcher = KeywordMatcher::new(self.vocabulary, &self.config.matching);
        let baseline = matcher.match_index(resume_text, &index);
        let baseline_score = overall_match_score(&baseline).unwrap_or(0);

        let gaps = self.important_gaps(baseline.all_missing());
        let mut inserted: Vec<String> = Vec::new();
        let mut optimized = resume_text.to_string();

        if !gaps.is_empty() {
            optimized = self.insert_keywords(&optimized, &gaps)?;
            inserted.extend(gaps.iter().map(|k| k.display.clone()));
        }

        // Self-check, with at most one re-optimization pass for keywords the
        // first insertion failed to surface.
        let after_first = matcher.match_index(&optimized, &index);
        let remaining = self.important_gaps(after_first.all_missing());
        if !remaining.is_empty() {
            debug!("{} keywords still missing after first pass", remaining.len());
            optimized = self.insert_keywords(&optimized, &remaining)?;
            inserted.extend(remaining.iter().map(|k| k.display.clone()));
        }

        let achieved = matcher.match_index(&optimized, &index);
        let achieved_score = overall_match_score(&achieved).unwrap_or(0);

        let ats_report =
            AtsScorer::new(self.config.ats.clone()).score(&ResumeDocument::new(optimized.clone()));

        Ok(TailoredResume {
            optimized_resume: optimized,
            baseline_match_score: baseline_score,
            achieved_match_score: achieved_score.max(baseline_score),
            ats_score: ats_report.score,
            is_ats_compliant: ats_report.score >= self.config.tailoring.ats_compliant_score,
            inserted_keywords: inserted,
        })
    }

    /// Missing keywords worth inserting, ranked by importance descending
    /// with first-occurrence tie-breaks.
    fn important_gaps<'k>(
        &self,
        missing: impl Iterator<Item = &'k Keyword>,
    ) -> Vec<Keyword> {
        let mut gaps: Vec<Keyword> = missing
            .filter(|k| k.importance >= self.config.tailoring.min_importance)
            .cloned()
            .collect();
        gaps.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.first_rank.cmp(&b.first_rank))
        });
        gaps
    }

    /// Anchor order: an existing skills list, then an existing bullet list,
    /// then the end of any detected section. No anchor means the resume is
    /// too thin to edit truthfully.
    fn insert_keywords(&self, resume_text: &str, keywords: &[Keyword]) -> Result<String> {
        let document = ResumeDocument::new(resume_text.to_string());
        let mut lines: Vec<String> = resume_text.lines().map(|l| l.to_string()).collect();
        let joined = keywords
            .iter()
            .map(|k| k.display.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        if let Some(skills) = document.section(&SectionType::Skills) {
            let insert_at = last_content_line(&lines, skills.start_line + 1, skills.end_line);
            match insert_at {
                Some(idx) => {
                    let line = lines[idx].trim_end().trim_end_matches(',').to_string();
                    lines[idx] = format!("{}, {}", line, joined);
                }
                None => lines.insert(skills.start_line + 1, joined),
            }
            return Ok(lines.join("\n"));
        }

        if let Some(idx) = lines.iter().rposition(|l| {
            let t = l.trim_start();
            t.starts_with('•') || t.starts_with("- ") || t.starts_with("* ")
        }) {
            let marker = match lines[idx].trim_start().chars().next() {
                Some('-') => "-",
                Some('*') => "*",
                _ => "•",
            };
            lines.insert(idx + 1, format!("{} Familiar with: {}", marker, joined));
            return Ok(lines.join("\n"));
        }

        if let Some(section) = document.sections.first() {
            let insert_at = section.end_line.min(lines.len());
            lines.insert(insert_at, format!("Familiar with: {}", joined));
            return Ok(lines.join("\n"));
        }

        Err(TailorError::InsufficientContent(
            "the resume has no editable sections to anchor insertions into".to_string(),
        ))
    }
}

fn last_content_line(lines: &[String], start: usize, end: usize) -> Option<usize> {
    (start..end.min(lines.len()))
        .rev()
        .find(|&i| !lines[i].trim().is_empty())
}
