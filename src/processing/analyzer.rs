//! Analysis engine: orchestrates indexing, matching, ATS scoring, and
//! suggestion generation into one `AnalysisResult`
//!
//! Every analysis is request-scoped and stateless: the engine holds only
//! immutable configuration, so concurrent analyses need no coordination.

use crate::config::Config;
use crate::error::Result;
use crate::processing::ats_scorer::AtsScorer;
use crate::processing::document::ResumeDocument;
use crate::processing::keyword_index::KeywordIndexBuilder;
use crate::processing::matcher::{CategoryMatch, KeywordMatcher, MatchOutcome};
use crate::processing::suggestions::SuggestionGenerator;
use crate::processing::vocabulary::{Category, Vocabulary};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The result contract exposed to the UI layer. When the job description
/// yields no keywords, the match fields are absent rather than zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_match_score: Option<u8>,
    pub ats_score: u8,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub matches: BTreeMap<Category, CategoryMatch>,
}

pub struct AnalysisEngine {
    vocabulary: Vocabulary,
    ats_scorer: AtsScorer,
    suggestion_generator: SuggestionGenerator,
    config: Config,
}

impl AnalysisEngine {
    pub fn new(config: Config) -> Self {
        let vocabulary = Vocabulary::from_config(&config.vocabulary);
        let ats_scorer = AtsScorer::new(config.ats.clone());
        let suggestion_generator = SuggestionGenerator::new(config.suggestions.clone());

        Self {
            vocabulary,
            ats_scorer,
            suggestion_generator,
            config,
        }
    }

    /// Analyze a resume, optionally against a job description. `None` for
    /// the job description runs the ATS-only flow; an empty or keyword-free
    /// job description is a valid state, not an error, and likewise omits
    /// the match fields.
    pub fn analyze(&self, resume_text: &str, job_description: Option<&str>) -> Result<AnalysisResult> {
        let document = ResumeDocument::new(resume_text.to_string());
        let ats_report = self.ats_scorer.score(&document);
        debug!("ATS score {} with {} findings", ats_report.score, ats_report.findings.len());

        let outcome = job_description.and_then(|jd| {
            let index = KeywordIndexBuilder::new(&self.vocabulary).build(jd);
            if index.is_empty() {
                debug!("Job description produced no keywords; skipping matching");
                return None;
            }
            let matcher = KeywordMatcher::new(&self.vocabulary, &self.config.matching);
            Some(matcher.match_index(resume_text, &index))
        });

        let overall_match_score = outcome.as_ref().and_then(overall_match_score);
        let suggestions =
            self.suggestion_generator
                .generate(outcome.as_ref(), &ats_report, overall_match_score);

        Ok(AnalysisResult {
            overall_match_score,
            ats_score: ats_report.score,
            suggestions,
            matches: outcome.map(|o| o.categories).unwrap_or_default(),
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Aggregate the per-category percentages into one score: a mean weighted by
/// category importance. Undefined (None) when there are no categories.
pub fn overall_match_score(outcome: &MatchOutcome) -> Option<u8> {
    if outcome.categories.is_empty() {
        return None;
    }

    let total_weight: f32 = outcome.categories.values().map(|c| c.importance).sum();
    if total_weight <= 0.0 {
        return None;
    }

    let weighted: f32 = outcome
        .categories
        .values()
        .map(|c| c.match_percentage as f32 * c.importance)
        .sum();

    Some((weighted / total_weight).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const RESUME: &str = "John Doe\n\nExperience:\nSoftware Engineer at Acme, Jan 2019 - Present\n• Deployed services with Python, Docker, and AWS\n\nSkills:\nPython, Docker, AWS\n\nEducation:\nBS Computer Science, 2015 - 2019";

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(Config::default())
    }

    #[test]
    fn test_full_analysis_produces_scores_and_matches() {
        let result = engine()
            .analyze(RESUME, Some("Required: Python, Docker, Kubernetes"))
            .unwrap();

        assert!(result.overall_match_score.is_some());
        assert!(!result.matches.is_empty());
        assert!(result.ats_score > 0);
        // Kubernetes is missing, so suggestions must not be empty.
        assert!(!result.suggestions.is_empty());
    }

    #[test]
    fn test_empty_job_description_omits_match_fields() {
        let result = engine().analyze(RESUME, Some("")).unwrap();

        assert!(result.overall_match_score.is_none());
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_no_job_description_runs_ats_only() {
        let result = engine().analyze(RESUME, None).unwrap();

        assert!(result.overall_match_score.is_none());
        assert!(result.matches.is_empty());
        assert!(result.ats_score > 0);
    }

    #[test]
    fn test_emoji_job_description_is_not_an_error() {
        let result = engine().analyze(RESUME, Some("🎉")).unwrap();
        assert!(result.overall_match_score.is_none());
    }

    #[test]
    fn test_overall_score_is_convex_combination() {
        let result = engine()
            .analyze(
                RESUME,
                Some("Required: Python, Docker, Kubernetes.\nPreferred: leadership, communication."),
            )
            .unwrap();

        let overall = result.overall_match_score.unwrap();
        let min = result.matches.values().map(|c| c.match_percentage).min().unwrap();
        let max = result.matches.values().map(|c| c.match_percentage).max().unwrap();
        assert!(overall >= min && overall <= max, "{} not in [{}, {}]", overall, min, max);
    }

    #[test]
    fn test_match_score_absent_fields_not_serialized() {
        let result = engine().analyze(RESUME, None).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("overall_match_score").is_none());
        assert!(json.get("matches").is_none());
        assert!(json.get("ats_score").is_some());
    }
}
