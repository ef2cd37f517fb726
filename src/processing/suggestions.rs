//! Suggestion generation: ranked, capped, deterministic
//!
//! Missing keywords are ranked by importance descending with alphabetical
//! tie-breaks; structural findings follow a fixed severity order. The final
//! list interleaves them highest-impact first: missing required sections,
//! then missing keywords, then layout problems, then formatting nits.

use crate::config::SuggestionConfig;
use crate::processing::ats_scorer::{AtsReport, Severity};
use crate::processing::matcher::MatchOutcome;

pub struct SuggestionGenerator {
    config: SuggestionConfig,
}

impl SuggestionGenerator {
    pub fn new(config: SuggestionConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        outcome: Option<&MatchOutcome>,
        ats: &AtsReport,
        overall_match_score: Option<u8>,
    ) -> Vec<String> {
        let match_is_good =
            overall_match_score.map_or(true, |s| s >= self.config.good_match_score);
        if match_is_good && ats.score >= self.config.good_ats_score {
            return Vec::new();
        }

        let mut suggestions = Vec::new();

        let mut findings: Vec<_> = ats.findings.iter().collect();
        findings.sort_by(|a, b| a.severity.cmp(&b.severity).then(a.check.cmp(&b.check)));

        for finding in findings.iter().filter(|f| f.severity == Severity::MissingSection) {
            suggestions.push(finding.suggestion.clone());
        }

        if let Some(outcome) = outcome {
            let mut missing: Vec<_> = outcome.all_missing().collect();
            missing.sort_by(|a, b| {
                b.importance
                    .partial_cmp(&a.importance)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.display.to_lowercase().cmp(&b.display.to_lowercase()))
            });

            for keyword in missing {
                suggestions.push(format!(
                    "Add \"{}\" ({}) to your resume; the job description calls for it",
                    keyword.display, keyword.category
                ));
            }
        }

        for finding in findings.iter().filter(|f| f.severity != Severity::MissingSection) {
            suggestions.push(finding.suggestion.clone());
        }

        suggestions.truncate(self.config.max_suggestions);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::ats_scorer::AtsFinding;
    use crate::processing::keyword_index::{Keyword, KeywordIndex};
    use crate::processing::matcher::{CategoryMatch, MatchOutcome};
    use crate::processing::vocabulary::Category;
    use std::collections::BTreeMap;

    fn generator() -> SuggestionGenerator {
        SuggestionGenerator::new(Config::default().suggestions)
    }

    fn keyword(canonical: &str, category: Category, importance: f32, rank: usize) -> Keyword {
        Keyword {
            canonical: canonical.to_string(),
            display: canonical.to_string(),
            category,
            importance,
            first_rank: rank,
        }
    }

    fn outcome_with_missing(missing: Vec<Keyword>) -> MatchOutcome {
        let mut categories = BTreeMap::new();
        categories.insert(
            Category::Tools,
            CategoryMatch {
                matched_keywords: vec![],
                match_percentage: 0,
                importance: 0.8,
                missing_keywords: missing,
            },
        );
        MatchOutcome { categories }
    }

    fn clean_ats(score: u8) -> AtsReport {
        AtsReport { score, findings: vec![] }
    }

    #[test]
    fn test_empty_when_both_scores_good() {
        let outcome = outcome_with_missing(vec![]);
        let suggestions = generator().generate(Some(&outcome), &clean_ats(95), Some(90));
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_missing_keywords_ranked_by_importance_then_alpha() {
        let outcome = outcome_with_missing(vec![
            keyword("terraform", Category::Tools, 0.6, 0),
            keyword("kubernetes", Category::Tools, 0.9, 1),
            keyword("ansible", Category::Tools, 0.6, 2),
        ]);
        let suggestions = generator().generate(Some(&outcome), &clean_ats(95), Some(40));

        assert!(suggestions[0].contains("kubernetes"));
        // 0.6 tie broken alphabetically.
        assert!(suggestions[1].contains("ansible"));
        assert!(suggestions[2].contains("terraform"));
    }

    #[test]
    fn test_missing_sections_outrank_keywords_and_layout() {
        let outcome = outcome_with_missing(vec![keyword("docker", Category::Tools, 0.9, 0)]);
        let ats = AtsReport {
            score: 60,
            findings: vec![
                AtsFinding {
                    check: "table_layout".to_string(),
                    severity: Severity::Layout,
                    deduction: 15,
                    suggestion: "Replace tables".to_string(),
                },
                AtsFinding {
                    check: "missing_skills_section".to_string(),
                    severity: Severity::MissingSection,
                    deduction: 15,
                    suggestion: "Add a Skills header".to_string(),
                },
            ],
        };
        let suggestions = generator().generate(Some(&outcome), &ats, Some(40));

        assert_eq!(suggestions[0], "Add a Skills header");
        assert!(suggestions[1].contains("docker"));
        assert_eq!(suggestions[2], "Replace tables");
    }

    #[test]
    fn test_cap_applies() {
        let missing: Vec<Keyword> = (0..30)
            .map(|i| keyword(&format!("tool{:02}", i), Category::Tools, 0.5, i))
            .collect();
        let outcome = outcome_with_missing(missing);
        let suggestions = generator().generate(Some(&outcome), &clean_ats(95), Some(10));

        assert_eq!(suggestions.len(), Config::default().suggestions.max_suggestions);
    }

    #[test]
    fn test_deterministic() {
        let outcome = outcome_with_missing(vec![
            keyword("docker", Category::Tools, 0.7, 0),
            keyword("kafka", Category::Tools, 0.7, 1),
        ]);
        let a = generator().generate(Some(&outcome), &clean_ats(50), Some(40));
        let b = generator().generate(Some(&outcome), &clean_ats(50), Some(40));
        assert_eq!(a, b);
    }
}
