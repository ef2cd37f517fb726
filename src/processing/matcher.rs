//! Resume keyword matching against a keyword index
//!
//! Matching is a pure function of (resume text, index): no hidden state, and
//! index order never changes which keywords match. Presence is decided per
//! keyword by a `MatchStrategy`: short terms require an exact canonical hit,
//! longer terms may also match fuzzily within a similarity threshold.

use crate::config::MatchingConfig;
use crate::processing::keyword_index::{Keyword, KeywordIndex};
use crate::processing::vocabulary::{Category, Vocabulary};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use strsim::{jaro_winkler, levenshtein};

/// How presence is decided for one keyword. Selected by canonical term
/// length: fuzzy matching on very short terms produces false positives
/// ("go" vs "got"), so those require an exact canonical match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    ExactCanonical,
    FuzzyThreshold,
}

impl MatchStrategy {
    pub fn for_term(canonical: &str, config: &MatchingConfig) -> Self {
        if canonical.len() <= config.exact_only_max_len {
            MatchStrategy::ExactCanonical
        } else {
            MatchStrategy::FuzzyThreshold
        }
    }
}

/// Per-category match result. `matched_keywords` and `missing_keywords` are
/// disjoint and together cover the category's full keyword set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMatch {
    pub matched_keywords: Vec<Keyword>,
    pub missing_keywords: Vec<Keyword>,
    /// Matched importance-weighted mass over total mass, as 0-100.
    pub match_percentage: u8,
    /// Mean importance of the category's keywords; weights the category
    /// in the overall score.
    pub importance: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub categories: BTreeMap<Category, CategoryMatch>,
}

impl MatchOutcome {
    pub fn all_missing(&self) -> impl Iterator<Item = &Keyword> {
        self.categories.values().flat_map(|c| c.missing_keywords.iter())
    }

    pub fn all_matched(&self) -> impl Iterator<Item = &Keyword> {
        self.categories.values().flat_map(|c| c.matched_keywords.iter())
    }
}

pub struct KeywordMatcher<'a> {
    vocabulary: &'a Vocabulary,
    config: &'a MatchingConfig,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(vocabulary: &'a Vocabulary, config: &'a MatchingConfig) -> Self {
        Self { vocabulary, config }
    }

    /// Match every keyword in the index against the resume text and group
    /// the results by category.
    pub fn match_index(&self, resume_text: &str, index: &KeywordIndex) -> MatchOutcome {
        let spans = self.canonical_spans(resume_text);
        let canonical_text = self.canonical_text(resume_text);
        let exact_hits = self.exact_hits(&canonical_text, index);

        let mut categories: BTreeMap<Category, (Vec<Keyword>, Vec<Keyword>)> = BTreeMap::new();

        for keyword in index.iter() {
            let matched = exact_hits.contains(&keyword.canonical)
                || match MatchStrategy::for_term(&keyword.canonical, self.config) {
                    MatchStrategy::ExactCanonical => false,
                    MatchStrategy::FuzzyThreshold => self.fuzzy_hit(&keyword.canonical, &spans),
                };

            let entry = categories.entry(keyword.category).or_default();
            if matched {
                entry.0.push(keyword.clone());
            } else {
                entry.1.push(keyword.clone());
            }
        }

        let categories = categories
            .into_iter()
            .map(|(category, (matched, missing))| {
                let matched_mass: f32 = matched.iter().map(|k| k.importance).sum();
                let total_mass: f32 =
                    matched_mass + missing.iter().map(|k| k.importance).sum::<f32>();
                let count = matched.len() + missing.len();

                let match_percentage = if total_mass > 0.0 {
                    (matched_mass / total_mass * 100.0).round() as u8
                } else {
                    0
                };
                let importance = if count > 0 {
                    (matched.iter().chain(missing.iter()).map(|k| k.importance).sum::<f32>())
                        / count as f32
                } else {
                    0.0
                };

                (
                    category,
                    CategoryMatch {
                        matched_keywords: matched,
                        missing_keywords: missing,
                        match_percentage,
                        importance,
                    },
                )
            })
            .collect();

        MatchOutcome { categories }
    }

    /// Resume text re-spelled in canonical terms, for exact containment.
    fn canonical_text(&self, resume_text: &str) -> String {
        resume_text
            .split_whitespace()
            .map(|token| self.vocabulary.canonicalize(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All canonicalized 1-3 token spans, grouped for fuzzy comparison.
    fn canonical_spans(&self, resume_text: &str) -> Vec<String> {
        let tokens: Vec<String> = resume_text
            .split_whitespace()
            .map(|token| self.vocabulary.canonicalize(token))
            .filter(|t| !t.is_empty())
            .collect();

        let mut spans = Vec::new();
        for i in 0..tokens.len() {
            for window in 1..=3.min(tokens.len() - i) {
                spans.push(tokens[i..i + window].join(" "));
            }
        }
        spans
    }

    fn exact_hits(&self, canonical_text: &str, index: &KeywordIndex) -> HashSet<String> {
        let patterns: Vec<&str> = index.iter().map(|k| k.canonical.as_str()).collect();
        if patterns.is_empty() {
            return HashSet::new();
        }

        // Standard match kind so overlapping search reports every pattern
        // occurrence; the boundary check below rejects substring hits.
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .expect("failed to build keyword automaton");

        let bytes = canonical_text.as_bytes();
        let mut hits = HashSet::new();
        for mat in matcher.find_overlapping_iter(canonical_text) {
            // Reject substring hits ("java" inside "javascript").
            let before_ok = mat.start() == 0
                || !(bytes[mat.start() - 1] as char).is_alphanumeric();
            let after_ok = mat.end() == bytes.len()
                || !(bytes[mat.end()] as char).is_alphanumeric();
            if before_ok && after_ok {
                hits.insert(patterns[mat.pattern().as_usize()].to_string());
            }
        }
        hits
    }

    fn fuzzy_hit(&self, canonical: &str, spans: &[String]) -> bool {
        let keyword_words = canonical.split_whitespace().count();

        for span in spans {
            if span.split_whitespace().count() != keyword_words {
                continue;
            }
            if span.len() < 3 {
                continue;
            }

            let jw = jaro_winkler(span, canonical) as f32;
            if jw >= self.config.jaro_winkler_threshold {
                return true;
            }

            if span.len() <= self.config.levenshtein_max_token_len
                && canonical.len() <= self.config.levenshtein_max_token_len
            {
                let distance = levenshtein(span, canonical);
                let max_len = span.len().max(canonical.len());
                let similarity = 1.0 - (distance as f32 / max_len as f32);
                if similarity >= self.config.levenshtein_threshold {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, VocabularyConfig};
    use crate::processing::keyword_index::KeywordIndexBuilder;

    fn vocab() -> Vocabulary {
        Vocabulary::from_config(&VocabularyConfig::default())
    }

    fn match_texts(resume: &str, job: &str) -> MatchOutcome {
        let v = vocab();
        let config = Config::default().matching;
        let index = KeywordIndexBuilder::new(&v).build(job);
        KeywordMatcher::new(&v, &config).match_index(resume, &index)
    }

    #[test]
    fn test_exact_matching_by_canonical_form() {
        let outcome = match_texts(
            "Experienced with Python and NodeJS development",
            "Required: Python, Node.js",
        );

        let skills = &outcome.categories[&Category::Skills];
        let matched: Vec<&str> = skills
            .matched_keywords
            .iter()
            .map(|k| k.canonical.as_str())
            .collect();
        assert!(matched.contains(&"python"));
        assert!(matched.contains(&"node.js"));
        assert!(skills.missing_keywords.is_empty());
    }

    #[test]
    fn test_fuzzy_matching_tolerates_minor_variance() {
        let outcome = match_texts(
            "I know Kubernetis well",
            "Required: Kubernetes",
        );

        let tools = &outcome.categories[&Category::Tools];
        assert_eq!(tools.matched_keywords.len(), 1);
    }

    #[test]
    fn test_short_terms_require_exact_match() {
        let config = Config::default().matching;
        assert_eq!(
            MatchStrategy::for_term("go", &config),
            MatchStrategy::ExactCanonical
        );
        assert_eq!(
            MatchStrategy::for_term("kubernetes", &config),
            MatchStrategy::FuzzyThreshold
        );

        // "got" must not fuzzily match the short term "go".
        let outcome = match_texts("I got things done", "Required: Go");
        let skills = &outcome.categories[&Category::Skills];
        assert!(skills.matched_keywords.is_empty());
        assert_eq!(skills.missing_keywords.len(), 1);
    }

    #[test]
    fn test_substring_is_not_a_match() {
        let outcome = match_texts("I write JavaScript", "Required: Java");
        let skills = &outcome.categories[&Category::Skills];
        assert!(skills.matched_keywords.is_empty());
    }

    #[test]
    fn test_partition_invariant() {
        let outcome = match_texts(
            "Python, Docker, AWS",
            "Required: Python, Docker, Kubernetes, leadership, communication",
        );

        for (_, category_match) in &outcome.categories {
            let matched: HashSet<&str> = category_match
                .matched_keywords
                .iter()
                .map(|k| k.canonical.as_str())
                .collect();
            let missing: HashSet<&str> = category_match
                .missing_keywords
                .iter()
                .map(|k| k.canonical.as_str())
                .collect();
            assert!(matched.is_disjoint(&missing));
        }
    }

    #[test]
    fn test_scenario_two_of_three_equal_weights_is_67() {
        let outcome = match_texts(
            "Skills: Python, Docker, AWS",
            "Required: Python, Docker, Kubernetes",
        );

        // Python is a skill; Docker and Kubernetes are tools. Check the
        // two-of-three case on a single category by mass.
        let matched_mass: f32 = outcome.all_matched().map(|k| k.importance).sum();
        let total_mass: f32 =
            matched_mass + outcome.all_missing().map(|k| k.importance).sum::<f32>();
        let pct = (matched_mass / total_mass * 100.0).round() as u8;
        assert_eq!(pct, 67);
    }

    #[test]
    fn test_purity_and_order_independence() {
        let v = vocab();
        let config = Config::default().matching;
        let builder = KeywordIndexBuilder::new(&v);

        let index_a = builder.build("Required: Python, Docker, Kubernetes");
        let index_b = builder.build("Required: Kubernetes, Docker, Python");

        let matcher = KeywordMatcher::new(&v, &config);
        let resume = "Python and Docker in production";
        let out_a = matcher.match_index(resume, &index_a);
        let out_b = matcher.match_index(resume, &index_b);

        for (category, match_a) in &out_a.categories {
            let match_b = &out_b.categories[category];
            let set_a: HashSet<&str> = match_a
                .matched_keywords
                .iter()
                .map(|k| k.canonical.as_str())
                .collect();
            let set_b: HashSet<&str> = match_b
                .matched_keywords
                .iter()
                .map(|k| k.canonical.as_str())
                .collect();
            assert_eq!(set_a, set_b);
            assert_eq!(match_a.match_percentage, match_b.match_percentage);
        }
    }
}
