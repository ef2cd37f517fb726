//! Keyword index: weighted keywords derived from one job description
//!
//! Importance combines a frequency signal with a positional signal: terms in
//! imperative context ("required", "must have") weigh more than terms in
//! "nice to have" context. Canonicalization collapses case, plurals, and
//! synonyms so "JS" and "JavaScript" become one keyword. Index order is the
//! order of first occurrence and only affects display, never scoring.

use crate::processing::vocabulary::{Category, Vocabulary};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub canonical: String,
    /// First-occurrence spelling, used for display only.
    pub display: String,
    pub category: Category,
    /// Importance weight in [0.0, 1.0].
    pub importance: f32,
    /// First-occurrence rank, for deterministic ordering and tie-breaks.
    pub first_rank: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordIndex {
    keywords: Vec<Keyword>,
}

impl KeywordIndex {
    pub fn from_keywords(mut keywords: Vec<Keyword>) -> Self {
        keywords.sort_by_key(|k| k.first_rank);
        Self { keywords }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    /// Keywords grouped by category, in first-occurrence order within each.
    pub fn by_category(&self) -> BTreeMap<Category, Vec<&Keyword>> {
        let mut map: BTreeMap<Category, Vec<&Keyword>> = BTreeMap::new();
        for keyword in &self.keywords {
            map.entry(keyword.category).or_default().push(keyword);
        }
        map
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Emphasis {
    Required,
    Neutral,
    NiceToHave,
}

struct Occurrence {
    display: String,
    category: Category,
    count: usize,
    first_rank: usize,
    saw_required: bool,
    saw_neutral: bool,
}

pub struct KeywordIndexBuilder<'a> {
    vocabulary: &'a Vocabulary,
    required_re: Regex,
    nice_to_have_re: Regex,
}

impl<'a> KeywordIndexBuilder<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        let required_re =
            Regex::new(r"(?i)\b(required|must[\s-]have|essential|mandatory|minimum|need(?:ed|s)?)\b")
                .expect("invalid requirement regex");
        let nice_to_have_re =
            Regex::new(r"(?i)\b(nice[\s-]to[\s-]have|preferred|a plus|bonus|desirable|optional)\b")
                .expect("invalid preference regex");

        Self {
            vocabulary,
            required_re,
            nice_to_have_re,
        }
    }

    /// Build an index from job description text. An empty or keyword-free
    /// text yields an empty index; downstream matching is then skipped.
    pub fn build(&self, job_description: &str) -> KeywordIndex {
        let mut occurrences: HashMap<String, Occurrence> = HashMap::new();
        let mut rank = 0usize;

        for line in job_description.lines() {
            let emphasis = self.classify_line(line);
            let tokens: Vec<&str> = line.split_whitespace().collect();

            let mut i = 0;
            while i < tokens.len() {
                // Prefer the longest span (up to 3 words) at this position so
                // "machine learning" is not consumed as "machine".
                let mut advanced = 1;
                for window in (1..=3.min(tokens.len() - i)).rev() {
                    let span = tokens[i..i + window].join(" ");
                    if let Some((canonical, category)) = self.vocabulary.lookup(&span) {
                        let display = display_form(&span, &canonical);
                        let entry = occurrences.entry(canonical).or_insert_with(|| {
                            let current = rank;
                            rank += 1;
                            Occurrence {
                                display,
                                category,
                                count: 0,
                                first_rank: current,
                                saw_required: false,
                                saw_neutral: false,
                            }
                        });
                        entry.count += 1;
                        match emphasis {
                            Emphasis::Required => entry.saw_required = true,
                            Emphasis::Neutral => entry.saw_neutral = true,
                            Emphasis::NiceToHave => {}
                        }
                        advanced = window;
                        break;
                    }
                }
                i += advanced;
            }
        }

        let keywords = occurrences
            .into_iter()
            .map(|(canonical, occ)| {
                let importance = importance(&occ);
                Keyword {
                    canonical,
                    display: occ.display,
                    category: occ.category,
                    importance,
                    first_rank: occ.first_rank,
                }
            })
            .collect();

        KeywordIndex::from_keywords(keywords)
    }

    fn classify_line(&self, line: &str) -> Emphasis {
        // "Required" language wins when a line carries both signals.
        if self.required_re.is_match(line) {
            Emphasis::Required
        } else if self.nice_to_have_re.is_match(line) {
            Emphasis::NiceToHave
        } else {
            Emphasis::Neutral
        }
    }
}

fn importance(occ: &Occurrence) -> f32 {
    let base = 0.5;
    let frequency = 0.1 * (occ.count.min(4) - 1) as f32;
    let position = if occ.saw_required {
        0.3
    } else if occ.saw_neutral {
        0.0
    } else {
        -0.3
    };
    (base + frequency + position).clamp(0.1, 1.0)
}

/// First-occurrence spelling with surrounding punctuation removed. A
/// trailing dot is kept only when the canonical form carries one too
/// ("Node.js"), not when it is sentence punctuation ("Kubernetes.").
fn display_form(span: &str, canonical: &str) -> String {
    let trimmed = span
        .trim()
        .trim_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#' || c == '.'));
    if canonical.ends_with('.') {
        trimmed.to_string()
    } else {
        trimmed.trim_end_matches('.').to_string()
    }
}
