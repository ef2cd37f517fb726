//! Controlled vocabulary: categorized terms, synonyms, canonicalization
//!
//! All keyword extraction and matching goes through one `Vocabulary` built
//! from explicit configuration, so tests can substitute a fixed term list.

use crate::config::VocabularyConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Skills,
    Tools,
    Certifications,
    SoftSkills,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Skills => write!(f, "skills"),
            Category::Tools => write!(f, "tools"),
            Category::Certifications => write!(f, "certifications"),
            Category::SoftSkills => write!(f, "soft-skills"),
        }
    }
}

pub struct Vocabulary {
    /// Canonical term -> category. Each term belongs to exactly one category.
    terms: HashMap<String, Category>,
    /// Alias spelling -> canonical term.
    synonyms: HashMap<String, String>,
}

impl Vocabulary {
    pub fn from_config(config: &VocabularyConfig) -> Self {
        let mut terms = HashMap::new();

        let groups = [
            (&config.skills, Category::Skills),
            (&config.tools, Category::Tools),
            (&config.certifications, Category::Certifications),
            (&config.soft_skills, Category::SoftSkills),
        ];

        // First category listed wins on duplicates.
        for (list, category) in groups {
            for term in list {
                terms.entry(term.to_lowercase()).or_insert(category);
            }
        }

        let synonyms = config
            .synonyms
            .iter()
            .map(|(alias, canonical)| (alias.to_lowercase(), canonical.to_lowercase()))
            .collect();

        Self { terms, synonyms }
    }

    /// Normalize a raw span: case-fold, strip surrounding punctuation,
    /// resolve synonyms, and collapse simple plurals of known terms.
    ///
    /// Dots are preserved through the initial fold for dotted terms like
    /// "node.js"; a trailing dot that is sentence punctuation ("Kubernetes.")
    /// is stripped when the dotted form resolves to nothing.
    pub fn canonicalize(&self, raw: &str) -> String {
        let folded = raw
            .trim()
            .trim_matches(|c: char| {
                !(c.is_alphanumeric() || c == '+' || c == '#' || c == '.')
            })
            .to_lowercase();

        if let Some(canonical) = self.resolve(&folded) {
            return canonical;
        }

        let stripped = folded.trim_end_matches('.');
        if stripped != folded {
            if let Some(canonical) = self.resolve(stripped) {
                return canonical;
            }
            return stripped.to_string();
        }
        folded
    }

    /// Resolve a folded span to a canonical known term, if any.
    fn resolve(&self, folded: &str) -> Option<String> {
        if let Some(canonical) = self.synonyms.get(folded) {
            return Some(canonical.clone());
        }
        if self.terms.contains_key(folded) {
            return Some(folded.to_string());
        }
        if let Some(singular) = folded.strip_suffix('s') {
            if self.terms.contains_key(singular) {
                return Some(singular.to_string());
            }
        }
        None
    }

    /// Look up a raw span against the vocabulary, returning its canonical
    /// form and category if it is a known term.
    pub fn lookup(&self, raw: &str) -> Option<(String, Category)> {
        let canonical = self.canonicalize(raw);
        self.terms
            .get(&canonical)
            .map(|category| (canonical, *category))
    }

    pub fn category_of(&self, canonical: &str) -> Option<Category> {
        self.terms.get(canonical).copied()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VocabularyConfig;

    fn vocab() -> Vocabulary {
        Vocabulary::from_config(&VocabularyConfig::default())
    }

    #[test]
    fn test_synonym_collapse() {
        let v = vocab();
        assert_eq!(v.canonicalize("JS"), "javascript");
        assert_eq!(v.canonicalize("NodeJS"), "node.js");
        assert_eq!(v.canonicalize("k8s"), "kubernetes");
    }

    #[test]
    fn test_case_and_punctuation_folding() {
        let v = vocab();
        assert_eq!(v.canonicalize(" Python,"), "python");
        assert_eq!(v.canonicalize("(Docker)"), "docker");
        // Symbol-bearing terms keep their symbols.
        assert_eq!(v.canonicalize("C++"), "c++");
    }

    #[test]
    fn test_trailing_sentence_period_stripped() {
        let v = vocab();
        assert_eq!(v.canonicalize("Kubernetes."), "kubernetes");
        assert_eq!(v.canonicalize("JS."), "javascript");
        // The dot stays when the dotted form is itself a known term.
        assert_eq!(v.canonicalize("Node.js"), "node.js");
        assert_eq!(v.canonicalize("Node.js."), "node.js");
    }

    #[test]
    fn test_plural_folds_to_known_term() {
        let v = vocab();
        assert_eq!(v.canonicalize("dockers"), "docker");
        // Unknown words keep their plural.
        assert_eq!(v.canonicalize("widgets"), "widgets");
    }

    #[test]
    fn test_lookup_categories() {
        let v = vocab();
        assert_eq!(v.lookup("Python").unwrap().1, Category::Skills);
        assert_eq!(v.lookup("Docker").unwrap().1, Category::Tools);
        assert_eq!(v.lookup("leadership").unwrap().1, Category::SoftSkills);
        assert!(v.lookup("underwater basket weaving").is_none());
    }

    #[test]
    fn test_each_term_has_one_category() {
        let config = VocabularyConfig {
            skills: vec!["python".to_string()],
            tools: vec!["python".to_string()],
            certifications: vec![],
            soft_skills: vec![],
            synonyms: Default::default(),
        };
        let v = Vocabulary::from_config(&config);
        assert_eq!(v.category_of("python"), Some(Category::Skills));
    }
}
