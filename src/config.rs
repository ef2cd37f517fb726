//! Configuration management for the resume tailor engine
//!
//! Every numeric threshold the engine uses lives here so tests can substitute
//! fixed vocabularies and tuned rubrics. Components receive the relevant
//! sub-config at construction; nothing reads ambient global state.

use crate::error::{Result, TailorError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vocabulary: VocabularyConfig,
    pub matching: MatchingConfig,
    pub ats: AtsRubricConfig,
    pub suggestions: SuggestionConfig,
    pub limits: InputLimits,
    pub tailoring: TailoringConfig,
}

/// Controlled vocabulary organized by category, plus a synonym table mapping
/// alias spellings to their canonical keyword ("js" -> "javascript").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub skills: Vec<String>,
    pub tools: Vec<String>,
    pub certifications: Vec<String>,
    pub soft_skills: Vec<String>,
    pub synonyms: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Jaro-Winkler similarity floor for a fuzzy match.
    pub jaro_winkler_threshold: f32,
    /// Normalized Levenshtein similarity floor for a fuzzy match.
    pub levenshtein_threshold: f32,
    /// Terms at or below this canonical length require an exact match.
    pub exact_only_max_len: usize,
    /// Levenshtein is only attempted on tokens up to this length.
    pub levenshtein_max_token_len: usize,
}

/// Fixed point deductions for the ATS compatibility rubric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsRubricConfig {
    pub missing_section_deduction: u8,
    pub table_layout_deduction: u8,
    pub image_content_deduction: u8,
    pub header_footer_contact_deduction: u8,
    pub nonstandard_dates_deduction: u8,
    pub missing_bullets_deduction: u8,
    pub length_deduction: u8,
    /// Word counts outside this range trigger the length deduction.
    pub min_words: usize,
    pub max_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Maximum number of suggestions surfaced to the caller.
    pub max_suggestions: usize,
    /// Suggestions are suppressed only when both scores clear these floors.
    pub good_match_score: u8,
    pub good_ats_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputLimits {
    /// Uploads larger than this are rejected before extraction.
    pub max_file_bytes: u64,
    /// Extraction is abandoned after this many seconds.
    pub extraction_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoringConfig {
    /// Only missing keywords at or above this importance are inserted.
    pub min_importance: f32,
    /// ATS score at or above this is considered compliant.
    pub ats_compliant_score: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: VocabularyConfig::default(),
            matching: MatchingConfig {
                jaro_winkler_threshold: 0.90,
                levenshtein_threshold: 0.85,
                exact_only_max_len: 3,
                levenshtein_max_token_len: 12,
            },
            ats: AtsRubricConfig {
                missing_section_deduction: 15,
                table_layout_deduction: 15,
                image_content_deduction: 10,
                header_footer_contact_deduction: 10,
                nonstandard_dates_deduction: 5,
                missing_bullets_deduction: 5,
                length_deduction: 10,
                min_words: 120,
                max_words: 1500,
            },
            suggestions: SuggestionConfig {
                max_suggestions: 10,
                good_match_score: 80,
                good_ats_score: 80,
            },
            limits: InputLimits {
                max_file_bytes: 5 * 1024 * 1024,
                extraction_timeout_secs: 10,
            },
            tailoring: TailoringConfig {
                min_importance: 0.5,
                ats_compliant_score: 80,
            },
        }
    }
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        let skills = [
            "python", "javascript", "typescript", "java", "c++", "c#", "go",
            "rust", "ruby", "php", "swift", "kotlin", "scala", "sql", "html",
            "css", "react", "vue", "angular", "node.js", "express", "django",
            "flask", "spring", "rest", "graphql", "grpc", "microservices",
            "machine learning", "deep learning", "data analysis", "etl",
        ];
        let tools = [
            "docker", "kubernetes", "aws", "azure", "gcp", "terraform",
            "ansible", "jenkins", "git", "github", "gitlab", "jira",
            "postgresql", "mysql", "mongodb", "redis", "elasticsearch",
            "kafka", "spark", "airflow", "linux", "bash", "excel", "tableau",
        ];
        let certifications = [
            "bachelor", "master", "phd", "degree", "pmp", "cpa", "cissp",
            "aws certified", "security+", "scrum master", "six sigma",
        ];
        let soft_skills = [
            "leadership", "communication", "teamwork", "problem solving",
            "time management", "collaboration", "mentoring", "presentation",
            "negotiation", "adaptability", "critical thinking", "agile",
            "project management", "stakeholder management",
        ];

        let synonyms: HashMap<String, String> = [
            ("js", "javascript"),
            ("ts", "typescript"),
            ("nodejs", "node.js"),
            ("node", "node.js"),
            ("k8s", "kubernetes"),
            ("postgres", "postgresql"),
            ("golang", "go"),
            ("amazon web services", "aws"),
            ("google cloud", "gcp"),
            ("ml", "machine learning"),
            ("problem-solving", "problem solving"),
            ("reactjs", "react"),
        ]
        .iter()
        .map(|(a, c)| (a.to_string(), c.to_string()))
        .collect();

        Self {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            tools: tools.iter().map(|s| s.to_string()).collect(),
            certifications: certifications.iter().map(|s| s.to_string()).collect(),
            soft_skills: soft_skills.iter().map(|s| s.to_string()).collect(),
            synonyms,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| TailorError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| TailorError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TailorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-tailor")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.suggestions.max_suggestions, 10);
        assert_eq!(parsed.limits.max_file_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_default_vocabulary_has_all_categories() {
        let vocab = VocabularyConfig::default();
        assert!(!vocab.skills.is_empty());
        assert!(!vocab.tools.is_empty());
        assert!(!vocab.certifications.is_empty());
        assert!(!vocab.soft_skills.is_empty());
        assert_eq!(vocab.synonyms.get("js").unwrap(), "javascript");
    }
}
