//! Analysis report wrapper with generation metadata

use crate::processing::analyzer::AnalysisResult;
use crate::processing::tailor::TailoredResume;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoringReport {
    pub result: TailoredResume,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_path: Option<String>,
    pub vocabulary_terms: usize,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(
        resume_path: String,
        job_path: Option<String>,
        vocabulary_terms: usize,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            resume_path,
            job_path,
            vocabulary_terms,
            processing_time_ms,
        }
    }
}
