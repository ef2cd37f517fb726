//! Resume tailor library: job-description matching, ATS scoring, and
//! resume tailoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, TailorError};
pub use processing::analyzer::{AnalysisEngine, AnalysisResult};
pub use processing::tailor::TailoredResume;
