//! Text analysis and scoring module

pub mod document;
pub mod vocabulary;
pub mod keyword_index;
pub mod matcher;
pub mod ats_scorer;
pub mod suggestions;
pub mod analyzer;
pub mod tailor;
