//! Input processing module
//! Handles media type detection, validation, and text extraction

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
