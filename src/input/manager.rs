//! Input manager: validation, routing, and time-bounded extraction
//!
//! Validation failures are reported before any extraction work begins, so an
//! oversized or unsupported upload never reaches a parser.

use crate::config::InputLimits;
use crate::error::{Result, TailorError};
use crate::input::file_detector::MediaType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub struct InputManager {
    limits: InputLimits,
    /// Extracted text keyed by path, so each file is parsed at most once
    /// per manager. Unbounded: a manager lives for one CLI invocation and
    /// sees at most a resume and a job description.
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new(limits: InputLimits) -> Self {
        Self {
            limits,
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract text from an uploaded document: raw bytes plus the declared
    /// MIME type. Only PDF, DOC, and DOCX are accepted at this boundary.
    pub fn extract_upload(&self, bytes: &[u8], declared_mime: &str) -> Result<String> {
        let media_type = MediaType::from_mime(declared_mime);
        if !media_type.is_accepted_upload() {
            return Err(TailorError::Validation(format!(
                "Unsupported document type: {}. Accepted: PDF, DOC, DOCX",
                declared_mime
            )));
        }

        if bytes.is_empty() {
            return Err(TailorError::Validation("Uploaded document is empty".to_string()));
        }

        if bytes.len() as u64 > self.limits.max_file_bytes {
            return Err(TailorError::Validation(format!(
                "Document is {} bytes; maximum allowed is {} bytes",
                bytes.len(),
                self.limits.max_file_bytes
            )));
        }

        match media_type {
            MediaType::Pdf => PdfExtractor.extract_bytes(bytes),
            MediaType::Doc | MediaType::Docx => Err(TailorError::Extraction(
                "no extraction adapter registered for Word documents".to_string(),
            )),
            _ => unreachable!("validated above"),
        }
    }

    /// Extract text from a local file, routed by extension. Used by the CLI,
    /// which also accepts plain text and markdown alongside the upload types.
    pub async fn extract_file(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(TailorError::Validation(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let metadata = tokio::fs::metadata(path).await?;
        if metadata.len() > self.limits.max_file_bytes {
            return Err(TailorError::Validation(format!(
                "File is {} bytes; maximum allowed is {} bytes",
                metadata.len(),
                self.limits.max_file_bytes
            )));
        }

        let media_type = self.detect_media_type(path)?;
        let timeout = Duration::from_secs(self.limits.extraction_timeout_secs);

        let extraction = async {
            match media_type {
                MediaType::Pdf => {
                    info!("Extracting text from PDF: {}", path.display());
                    PdfExtractor.extract(path).await
                }
                MediaType::Text => {
                    info!("Reading plain text file: {}", path.display());
                    PlainTextExtractor.extract(path).await
                }
                MediaType::Markdown => {
                    info!("Processing markdown file: {}", path.display());
                    MarkdownExtractor.extract(path).await
                }
                MediaType::Doc | MediaType::Docx => Err(TailorError::Extraction(
                    "no extraction adapter registered for Word documents".to_string(),
                )),
                MediaType::Unknown => Err(TailorError::Validation(format!(
                    "Unsupported file type for: {}",
                    path.display()
                ))),
            }
        };

        let text = match tokio::time::timeout(timeout, extraction).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("Extraction timed out after {:?} for {}", timeout, path.display());
                return Err(TailorError::Extraction(
                    "document extraction timed out".to_string(),
                ));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn detect_media_type(&self, path: &Path) -> Result<MediaType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                TailorError::Validation(format!("File has no extension: {}", path.display()))
            })?;

        Ok(MediaType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn manager() -> InputManager {
        InputManager::new(Config::default().limits)
    }

    #[test]
    fn test_oversized_upload_rejected_before_extraction() {
        let big = vec![0u8; 10 * 1024 * 1024];
        let result = manager().extract_upload(&big, "application/pdf");

        assert!(matches!(result, Err(TailorError::Validation(_))));
    }

    #[test]
    fn test_unsupported_mime_rejected() {
        let result = manager().extract_upload(b"hello", "image/png");
        assert!(matches!(result, Err(TailorError::Validation(_))));
    }

    #[test]
    fn test_empty_upload_rejected() {
        let result = manager().extract_upload(b"", "application/pdf");
        assert!(matches!(result, Err(TailorError::Validation(_))));
    }

    #[test]
    fn test_doc_without_adapter_is_extraction_error() {
        let result = manager().extract_upload(b"stub", "application/msword");
        assert!(matches!(result, Err(TailorError::Extraction(_))));
    }
}
