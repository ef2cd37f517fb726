//! Text extraction from supported document formats
//!
//! Extractors are the pluggable seam between binary uploads and the engine:
//! everything downstream of them sees normalized plain text only.

use crate::error::{Result, TailorError};
use log::warn;
use pulldown_cmark::{html, Parser};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Extract from in-memory bytes, as received from an upload boundary.
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(TailorError::Io)?;
        self.extract_bytes(&bytes)
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            warn!("PDF extraction failed: {}", e);
            TailorError::Extraction("failed to extract text from PDF".to_string())
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(TailorError::Io)?;
        Ok(content)
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            warn!("Invalid UTF-8 in text input: {}", e);
            TailorError::Extraction("text input is not valid UTF-8".to_string())
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(TailorError::Io)?;
        self.extract_str(&content)
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let content = String::from_utf8(bytes.to_vec()).map_err(|e| {
            warn!("Invalid UTF-8 in markdown input: {}", e);
            TailorError::Extraction("markdown input is not valid UTF-8".to_string())
        })?;
        self.extract_str(&content)
    }
}

impl MarkdownExtractor {
    fn extract_str(&self, markdown_content: &str) -> Result<String> {
        let parser = Parser::new(markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</h1>", "\n")
            .replace("</h2>", "\n")
            .replace("</h3>", "\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let re = regex::Regex::new(r"<[^>]*>").unwrap();
        let clean_text = re.replace_all(&text, "");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_from_bytes() {
        let text = PlainTextExtractor.extract_bytes(b"John Doe\nSkills: Rust").unwrap();
        assert!(text.contains("John Doe"));
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let result = PlainTextExtractor.extract_bytes(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(TailorError::Extraction(_))));
    }

    #[test]
    fn test_markdown_strips_formatting() {
        let md = b"# John Doe\n\n**Skills**: Rust, Python\n\n- Built things\n";
        let text = MarkdownExtractor.extract_bytes(md).unwrap();

        assert!(text.contains("John Doe"));
        assert!(text.contains("Rust, Python"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }
}
