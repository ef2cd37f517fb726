//! Media type detection from declared MIME types and file extensions

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Doc,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl MediaType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => MediaType::Pdf,
            "doc" => MediaType::Doc,
            "docx" => MediaType::Docx,
            "txt" => MediaType::Text,
            "md" | "markdown" => MediaType::Markdown,
            _ => MediaType::Unknown,
        }
    }

    pub fn from_mime(mime: &str) -> Self {
        match mime.to_lowercase().as_str() {
            "application/pdf" => MediaType::Pdf,
            "application/msword" => MediaType::Doc,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                MediaType::Docx
            }
            "text/plain" => MediaType::Text,
            "text/markdown" => MediaType::Markdown,
            _ => MediaType::Unknown,
        }
    }

    /// Whether this type is accepted for an uploaded resume document.
    /// Anything else is a validation error, not an engine error.
    pub fn is_accepted_upload(&self) -> bool {
        matches!(self, MediaType::Pdf | MediaType::Doc | MediaType::Docx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(MediaType::from_extension("PDF"), MediaType::Pdf);
        assert_eq!(MediaType::from_extension("docx"), MediaType::Docx);
        assert_eq!(MediaType::from_extension("odt"), MediaType::Unknown);
    }

    #[test]
    fn test_mime_detection() {
        assert_eq!(MediaType::from_mime("application/pdf"), MediaType::Pdf);
        assert_eq!(
            MediaType::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            MediaType::Docx
        );
        assert_eq!(MediaType::from_mime("image/png"), MediaType::Unknown);
    }

    #[test]
    fn test_accepted_uploads() {
        assert!(MediaType::Pdf.is_accepted_upload());
        assert!(MediaType::Doc.is_accepted_upload());
        assert!(MediaType::Docx.is_accepted_upload());
        assert!(!MediaType::Text.is_accepted_upload());
        assert!(!MediaType::Unknown.is_accepted_upload());
    }
}
