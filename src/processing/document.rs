//! Resume document model: section detection and layout signals
//!
//! A `ResumeDocument` is constructed once from extracted plain text and never
//! mutated afterwards; matching and scoring produce new result objects.

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub content: String,
    pub sections: Vec<DocumentSection>,
    pub layout: LayoutSignals,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub section_type: SectionType,
    pub heading: String,
    pub content: String,
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

/// Structural properties that affect machine parseability, populated from
/// text heuristics over the extracted content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSignals {
    pub has_table_artifacts: bool,
    pub has_image_artifacts: bool,
    /// Contact info appears only in repeated header/footer lines.
    pub contact_in_header_footer: bool,
    pub has_bullet_points: bool,
    pub has_standard_dates: bool,
    /// Any date-like token was found at all.
    pub has_dates: bool,
}

impl ResumeDocument {
    pub fn new(content: String) -> Self {
        let sections = detect_sections(&content);
        let layout = LayoutSignals::from_text(&content);
        let word_count = content.unicode_words().count();

        Self {
            content,
            sections,
            layout,
            word_count,
        }
    }

    pub fn section(&self, section_type: &SectionType) -> Option<&DocumentSection> {
        self.sections.iter().find(|s| &s.section_type == section_type)
    }

    pub fn has_section(&self, section_type: &SectionType) -> bool {
        self.section(section_type).is_some()
    }
}

fn heading_type(line: &str) -> Option<SectionType> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > 60 {
        return None;
    }

    // A heading is a short line that either ends with a colon, is fully
    // uppercase, or consists of the bare section name.
    let looks_like_heading = trimmed.ends_with(':')
        || trimmed.chars().filter(|c| c.is_alphabetic()).count() > 0
            && trimmed
                .chars()
                .filter(|c| c.is_alphabetic())
                .all(|c| c.is_uppercase())
        || trimmed.split_whitespace().count() <= 4;

    if !looks_like_heading {
        return None;
    }

    let normalized = trimmed.trim_end_matches(':').to_lowercase();
    let patterns: [(&[&str], fn() -> SectionType); 6] = [
        (&["summary", "profile", "objective", "about"], || SectionType::Summary),
        (
            &["experience", "work experience", "professional experience", "employment", "work history"],
            || SectionType::Experience,
        ),
        (
            &["education", "academic background", "qualifications"],
            || SectionType::Education,
        ),
        (
            &["skills", "technical skills", "core competencies", "expertise"],
            || SectionType::Skills,
        ),
        (&["projects", "portfolio", "notable projects"], || SectionType::Projects),
        (
            &["certifications", "certificates", "licenses"],
            || SectionType::Certifications,
        ),
    ];

    for (names, make) in patterns {
        if names.iter().any(|n| normalized == *n) {
            return Some(make());
        }
    }
    None
}

fn detect_sections(content: &str) -> Vec<DocumentSection> {
    let lines: Vec<&str> = content.lines().collect();
    let mut headings: Vec<(usize, SectionType, String)> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if let Some(section_type) = heading_type(line) {
            headings.push((idx, section_type, line.trim().to_string()));
        }
    }

    let mut sections = Vec::new();
    for (i, (start_line, section_type, heading)) in headings.iter().enumerate() {
        let end_line = headings
            .get(i + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(lines.len());

        let body = lines[start_line + 1..end_line].join("\n");
        sections.push(DocumentSection {
            section_type: section_type.clone(),
            heading: heading.clone(),
            content: body.trim().to_string(),
            start_line: *start_line,
            end_line,
        });
    }

    sections
}

impl LayoutSignals {
    pub fn from_text(content: &str) -> Self {
        let lines: Vec<&str> = content.lines().collect();

        // Pipe/tab grids are what PDF table extraction typically leaves behind.
        let table_lines = lines
            .iter()
            .filter(|l| l.matches('|').count() >= 2 || l.matches('\t').count() >= 2)
            .count();
        let has_table_artifacts = table_lines >= 2;

        // Embedded graphics survive extraction as replacement chars or tags.
        let has_image_artifacts = content.contains('\u{FFFC}')
            || content.to_lowercase().contains("[image]")
            || content.to_lowercase().contains("<image");

        let has_bullet_points = lines
            .iter()
            .any(|l| {
                let t = l.trim_start();
                t.starts_with('•') || t.starts_with("- ") || t.starts_with("* ")
            });

        let contact_re =
            Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}|\(?\d{3}\)?[-. ]\d{3}[-. ]\d{4}")
                .expect("invalid contact regex");

        let contact_lines: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| contact_re.is_match(l))
            .map(|(i, _)| i)
            .collect();

        // Repeated identical contact lines are the footprint of page
        // headers/footers flattened into the text stream.
        let contact_in_header_footer = if contact_lines.len() >= 2 {
            let first = lines[contact_lines[0]].trim();
            contact_lines[1..]
                .iter()
                .all(|&i| lines[i].trim() == first)
        } else {
            false
        };

        let standard_date_re = Regex::new(
            r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}\b|\b\d{4}\s*[-\u{2013}]\s*(?:\d{4}|present)\b|\b(?:0?[1-9]|1[0-2])/\d{4}\b",
        )
        .expect("invalid date regex");
        let any_date_re = Regex::new(r"\b(19|20)\d{2}\b").expect("invalid year regex");

        let has_dates = any_date_re.is_match(content);
        let has_standard_dates = standard_date_re.is_match(content);

        Self {
            has_table_artifacts,
            has_image_artifacts,
            contact_in_header_footer,
            has_bullet_points,
            has_standard_dates,
            has_dates,
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionType::Summary => write!(f, "Summary"),
            SectionType::Experience => write!(f, "Experience"),
            SectionType::Education => write!(f, "Education"),
            SectionType::Skills => write!(f, "Skills"),
            SectionType::Projects => write!(f, "Projects"),
            SectionType::Certifications => write!(f, "Certifications"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "John Doe\njohn@example.com\n\nSummary:\nExperienced developer\n\nExperience:\nSoftware Engineer at Acme, Jan 2019 - Present\n• Built services in Rust\n\nSkills:\nRust, Python, Docker\n\nEducation:\nBS Computer Science, 2015 - 2019";

    #[test]
    fn test_section_detection() {
        let doc = ResumeDocument::new(SAMPLE.to_string());

        assert!(doc.has_section(&SectionType::Summary));
        assert!(doc.has_section(&SectionType::Experience));
        assert!(doc.has_section(&SectionType::Skills));
        assert!(doc.has_section(&SectionType::Education));

        let skills = doc.section(&SectionType::Skills).unwrap();
        assert!(skills.content.contains("Rust"));
        assert!(!skills.content.contains("Education"));
    }

    #[test]
    fn test_uppercase_headings_detected() {
        let doc = ResumeDocument::new("Jane Roe\n\nEXPERIENCE\nEngineer at Initech\n\nSKILLS\nPython".to_string());
        assert!(doc.has_section(&SectionType::Experience));
        assert!(doc.has_section(&SectionType::Skills));
    }

    #[test]
    fn test_layout_signals() {
        let doc = ResumeDocument::new(SAMPLE.to_string());
        assert!(doc.layout.has_bullet_points);
        assert!(doc.layout.has_standard_dates);
        assert!(!doc.layout.has_table_artifacts);
    }

    #[test]
    fn test_table_artifacts_detected() {
        let text = "Name | Role | Years\nJohn | Dev | 5\nJane | Ops | 3\n";
        let layout = LayoutSignals::from_text(text);
        assert!(layout.has_table_artifacts);
    }

    #[test]
    fn test_repeated_contact_line_flags_header_footer() {
        let text = "john@example.com\nExperience:\nEngineer\njohn@example.com\nmore text\njohn@example.com";
        let layout = LayoutSignals::from_text(text);
        assert!(layout.contact_in_header_footer);
    }

    #[test]
    fn test_body_text_is_not_a_heading() {
        // A sentence mentioning a section name must not start a section.
        let doc = ResumeDocument::new(
            "I have experience with many skills and my education was long and this line keeps going well past a heading length".to_string(),
        );
        assert!(doc.sections.is_empty());
    }
}
