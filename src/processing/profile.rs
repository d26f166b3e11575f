//! Candidate field extraction
//!
//! Positional and pattern heuristics over the raw document text. Every
//! extractor is total: when a heuristic finds nothing it degrades to a
//! sentinel value instead of erroring, so one weak field cannot sink the
//! document.

use crate::input::pdf::ExtractedText;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NOT_FOUND: &str = "Not found";
pub const NAME_NOT_FOUND: &str = "Name not found";

/// Lines containing these words are assumed to be contact boilerplate, not
/// the candidate's name.
const NAME_STOPWORDS: [&str; 3] = ["email", "phone", "contact"];

/// Any line containing one of these (case-insensitive) opens the project
/// section. "project" subsumes the rest as a substring, but the full list is
/// kept for clarity about what headings are expected.
const PROJECT_KEYWORDS: [&str; 5] = [
    "project",
    "projects",
    "major project",
    "minor project",
    "academic project",
];

const MAX_NAME_TOKENS: usize = 4;
const MAX_PROJECT_HIGHLIGHTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    /// Up to three captured lines from the first project section; empty when
    /// no project heading was found.
    pub project_highlights: Vec<String>,
}

pub struct FieldExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    heading_regex: Regex,
}

impl FieldExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Invalid email regex");

        // Optional 1-3 digit country code with separator, then 10 digits.
        let phone_regex =
            Regex::new(r"(\+?\d{1,3}[-.\s]?)?\d{10}").expect("Invalid phone regex");

        // A Title Case heading ending in a colon closes the project section.
        let heading_regex = Regex::new(r"^[A-Z][a-z]+.*:$").expect("Invalid heading regex");

        Self {
            email_regex,
            phone_regex,
            heading_regex,
        }
    }

    pub fn extract(&self, document: &ExtractedText) -> CandidateProfile {
        let text = document.text();

        CandidateProfile {
            name: self.extract_name(&text),
            email: self.extract_email(&text),
            phone: self.extract_phone(&text),
            linkedin: find_profile_link(&document.links, "linkedin.com/in"),
            github: find_profile_link(&document.links, "github.com"),
            project_highlights: self.extract_projects(&text),
        }
    }

    /// First non-empty line short enough to be a name and free of contact
    /// boilerplate. Resumes conventionally lead with the candidate's name;
    /// this is best-effort, not a guarantee.
    pub fn extract_name(&self, text: &str) -> String {
        for line in text.trim().lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.split_whitespace().count() > MAX_NAME_TOKENS {
                continue;
            }
            let lower = trimmed.to_lowercase();
            if NAME_STOPWORDS.iter().any(|word| lower.contains(word)) {
                continue;
            }
            return trimmed.to_string();
        }
        NAME_NOT_FOUND.to_string()
    }

    pub fn extract_email(&self, text: &str) -> String {
        self.email_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_FOUND.to_string())
    }

    /// First match wins; overlapping candidates later in the text are ignored.
    pub fn extract_phone(&self, text: &str) -> String {
        self.phone_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_FOUND.to_string())
    }

    /// Capture lines after the first project heading until a blank line, a
    /// Title Case heading, or three highlights. Only the first qualifying
    /// section is read.
    pub fn extract_projects(&self, text: &str) -> Vec<String> {
        let mut highlights = Vec::new();
        let mut capture = false;

        for line in text.lines() {
            let lower = line.to_lowercase();
            if PROJECT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
                capture = true;
                continue;
            }
            if capture {
                let trimmed = line.trim();
                if trimmed.is_empty() || self.heading_regex.is_match(trimmed) {
                    break;
                }
                highlights.push(trimmed.to_string());
                if highlights.len() >= MAX_PROJECT_HIGHLIGHTS {
                    break;
                }
            }
        }

        highlights
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// First URI from the extractor's link list containing the marker substring.
pub fn find_profile_link(links: &[String], marker: &str) -> String {
    links
        .iter()
        .find(|link| link.contains(marker))
        .cloned()
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new()
    }

    #[test]
    fn test_name_from_first_short_line() {
        let text = "Jane Doe\nSenior Software Engineer with ten years of experience\n";
        assert_eq!(extractor().extract_name(text), "Jane Doe");
    }

    #[test]
    fn test_name_skips_contact_lines() {
        let text = "Email: jane@example.com\nPhone: 1234567890\nJane Doe\n";
        assert_eq!(extractor().extract_name(text), "Jane Doe");
    }

    #[test]
    fn test_name_not_found() {
        let text = "a line with far too many words to ever be a candidate name\n";
        assert_eq!(extractor().extract_name(text), NAME_NOT_FOUND);
    }

    #[test]
    fn test_email_extraction() {
        assert_eq!(
            extractor().extract_email("reach me at john@x.com or later"),
            "john@x.com"
        );
        assert_eq!(extractor().extract_email("no address here"), NOT_FOUND);
    }

    #[test]
    fn test_phone_extraction() {
        let ex = extractor();
        assert!(ex.extract_phone("call 1234567890 today").contains("1234567890"));
        assert!(ex.extract_phone("+91 9876543210").contains("9876543210"));
        assert_eq!(ex.extract_phone("digits 12345 only"), NOT_FOUND);
    }

    #[test]
    fn test_first_phone_match_wins() {
        let ex = extractor();
        let phone = ex.extract_phone("primary 1111111111 alt 2222222222");
        assert!(phone.contains("1111111111"));
    }

    #[test]
    fn test_profile_links() {
        let links = vec![
            "https://example.com".to_string(),
            "https://linkedin.com/in/janedoe".to_string(),
            "https://github.com/janedoe".to_string(),
        ];
        assert_eq!(
            find_profile_link(&links, "linkedin.com/in"),
            "https://linkedin.com/in/janedoe"
        );
        assert_eq!(
            find_profile_link(&links, "github.com"),
            "https://github.com/janedoe"
        );
        assert_eq!(find_profile_link(&[], "github.com"), NOT_FOUND);
    }

    #[test]
    fn test_projects_capture_until_blank() {
        let text = "Projects:\nBuilt a website\nWrote a compiler\n\nEducation:\nBSc\n";
        assert_eq!(
            extractor().extract_projects(text),
            vec!["Built a website".to_string(), "Wrote a compiler".to_string()]
        );
    }

    #[test]
    fn test_projects_capture_stops_at_heading() {
        let text = "Academic Projects\nBuilt a website\nEducation:\nBSc\n";
        assert_eq!(
            extractor().extract_projects(text),
            vec!["Built a website".to_string()]
        );
    }

    #[test]
    fn test_projects_capped_at_three() {
        let text = "Projects\none\ntwo\nthree\nfour\n";
        assert_eq!(extractor().extract_projects(text).len(), 3);
    }

    #[test]
    fn test_no_projects_section() {
        assert!(extractor().extract_projects("Skills: Rust\n").is_empty());
    }

    #[test]
    fn test_full_profile_scenario() {
        let document = ExtractedText::from_text(
            "john@x.com\n1234567890\nSkills: Python, SQL\nProjects:\nBuilt a website\n"
                .to_string(),
        );
        let profile = extractor().extract(&document);

        assert_eq!(profile.email, "john@x.com");
        assert!(profile.phone.contains("1234567890"));
        assert_eq!(profile.linkedin, NOT_FOUND);
        assert_eq!(profile.github, NOT_FOUND);
        assert_eq!(profile.project_highlights, vec!["Built a website".to_string()]);
    }
}
