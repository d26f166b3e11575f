//! Skill list parsing and lexical skill matching

use crate::error::{Result, ResumeRankerError};
use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which target skills appear in the document text. `matched` and `missing`
/// are deduplicated, keep first-appearance order, and partition the skill
/// list: their union is the set of distinct skills, their intersection empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchOutcome {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Parse the caller's skill list from its textual form.
///
/// Accepts a JSON string array (`["Python", "SQL"]`) or a comma-separated
/// list (`Python, SQL`). Malformed JSON is rejected outright; the input is
/// never evaluated as code.
pub fn parse_skill_list(input: &str) -> Result<Vec<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ResumeRankerError::InvalidInput(
            "skill list is empty".to_string(),
        ));
    }

    let skills: Vec<String> = if trimmed.starts_with('[') {
        let parsed: Vec<String> = serde_json::from_str(trimmed).map_err(|e| {
            ResumeRankerError::InvalidInput(format!(
                "skill list is not a valid JSON string array: {}",
                e
            ))
        })?;
        parsed
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        trimmed
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    };

    if skills.is_empty() {
        return Err(ResumeRankerError::InvalidInput(
            "skill list contains no skills".to_string(),
        ));
    }
    Ok(skills)
}

/// Case-insensitive whole-word match of each skill against the text.
///
/// The skill text is escaped, so names like "C++" or "C#" are matched
/// literally. Word boundaries are asserted only on the sides where the skill
/// itself starts or ends with a word character, since `\b` next to a symbol
/// would never match.
pub fn match_skills(text: &str, skills: &[String]) -> SkillMatchOutcome {
    let mut matched: Vec<String> = Vec::new();
    let mut missing: Vec<String> = Vec::new();

    for skill in skills {
        let found = skill_regex(skill).is_match(text);
        let bucket = if found { &mut matched } else { &mut missing };
        if !bucket.iter().any(|s| s == skill) {
            bucket.push(skill.clone());
        }
    }

    SkillMatchOutcome { matched, missing }
}

fn skill_regex(skill: &str) -> Regex {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let mut pattern = String::from("(?i)");
    if skill.chars().next().map_or(false, is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(skill));
    if skill.chars().last().map_or(false, is_word) {
        pattern.push_str(r"\b");
    }

    Regex::new(&pattern).expect("escaped skill pattern is always valid")
}

/// Default skill database for the pairwise compare mode, which runs without a
/// caller-supplied skill list.
const COMMON_SKILLS: [&str; 15] = [
    "Python",
    "Java",
    "C++",
    "SQL",
    "HTML",
    "CSS",
    "JavaScript",
    "TypeScript",
    "React",
    "Django",
    "Rust",
    "Docker",
    "Kubernetes",
    "Machine Learning",
    "Deep Learning",
];

/// Scans text against a fixed skill database. Substring semantics on purpose:
/// with no caller contract on word shapes, longest-match detection over the
/// database is the useful behavior ("JavaScript" must not be reported as
/// "Java").
pub struct SkillScanner {
    matcher: AhoCorasick,
    skill_database: Vec<String>,
}

impl SkillScanner {
    pub fn new() -> Result<Self> {
        Self::with_skills(COMMON_SKILLS.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_skills(mut skill_database: Vec<String>) -> Result<Self> {
        // Longest first so LeftmostLongest prefers "JavaScript" over "Java".
        skill_database.sort_by(|a, b| b.len().cmp(&a.len()));

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&skill_database)
            .map_err(|e| {
                ResumeRankerError::InvalidInput(format!("failed to build skill scanner: {}", e))
            })?;

        Ok(Self {
            matcher,
            skill_database,
        })
    }

    /// Distinct database skills present in the text, in first-hit order.
    pub fn scan(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        for mat in self.matcher.find_iter(text) {
            let skill = &self.skill_database[mat.pattern().as_usize()];
            if !found.contains(skill) {
                found.push(skill.clone());
            }
        }
        found
    }

    pub fn skill_count(&self) -> usize {
        self.skill_database.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_json_array() {
        let parsed = parse_skill_list(r#"["Python", "SQL"]"#).unwrap();
        assert_eq!(parsed, skills(&["Python", "SQL"]));
    }

    #[test]
    fn test_parse_comma_list() {
        let parsed = parse_skill_list("Python, SQL , Rust").unwrap();
        assert_eq!(parsed, skills(&["Python", "SQL", "Rust"]));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_skill_list(r#"["Python", "#),
            Err(ResumeRankerError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_skill_list(r#"[1, 2]"#),
            Err(ResumeRankerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(parse_skill_list("").is_err());
        assert!(parse_skill_list("  , , ").is_err());
        assert!(parse_skill_list("[]").is_err());
    }

    #[test]
    fn test_match_partition_properties() {
        let target = skills(&["Python", "Java", "SQL"]);
        let outcome = match_skills("Python and SQL in production", &target);

        let matched: HashSet<_> = outcome.matched.iter().cloned().collect();
        let missing: HashSet<_> = outcome.missing.iter().cloned().collect();
        let all: HashSet<_> = target.iter().cloned().collect();

        assert!(matched.is_subset(&all));
        assert!(matched.is_disjoint(&missing));
        assert_eq!(matched.union(&missing).cloned().collect::<HashSet<_>>(), all);
        assert_eq!(outcome.matched, skills(&["Python", "SQL"]));
        assert_eq!(outcome.missing, skills(&["Java"]));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let outcome = match_skills("worked with PYTHON daily", &skills(&["python"]));
        assert_eq!(outcome.matched, skills(&["python"]));
    }

    #[test]
    fn test_whole_word_matching() {
        let outcome = match_skills("JavaScript expert", &skills(&["Java"]));
        assert!(outcome.matched.is_empty());

        let outcome = match_skills("Java and JavaScript", &skills(&["Java"]));
        assert_eq!(outcome.matched, skills(&["Java"]));
    }

    #[test]
    fn test_regex_metacharacters_match_literally() {
        let target = skills(&["C++", "C#", ".NET"]);
        let outcome = match_skills("Shipped C++ services and C# tools", &target);

        assert_eq!(outcome.matched, skills(&["C++", "C#"]));
        assert_eq!(outcome.missing, skills(&[".NET"]));
    }

    #[test]
    fn test_duplicate_skills_deduplicated_in_outcome() {
        let outcome = match_skills("Python here", &skills(&["Python", "Python", "Java"]));
        assert_eq!(outcome.matched, skills(&["Python"]));
        assert_eq!(outcome.missing, skills(&["Java"]));
    }

    #[test]
    fn test_scanner_prefers_longest_match() {
        let scanner = SkillScanner::new().unwrap();
        let found = scanner.scan("JavaScript and react apps");

        assert!(found.contains(&"JavaScript".to_string()));
        assert!(found.contains(&"React".to_string()));
        assert!(!found.contains(&"Java".to_string()));
    }

    #[test]
    fn test_scanner_dedupes_hits() {
        let scanner = SkillScanner::new().unwrap();
        let found = scanner.scan("Python, python, PYTHON");
        assert_eq!(found, skills(&["Python"]));
    }
}
