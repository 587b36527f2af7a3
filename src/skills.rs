// src/skills.rs
//! Keyword-based skill detection over free text.

use std::collections::BTreeSet;

/// Matches a fixed vocabulary against lowercased text by substring
/// containment. No stemming and no word-boundary checks, so short terms can
/// match inside unrelated words ("ai" inside "air").
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    vocabulary: Vec<String>,
}

impl SkillExtractor {
    /// Builds an extractor from a keyword list. Keywords are lowercased and
    /// deduplicated; the stored vocabulary is lexicographically sorted so
    /// extraction output is sorted for free.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocabulary: BTreeSet<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            vocabulary: vocabulary.into_iter().collect(),
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Returns the sorted, deduplicated subset of the vocabulary found in
    /// `text` (case-insensitive substring containment).
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|skill| lowered.contains(skill.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_skill_keywords;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(default_skill_keywords())
    }

    #[test]
    fn test_extract_finds_known_skills() {
        let skills = extractor().extract("I know Python and SQL");
        assert!(skills.contains(&"python".to_string()));
        assert!(skills.contains(&"sql".to_string()));
    }

    #[test]
    fn test_output_sorted_and_deduplicated() {
        let skills = extractor().extract("SQL sql react React python PYTHON");
        let mut sorted = skills.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(skills, sorted);
    }

    #[test]
    fn test_output_is_subset_of_vocabulary() {
        let ex = extractor();
        let skills = ex.extract("python docker kubernetes nonsense-term");
        for skill in &skills {
            assert!(ex.vocabulary().contains(skill));
        }
    }

    #[test]
    fn test_substring_match_has_known_false_positives() {
        // "ai" matches inside "air" because matching is substring-only.
        let skills = extractor().extract("fresh mountain air");
        assert!(skills.contains(&"ai".to_string()));
    }

    #[test]
    fn test_duplicate_vocabulary_entries_collapse() {
        let ex = SkillExtractor::new(["aws", "AWS", "aws"]);
        assert_eq!(ex.vocabulary(), ["aws"]);
    }

    #[test]
    fn test_empty_text_yields_no_skills() {
        assert!(extractor().extract("").is_empty());
    }
}
