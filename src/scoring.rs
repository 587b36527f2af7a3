// src/scoring.rs
//! Resume-vs-job fit computation.

use std::collections::BTreeSet;
use tracing::info;

use crate::models::{JobAnalysis, JobPosting};
use crate::skills::SkillExtractor;

/// Compares a job's required skills against the skills found in the resume
/// text. Required skills come from the posting, or are extracted from its
/// description when the posting carries none. The score is the percentage
/// of required skills matched, with the denominator floored at 1.
pub fn compute_fit(extractor: &SkillExtractor, job: &JobPosting, resume_text: &str) -> JobAnalysis {
    let resume_skills: BTreeSet<String> = extractor.extract(resume_text).into_iter().collect();

    let required: Vec<String> = if job.required_skills.is_empty() {
        extractor.extract(&job.description)
    } else {
        job.required_skills.clone()
    };

    let matched: Vec<String> = required
        .iter()
        .filter(|skill| resume_skills.contains(*skill))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let missing: Vec<String> = required
        .iter()
        .filter(|skill| !resume_skills.contains(*skill))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let total = required.len().max(1);
    let fit_score = ((matched.len() as f64 / total as f64) * 100.0).round();

    info!(
        "Job skills for {} -> required={:?} matched={:?} missing={:?}",
        job.url, required, matched, missing
    );

    JobAnalysis {
        job: job.clone(),
        fit_score,
        matched_skills: matched,
        missing_skills: missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_skill_keywords;

    fn job(skills: &[&str], description: &str) -> JobPosting {
        JobPosting {
            id: "job-1".to_string(),
            url: "https://jobs.example/1".to_string(),
            title: "Data Engineer".to_string(),
            company: "North Analytics".to_string(),
            description: description.to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            location: None,
            salary: None,
            work_type: None,
            contact_person: None,
            posted_at: None,
        }
    }

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(default_skill_keywords())
    }

    #[test]
    fn test_score_is_matched_over_required() {
        let analysis = compute_fit(
            &extractor(),
            &job(&["python", "sql", "airflow", "etl"], ""),
            "I write Python and SQL every day",
        );
        assert_eq!(analysis.fit_score, 50.0);
        assert_eq!(analysis.matched_skills, vec!["python", "sql"]);
        assert_eq!(analysis.missing_skills, vec!["airflow", "etl"]);
    }

    #[test]
    fn test_score_bounds() {
        let full = compute_fit(&extractor(), &job(&["python"], ""), "python");
        assert_eq!(full.fit_score, 100.0);

        let none = compute_fit(&extractor(), &job(&["python"], ""), "no match here at all");
        assert_eq!(none.fit_score, 0.0);
    }

    #[test]
    fn test_empty_required_uses_description() {
        let analysis = compute_fit(
            &extractor(),
            &job(&[], "Looking for Python and Docker experience"),
            "Python developer",
        );
        assert!(analysis.matched_skills.contains(&"python".to_string()));
        assert!(analysis.missing_skills.contains(&"docker".to_string()));
    }

    #[test]
    fn test_no_required_skills_at_all_scores_zero() {
        let analysis = compute_fit(&extractor(), &job(&[], "nothing recognizable"), "python");
        assert_eq!(analysis.fit_score, 0.0);
        assert!(analysis.matched_skills.is_empty());
        assert!(analysis.missing_skills.is_empty());
    }

    #[test]
    fn test_matched_and_missing_are_sorted_and_disjoint() {
        let analysis = compute_fit(
            &extractor(),
            &job(&["sql", "python", "airflow"], ""),
            "sql and python",
        );
        let mut sorted = analysis.matched_skills.clone();
        sorted.sort();
        assert_eq!(analysis.matched_skills, sorted);
        for skill in &analysis.matched_skills {
            assert!(!analysis.missing_skills.contains(skill));
        }
    }
}
