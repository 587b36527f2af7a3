// src/materials.rs
//! Outreach text generation: an InMail message and a cover letter, filled
//! from markdown templates with hardcoded fallback copy.

use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

use crate::config::AppConfig;
use crate::models::JobPosting;

fn hiring_in_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"hiring\s+(.+?)\s+in\s+.+")
            .case_insensitive(true)
            .build()
            .expect("invalid hiring-in pattern")
    })
}

fn hiring_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"hiring\s+(.+)")
            .case_insensitive(true)
            .build()
            .expect("invalid hiring pattern")
    })
}

fn title_at_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"(.+?)\s+at\s+.+")
            .case_insensitive(true)
            .build()
            .expect("invalid title-at pattern")
    })
}

fn trailing_in_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"\s+in\s+[^,]+$")
            .case_insensitive(true)
            .build()
            .expect("invalid trailing-in pattern")
    })
}

/// Strips "Company is hiring X in Y" / "X at Company" phrasing from a
/// scraped title, leaving the bare role name.
pub fn clean_job_title(title: &str) -> String {
    let mut cleaned = title.trim().to_string();

    if let Some(c) = hiring_in_re().captures(&cleaned).and_then(|c| c.get(1)) {
        cleaned = c.as_str().to_string();
    } else if let Some(c) = hiring_re().captures(&cleaned).and_then(|c| c.get(1)) {
        cleaned = c.as_str().to_string();
    } else if let Some(c) = title_at_re().captures(&cleaned).and_then(|c| c.get(1)) {
        cleaned = c.as_str().to_string();
    }

    cleaned = trailing_in_re().replace(&cleaned, "").to_string();
    cleaned.trim_matches([' ', ',']).to_string()
}

/// The person the InMail addresses: a scraped contact, or the company's
/// hiring team.
pub fn salutation(job: &JobPosting) -> String {
    match job.contact_person.as_deref() {
        Some(contact) if !contact.is_empty() => contact.to_string(),
        _ => format!("{} hiring team", job.company),
    }
}

pub struct MaterialGenerator {
    inmail_template_path: PathBuf,
    cover_template_path: PathBuf,
}

impl MaterialGenerator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            inmail_template_path: config.inmail_template_path.clone(),
            cover_template_path: config.cover_template_path.clone(),
        }
    }

    pub async fn generate_inmail(&self, job: &JobPosting, matched_skills: &[String]) -> String {
        let salutation = salutation(job);
        let clean_title = clean_job_title(&job.title);

        let Some(template) = load_template(&self.inmail_template_path).await else {
            let highlights = top_skills(matched_skills, 3, "relevant experience");
            info!("InMail template missing; using fallback copy");
            return format!(
                "Hello {salutation},\nI'm excited about the {clean_title} role at {company}. \
                 I bring {highlights} and have shipped products that align with your needs. \
                 Job link: {url}",
                company = job.company,
                url = job.url,
            );
        };

        template
            .replace("<job title>", &clean_title)
            .replace("<contact>", &salutation)
            .replace("<company>", &job.company)
            .replace("<job url>", &job.url)
    }

    pub async fn generate_cover_letter(
        &self,
        job: &JobPosting,
        matched_skills: &[String],
    ) -> String {
        let clean_title = clean_job_title(&job.title);
        let today = chrono::Local::now().format("%B %d, %Y").to_string();

        let Some(template) = load_template(&self.cover_template_path).await else {
            let skills_text = top_skills(matched_skills, 5, "relevant technical experience");
            info!("Cover letter template missing; using fallback copy");
            return format!(
                "I am applying for the {clean_title} position at {company}. \
                 My background includes {skills_text}.\n\nThank you for your consideration.\n",
                company = job.company,
            );
        };

        template
            .replace("<current date>", &today)
            .replace("<company>", &job.company)
            .replace("<job title>", &clean_title)
    }
}

async fn load_template(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) if !content.is_empty() => Some(content),
        _ => None,
    }
}

fn top_skills(matched_skills: &[String], count: usize, fallback: &str) -> String {
    if matched_skills.is_empty() {
        fallback.to_string()
    } else {
        matched_skills
            .iter()
            .take(count)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}
