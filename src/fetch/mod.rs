// src/fetch/mod.rs
//! Job-posting retrieval: a single GET against the posting URL, a
//! best-effort extraction pass over the returned HTML, and a deterministic
//! mock fallback when either step fails.

use regex::{Regex, RegexBuilder};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::{JobPosting, MockJob};
use crate::skills::SkillExtractor;

pub mod extractors;
pub mod html;
pub mod salary;

use extractors::PageExtractors;
use html::{clean_html_to_text, sanitize_description};
use salary::{capitalize, detect_work_type_word, find_salary_range, format_salary_to_k, normalize_work_type};

fn company_from_title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"at\s+([^|<]+)\|")
            .case_insensitive(true)
            .build()
            .expect("invalid company-from-title pattern")
    })
}

pub struct JobFetcher {
    client: Client,
    extractors: PageExtractors,
    skills: SkillExtractor,
    mock_jobs: Vec<MockJob>,
    fetched_pages_dir: PathBuf,
}

impl JobFetcher {
    pub fn new(config: &AppConfig, skills: SkillExtractor) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            extractors: PageExtractors::new(),
            skills,
            mock_jobs: config.mock_jobs.clone(),
            fetched_pages_dir: config.fetched_pages_dir.clone(),
        }
    }

    /// Resolves a URL to a posting. Never fails: any network or extraction
    /// problem degrades to a mock selected deterministically from the URL.
    pub async fn get_job(
        &self,
        url: &str,
        salary_override: Option<&str>,
        workplace_override: Option<&str>,
    ) -> JobPosting {
        if let Some(job) = self
            .fetch_job(url, salary_override, workplace_override)
            .await
        {
            return job;
        }

        info!("Using mock fallback for {}", url);
        self.mock_job(url, salary_override, workplace_override)
    }

    async fn fetch_job(
        &self,
        url: &str,
        salary_override: Option<&str>,
        workplace_override: Option<&str>,
    ) -> Option<JobPosting> {
        info!("Fetching job post: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Fetch failed for {}: HTTP {}", url, response.status());
            return None;
        }

        let page = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read response body for {}: {}", url, e);
                return None;
            }
        };

        self.persist_page(url, &page).await;
        self.parse_job(url, &page, salary_override, workplace_override)
    }

    /// Keeps the raw page around for diagnostics. Best effort only.
    async fn persist_page(&self, url: &str, page: &str) {
        let safe_name = format!("{}.html", url.replace("://", "_").replace('/', "_"));
        let path = self.fetched_pages_dir.join(safe_name);
        if let Err(e) = crate::fs_ops::write_file_safe(&path, page).await {
            warn!("Failed to persist fetched page for {}: {}", url, e);
        }
    }

    fn parse_job(
        &self,
        url: &str,
        page: &str,
        salary_override: Option<&str>,
        workplace_override: Option<&str>,
    ) -> Option<JobPosting> {
        let raw_title = self.extractors.title.extract(page);
        let title = raw_title
            .as_deref()
            .map(|t| t.split('|').next().unwrap_or(t).trim().to_string());

        let company = self
            .extractors
            .company
            .extract(page)
            .or_else(|| {
                // LinkedIn title tags sometimes carry "Role at Company | LinkedIn";
                // the raw capture still has the pipe this pattern needs.
                raw_title.as_deref().and_then(|t| {
                    company_from_title_re()
                        .captures(t)
                        .and_then(|c| c.get(1))
                        .map(|m| m.as_str().trim().to_string())
                })
            })
            .filter(|company| !company.is_empty());

        let page_text = clean_html_to_text(page);

        let description_source = self
            .extractors
            .description
            .extract(page)
            .map(|fragment| clean_html_to_text(&fragment))
            .unwrap_or_else(|| page_text.clone());
        let description = sanitize_description(&description_source);

        let (title, company) = match (title, company) {
            (Some(title), Some(company)) if !title.is_empty() => (title, company),
            _ => {
                info!("Missing parsed title/company for {}; falling back to mock", url);
                return None;
            }
        };

        let mut required_skills = self.skills.extract(&description);
        for skill in self.skills.extract(&page_text) {
            if !required_skills.contains(&skill) {
                required_skills.push(skill);
            }
        }
        required_skills.sort();

        let posted_at = self.extractors.posted_at.extract(page);
        let contact_person = self.extractors.contact_person.extract(page);
        let location = self.extractors.location.extract(page);

        let raw_salary = find_salary_range(page)
            .or_else(|| salary_override.map(str::to_string))
            .unwrap_or_else(|| "Unavailable".to_string());
        let salary = if raw_salary.eq_ignore_ascii_case("unavailable") {
            "Unavailable".to_string()
        } else {
            format_salary_to_k(&raw_salary)
        };

        let raw_work_type = detect_work_type_word(page);
        let work_type = normalize_work_type(page, workplace_override);

        info!(
            "Parsed job for {} -> {} @ {} | location={:?} salary={:?} work_type_raw={:?} work_type={:?}",
            url, title, company, location, salary, raw_work_type, work_type
        );

        Some(JobPosting {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title,
            company,
            description,
            required_skills,
            location,
            salary: Some(salary),
            work_type: Some(work_type),
            contact_person,
            posted_at,
        })
    }

    /// Deterministic fallback: pool index from the URL length, title
    /// suffixed with the URL's last path segment.
    fn mock_job(
        &self,
        url: &str,
        salary_override: Option<&str>,
        workplace_override: Option<&str>,
    ) -> JobPosting {
        let mock = &self.mock_jobs[url.len() % self.mock_jobs.len()];

        let slug = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("listing");

        let mut required_skills = self.skills.extract(&mock.description);
        if required_skills.is_empty() {
            required_skills = mock.skills.clone();
        }

        JobPosting {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title: format!("{} ({})", mock.title, slug),
            company: mock.company.clone(),
            description: mock.description.clone(),
            required_skills,
            location: None,
            salary: Some(
                salary_override
                    .map(str::to_string)
                    .unwrap_or_else(|| "Unavailable".to_string()),
            ),
            work_type: Some(
                workplace_override
                    .map(capitalize)
                    .unwrap_or_else(|| "Unavailable".to_string()),
            ),
            contact_person: None,
            posted_at: None,
        }
    }
}
