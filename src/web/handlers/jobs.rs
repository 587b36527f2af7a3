// src/web/handlers/jobs.rs
//! Batch job processing: fetch each URL and score it against the resume.

use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::fetch::JobFetcher;
use crate::scoring::compute_fit;
use crate::skills::SkillExtractor;
use crate::web::types::{bad_request, ApiError, ProcessJobsForm, ProcessJobsResponse, UrlMeta};

pub async fn process_jobs_handler(
    form: Form<ProcessJobsForm>,
    fetcher: &State<JobFetcher>,
    extractor: &State<SkillExtractor>,
) -> Result<Json<ProcessJobsResponse>, ApiError> {
    let url_list: Vec<&str> = form
        .urls
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .collect();

    if url_list.is_empty() {
        return Err(bad_request(
            "No URLs provided".to_string(),
            "NO_URLS",
            vec!["Pass at least one job URL in 'urls'".to_string()],
        ));
    }

    let meta_map: HashMap<String, UrlMeta> = form
        .url_meta
        .as_deref()
        .map(|raw| {
            serde_json::from_str(raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed url_meta: {}", e);
                HashMap::new()
            })
        })
        .unwrap_or_default();

    info!("Processing {} job URLs", url_list.len());

    // Sequential on purpose: one slow posting should not fan out into a
    // burst of scrapes against the same job board.
    let mut jobs = Vec::with_capacity(url_list.len());
    for url in url_list {
        let meta = meta_map.get(url);
        let salary_override = meta.and_then(|m| m.benefits.as_deref()).filter(|s| !s.is_empty());
        let workplace_override = meta
            .and_then(|m| m.workplace_type.as_deref())
            .filter(|s| !s.is_empty());

        let job = fetcher
            .get_job(url, salary_override, workplace_override)
            .await;
        let analysis = compute_fit(extractor, &job, &form.resume_text);

        info!(
            "Fit score for {} -> {}%; missing skills: {:?}",
            url, analysis.fit_score, analysis.missing_skills
        );
        jobs.push(analysis);
    }

    Ok(Json(ProcessJobsResponse { jobs }))
}
