// src/web/handlers/uploads.rs
//! Resume and URL-CSV upload handlers.

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::serde::json::Json;
use rocket::State;
use std::collections::HashMap;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::ingest::parse_csv;
use crate::resume::normalize_resume;
use crate::skills::SkillExtractor;
use crate::web::types::{
    bad_request, internal_error, ApiError, CsvUploadForm, CsvUploadResponse, ResumeUploadForm,
    ResumeUploadResponse, UrlMeta,
};

pub async fn upload_resume_handler(
    mut upload: Form<ResumeUploadForm<'_>>,
    config: &State<AppConfig>,
    extractor: &State<SkillExtractor>,
) -> Result<Json<ResumeUploadResponse>, ApiError> {
    let filename = upload_filename(&upload.file, "resume.txt");
    let contents = read_upload(&mut upload.file).await?;

    let text = normalize_resume(&contents, &filename).map_err(|e| {
        bad_request(
            e.to_string(),
            "RESUME_PARSE_ERROR",
            vec![
                "Upload a text, PDF, or DOCX resume".to_string(),
                "Check the file is not empty or corrupted".to_string(),
            ],
        )
    })?;

    let skills = extractor.extract(&text);

    // Mirror the normalized text to disk for legibility. Best effort.
    if let Err(e) = crate::fs_ops::write_file_safe(&config.resume_dump_path, &text).await {
        warn!("Failed to persist extracted resume text: {}", e);
    }

    info!("Resume skills extracted: {:?}", skills);
    Ok(Json(ResumeUploadResponse { text, skills }))
}

pub async fn upload_csv_handler(
    mut upload: Form<CsvUploadForm<'_>>,
) -> Result<Json<CsvUploadResponse>, ApiError> {
    let contents = read_upload(&mut upload.file).await?;

    let rows = parse_csv(&contents).map_err(|e| {
        bad_request(
            e.to_string(),
            "CSV_PARSE_ERROR",
            vec![
                "Include a 'url' header column".to_string(),
                "Add at least one row with a job URL".to_string(),
            ],
        )
    })?;

    let urls: Vec<String> = rows.iter().map(|row| row.url.clone()).collect();
    let meta: HashMap<String, UrlMeta> = rows
        .into_iter()
        .map(|row| {
            (
                row.url,
                UrlMeta {
                    benefits: non_empty(row.benefits),
                    workplace_type: non_empty(row.workplace_type),
                },
            )
        })
        .collect();

    info!("Parsed {} job URLs from CSV upload", urls.len());
    Ok(Json(CsvUploadResponse { urls, meta }))
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn upload_filename(file: &TempFile<'_>, fallback: &str) -> String {
    file.raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .unwrap_or_else(|| {
            if file.content_type().map_or(false, |ct| ct.is_pdf()) {
                "upload.pdf".to_string()
            } else {
                fallback.to_string()
            }
        })
}

/// Spools the multipart upload to a temp path and reads it back. The
/// temp file is removed either way.
async fn read_upload(file: &mut TempFile<'_>) -> Result<Vec<u8>, ApiError> {
    let temp_path = std::env::temp_dir().join(format!("hiresignal_upload_{}", Uuid::new_v4()));

    if let Err(e) = file.persist_to(&temp_path).await {
        error!("Failed to save uploaded file: {}", e);
        return Err(internal_error(
            "Failed to process uploaded file".to_string(),
            "FILE_SAVE_ERROR",
            vec!["Try uploading the file again".to_string()],
        ));
    }

    let contents = tokio::fs::read(&temp_path).await.map_err(|e| {
        error!("Failed to read uploaded file: {}", e);
        internal_error(
            "Failed to process uploaded file".to_string(),
            "FILE_READ_ERROR",
            vec!["Try uploading the file again".to_string()],
        )
    });

    let _ = tokio::fs::remove_file(&temp_path).await;
    contents
}
