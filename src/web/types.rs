// src/web/types.rs
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::store::ApplicationRepository;

/// Managed handle to the saved-application repository.
pub struct SavedStore(pub Arc<dyn ApplicationRepository>);

impl SavedStore {
    pub fn repo(&self) -> &dyn ApplicationRepository {
        self.0.as_ref()
    }
}

#[derive(FromForm)]
pub struct ResumeUploadForm<'f> {
    pub file: TempFile<'f>,
}

#[derive(FromForm)]
pub struct CsvUploadForm<'f> {
    pub file: TempFile<'f>,
}

#[derive(FromForm)]
pub struct ProcessJobsForm {
    pub resume_text: String,
    /// Comma-separated job URLs.
    pub urls: String,
    /// Optional JSON object mapping url -> per-row overrides.
    pub url_meta: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResumeUploadResponse {
    pub text: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct UrlMeta {
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub workplace_type: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CsvUploadResponse {
    pub urls: Vec<String>,
    pub meta: HashMap<String, UrlMeta>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ProcessJobsResponse {
    pub jobs: Vec<crate::models::JobAnalysis>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct GenerateRequest {
    pub job: crate::models::JobPosting,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub matched_skills: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct InmailResponse {
    pub inmail: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ExportResponse {
    pub csv: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

/// Error responder used by every handler: a status code plus a structured
/// JSON body.
pub type ApiError = status::Custom<Json<ErrorResponse>>;

pub fn bad_request(error: String, error_code: &str, suggestions: Vec<String>) -> ApiError {
    status::Custom(
        Status::BadRequest,
        Json(ErrorResponse::new(error, error_code.to_string(), suggestions)),
    )
}

pub fn internal_error(error: String, error_code: &str, suggestions: Vec<String>) -> ApiError {
    status::Custom(
        Status::InternalServerError,
        Json(ErrorResponse::new(error, error_code.to_string(), suggestions)),
    )
}
