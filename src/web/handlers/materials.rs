// src/web/handlers/materials.rs
//! Outreach generation endpoints.

use rocket::serde::json::Json;
use rocket::State;

use crate::materials::MaterialGenerator;
use crate::web::types::{CoverLetterResponse, GenerateRequest, InmailResponse};

pub async fn generate_inmail_handler(
    request: Json<GenerateRequest>,
    generator: &State<MaterialGenerator>,
) -> Json<InmailResponse> {
    let matched = request.matched_skills.clone().unwrap_or_default();
    let inmail = generator.generate_inmail(&request.job, &matched).await;
    Json(InmailResponse { inmail })
}

pub async fn generate_cover_letter_handler(
    request: Json<GenerateRequest>,
    generator: &State<MaterialGenerator>,
) -> Json<CoverLetterResponse> {
    let matched = request.matched_skills.clone().unwrap_or_default();
    let cover_letter = generator
        .generate_cover_letter(&request.job, &matched)
        .await;
    Json(CoverLetterResponse { cover_letter })
}
