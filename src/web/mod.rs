// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::fetch::JobFetcher;
use crate::materials::MaterialGenerator;
use crate::models::{SavePayload, SavedRecord};
use crate::skills::SkillExtractor;
use crate::store::JsonFileStore;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/upload/resume", data = "<upload>")]
pub async fn upload_resume(
    upload: Form<ResumeUploadForm<'_>>,
    config: &State<AppConfig>,
    extractor: &State<SkillExtractor>,
) -> Result<Json<ResumeUploadResponse>, ApiError> {
    handlers::upload_resume_handler(upload, config, extractor).await
}

#[post("/upload/csv", data = "<upload>")]
pub async fn upload_csv(
    upload: Form<CsvUploadForm<'_>>,
) -> Result<Json<CsvUploadResponse>, ApiError> {
    handlers::upload_csv_handler(upload).await
}

#[post("/jobs/process", data = "<form>")]
pub async fn process_jobs(
    form: Form<ProcessJobsForm>,
    fetcher: &State<JobFetcher>,
    extractor: &State<SkillExtractor>,
) -> Result<Json<ProcessJobsResponse>, ApiError> {
    handlers::process_jobs_handler(form, fetcher, extractor).await
}

#[post("/generate/inmail", data = "<request>")]
pub async fn generate_inmail(
    request: Json<GenerateRequest>,
    generator: &State<MaterialGenerator>,
) -> Json<InmailResponse> {
    handlers::generate_inmail_handler(request, generator).await
}

#[post("/generate/coverletter", data = "<request>")]
pub async fn generate_cover_letter(
    request: Json<GenerateRequest>,
    generator: &State<MaterialGenerator>,
) -> Json<CoverLetterResponse> {
    handlers::generate_cover_letter_handler(request, generator).await
}

#[get("/saved")]
pub async fn get_saved(store: &State<SavedStore>) -> Result<Json<Vec<SavedRecord>>, ApiError> {
    handlers::get_saved_handler(store).await
}

#[post("/save", data = "<payload>")]
pub async fn save_application(
    payload: Json<SavePayload>,
    store: &State<SavedStore>,
) -> Result<Json<SavedRecord>, ApiError> {
    handlers::save_application_handler(payload, store).await
}

#[get("/saved/export")]
pub async fn export_saved(store: &State<SavedStore>) -> Result<Json<ExportResponse>, ApiError> {
    handlers::export_saved_handler(store).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request_catcher() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error_catcher() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

// Main server start function
pub async fn start_web_server(config: AppConfig, port: u16) -> Result<()> {
    config.ensure_paths().await?;

    let store = JsonFileStore::new(config.db_path.clone());
    store.init().await?;

    let extractor = SkillExtractor::new(config.skill_keywords.clone());
    let fetcher = JobFetcher::new(&config, extractor.clone());
    let generator = MaterialGenerator::new(&config);

    info!("Starting HireSignal API server on port {}", port);
    info!("Application store: {}", config.db_path.display());
    info!("Fetched pages: {}", config.fetched_pages_dir.display());

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(config)
        .manage(extractor)
        .manage(fetcher)
        .manage(generator)
        .manage(SavedStore(Arc::new(store)))
        .register("/", catchers![bad_request_catcher, internal_error_catcher])
        .mount(
            "/",
            routes![
                upload_resume,
                upload_csv,
                process_jobs,
                generate_inmail,
                generate_cover_letter,
                get_saved,
                save_application,
                export_saved,
                options,
            ],
        )
        .launch()
        .await?;

    Ok(())
}
