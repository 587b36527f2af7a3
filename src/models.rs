// src/models.rs
use serde::{Deserialize, Serialize};

/// A job posting as extracted from a live page or taken from the mock pool.
/// Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub url: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub work_type: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub posted_at: Option<String>,
}

/// A posting plus its computed fit against a resume. Derived, never stored
/// on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub job: JobPosting,
    pub fit_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMaterials {
    pub inmail: String,
    pub cover_letter: String,
}

/// What a client submits when saving an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePayload {
    pub job: JobPosting,
    pub fit_score: f64,
    pub missing_skills: Vec<String>,
    pub generated: GeneratedMaterials,
    pub timestamp: String,
}

/// A persisted application: the payload plus a server-generated identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecord {
    pub id: String,
    pub job: JobPosting,
    pub fit_score: f64,
    pub missing_skills: Vec<String>,
    pub generated: GeneratedMaterials,
    pub timestamp: String,
}

impl SavedRecord {
    pub fn from_payload(id: String, payload: SavePayload) -> Self {
        Self {
            id,
            job: payload.job,
            fit_score: payload.fit_score,
            missing_skills: payload.missing_skills,
            generated: payload.generated,
            timestamp: payload.timestamp,
        }
    }
}

/// Fallback job used when live fetching fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockJob {
    pub title: String,
    pub company: String,
    pub description: String,
    pub skills: Vec<String>,
}

/// One parsed row of an uploaded URL CSV. Override fields may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub url: String,
    pub benefits: String,
    pub workplace_type: String,
}
