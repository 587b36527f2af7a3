// src/store.rs
//! Flat-file persistence for accepted applications.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{SavePayload, SavedRecord};

/// Storage seam for saved applications. Callers only ever list and append;
/// a real datastore can replace the file-backed implementation behind this
/// trait.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<SavedRecord>>;
    async fn append(&self, payload: SavePayload) -> Result<SavedRecord>;
}

/// JSON-array file store. Every append reads the whole file, pushes one
/// record, and rewrites the whole array. Writes are serialized through an
/// in-process mutex; cross-process writers are not coordinated.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Seeds an empty array file so later reads never hit a missing file.
    pub async fn init(&self) -> Result<()> {
        if !self.path.exists() {
            crate::fs_ops::write_file_safe(&self.path, "[]").await?;
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<SavedRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = crate::fs_ops::read_file_safe(&self.path).await?;
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed store file: {}", self.path.display()))
    }

    async fn write_all(&self, records: &[SavedRecord]) -> Result<()> {
        let content =
            serde_json::to_string_pretty(records).context("Failed to serialize saved records")?;
        crate::fs_ops::write_file_safe(&self.path, &content).await
    }
}

#[async_trait]
impl ApplicationRepository for JsonFileStore {
    async fn list(&self) -> Result<Vec<SavedRecord>> {
        self.read_all().await
    }

    async fn append(&self, payload: SavePayload) -> Result<SavedRecord> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_all().await?;
        let record = SavedRecord::from_payload(Uuid::new_v4().to_string(), payload);
        records.push(record.clone());
        self.write_all(&records).await?;

        Ok(record)
    }
}

/// Renders the saved records as the export CSV: a fixed header and one
/// double-quoted line per record. Embedded quotes and commas are not
/// escaped beyond the surrounding quotes.
pub fn export_csv(records: &[SavedRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push("job_title,company,fit_score,missing_skills,linkedin_url,timestamp".to_string());

    for record in records {
        lines.push(format!(
            "\"{}\",\"{}\",{},\"{}\",\"{}\",\"{}\"",
            record.job.title,
            record.job.company,
            record.fit_score,
            record.missing_skills.join("|"),
            record.job.url,
            record.timestamp,
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeneratedMaterials, JobPosting};

    fn payload(title: &str) -> SavePayload {
        SavePayload {
            job: JobPosting {
                id: "job-1".to_string(),
                url: "https://jobs.example/1".to_string(),
                title: title.to_string(),
                company: "North Analytics".to_string(),
                description: "pipelines".to_string(),
                required_skills: vec!["python".to_string(), "sql".to_string()],
                location: None,
                salary: Some("$120K/yr".to_string()),
                work_type: Some("Hybrid".to_string()),
                contact_person: None,
                posted_at: None,
            },
            fit_score: 50.0,
            missing_skills: vec!["airflow".to_string(), "etl".to_string()],
            generated: GeneratedMaterials {
                inmail: "hello".to_string(),
                cover_letter: "dear team".to_string(),
            },
            timestamp: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    fn store_in(dir: &std::path::Path) -> JsonFileStore {
        JsonFileStore::new(dir.join("db.json"))
    }

    #[tokio::test]
    async fn test_init_seeds_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.init().await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("db.json")).unwrap();
        assert_eq!(content, "[]");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_assigns_fresh_ids_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let first = store.append(payload("Data Engineer")).await.unwrap();
        let second = store.append(payload("ML Engineer")).await.unwrap();
        assert_ne!(first.id, second.id);

        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].job.title, "Data Engineer");
        assert_eq!(records[1].job.title, "ML Engineer");
    }

    #[tokio::test]
    async fn test_list_survives_process_restart() {
        let dir = tempfile::tempdir().unwrap();
        store_in(dir.path())
            .append(payload("Data Engineer"))
            .await
            .unwrap();

        let reopened = store_in(dir.path());
        assert_eq!(reopened.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_store_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("db.json"), "not json").unwrap();
        assert!(store_in(dir.path()).list().await.is_err());
    }

    #[tokio::test]
    async fn test_export_contains_saved_fields_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.append(payload("Data Engineer")).await.unwrap();

        let csv = export_csv(&store.list().await.unwrap());
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "job_title,company,fit_score,missing_skills,linkedin_url,timestamp"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Data Engineer\",\"North Analytics\",50,\"airflow|etl\",\"https://jobs.example/1\",\"2024-05-01T10:00:00Z\""
        );
    }

    #[test]
    fn test_export_of_empty_store_is_header_only() {
        assert_eq!(
            export_csv(&[]),
            "job_title,company,fit_score,missing_skills,linkedin_url,timestamp"
        );
    }
}
