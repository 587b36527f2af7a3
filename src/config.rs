// src/config.rs
//! Application configuration. Everything the components need (file paths,
//! the skill vocabulary, the mock-job pool, fetch settings) lives here and
//! is passed into constructors explicitly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::MockJob;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_dir: PathBuf,
    /// JSON array file holding all saved applications.
    pub db_path: PathBuf,
    /// Raw fetched pages land here for diagnostics.
    pub fetched_pages_dir: PathBuf,
    /// Normalized resume text is mirrored here for legibility.
    pub resume_dump_path: PathBuf,
    pub inmail_template_path: PathBuf,
    pub cover_template_path: PathBuf,
    pub skill_keywords: Vec<String>,
    pub mock_jobs: Vec<MockJob>,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
}

/// Optional overrides read from `hiresignal.toml` in the base directory.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    #[serde(default)]
    skill_keywords: Option<Vec<String>>,
    #[serde(default)]
    fetch_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Builds the configuration for `base_dir`, merging `hiresignal.toml`
    /// overrides when the file exists.
    pub fn load(base_dir: PathBuf) -> Result<Self> {
        let overrides = Self::load_overrides(&base_dir)?;

        Ok(Self {
            db_path: base_dir.join("db.json"),
            fetched_pages_dir: base_dir.join("fetched_pages"),
            resume_dump_path: base_dir.join("resume_extracted.txt"),
            inmail_template_path: base_dir.join("templates").join("emails").join("inmail.md"),
            cover_template_path: base_dir
                .join("templates")
                .join("cover_letters")
                .join("cover_letter.md"),
            skill_keywords: overrides
                .skill_keywords
                .unwrap_or_else(default_skill_keywords),
            mock_jobs: default_mock_jobs(),
            fetch_timeout_secs: overrides.fetch_timeout_secs.unwrap_or(10),
            user_agent: BROWSER_USER_AGENT.to_string(),
            base_dir,
        })
    }

    fn load_overrides(base_dir: &Path) -> Result<ConfigOverrides> {
        let path = base_dir.join("hiresignal.toml");
        if !path.exists() {
            return Ok(ConfigOverrides::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let overrides: ConfigOverrides = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration overrides from {}", path.display());
        Ok(overrides)
    }

    /// Resolve the base directory the way the deployment expects: `/app` in
    /// production, the current directory otherwise.
    pub fn resolve_base_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir);
        }

        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        if env == "production" {
            Ok(PathBuf::from("/app"))
        } else {
            std::env::current_dir().context("Failed to get current directory")
        }
    }

    /// Create the directories and seed files the service expects at runtime.
    pub async fn ensure_paths(&self) -> Result<()> {
        crate::fs_ops::ensure_dir_exists(&self.fetched_pages_dir).await?;

        if let Some(parent) = self.db_path.parent() {
            crate::fs_ops::ensure_dir_exists(parent).await?;
        }
        for template in [&self.inmail_template_path, &self.cover_template_path] {
            if let Some(parent) = template.parent() {
                crate::fs_ops::ensure_dir_exists(parent).await?;
            }
        }

        Ok(())
    }
}

/// Default skill vocabulary. Duplicated entries collapse when the extractor
/// is built.
pub fn default_skill_keywords() -> Vec<String> {
    [
        "python",
        "javascript",
        "typescript",
        "react",
        "node",
        "fastapi",
        "aws",
        "gcp",
        "azure",
        "sql",
        "postgres",
        "docker",
        "kubernetes",
        "ci",
        "cd",
        "ml",
        "ai",
        "llm",
        "nlp",
        "data",
        "analytics",
        "django",
        "flask",
        "tailwind",
        "css",
        "html",
        "api",
        "graphql",
        "devops",
        "governance",
        "audit",
        "lifecycle management",
        "modeling",
        "taxonomy",
        "chatbot",
        "voice assistant",
        "agentic system",
        "agent",
        "ux",
        "consulting",
        "prompting",
        "prompt engineering",
        "workflow design",
        "risk management",
        "business intelligence",
        "advanced analytics",
        "data science",
        "team building",
        "project management",
        "data visualization",
        "data model",
        "etl",
        "data lake",
        "data warehouse",
        "data quality",
        "data management",
        "process engineering",
        "automation",
        "solution design",
        "change management",
        "lean operations",
        "agile",
        "finance",
        "financial reporting",
        "dashboard",
        "product strategy",
        "product management",
        "customer engagement",
        "research",
        "vendor",
        "statistics",
        "hugging face",
        "anthropic",
        "langchain",
        "tableau",
        "power bi",
        "looker",
        "google cloud",
        "bigquery",
        "vertex ai",
        "airflow",
        "snowflake",
        "plotly",
        "qlik",
        "dbeaver",
        "elastic",
        "mongo",
        "apache",
        "spark",
        "git",
        "jira",
        "saas",
        "databricks",
        "streamlit",
        "loveable",
        "deep learning",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Fallback jobs used when live fetching fails.
pub fn default_mock_jobs() -> Vec<MockJob> {
    vec![
        MockJob {
            title: "Senior Frontend Engineer".to_string(),
            company: "BrightPath".to_string(),
            description: "Build React interfaces, collaborate with design, own accessibility, \
                          optimize performance. Stack: React, TypeScript, Tailwind, Vite."
                .to_string(),
            skills: ["react", "typescript", "tailwind", "accessibility", "performance"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
        MockJob {
            title: "Data Engineer".to_string(),
            company: "North Analytics".to_string(),
            description: "Design data pipelines, manage ETL, work with Python, SQL, Airflow, \
                          and cloud warehouses. Improve data quality and reliability."
                .to_string(),
            skills: ["python", "sql", "airflow", "etl", "data quality"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
        MockJob {
            title: "Applied ML Engineer".to_string(),
            company: "Signal Labs".to_string(),
            description: "Ship ML features using Python, FastAPI, embeddings, and vector \
                          search. Work on LLM-powered assistants."
                .to_string(),
            skills: ["python", "fastapi", "embeddings", "llm", "vector search"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_override_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().to_path_buf()).unwrap();
        assert_eq!(config.fetch_timeout_secs, 10);
        assert!(config.skill_keywords.contains(&"python".to_string()));
        assert!(config.db_path.ends_with("db.json"));
    }

    #[test]
    fn test_toml_overrides_are_merged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("hiresignal.toml"),
            "skill_keywords = [\"rust\", \"tokio\"]\nfetch_timeout_secs = 3\n",
        )
        .unwrap();

        let config = AppConfig::load(dir.path().to_path_buf()).unwrap();
        assert_eq!(config.skill_keywords, vec!["rust", "tokio"]);
        assert_eq!(config.fetch_timeout_secs, 3);
    }

    #[test]
    fn test_mock_pool_has_three_entries() {
        assert_eq!(default_mock_jobs().len(), 3);
    }
}
