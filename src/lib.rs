pub mod config;
pub mod fetch;
pub mod fs_ops;
pub mod ingest;
pub mod materials;
pub mod models;
pub mod resume;
pub mod scoring;
pub mod skills;
pub mod store;
pub mod web;

pub use config::AppConfig;
pub use web::start_web_server;
