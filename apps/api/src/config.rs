use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::analysis::scoring::ScorerBackend;

const DEFAULT_JOB_DESCRIPTIONS_PATH: &str = "job_description.txt";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub job_descriptions_path: PathBuf,
    /// One stopword per line; the built-in English list when unset.
    pub stopwords_path: Option<PathBuf>,
    pub scorer: ScorerBackend,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            job_descriptions_path: lookup("JOB_DESCRIPTIONS_PATH")
                .unwrap_or_else(|| DEFAULT_JOB_DESCRIPTIONS_PATH.to_string())
                .into(),
            stopwords_path: lookup("STOPWORDS_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            scorer: match lookup("SCORER") {
                Some(value) => value.parse::<ScorerBackend>().map_err(|e| anyhow!(e))?,
                None => ScorerBackend::default(),
            },
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(value) => value
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}
