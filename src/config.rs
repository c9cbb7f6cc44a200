//! Application configuration loaded from the process environment.
//!
//! A `.env` file in the working directory is honoured through `dotenvy`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::document::SubstitutionPolicy;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// How a finished PDF is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeDelivery {
    /// Persist the PDF and return a `/download/{id}` link.
    Download,
    /// Embed the PDF in the response as base64.
    Inline,
}

impl NoticeDelivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Inline => "inline",
        }
    }
}

impl FromStr for NoticeDelivery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "download" | "file" | "url" => Ok(Self::Download),
            "inline" | "base64" => Ok(Self::Inline),
            other => Err(format!("expected 'download' or 'inline', got '{other}'")),
        }
    }
}

/// Settings for the completion service client.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }
}

/// Settings for the on-disk artifact store.
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
    pub ttl: Duration,
    pub max_count: u64,
    pub sweep_interval: Duration,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            ttl: Duration::from_secs(60 * 60),
            max_count: 500,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub delivery: NoticeDelivery,
    pub completion: CompletionConfig,
    pub artifacts: ArtifactConfig,
    pub substitution: SubstitutionPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("GROQ_API_KEY"))?;

        let mut completion = CompletionConfig::new(api_key);
        if let Ok(url) = env::var("GROQ_API_URL") {
            completion.api_url = url;
        }
        if let Ok(model) = env::var("GROQ_MODEL") {
            completion.model = model;
        }
        if let Some(secs) = parse_var::<u64>("GENERATION_TIMEOUT_SECS")? {
            completion.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = parse_var::<u32>("GENERATION_MAX_RETRIES")? {
            completion.max_retries = retries;
        }

        let mut artifacts = ArtifactConfig::default();
        if let Ok(dir) = env::var("ARTIFACT_DIR") {
            artifacts.dir = PathBuf::from(dir);
        }
        if let Some(secs) = parse_var::<u64>("ARTIFACT_TTL_SECS")? {
            artifacts.ttl = Duration::from_secs(secs);
        }
        if let Some(count) = parse_var::<u64>("ARTIFACT_MAX_COUNT")? {
            artifacts.max_count = count;
        }
        if let Some(secs) = parse_var::<u64>("ARTIFACT_SWEEP_SECS")? {
            artifacts.sweep_interval = Duration::from_secs(secs.max(1));
        }

        let replacement = match env::var("PDF_REPLACEMENT_CHAR") {
            Ok(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if (c as u32) < 0x100 => c,
                    _ => {
                        return Err(ConfigError::Invalid {
                            key: "PDF_REPLACEMENT_CHAR",
                            value,
                            reason: "expected a single Latin-1 character".to_string(),
                        })
                    }
                }
            }
            Err(_) => '?',
        };
        let substitution = match env::var("PDF_SUBSTITUTION") {
            Ok(value) => match value.trim().to_lowercase().as_str() {
                "replace" => SubstitutionPolicy::Replace(replacement),
                "transliterate" => SubstitutionPolicy::Transliterate(replacement),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "PDF_SUBSTITUTION",
                        value,
                        reason: "expected 'replace' or 'transliterate'".to_string(),
                    })
                }
            },
            Err(_) => SubstitutionPolicy::Replace(replacement),
        };

        let delivery = parse_var::<NoticeDelivery>("NOTICE_DELIVERY")?
            .unwrap_or(NoticeDelivery::Download);

        let cors_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:3000".to_string(),
                    "http://localhost:8080".to_string(),
                    "http://127.0.0.1:8080".to_string(),
                ]
            });

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var::<u16>("PORT")?.unwrap_or(8080),
            cors_origins,
            delivery,
            completion,
            artifacts,
            substitution,
        })
    }
}

fn parse_var<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
