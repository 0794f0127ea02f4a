use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,
    pub max_body_bytes: usize,

    pub ai_api_key: String,
    pub ai_api_base: String,
    pub ai_text_model: String,
    pub ai_image_model: String,
    pub ai_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        Ok(Self {
            database_url: var("DATABASE_URL", "sqlite://daybook.db?mode=rwc"),
            database_max_connections: var("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8080")
                .parse()
                .context("PORT must be a number")?,
            frontend_url: var("FRONTEND_URL", "http://localhost:3000"),
            cors_extra_origins: lookup("CORS_EXTRA_ORIGINS")
                .map(|extra| {
                    extra
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            // Entries carry base64 images, so the axum 2MB default is too small.
            max_body_bytes: var("MAX_BODY_BYTES", "16777216")
                .parse()
                .context("MAX_BODY_BYTES must be a number")?,

            ai_api_key: lookup("AI_API_KEY").unwrap_or_default(),
            ai_api_base: var(
                "AI_API_BASE",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            ai_text_model: var("AI_TEXT_MODEL", "gemini-2.0-flash"),
            ai_image_model: var(
                "AI_IMAGE_MODEL",
                "gemini-2.0-flash-preview-image-generation",
            ),
            ai_timeout_secs: var("AI_TIMEOUT_SECS", "60")
                .parse()
                .context("AI_TIMEOUT_SECS must be a number")?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
