use std::path::PathBuf;
use std::time::Duration;

use log::warn;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TRANSCRIBE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Startup configuration for the HTTP server, handed to handlers through app state.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub pdf_dir: PathBuf,
    pub gemini: GeminiConfig,
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub transcribe_model: String,
    pub tts_model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("transcribe_model", &self.transcribe_model)
            .field("tts_model", &self.tts_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Reads provider settings from the environment. `main` loads `.env` beforehand.
    ///
    /// A missing `API_KEY` is not an error: every provider call will then be
    /// rejected upstream and surfaced as a provider error.
    pub fn from_env() -> Self {
        let api_key = std::env::var("API_KEY").unwrap_or_else(|_| {
            warn!("API_KEY is not set; provider calls will fail authentication");
            String::new()
        });

        Self {
            base_url: env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            api_key,
            transcribe_model: env_or("GEMINI_TRANSCRIBE_MODEL", DEFAULT_TRANSCRIBE_MODEL),
            tts_model: env_or("GEMINI_TTS_MODEL", DEFAULT_TTS_MODEL),
            timeout: PROVIDER_TIMEOUT,
        }
    }
}

impl ServerConfig {
    pub fn new(host: String, port: u16, pdf_dir: PathBuf) -> Self {
        Self {
            host,
            port,
            pdf_dir,
            gemini: GeminiConfig::from_env(),
        }
    }
}

#[derive(Debug)]
pub struct ClientConfig {
    pub server_url: String,
}

impl ClientConfig {
    pub fn new(server_url: String) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
