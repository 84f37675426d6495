//! Gemini Configuration
//!
//! A single API credential from the process environment is used unmodified
//! for every outbound call, including the final video-asset fetch.

use crate::error::{GenAiError, Result};

/// Text generation model
pub const TEXT_MODEL: &str = "gemini-3-flash-preview";

/// Image generation model
pub const IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// Video generation model
pub const VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Output resolution tier supported by the fast video model
pub const VIDEO_RESOLUTION: &str = "720p";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini endpoint configuration
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL of the Gemini REST API
    pub api_base: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read configuration from `GEMINI_API_KEY` / `GEMINI_API_BASE`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GenAiError::Config("GEMINI_API_KEY environment variable not set".into()))?;

        let api_base =
            std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub const fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
