//! # finvest-genai
//!
//! Generative-AI clients for the FinVest dashboard: written portfolio
//! advice, vision-board images, and goal videos animated from those images.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      GenAiClients                          │
//! │  ┌──────────────┐  ┌─────────────┐  ┌──────────────────┐  │
//! │  │ AdvisoryClient│ │ ImageClient │  │ VideoClient      │  │
//! │  │ (absorbs     │  │ (propagates │  │ (submit / poll / │  │
//! │  │  failures)   │  │  failures)  │  │  fetch)          │  │
//! │  └──────┬───────┘  └──────┬──────┘  └────────┬─────────┘  │
//! │         └────────────┬────┴─────────────────┘             │
//! │                ┌─────┴──────────┐                          │
//! │                │ GenerativeApi  │  (HttpGeminiApi / mock)  │
//! │                └────────────────┘                          │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The three clients differ deliberately in failure semantics: advice
//! degrades to a fallback string, image and video errors surface to the
//! caller. "The service produced nothing" is a defined `None` result on the
//! image and video paths, distinct from any error.

pub mod advisory;
pub mod api;
pub mod config;
pub mod error;
pub mod image;
pub mod video;
pub mod wire;

use std::sync::Arc;

pub use advisory::{AdvisoryClient, ADVICE_EMPTY, ADVICE_UNAVAILABLE};
pub use api::{GenerativeApi, HttpGeminiApi, MockGenerativeApi};
pub use config::GeminiConfig;
pub use error::{GenAiError, Result};
pub use image::{ImageClient, ImageResolution};
pub use video::{VideoAspect, VideoClient, VideoTask};

/// The three clients bundled over one shared transport
pub struct GenAiClients {
    pub advisory: AdvisoryClient,
    pub image: ImageClient,
    pub video: VideoClient,
}

impl GenAiClients {
    /// Build the HTTP-backed bundle from a configuration
    pub fn from_config(config: GeminiConfig) -> Self {
        Self::with_api(Arc::new(HttpGeminiApi::new(config)))
    }

    /// Build from `GEMINI_API_KEY` in the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(GeminiConfig::from_env()?))
    }

    /// Build over an arbitrary transport (mock in tests)
    pub fn with_api(api: Arc<dyn GenerativeApi>) -> Self {
        Self {
            advisory: AdvisoryClient::new(api.clone()),
            image: ImageClient::new(api.clone()),
            video: VideoClient::new(api),
        }
    }
}
