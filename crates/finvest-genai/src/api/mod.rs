//! Generative API Transport
//!
//! Abstraction over the Gemini REST endpoints, with an HTTP implementation
//! and a mock for tests and keyless demo runs.

mod http;
mod mock;

pub use http::HttpGeminiApi;
pub use mock::MockGenerativeApi;

use async_trait::async_trait;

use crate::error::Result;
use crate::wire::{
    GenerateContentRequest, GenerateContentResponse, GenerateVideosRequest, VideoOperation,
};

/// Transport seam for the generative endpoints (Strategy pattern)
///
/// All three clients talk to the service exclusively through this trait.
#[async_trait]
pub trait GenerativeApi: Send + Sync {
    /// Synchronous content generation (text and image models)
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// Submit an asynchronous video-generation job
    async fn start_video_job(
        &self,
        model: &str,
        request: GenerateVideosRequest,
    ) -> Result<VideoOperation>;

    /// Re-check the status of a video job by operation name
    async fn poll_video_job(&self, operation_name: &str) -> Result<VideoOperation>;

    /// Fetch binary content from a result locator
    async fn fetch_media(&self, uri: &str) -> Result<Vec<u8>>;

    /// Backend name, for logs
    fn name(&self) -> &str;
}
