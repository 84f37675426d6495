//! Goal-Video Client
//!
//! Animates a vision-board image into a short video. Generation runs as an
//! asynchronous job on the service side: submit, poll on a fixed interval
//! until `done`, then fetch the bytes at the result locator.
//!
//! The service exposes neither a deadline nor a cancellation hook of its
//! own, so the loop carries a configurable `max_polls` deadline and `spawn`
//! hands back an abortable task handle.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::GenerativeApi;
use crate::config::{VIDEO_MODEL, VIDEO_RESOLUTION};
use crate::error::{GenAiError, Result};
use crate::wire::{GenerateVideosRequest, VideoInstance, VideoParameters, VideoSourceImage};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_MAX_POLLS: u32 = 120;

/// Output aspect ratio
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoAspect {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Tall,
}

impl VideoAspect {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wide => "16:9",
            Self::Tall => "9:16",
        }
    }
}

/// Video generation with job polling
pub struct VideoClient {
    api: Arc<dyn GenerativeApi>,
    poll_interval: Duration,
    max_polls: Option<u32>,
}

impl VideoClient {
    pub fn new(api: Arc<dyn GenerativeApi>) -> Self {
        Self {
            api,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: Some(DEFAULT_MAX_POLLS),
        }
    }

    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Cap on status checks; `None` polls without bound until the job resolves
    pub const fn with_max_polls(mut self, max_polls: Option<u32>) -> Self {
        self.max_polls = max_polls;
        self
    }

    /// Generate a video from a prompt and a source image
    ///
    /// The source image may carry a `data:image/...;base64,` prefix; it is
    /// stripped before transmission. Returns the fetched video bytes, or
    /// `None` when the completed job carries no result locator. Errors at
    /// submission, polling, or fetch all propagate.
    pub async fn generate(
        &self,
        prompt: &str,
        image_base64: &str,
        aspect: VideoAspect,
    ) -> Result<Option<Vec<u8>>> {
        let request = GenerateVideosRequest {
            instances: vec![VideoInstance {
                prompt: prompt.into(),
                image: VideoSourceImage {
                    bytes_base64_encoded: strip_data_uri(image_base64).into(),
                    mime_type: "image/png".into(),
                },
            }],
            parameters: VideoParameters {
                number_of_videos: 1,
                resolution: VIDEO_RESOLUTION.into(),
                aspect_ratio: aspect.as_str().into(),
            },
        };

        let mut operation = self.api.start_video_job(VIDEO_MODEL, request).await?;
        tracing::info!(operation = %operation.name, "video job submitted");

        let mut polls = 0u32;
        while !operation.done {
            if let Some(max) = self.max_polls {
                if polls >= max {
                    return Err(GenAiError::JobTimeout { polls });
                }
            }
            tokio::time::sleep(self.poll_interval).await;
            polls += 1;
            operation = self.api.poll_video_job(&operation.name).await?;
        }

        let Some(uri) = operation.result_uri() else {
            tracing::warn!(operation = %operation.name, "video job finished with no result");
            return Ok(None);
        };

        let bytes = self.api.fetch_media(uri).await?;
        tracing::info!(size = bytes.len(), "video fetched");
        Ok(Some(bytes))
    }

    /// Run `generate` on a background task and return an abortable handle
    pub fn spawn(
        self: Arc<Self>,
        prompt: String,
        image_base64: String,
        aspect: VideoAspect,
    ) -> VideoTask {
        let handle = tokio::spawn(async move {
            self.generate(&prompt, &image_base64, aspect).await
        });
        VideoTask { handle }
    }
}

/// Handle to an in-flight video generation task
///
/// Dropping the handle detaches the task; `abort` cancels it.
pub struct VideoTask {
    handle: tokio::task::JoinHandle<Result<Option<Vec<u8>>>>,
}

impl VideoTask {
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task; an aborted task reports `GenAiError::Aborted`
    pub async fn join(self) -> Result<Option<Vec<u8>>> {
        match self.handle.await {
            Ok(result) => result,
            Err(join_error) if join_error.is_cancelled() => Err(GenAiError::Aborted),
            Err(join_error) => Err(GenAiError::Task(join_error.to_string())),
        }
    }
}

/// Drop any data-URI scheme prefix, keeping only the base64 payload
fn strip_data_uri(encoded: &str) -> &str {
    match encoded.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => encoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockGenerativeApi;

    const VIDEO_URI: &str = "https://mock.invalid/video.mp4";

    fn fast_client(api: Arc<MockGenerativeApi>) -> VideoClient {
        VideoClient::new(api).with_poll_interval(Duration::from_millis(1))
    }

    #[test]
    fn test_strip_data_uri() {
        assert_eq!(strip_data_uri("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_uri("data:image/jpeg;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_uri("QUJD"), "QUJD");
    }

    #[tokio::test]
    async fn test_polls_until_done_then_fetches_once() {
        let api = Arc::new(MockGenerativeApi::new());
        api.push_poll(Ok(MockGenerativeApi::pending_operation()));
        api.push_poll(Ok(MockGenerativeApi::pending_operation()));
        api.push_poll(Ok(MockGenerativeApi::done_operation(Some(VIDEO_URI))));

        let client = fast_client(api.clone());
        let bytes = client
            .generate("animate it", "QUJD", VideoAspect::Wide)
            .await
            .unwrap();

        assert_eq!(bytes.unwrap(), b"mock-video-bytes");
        assert_eq!(api.poll_calls(), 3);
        assert_eq!(api.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_done_without_uri_yields_none() {
        let api = Arc::new(MockGenerativeApi::new());
        api.push_submit(Ok(MockGenerativeApi::done_operation(None)));

        let client = fast_client(api.clone());
        let result = client
            .generate("animate it", "QUJD", VideoAspect::Tall)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(api.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_poll_deadline() {
        let api = Arc::new(MockGenerativeApi::new());
        for _ in 0..10 {
            api.push_poll(Ok(MockGenerativeApi::pending_operation()));
        }

        let client = fast_client(api).with_max_polls(Some(3));
        let result = client.generate("animate it", "QUJD", VideoAspect::Wide).await;

        assert!(matches!(result, Err(GenAiError::JobTimeout { polls: 3 })));
    }

    #[tokio::test]
    async fn test_submission_error_propagates() {
        let api = Arc::new(MockGenerativeApi::new());
        api.push_submit(Err(GenAiError::AccessDenied("tier".into())));

        let client = fast_client(api);
        let result = client.generate("animate it", "QUJD", VideoAspect::Wide).await;
        assert!(matches!(result, Err(GenAiError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_spawned_task_abort() {
        let api = Arc::new(MockGenerativeApi::new());
        // Never completes: poll queue keeps yielding pending operations
        for _ in 0..1000 {
            api.push_poll(Ok(MockGenerativeApi::pending_operation()));
        }

        let client = Arc::new(
            VideoClient::new(api)
                .with_poll_interval(Duration::from_millis(10))
                .with_max_polls(None),
        );
        let task = client.spawn("animate it".into(), "QUJD".into(), VideoAspect::Wide);
        task.abort();

        assert!(matches!(task.join().await, Err(GenAiError::Aborted)));
    }
}
