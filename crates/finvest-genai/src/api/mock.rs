//! Mock Generative API
//!
//! For testing and keyless demo runs. Returns canned responses unless a
//! scripted response or failure has been queued, and counts calls so tests
//! can assert on polling behavior.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use super::GenerativeApi;
use crate::error::Result;
use crate::wire::{
    Candidate, Content, GeneratedVideo, GenerateContentRequest, GenerateContentResponse,
    GenerateVideosRequest, InlineData, Part, VideoOperation, VideoOperationResponse, VideoRef,
};

const MOCK_OPERATION: &str = "operations/mock-video-1";
const MOCK_VIDEO_URI: &str = "https://mock.invalid/video.mp4";

/// Scripted mock backend
#[derive(Default)]
pub struct MockGenerativeApi {
    content_queue: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    submit_queue: Mutex<VecDeque<Result<VideoOperation>>>,
    poll_queue: Mutex<VecDeque<Result<VideoOperation>>>,
    media_queue: Mutex<VecDeque<Result<Vec<u8>>>>,

    content_calls: AtomicU32,
    poll_calls: AtomicU32,
    fetch_calls: AtomicU32,
}

impl MockGenerativeApi {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Scripting
    // ------------------------------------------------------------------

    pub fn push_content(&self, response: Result<GenerateContentResponse>) {
        self.content_queue.lock().unwrap().push_back(response);
    }

    pub fn push_submit(&self, operation: Result<VideoOperation>) {
        self.submit_queue.lock().unwrap().push_back(operation);
    }

    pub fn push_poll(&self, operation: Result<VideoOperation>) {
        self.poll_queue.lock().unwrap().push_back(operation);
    }

    pub fn push_media(&self, media: Result<Vec<u8>>) {
        self.media_queue.lock().unwrap().push_back(media);
    }

    // ------------------------------------------------------------------
    // Call counters
    // ------------------------------------------------------------------

    pub fn content_calls(&self) -> u32 {
        self.content_calls.load(Ordering::SeqCst)
    }

    pub fn poll_calls(&self) -> u32 {
        self.poll_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> u32 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    // ------------------------------------------------------------------
    // Canned payload builders
    // ------------------------------------------------------------------

    /// Response with a single text part
    pub fn text_response(text: impl Into<String>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Content {
                    parts: vec![Part::text(text)],
                },
            }],
        }
    }

    /// Response with a text part followed by an inline image part
    pub fn image_response(mime_type: impl Into<String>, data: impl Into<String>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Content {
                    parts: vec![
                        Part::text("generated"),
                        Part {
                            text: None,
                            inline_data: Some(InlineData {
                                mime_type: mime_type.into(),
                                data: data.into(),
                            }),
                        },
                    ],
                },
            }],
        }
    }

    /// Job handle still pending
    pub fn pending_operation() -> VideoOperation {
        VideoOperation {
            name: MOCK_OPERATION.into(),
            done: false,
            response: None,
        }
    }

    /// Completed job handle, optionally carrying a result locator
    pub fn done_operation(uri: Option<&str>) -> VideoOperation {
        VideoOperation {
            name: MOCK_OPERATION.into(),
            done: true,
            response: Some(VideoOperationResponse {
                generated_videos: uri
                    .map(|uri| GeneratedVideo {
                        video: Some(VideoRef {
                            uri: Some(uri.into()),
                        }),
                    })
                    .into_iter()
                    .collect(),
            }),
        }
    }
}

#[async_trait]
impl GenerativeApi for MockGenerativeApi {
    async fn generate_content(
        &self,
        _model: &str,
        _request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.content_calls.fetch_add(1, Ordering::SeqCst);
        self.content_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::text_response("Mock analysis: stay diversified.")))
    }

    async fn start_video_job(
        &self,
        _model: &str,
        _request: GenerateVideosRequest,
    ) -> Result<VideoOperation> {
        self.submit_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::pending_operation()))
    }

    async fn poll_video_job(&self, _operation_name: &str) -> Result<VideoOperation> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        self.poll_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::done_operation(Some(MOCK_VIDEO_URI))))
    }

    async fn fetch_media(&self, _uri: &str) -> Result<Vec<u8>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.media_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(b"mock-video-bytes".to_vec()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
