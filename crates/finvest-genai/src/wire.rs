//! Gemini Wire Types
//!
//! Request/response structs matching the Gemini REST payloads exactly
//! (camelCase on the wire). Only the fields this application consumes are
//! modeled.

use serde::{Deserialize, Serialize};

// ============================================================================
// generateContent
// ============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn text prompt
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            system_instruction: None,
            generation_config: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::text(instruction));
        self
    }

    pub fn with_image_config(mut self, image_config: ImageConfig) -> Self {
        self.generation_config = Some(GenerationConfig {
            image_config: Some(image_config),
        });
        self
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Inline binary payload, base64-encoded
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub image_size: String,
    pub aspect_ratio: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, if any
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|part| part.text.as_deref())
    }

    /// First inline image part of the first candidate, if any
    pub fn first_inline_image(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

// ============================================================================
// Video generation (long-running operation)
// ============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct GenerateVideosRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

#[derive(Clone, Debug, Serialize)]
pub struct VideoInstance {
    pub prompt: String,
    pub image: VideoSourceImage,
}

/// Source image animated into the video
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSourceImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub number_of_videos: u8,
    pub resolution: String,
    pub aspect_ratio: String,
}

/// Asynchronous job handle returned by submission and status checks
///
/// Transitions to `done` exactly once; no cancellation is exposed by the
/// service itself.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VideoOperation {
    pub name: String,

    #[serde(default)]
    pub done: bool,

    #[serde(default)]
    pub response: Option<VideoOperationResponse>,
}

impl VideoOperation {
    /// Locator of the generated video, when the job produced one
    pub fn result_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generated_videos
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOperationResponse {
    #[serde(default)]
    pub generated_videos: Vec<GeneratedVideo>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GeneratedVideo {
    #[serde(default)]
    pub video: Option<VideoRef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VideoRef {
    #[serde(default)]
    pub uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest::from_prompt("a beach house")
            .with_system_instruction("You are an artist")
            .with_image_config(ImageConfig {
                image_size: "2K".into(),
                aspect_ratio: "16:9".into(),
            });

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "a beach house");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "You are an artist"
        );
        assert_eq!(json["generationConfig"]["imageConfig"]["imageSize"], "2K");
        assert_eq!(
            json["generationConfig"]["imageConfig"]["aspectRatio"],
            "16:9"
        );
    }

    #[test]
    fn test_response_part_scan() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [
                            {"text": "here is your image"},
                            {"inlineData": {"mimeType": "image/png", "data": "QUJD"}}
                        ]
                    }
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(response.first_text(), Some("here is your image"));
        let image = response.first_inline_image().unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "QUJD");
    }

    #[test]
    fn test_empty_response() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_text(), None);
        assert!(response.first_inline_image().is_none());
    }

    #[test]
    fn test_operation_result_uri() {
        let operation: VideoOperation = serde_json::from_str(
            r#"{
                "name": "operations/abc123",
                "done": true,
                "response": {
                    "generatedVideos": [
                        {"video": {"uri": "https://example.com/video.mp4"}}
                    ]
                }
            }"#,
        )
        .unwrap();

        assert!(operation.done);
        assert_eq!(
            operation.result_uri(),
            Some("https://example.com/video.mp4")
        );
    }

    #[test]
    fn test_pending_operation() {
        let operation: VideoOperation =
            serde_json::from_str(r#"{"name": "operations/abc123"}"#).unwrap();
        assert!(!operation.done);
        assert_eq!(operation.result_uri(), None);
    }
}
