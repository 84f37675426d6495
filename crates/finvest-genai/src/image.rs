//! Vision-Board Image Client
//!
//! Generates a single image from a free-text prompt. Unlike the advisory
//! path, errors propagate: image generation failure is actionable by the
//! user and must surface as an alert.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::GenerativeApi;
use crate::config::IMAGE_MODEL;
use crate::error::Result;
use crate::wire::{GenerateContentRequest, ImageConfig};

/// Fixed composition ratio for vision boards
pub const VISION_BOARD_ASPECT: &str = "16:9";

/// Output size tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageResolution {
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageResolution {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneK => "1K",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }
}

/// Image generation over the image-preview model
pub struct ImageClient {
    api: Arc<dyn GenerativeApi>,
}

impl ImageClient {
    pub fn new(api: Arc<dyn GenerativeApi>) -> Self {
        Self { api }
    }

    /// Generate a vision-board image
    ///
    /// Returns the first inline image of the response as a data URI, or
    /// `None` when the service produced no image. The prompt is expected to
    /// be non-empty; enforcing that is the caller's job.
    pub async fn generate(
        &self,
        prompt: &str,
        resolution: ImageResolution,
    ) -> Result<Option<String>> {
        let request = GenerateContentRequest::from_prompt(prompt).with_image_config(ImageConfig {
            image_size: resolution.as_str().into(),
            aspect_ratio: VISION_BOARD_ASPECT.into(),
        });

        let response = self.api.generate_content(IMAGE_MODEL, request).await?;

        Ok(response
            .first_inline_image()
            .map(|image| format!("data:{};base64,{}", image.mime_type, image.data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockGenerativeApi;
    use crate::error::GenAiError;
    use crate::wire::GenerateContentResponse;

    #[tokio::test]
    async fn test_returns_first_inline_image_as_data_uri() {
        let api = Arc::new(MockGenerativeApi::new());
        api.push_content(Ok(MockGenerativeApi::image_response("image/png", "QUJD")));

        let client = ImageClient::new(api);
        let image = client
            .generate("a beach house at sunset", ImageResolution::TwoK)
            .await
            .unwrap();

        assert_eq!(image.as_deref(), Some("data:image/png;base64,QUJD"));
    }

    #[tokio::test]
    async fn test_no_inline_image_yields_none_not_error() {
        let api = Arc::new(MockGenerativeApi::new());
        api.push_content(Ok(MockGenerativeApi::text_response(
            "cannot draw that, sorry",
        )));

        let client = ImageClient::new(api);
        let image = client
            .generate("something", ImageResolution::OneK)
            .await
            .unwrap();
        assert!(image.is_none());

        // Same for a completely empty response
        let api = Arc::new(MockGenerativeApi::new());
        api.push_content(Ok(GenerateContentResponse::default()));
        let client = ImageClient::new(api);
        assert!(client
            .generate("something", ImageResolution::OneK)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let api = Arc::new(MockGenerativeApi::new());
        api.push_content(Err(GenAiError::Api {
            status: 503,
            body: "overloaded".into(),
        }));

        let client = ImageClient::new(api);
        let result = client.generate("something", ImageResolution::FourK).await;
        assert!(matches!(result, Err(GenAiError::Api { status: 503, .. })));
    }
}
