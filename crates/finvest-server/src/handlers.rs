//! HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use finvest_core::{AllocationEntry, Asset, AssetType, PortfolioSummary, ViewState};
use finvest_genai::{GenAiError, ImageResolution, VideoAspect, ADVICE_UNAVAILABLE};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub genai_configured: bool,
}

/// One holding plus its derived display figures
#[derive(Serialize)]
pub struct AssetView {
    #[serde(flatten)]
    pub asset: Asset,
    pub line_total: Decimal,
    pub invested: Decimal,
    pub gain: Decimal,
    /// `null` when the average price is zero
    pub gain_percent: Option<Decimal>,
}

impl From<&Asset> for AssetView {
    fn from(asset: &Asset) -> Self {
        Self {
            line_total: asset.line_total(),
            invested: asset.invested(),
            gain: asset.gain(),
            gain_percent: asset.gain_percent(),
            asset: asset.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct PortfolioResponse {
    pub assets: Vec<AssetView>,
    pub summary: PortfolioSummary,
    pub allocation: Vec<AllocationEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssetRequest {
    pub ticker: String,
    pub name: String,
    pub asset_type: AssetType,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub current_price: Decimal,
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Serialize)]
pub struct ViewResponse {
    pub view: ViewState,
    pub form_open: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetViewRequest {
    pub view: ViewState,
}

#[derive(Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub resolution: ImageResolution,
}

/// `image` is `null` when the service produced nothing
#[derive(Serialize)]
pub struct ImageResponse {
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoRequest {
    pub prompt: String,
    pub image_base64: String,
    pub aspect: VideoAspect,
}

/// `video_base64` is `null` when the job finished without a result
#[derive(Serialize)]
pub struct VideoResponse {
    pub video_base64: Option<String>,
    pub mime_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            code: "BAD_REQUEST",
        }),
    )
}

fn busy(action: &str) -> ApiError {
    (
        StatusCode::CONFLICT,
        Json(ErrorResponse {
            error: format!("A {action} request is already in flight"),
            code: "BUSY",
        }),
    )
}

fn genai_unavailable() -> ApiError {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: "Generative AI is not configured. Set GEMINI_API_KEY.".into(),
            code: "GENAI_UNCONFIGURED",
        }),
    )
}

fn genai_failure(error: &GenAiError) -> ApiError {
    tracing::error!(%error, "generative request failed");
    let code = match error {
        GenAiError::AccessDenied(_) => "ACCESS_DENIED",
        GenAiError::JobTimeout { .. } => "JOB_TIMEOUT",
        _ => "GENAI_ERROR",
    };
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: error.user_message(),
            code,
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        genai_configured: state.genai.is_some(),
    })
}

/// Full dashboard payload: holdings, summary, allocation
///
/// Summary and allocation are recomputed from the asset list on every call.
pub async fn get_portfolio(State(state): State<AppState>) -> Json<PortfolioResponse> {
    let session = state.session.read().await;

    Json(PortfolioResponse {
        assets: session.assets().iter().map(AssetView::from).collect(),
        summary: session.summary(),
        allocation: session.allocation(),
    })
}

/// Add a holding; the server assigns the id
pub async fn create_asset(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    if payload.ticker.trim().is_empty() {
        return Err(bad_request("Ticker must not be empty"));
    }
    if payload.quantity < Decimal::ZERO {
        return Err(bad_request("Quantity must be non-negative"));
    }

    let mut asset = Asset::new(
        payload.ticker,
        payload.name,
        payload.asset_type,
        payload.quantity,
        payload.average_price,
        payload.current_price,
    );
    if let Some(sector) = payload.sector {
        asset = asset.with_sector(sector);
    }

    let id = state.session.write().await.add_asset(asset);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Remove a holding by id
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    match state.session.write().await.remove_asset(id) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: error.to_string(),
                code: "NOT_FOUND",
            }),
        )),
    }
}

/// Current view state
pub async fn get_view(State(state): State<AppState>) -> Json<ViewResponse> {
    let session = state.session.read().await;
    Json(ViewResponse {
        view: session.view(),
        form_open: session.form_open(),
    })
}

/// Switch the active pane
pub async fn set_view(
    State(state): State<AppState>,
    Json(payload): Json<SetViewRequest>,
) -> Json<ViewResponse> {
    let mut session = state.session.write().await;
    session.set_view(payload.view);
    Json(ViewResponse {
        view: session.view(),
        form_open: session.form_open(),
    })
}

/// Request written advice for the current portfolio
///
/// Never fails: without a configured client, or on any service error, the
/// response carries the fallback text instead.
pub async fn request_advice(
    State(state): State<AppState>,
) -> Result<Json<AdviceResponse>, ApiError> {
    let (assets, summary) = {
        let mut session = state.session.write().await;
        if session.begin_advice().is_err() {
            return Err(busy("advice"));
        }
        (session.assets().to_vec(), session.summary())
    };

    let advice = match &state.genai {
        Some(genai) => genai.advisory.advise(&assets, &summary).await,
        None => {
            tracing::warn!("advice requested without a configured API key");
            ADVICE_UNAVAILABLE.into()
        }
    };

    state.session.write().await.finish_advice(advice.clone());
    Ok(Json(AdviceResponse { advice }))
}

/// Generate a vision-board image
pub async fn generate_image(
    State(state): State<AppState>,
    Json(payload): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    if payload.prompt.trim().is_empty() {
        return Err(bad_request("Prompt must not be empty"));
    }
    let Some(genai) = &state.genai else {
        return Err(genai_unavailable());
    };

    if state.session.write().await.begin_image().is_err() {
        return Err(busy("image"));
    }

    let result = genai.image.generate(&payload.prompt, payload.resolution).await;
    state.session.write().await.finish_image();

    match result {
        Ok(image) => Ok(Json(ImageResponse { image })),
        Err(error) => Err(genai_failure(&error)),
    }
}

/// Animate a vision-board image into a goal video
///
/// Blocks for the whole submit/poll/fetch cycle; the in-flight guard keeps a
/// second press from starting a duplicate job.
pub async fn generate_video(
    State(state): State<AppState>,
    Json(payload): Json<VideoRequest>,
) -> Result<Json<VideoResponse>, ApiError> {
    if payload.prompt.trim().is_empty() {
        return Err(bad_request("Prompt must not be empty"));
    }
    if payload.image_base64.trim().is_empty() {
        return Err(bad_request("A source image is required"));
    }
    let Some(genai) = &state.genai else {
        return Err(genai_unavailable());
    };

    if state.session.write().await.begin_video().is_err() {
        return Err(busy("video"));
    }

    let result = genai
        .video
        .generate(&payload.prompt, &payload.image_base64, payload.aspect)
        .await;
    state.session.write().await.finish_video();

    match result {
        Ok(bytes) => Ok(Json(VideoResponse {
            video_base64: bytes.map(|b| BASE64.encode(b)),
            mime_type: "video/mp4",
        })),
        Err(error) => Err(genai_failure(&error)),
    }
}
