//! FinVest HTTP Server
//!
//! Axum-based server for the portfolio dashboard. All state is transient
//! process memory, seeded with the demo portfolio at startup; the three
//! generative actions delegate to the Gemini endpoints.

mod handlers;
mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finvest_core::AppSession;
use finvest_genai::GenAiClients;

use crate::handlers::{
    create_asset, delete_asset, generate_image, generate_video, get_portfolio, get_view,
    health_check, request_advice, set_view,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize generative clients
    let genai = match GenAiClients::from_env() {
        Ok(clients) => {
            tracing::info!("✓ Gemini configured");
            Some(clients)
        }
        Err(error) => {
            tracing::warn!("⚠ Gemini not configured - {error}");
            tracing::warn!("  Set GEMINI_API_KEY in .env; advice will degrade to fallback text");
            None
        }
    };

    // Seed the demo portfolio
    let session = AppSession::seeded();
    tracing::info!("Seeded {} demo assets", session.assets().len());

    let state = AppState::new(session, genai);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & dashboard
        .route("/health", get(health_check))
        .route("/api/portfolio", get(get_portfolio))
        // Asset store
        .route("/api/assets", post(create_asset))
        .route("/api/assets/{id}", delete(delete_asset))
        // View state
        .route("/api/view", get(get_view).put(set_view))
        // Generative actions
        .route("/api/advice", post(request_advice))
        .route("/api/vision/image", post(generate_image))
        .route("/api/vision/video", post(generate_video))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 finvest-server running on http://{}", addr);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health            - Health check");
    tracing::info!("  GET    /api/portfolio     - Holdings, summary, allocation");
    tracing::info!("  POST   /api/assets        - Add a holding");
    tracing::info!("  DELETE /api/assets/{{id}}   - Remove a holding");
    tracing::info!("  GET    /api/view          - Current view state");
    tracing::info!("  PUT    /api/view          - Switch view");
    tracing::info!("  POST   /api/advice        - AI portfolio advice");
    tracing::info!("  POST   /api/vision/image  - Vision-board image");
    tracing::info!("  POST   /api/vision/video  - Goal video (polls until done)");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
