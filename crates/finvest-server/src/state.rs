//! Application State

use std::sync::Arc;

use tokio::sync::RwLock;

use finvest_core::AppSession;
use finvest_genai::GenAiClients;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Dashboard session: asset store, view state, in-flight guards
    pub session: Arc<RwLock<AppSession>>,

    /// Generative clients (None when no API key is configured)
    pub genai: Option<Arc<GenAiClients>>,
}

impl AppState {
    pub fn new(session: AppSession, genai: Option<GenAiClients>) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            genai: genai.map(Arc::new),
        }
    }
}
