//! Advisory Client
//!
//! Sends the portfolio to the text model and returns prose commentary.
//! Failures here are never worth interrupting the user's flow: every error
//! path collapses into a displayable fallback string.

use std::sync::Arc;

use finvest_core::{Asset, PortfolioSummary};

use crate::api::GenerativeApi;
use crate::config::TEXT_MODEL;
use crate::wire::GenerateContentRequest;

/// Shown when the service cannot be reached
pub const ADVICE_UNAVAILABLE: &str =
    "The AI advisor could not be reached. Check your API key and try again later.";

/// Shown when the service answered without any text
pub const ADVICE_EMPTY: &str =
    "The advisor returned no analysis this time. Try again in a moment.";

const SYSTEM_INSTRUCTION: &str = "You are a senior financial analyst, conservative but alert \
    to opportunities. Your tone is professional and educational.";

/// Portfolio advisory over the text-generation endpoint
pub struct AdvisoryClient {
    api: Arc<dyn GenerativeApi>,
}

impl AdvisoryClient {
    pub fn new(api: Arc<dyn GenerativeApi>) -> Self {
        Self { api }
    }

    /// Generate written advice for the given portfolio
    ///
    /// Infallible by contract: transport and service failures degrade to a
    /// fallback string, as does a success carrying no text.
    pub async fn advise(&self, assets: &[Asset], summary: &PortfolioSummary) -> String {
        let request = GenerateContentRequest::from_prompt(build_prompt(assets, summary))
            .with_system_instruction(SYSTEM_INSTRUCTION);

        match self.api.generate_content(TEXT_MODEL, request).await {
            Ok(response) => match response.first_text() {
                Some(text) if !text.trim().is_empty() => text.to_string(),
                _ => {
                    tracing::warn!("advisory response carried no text");
                    ADVICE_EMPTY.into()
                }
            },
            Err(error) => {
                tracing::warn!(%error, "advisory request failed");
                ADVICE_UNAVAILABLE.into()
            }
        }
    }
}

/// Analyst prompt embedding the summary figures and a projection of each
/// holding (ticker, type, current line total)
fn build_prompt(assets: &[Asset], summary: &PortfolioSummary) -> String {
    let holdings: Vec<serde_json::Value> = assets
        .iter()
        .map(|asset| {
            serde_json::json!({
                "ticker": asset.ticker,
                "type": asset.asset_type.label(),
                "total": asset.line_total(),
            })
        })
        .collect();

    format!(
        "Act as an expert financial advisor and review my personal portfolio.\n\
         \n\
         Summary:\n\
         - Total value: $ {:.2}\n\
         - Invested: $ {:.2}\n\
         - Return: {:.2}%\n\
         \n\
         Holdings:\n\
         {}\n\
         \n\
         Provide a concise three-paragraph analysis:\n\
         1. Diversification (am I too concentrated?).\n\
         2. Improvement or rebalancing suggestions given the current market.\n\
         3. A score from 0 to 10 for the overall health of the portfolio.\n\
         \n\
         Use simple Markdown formatting.",
        summary.total_value,
        summary.total_invested,
        summary.profitability,
        serde_json::Value::Array(holdings),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockGenerativeApi;
    use crate::error::GenAiError;
    use finvest_core::{summarize, AssetType};
    use rust_decimal_macros::dec;

    fn sample() -> (Vec<Asset>, PortfolioSummary) {
        let assets = vec![Asset::new(
            "PETR4",
            "Petrobras PN",
            AssetType::Stock,
            dec!(100),
            dec!(28.50),
            dec!(35.20),
        )];
        let summary = summarize(&assets);
        (assets, summary)
    }

    #[test]
    fn test_prompt_embeds_figures_and_holdings() {
        let (assets, summary) = sample();
        let prompt = build_prompt(&assets, &summary);

        assert!(prompt.contains("3520.00"));
        assert!(prompt.contains("2850.00"));
        assert!(prompt.contains("PETR4"));
        assert!(prompt.contains("Stock"));
    }

    #[tokio::test]
    async fn test_advise_returns_generated_text() {
        let api = Arc::new(MockGenerativeApi::new());
        api.push_content(Ok(MockGenerativeApi::text_response("Solid portfolio. 8/10.")));

        let (assets, summary) = sample();
        let advice = AdvisoryClient::new(api).advise(&assets, &summary).await;
        assert_eq!(advice, "Solid portfolio. 8/10.");
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_fallback() {
        let api = Arc::new(MockGenerativeApi::new());
        api.push_content(Err(GenAiError::Api {
            status: 500,
            body: "boom".into(),
        }));

        let (assets, summary) = sample();
        let advice = AdvisoryClient::new(api).advise(&assets, &summary).await;
        assert_eq!(advice, ADVICE_UNAVAILABLE);
        assert!(!advice.is_empty());
    }

    #[tokio::test]
    async fn test_empty_response_becomes_fallback() {
        let api = Arc::new(MockGenerativeApi::new());
        api.push_content(Ok(crate::wire::GenerateContentResponse::default()));

        let (assets, summary) = sample();
        let advice = AdvisoryClient::new(api).advise(&assets, &summary).await;
        assert_eq!(advice, ADVICE_EMPTY);
    }
}
