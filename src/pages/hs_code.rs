//! HS code finder: free-text product description in, ranked code
//! suggestions with sample duties and restrictions out.

use tracing::error;

use crate::api::AiService;
use crate::pages::ViewState;
use crate::types::HsCodeSuggestion;

pub const EMPTY_DESCRIPTION: &str = "Please enter a product description.";
pub const FETCH_FAILED: &str =
    "Failed to fetch HS code suggestions. The AI might be busy. Please try again.";

pub struct HsCodeController {
    pub state: ViewState<Vec<HsCodeSuggestion>>,
}

impl HsCodeController {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
        }
    }

    pub async fn find(&mut self, service: &AiService, product_description: &str) {
        let description = product_description.trim();
        if description.is_empty() {
            self.state = ViewState::Failed(EMPTY_DESCRIPTION.to_string());
            return;
        }

        self.state = ViewState::Loading;
        match service.hs_code_suggestions(description).await {
            Ok(suggestions) => self.state = ViewState::Loaded(suggestions),
            Err(err) => {
                error!(%err, "HS code lookup failed");
                self.state = ViewState::Failed(FETCH_FAILED.to_string());
            }
        }
    }
}

impl Default for HsCodeController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_description_is_rejected_client_side() {
        let service = AiService::mock();
        let mut controller = HsCodeController::new();

        controller.find(&service, "").await;
        assert_eq!(controller.state.failure(), Some(EMPTY_DESCRIPTION));
    }

    #[tokio::test(start_paused = true)]
    async fn suggestions_load_from_mock() {
        let service = AiService::mock();
        let mut controller = HsCodeController::new();

        controller.find(&service, "roasted arabica coffee").await;
        let suggestions = controller.state.as_loaded().unwrap();
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].code, "0901.21.00");
    }
}
