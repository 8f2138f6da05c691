//! Pricing insights: AI market commentary, a six-month price comparison
//! series, a profit margin calculator and a fixed-origin shipping estimator.

use tracing::error;

use crate::api::AiService;
use crate::mock::sample_market_prices;
use crate::pages::ViewState;
use crate::types::{CostEstimate, MarketPricePoint, PriceInsights};

pub const DEFAULT_MARKET: &str = "USA";
/// Origin used by this page's quick estimator.
pub const SHIPPING_ORIGIN: &str = "Mumbai, India";

pub const INSIGHTS_FAILED: &str = "Could not retrieve AI insights at this time.";
pub const INVALID_MARGIN_INPUT: &str = "Please enter valid selling price and cost of goods.";
pub const MARGIN_FAILED: &str = "Could not analyze margin at this time.";

pub struct PricingController {
    pub insights: ViewState<PriceInsights>,
    /// Chart series; starts from the built-in sample and is replaced when
    /// the model supplies one.
    pub chart: Vec<MarketPricePoint>,
    pub margin_pct: Option<f64>,
    pub margin_analysis: Option<String>,
    pub estimate: ViewState<CostEstimate>,
}

impl PricingController {
    pub fn new() -> Self {
        Self {
            insights: ViewState::Idle,
            chart: sample_market_prices(),
            margin_pct: None,
            margin_analysis: None,
            estimate: ViewState::Idle,
        }
    }

    pub async fn load(&mut self, service: &AiService, product: &str, market: &str) {
        self.insights = ViewState::Loading;
        match service.price_insights(product, market).await {
            Ok(insights) => {
                if let Some(points) = &insights.market_price_data {
                    if !points.is_empty() {
                        self.chart = points.clone();
                    }
                }
                self.insights = ViewState::Loaded(insights);
            }
            Err(err) => {
                error!(%err, "price insights fetch failed");
                // The sidebar still renders, carrying only the warning.
                self.insights = ViewState::Loaded(PriceInsights {
                    warning: Some(INSIGHTS_FAILED.to_string()),
                    ..PriceInsights::default()
                });
            }
        }
    }

    /// Computes the margin locally, then asks the model for a one-line
    /// analysis. Invalid numbers never leave the client.
    pub async fn calculate_margin(
        &mut self,
        service: &AiService,
        product: &str,
        market: &str,
        selling_price: f64,
        cost_of_goods: f64,
    ) {
        if !selling_price.is_finite()
            || !cost_of_goods.is_finite()
            || selling_price <= 0.0
            || selling_price < cost_of_goods
        {
            self.margin_pct = None;
            self.margin_analysis = Some(INVALID_MARGIN_INPUT.to_string());
            return;
        }

        let margin = (selling_price - cost_of_goods) / selling_price * 100.0;
        self.margin_pct = Some(margin);
        self.margin_analysis = None;

        match service.margin_analysis(product, margin, market).await {
            Ok(analysis) => self.margin_analysis = Some(analysis),
            Err(err) => {
                error!(%err, "margin analysis failed");
                self.margin_analysis = Some(MARGIN_FAILED.to_string());
            }
        }
    }

    pub async fn estimate_shipping(
        &mut self,
        service: &AiService,
        product: &str,
        to: &str,
        weight_kg: u32,
    ) {
        if to.trim().is_empty() || weight_kg == 0 {
            self.estimate = ViewState::Failed(
                "Pick a destination and a weight above zero first.".to_string(),
            );
            return;
        }

        self.estimate = ViewState::Loading;
        match service
            .logistics_cost(product, SHIPPING_ORIGIN, to, weight_kg)
            .await
        {
            Ok(estimate) => self.estimate = ViewState::Loaded(estimate),
            Err(err) => {
                error!(%err, "shipping estimate failed");
                self.estimate =
                    ViewState::Failed("Could not estimate logistics cost.".to_string());
            }
        }
    }
}

impl Default for PricingController {
    fn default() -> Self {
        Self::new()
    }
}
