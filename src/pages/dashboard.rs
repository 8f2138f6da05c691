//! Export intelligence dashboard: per-product analysis, lazy importer
//! details, a logistics estimator and a plain-text report export.

use std::fmt::Write as _;
use std::path::Path;

use tracing::error;

use crate::api::AiService;
use crate::pages::ViewState;
use crate::types::{CostEstimate, DashboardData, Importer, ImporterDetails};

pub const FETCH_FAILED: &str =
    "Failed to fetch dashboard data. The AI might be busy. Please try again later.";

pub struct DashboardController {
    pub state: ViewState<DashboardData>,
    pub selected_importer: Option<Importer>,
    pub importer_details: ViewState<ImporterDetails>,
    pub estimate: ViewState<CostEstimate>,
}

impl DashboardController {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
            selected_importer: None,
            importer_details: ViewState::Idle,
            estimate: ViewState::Idle,
        }
    }

    /// Fetches the full dashboard for `product`. An empty product name fails
    /// immediately without ever entering the loading state.
    pub async fn load(&mut self, service: &AiService, product: &str) {
        let product = product.trim();
        if product.is_empty() {
            self.state = ViewState::Failed("Enter a product name to analyze.".to_string());
            return;
        }

        self.state = ViewState::Loading;
        match service.dashboard_data(product).await {
            Ok(data) => self.state = ViewState::Loaded(data),
            Err(err) => {
                error!(%err, "dashboard fetch failed");
                self.state = ViewState::Failed(FETCH_FAILED.to_string());
            }
        }
    }

    /// Opens the detail view for one lead, issuing exactly one detail
    /// request.
    pub async fn open_importer(&mut self, service: &AiService, importer: Importer) {
        self.importer_details = ViewState::Loading;
        self.selected_importer = Some(importer.clone());

        match service
            .importer_details(&importer.name, &importer.country, &importer.product)
            .await
        {
            Ok(details) => self.importer_details = ViewState::Loaded(details),
            Err(err) => {
                error!(%err, importer = %importer.name, "importer detail fetch failed");
                self.importer_details =
                    ViewState::Failed("Could not retrieve importer details.".to_string());
            }
        }
    }

    pub fn importer_by_id(&self, id: i64) -> Option<Importer> {
        self.state
            .as_loaded()
            .and_then(|data| data.importers.iter().find(|i| i.id == id))
            .cloned()
    }

    /// Closing the detail view clears its result.
    pub fn close_importer(&mut self) {
        self.selected_importer = None;
        self.importer_details = ViewState::Idle;
    }

    pub async fn estimate_cost(
        &mut self,
        service: &AiService,
        product: &str,
        from: &str,
        to: &str,
        weight_kg: u32,
    ) {
        if from.trim().is_empty() || to.trim().is_empty() || weight_kg == 0 {
            self.estimate = ViewState::Failed(
                "Fill in origin, destination and a weight above zero first.".to_string(),
            );
            return;
        }

        self.estimate = ViewState::Loading;
        match service.logistics_cost(product, from, to, weight_kg).await {
            Ok(estimate) => self.estimate = ViewState::Loaded(estimate),
            Err(err) => {
                error!(%err, "logistics estimate failed");
                self.estimate =
                    ViewState::Failed("Could not estimate logistics cost.".to_string());
            }
        }
    }

    /// Compiles the loaded dashboard into a shareable plain-text report.
    /// Returns `None` until data is loaded.
    pub fn report_text(&self, product: &str) -> Option<String> {
        let data = self.state.as_loaded()?;
        let mut report = String::new();

        let _ = writeln!(report, "Export Analysis Report: {product}");
        let _ = writeln!(report);
        let _ = writeln!(report, "HS Code: {}", data.hs_code);
        let _ = writeln!(
            report,
            "Overall Risk: {} ({:.0}/100)",
            data.overall_risk.level, data.overall_risk.score
        );
        let _ = writeln!(report, "Document Readiness: {:.0}%", data.document_status);

        let _ = writeln!(report, "\nTop Export Countries:");
        for country in &data.top_countries {
            let _ = writeln!(report, "  {} — {:.0}", country.name, country.value);
        }

        let _ = writeln!(report, "\nRisk Distribution:");
        for risk in &data.risk_distribution {
            let _ = writeln!(report, "  {} — {:.0}", risk.name, risk.value);
        }

        let _ = writeln!(report, "\nPotential Importers:");
        for importer in &data.importers {
            let _ = writeln!(
                report,
                "  {} ({}) — interested in {}",
                importer.name, importer.country, importer.product
            );
        }

        Some(report)
    }

    pub fn write_report(&self, product: &str, path: &Path) -> std::io::Result<bool> {
        match self.report_text(product) {
            Some(report) => {
                std::fs::write(path, report)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for DashboardController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_product_fails_without_loading() {
        let service = AiService::mock();
        let mut controller = DashboardController::new();

        controller.load(&service, "   ").await;
        assert!(!controller.state.is_loading());
        assert!(controller.state.failure().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn close_importer_clears_details() {
        let service = AiService::mock();
        let mut controller = DashboardController::new();
        controller.load(&service, "Coffee Beans").await;

        let importer = controller.importer_by_id(1).expect("lead present");
        controller.open_importer(&service, importer).await;
        assert!(controller.importer_details.as_loaded().is_some());

        controller.close_importer();
        assert_eq!(controller.importer_details, ViewState::Idle);
        assert!(controller.selected_importer.is_none());
    }

    #[tokio::test]
    async fn blank_estimator_fields_are_rejected_locally() {
        let service = AiService::mock();
        let mut controller = DashboardController::new();

        controller
            .estimate_cost(&service, "Coffee Beans", "", "Hamburg, Germany", 100)
            .await;
        assert!(controller.estimate.failure().is_some());

        controller
            .estimate_cost(&service, "Coffee Beans", "Mumbai, India", "Hamburg, Germany", 0)
            .await;
        assert!(controller.estimate.failure().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn report_compiles_loaded_dashboard() {
        let service = AiService::mock();
        let mut controller = DashboardController::new();
        assert!(controller.report_text("Coffee Beans").is_none());

        controller.load(&service, "Coffee Beans").await;
        let report = controller.report_text("Coffee Beans").unwrap();
        assert!(report.contains("HS Code: 0901.11.90"));
        assert!(report.contains("Global Imports Inc."));
    }
}
