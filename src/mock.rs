//! Canned responses used when no API key is configured.
//!
//! Every operation of the live client has a mock twin returning a fixed
//! payload after an artificial delay, so the whole UI can be exercised
//! offline. Payloads and delays match the hosted service's documented
//! shapes.

use std::time::Duration;

use tokio::time::sleep;

use crate::types::{
    CostEstimate, DashboardData, HsCodeSuggestion, Importer, ImporterDetails, MarketPricePoint,
    NamedValue, OverallRisk, PackagingIssue, PriceInsights, RiskLevel,
};

pub const HS_CODE_DELAY: Duration = Duration::from_millis(1000);
pub const PRICE_INSIGHTS_DELAY: Duration = Duration::from_millis(1500);
pub const ASSISTANT_DELAY: Duration = Duration::from_millis(1500);
pub const DASHBOARD_DELAY: Duration = Duration::from_millis(2000);
pub const IMPORTER_DETAILS_DELAY: Duration = Duration::from_millis(1000);
pub const LOGISTICS_DELAY: Duration = Duration::from_millis(1200);
pub const MARGIN_DELAY: Duration = Duration::from_millis(800);
pub const PACKAGING_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Default)]
pub struct MockService;

impl MockService {
    pub async fn hs_code_suggestions(&self, _description: &str) -> Vec<HsCodeSuggestion> {
        sleep(HS_CODE_DELAY).await;
        vec![
            HsCodeSuggestion {
                code: "0901.21.00".to_string(),
                description: "Coffee, roasted, not decaffeinated.".to_string(),
                duty_usa: "0%".to_string(),
                duty_eu: "0%".to_string(),
                restrictions: "FDA clearance needed for USA".to_string(),
            },
            HsCodeSuggestion {
                code: "0901.11.90".to_string(),
                description: "Coffee, not roasted, not decaffeinated, other.".to_string(),
                duty_usa: "0%".to_string(),
                duty_eu: "0%".to_string(),
                restrictions: "None".to_string(),
            },
            HsCodeSuggestion {
                code: "2101.11.00".to_string(),
                description: "Extracts, essences and concentrates of coffee.".to_string(),
                duty_usa: "2.5%".to_string(),
                duty_eu: "9%".to_string(),
                restrictions: "None".to_string(),
            },
        ]
    }

    pub async fn price_insights(&self, _product: &str, _market: &str) -> PriceInsights {
        sleep(PRICE_INSIGHTS_DELAY).await;
        PriceInsights {
            opportunity: Some(
                "Prices in the EU market are trending upwards. Consider a 5% price increase \
                 for German importers next quarter."
                    .to_string(),
            ),
            warning: Some(
                "Shipping costs to the UK have increased by 12% due to new port fees. Adjust \
                 your logistics budget accordingly."
                    .to_string(),
            ),
            suggestion: Some(
                "Your current pricing is 3% below the market average in the USA. This provides \
                 a competitive edge but could be optimized for higher margins."
                    .to_string(),
            ),
            market_price_data: Some(sample_market_prices()),
        }
    }

    pub async fn assistant_reply(&self, _prompt: &str) -> String {
        sleep(ASSISTANT_DELAY).await;
        "I am currently in mock mode. To get help, please describe your issue. For example, \
         'How do I find an importer for textiles?'"
            .to_string()
    }

    pub async fn dashboard_data(&self, product: &str) -> DashboardData {
        sleep(DASHBOARD_DELAY).await;
        DashboardData {
            hs_code: "0901.11.90".to_string(),
            overall_risk: OverallRisk {
                score: 68.0,
                level: RiskLevel::Moderate,
            },
            document_status: 95.0,
            top_countries: vec![
                named("USA", 400.0),
                named("Germany", 300.0),
                named("UAE", 200.0),
                named("UK", 278.0),
                named("China", 189.0),
            ],
            risk_distribution: vec![
                named("Political", 20.0),
                named("Economic", 30.0),
                named("Logistical", 40.0),
                named("Compliance", 10.0),
            ],
            importers: vec![
                lead(1, "Global Imports Inc.", "USA", product),
                lead(2, "EuroTrade GmbH", "Germany", product),
                lead(3, "Emirates Traders", "UAE", product),
            ],
        }
    }

    pub async fn importer_details(&self, name: &str, country: &str) -> ImporterDetails {
        sleep(IMPORTER_DETAILS_DELAY).await;
        let mailbox: String = name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        ImporterDetails {
            name: name.to_string(),
            country: country.to_string(),
            bio: "A leading importer of fine goods, specializing in sourcing high-quality \
                  products for the North American market for over 20 years."
                .to_string(),
            key_contact: "Jane Doe".to_string(),
            email: format!("procurement@{mailbox}.com"),
            estimated_import_volume: "Approx. 50-60 containers/year".to_string(),
        }
    }

    pub async fn logistics_cost(&self) -> CostEstimate {
        sleep(LOGISTICS_DELAY).await;
        CostEstimate {
            low: 1250.0,
            high: 1500.0,
            currency: "USD".to_string(),
        }
    }

    pub async fn margin_analysis(&self, margin_pct: f64) -> String {
        sleep(MARGIN_DELAY).await;
        format!(
            "A {:.1}% margin is considered healthy for this market.",
            margin_pct
        )
    }

    pub async fn analyze_packaging(&self) -> Vec<PackagingIssue> {
        sleep(PACKAGING_DELAY).await;
        vec![
            PackagingIssue {
                finding: "Low Contrast Labeling".to_string(),
                recommendation: "The font color on the main label has low contrast against the \
                                 background, potentially making it hard to read under warehouse \
                                 lighting. Increase contrast to meet compliance standards."
                    .to_string(),
            },
            PackagingIssue {
                finding: "Barcode Placement".to_string(),
                recommendation: "The barcode is placed near a package seam. This could cause \
                                 scanning errors. Move the barcode to a flat, central surface at \
                                 least 2 inches from any edge."
                    .to_string(),
            },
        ]
    }
}

/// Six-month series the pricing chart starts from before any insights load.
pub fn sample_market_prices() -> Vec<MarketPricePoint> {
    [
        ("Jan", 4000.0, 3900.0),
        ("Feb", 4100.0, 4000.0),
        ("Mar", 3900.0, 3950.0),
        ("Apr", 4200.0, 4100.0),
        ("May", 4300.0, 4250.0),
        ("Jun", 4500.0, 4400.0),
    ]
    .into_iter()
    .map(|(month, market_avg, your_price)| MarketPricePoint {
        month: month.to_string(),
        market_avg,
        your_price,
    })
    .collect()
}

fn named(name: &str, value: f64) -> NamedValue {
    NamedValue {
        name: name.to_string(),
        value,
    }
}

fn lead(id: i64, name: &str, country: &str, product: &str) -> Importer {
    Importer {
        id,
        name: name.to_string(),
        country: country.to_string(),
        product: product.to_string(),
    }
}
