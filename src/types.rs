//! Domain records shared across the service client and page controllers.
//!
//! Serde renames preserve the wire contract of the generative service
//! verbatim (camelCase keys, a few irregular ones like `dutyUSA` and
//! `"Market Avg"`), so deserializing doubles as response-shape validation.

use serde::{Deserialize, Serialize};

/// The product currently under analysis. Held at shell level and shared by
/// every page; reset to the default on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            name: "Coffee Beans".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsCodeSuggestion {
    pub code: String,
    pub description: String,
    #[serde(rename = "dutyUSA")]
    pub duty_usa: String,
    #[serde(rename = "dutyEU")]
    pub duty_eu: String,
    pub restrictions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRisk {
    pub score: f64,
    pub level: RiskLevel,
}

/// One labelled bar or pie slice (country volumes, risk categories).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

/// Lightweight importer lead surfaced on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Importer {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub product: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub hs_code: String,
    pub overall_risk: OverallRisk,
    /// Document readiness percentage, 0-100.
    pub document_status: f64,
    pub top_countries: Vec<NamedValue>,
    pub risk_distribution: Vec<NamedValue>,
    pub importers: Vec<Importer>,
}

/// On-demand detail record, fetched lazily when a lead is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterDetails {
    pub name: String,
    pub country: String,
    pub bio: String,
    pub key_contact: String,
    pub email: String,
    pub estimated_import_volume: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub low: f64,
    pub high: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPricePoint {
    pub month: String,
    #[serde(rename = "Market Avg")]
    pub market_avg: f64,
    #[serde(rename = "Your Price")]
    pub your_price: f64,
}

/// AI pricing commentary. The model is asked for all four fields but the
/// view tolerates any of them missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInsights {
    #[serde(default)]
    pub opportunity: Option<String>,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub market_price_data: Option<Vec<MarketPricePoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingIssue {
    pub finding: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    Small,
    Medium,
    Large,
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanySize::Small => write!(f, "Small"),
            CompanySize::Medium => write!(f, "Medium"),
            CompanySize::Large => write!(f, "Large"),
        }
    }
}

/// Entry in the static importer directory (distinct from the AI-generated
/// dashboard leads: these carry contact data up front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryImporter {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub product_type: String,
    pub size: CompanySize,
    pub contact: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Ready,
    Pending,
    Rejected,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Ready => write!(f, "Ready"),
            DocumentStatus::Pending => write!(f, "Pending"),
            DocumentStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    pub name: String,
    pub description: String,
    pub status: DocumentStatus,
}
