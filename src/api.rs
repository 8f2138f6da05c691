//! Client for the hosted generative-model API.
//!
//! Each feature of the app maps to one typed operation: the client builds a
//! natural-language prompt plus a structured output schema, posts it to the
//! `generateContent` endpoint, and deserializes the returned JSON text into
//! the documented record. Parsing at this boundary is deliberate: a response
//! that does not match the declared shape is a typed [`ApiError`], never a
//! payload the UI has to second-guess.
//!
//! With no API key configured the service degrades to [`MockService`] and
//! every operation returns canned data after an artificial delay.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::chat::MessageType;
use crate::config::AiConfig;
use crate::error::{ApiError, ApiResult};
use crate::mock::MockService;
use crate::types::{
    CostEstimate, DashboardData, HsCodeSuggestion, ImporterDetails, PackagingIssue, PriceInsights,
};

const ASSISTANT_SYSTEM_PROMPT: &str = "You are Exporizz, a helpful AI assistant for exporters. \
     Your goal is to provide clear, concise, and actionable advice to help users succeed in \
     global trade. Format your answers with markdown where appropriate.";

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    fn turn(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
    #[serde(
        rename = "inlineData",
        skip_serializing_if = "Option::is_none",
        default
    )]
    inline_data: Option<Blob>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(Blob {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Blob {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

// ---------------------------------------------------------------------------
// Live client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent("exporizz/0.1")
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    /// Posts one `generateContent` request and returns the first candidate's
    /// text, trimmed.
    async fn generate(&self, request: &GenerateContentRequest) -> ApiResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!(model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text: String = body
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ApiError::EmptyResponse);
        }
        Ok(text)
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: String,
        schema: Value,
    ) -> ApiResult<T> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(schema),
            }),
        };
        let payload = self.generate(&request).await?;
        parse_payload(&payload)
    }

    async fn generate_text(&self, prompt: String) -> ApiResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: None,
            generation_config: None,
        };
        self.generate(&request).await
    }

    pub async fn hs_code_suggestions(
        &self,
        product_description: &str,
    ) -> ApiResult<Vec<HsCodeSuggestion>> {
        let prompt = format!(
            "Based on the product description \"{product_description}\", provide a list of up \
             to 3 likely HS codes. For each code, provide a brief description, a sample import \
             duty percentage for the USA and EU, and any known restrictions (like 'FDA \
             clearance needed'). If no restrictions, say 'None'."
        );
        self.generate_json(prompt, hs_code_schema()).await
    }

    pub async fn price_insights(&self, product: &str, market: &str) -> ApiResult<PriceInsights> {
        let prompt = format!(
            "Provide pricing insights for exporting \"{product}\" to \"{market}\". Give one \
             opportunity, one warning, one suggestion, and also provide an array of mock market \
             price data for the last 6 months (Jan to Jun) containing 'Market Avg' and 'Your \
             Price' per ton in USD."
        );
        self.generate_json(prompt, price_insights_schema()).await
    }

    /// Free-form assistant chat. Prior turns are replayed so the model keeps
    /// the conversation thread.
    pub async fn assistant_reply(
        &self,
        prompt: &str,
        history: &[(MessageType, String)],
    ) -> ApiResult<String> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|(message_type, content)| {
                let role = match message_type {
                    MessageType::Assistant => "model",
                    _ => "user",
                };
                Content::turn(role, content.clone())
            })
            .collect();
        contents.push(Content::turn("user", prompt));

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::text(ASSISTANT_SYSTEM_PROMPT)),
            generation_config: None,
        };
        self.generate(&request).await
    }

    pub async fn dashboard_data(&self, product: &str) -> ApiResult<DashboardData> {
        let prompt = format!(
            "Generate a full dashboard data set for exporting \"{product}\". Provide a single \
             JSON object with the following keys: hsCode (string), overallRisk (object with \
             score: number, level: 'Low'|'Moderate'|'High'), documentStatus (number, 0-100), \
             topCountries (array of 5 objects with name: string, value: number), \
             riskDistribution (array of 4 objects for 'Political', 'Economic', 'Logistical', \
             'Compliance' with name and value), and importers (array of 3 objects with id, \
             name, country, and product which should be the input product)."
        );
        self.generate_json(prompt, dashboard_schema()).await
    }

    pub async fn importer_details(
        &self,
        name: &str,
        country: &str,
        product: &str,
    ) -> ApiResult<ImporterDetails> {
        let prompt = format!(
            "Generate a fictional but realistic, detailed profile for an importer named \
             \"{name}\" in \"{country}\" who is interested in \"{product}\". Provide a JSON \
             object with keys: name, country, bio, keyContact, email, and \
             estimatedImportVolume."
        );
        self.generate_json(prompt, importer_details_schema()).await
    }

    pub async fn logistics_cost(
        &self,
        product: &str,
        from: &str,
        to: &str,
        weight_kg: u32,
    ) -> ApiResult<CostEstimate> {
        let prompt = format!(
            "Estimate the logistics cost to ship {weight_kg}kg of \"{product}\" from \
             \"{from}\" to \"{to}\". Provide a JSON object with a low and high estimate, and \
             the currency (e.g., \"USD\")."
        );
        self.generate_json(prompt, cost_estimate_schema()).await
    }

    pub async fn margin_analysis(
        &self,
        product: &str,
        margin_pct: f64,
        market: &str,
    ) -> ApiResult<String> {
        let prompt = format!(
            "Analyze a profit margin of {margin_pct:.1}% for exporting \"{product}\" to the \
             \"{market}\" market. Provide a brief, one-sentence analysis. For example: 'This \
             is a strong margin, well above the industry average.' or 'This margin is tight \
             and may be risky given market volatility.'"
        );
        self.generate_text(prompt).await
    }

    pub async fn analyze_packaging(
        &self,
        base64_image: &str,
        mime_type: &str,
    ) -> ApiResult<Vec<PackagingIssue>> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::inline_data(mime_type, base64_image),
                    Part::text(
                        "Analyze this product packaging image from an export compliance and \
                         logistics perspective. Identify up to 3 potential issues related to \
                         labeling, barcode placement, color contrast, or potential shipping \
                         damage. For each issue, provide a 'finding' and a 'recommendation'.",
                    ),
                ],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(packaging_schema()),
            }),
        };
        let payload = self.generate(&request).await?;
        parse_payload(&payload)
    }
}

fn parse_payload<T: DeserializeOwned>(payload: &str) -> ApiResult<T> {
    serde_json::from_str(payload).map_err(|source| ApiError::malformed(payload, source))
}

// ---------------------------------------------------------------------------
// Response schemas
// ---------------------------------------------------------------------------

fn hs_code_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "code": { "type": "STRING", "description": "The 8-digit HS code." },
                "description": { "type": "STRING", "description": "A brief description of the HS code." },
                "dutyUSA": { "type": "STRING", "description": "Example import duty for the USA (e.g., '0%')." },
                "dutyEU": { "type": "STRING", "description": "Example import duty for the EU (e.g., '9%')." },
                "restrictions": { "type": "STRING", "description": "Known restrictions or requirements (e.g., 'FDA clearance needed for USA')." }
            },
            "required": ["code", "description", "dutyUSA", "dutyEU", "restrictions"]
        }
    })
}

fn price_insights_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "opportunity": { "type": "STRING", "description": "A positive market opportunity or trend." },
            "warning": { "type": "STRING", "description": "A potential risk, cost increase, or negative trend." },
            "suggestion": { "type": "STRING", "description": "An actionable suggestion to optimize pricing or strategy." },
            "marketPriceData": {
                "type": "ARRAY",
                "description": "Mock market price data for 6 months.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "month": { "type": "STRING" },
                        "Market Avg": { "type": "NUMBER" },
                        "Your Price": { "type": "NUMBER" }
                    },
                    "required": ["month", "Market Avg", "Your Price"]
                }
            }
        },
        "required": ["opportunity", "warning", "suggestion", "marketPriceData"]
    })
}

fn dashboard_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "hsCode": { "type": "STRING" },
            "overallRisk": {
                "type": "OBJECT",
                "properties": {
                    "score": { "type": "NUMBER" },
                    "level": { "type": "STRING", "enum": ["Low", "Moderate", "High"] }
                },
                "required": ["score", "level"]
            },
            "documentStatus": { "type": "NUMBER" },
            "topCountries": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": { "name": { "type": "STRING" }, "value": { "type": "NUMBER" } },
                    "required": ["name", "value"]
                }
            },
            "riskDistribution": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": { "name": { "type": "STRING" }, "value": { "type": "NUMBER" } },
                    "required": ["name", "value"]
                }
            },
            "importers": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "NUMBER" },
                        "name": { "type": "STRING" },
                        "country": { "type": "STRING" },
                        "product": { "type": "STRING" }
                    },
                    "required": ["id", "name", "country", "product"]
                }
            }
        },
        "required": ["hsCode", "overallRisk", "documentStatus", "topCountries", "riskDistribution", "importers"]
    })
}

fn importer_details_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "country": { "type": "STRING" },
            "bio": { "type": "STRING" },
            "keyContact": { "type": "STRING" },
            "email": { "type": "STRING" },
            "estimatedImportVolume": { "type": "STRING" }
        },
        "required": ["name", "country", "bio", "keyContact", "email", "estimatedImportVolume"]
    })
}

fn cost_estimate_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "low": { "type": "NUMBER" },
            "high": { "type": "NUMBER" },
            "currency": { "type": "STRING" }
        },
        "required": ["low", "high", "currency"]
    })
}

fn packaging_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "finding": { "type": "STRING", "description": "A brief description of the potential issue found." },
                "recommendation": { "type": "STRING", "description": "An actionable recommendation to fix the issue." }
            },
            "required": ["finding", "recommendation"]
        }
    })
}

// ---------------------------------------------------------------------------
// Service facade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Backend {
    Gemini(GeminiClient),
    Mock(MockService),
}

/// The single entry point page controllers talk to. Picks the live client or
/// the mock backend once, at construction.
#[derive(Debug, Clone)]
pub struct AiService {
    backend: Backend,
}

impl AiService {
    pub fn from_config(ai: &AiConfig) -> Self {
        if ai.api_key.trim().is_empty() {
            warn!("no API key configured; falling back to canned mock responses");
            Self::mock()
        } else {
            Self::gemini(GeminiClient::new(
                ai.api_url.clone(),
                ai.api_key.clone(),
                ai.model.clone(),
            ))
        }
    }

    pub fn gemini(client: GeminiClient) -> Self {
        Self {
            backend: Backend::Gemini(client),
        }
    }

    pub fn mock() -> Self {
        Self {
            backend: Backend::Mock(MockService),
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.backend, Backend::Mock(_))
    }

    pub async fn hs_code_suggestions(
        &self,
        product_description: &str,
    ) -> ApiResult<Vec<HsCodeSuggestion>> {
        match &self.backend {
            Backend::Gemini(client) => client.hs_code_suggestions(product_description).await,
            Backend::Mock(mock) => Ok(mock.hs_code_suggestions(product_description).await),
        }
    }

    pub async fn price_insights(&self, product: &str, market: &str) -> ApiResult<PriceInsights> {
        match &self.backend {
            Backend::Gemini(client) => client.price_insights(product, market).await,
            Backend::Mock(mock) => Ok(mock.price_insights(product, market).await),
        }
    }

    pub async fn assistant_reply(
        &self,
        prompt: &str,
        history: &[(MessageType, String)],
    ) -> ApiResult<String> {
        match &self.backend {
            Backend::Gemini(client) => client.assistant_reply(prompt, history).await,
            Backend::Mock(mock) => Ok(mock.assistant_reply(prompt).await),
        }
    }

    pub async fn dashboard_data(&self, product: &str) -> ApiResult<DashboardData> {
        match &self.backend {
            Backend::Gemini(client) => client.dashboard_data(product).await,
            Backend::Mock(mock) => Ok(mock.dashboard_data(product).await),
        }
    }

    pub async fn importer_details(
        &self,
        name: &str,
        country: &str,
        product: &str,
    ) -> ApiResult<ImporterDetails> {
        match &self.backend {
            Backend::Gemini(client) => client.importer_details(name, country, product).await,
            Backend::Mock(mock) => Ok(mock.importer_details(name, country).await),
        }
    }

    pub async fn logistics_cost(
        &self,
        product: &str,
        from: &str,
        to: &str,
        weight_kg: u32,
    ) -> ApiResult<CostEstimate> {
        match &self.backend {
            Backend::Gemini(client) => client.logistics_cost(product, from, to, weight_kg).await,
            Backend::Mock(mock) => Ok(mock.logistics_cost().await),
        }
    }

    pub async fn margin_analysis(
        &self,
        product: &str,
        margin_pct: f64,
        market: &str,
    ) -> ApiResult<String> {
        match &self.backend {
            Backend::Gemini(client) => client.margin_analysis(product, margin_pct, market).await,
            Backend::Mock(mock) => Ok(mock.margin_analysis(margin_pct).await),
        }
    }

    pub async fn analyze_packaging(
        &self,
        base64_image: &str,
        mime_type: &str,
    ) -> ApiResult<Vec<PackagingIssue>> {
        match &self.backend {
            Backend::Gemini(client) => client.analyze_packaging(base64_image, mime_type).await,
            Backend::Mock(mock) => Ok(mock.analyze_packaging().await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;

    #[test]
    fn parse_payload_validates_shape() {
        let payload = r#"{"low": 1250, "high": 1500, "currency": "USD"}"#;
        let estimate: CostEstimate = parse_payload(payload).unwrap();
        assert_eq!(estimate.currency, "USD");

        let err = parse_payload::<CostEstimate>(r#"{"low": "cheap"}"#).unwrap_err();
        assert!(matches!(err, ApiError::MalformedPayload { .. }));
    }

    #[test]
    fn dashboard_payload_with_camel_case_keys_deserializes() {
        let payload = r#"{
            "hsCode": "0901.11.90",
            "overallRisk": {"score": 68, "level": "Moderate"},
            "documentStatus": 95,
            "topCountries": [{"name": "USA", "value": 400}],
            "riskDistribution": [{"name": "Political", "value": 20}],
            "importers": [{"id": 1, "name": "Global Imports Inc.", "country": "USA", "product": "Coffee Beans"}]
        }"#;
        let data: DashboardData = parse_payload(payload).unwrap();
        assert_eq!(data.overall_risk.level, RiskLevel::Moderate);
        assert_eq!(data.importers[0].product, "Coffee Beans");
    }

    #[test]
    fn missing_credential_selects_mock_backend() {
        let ai = AiConfig {
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: "  ".to_string(),
            model: "gemini-2.5-flash".to_string(),
        };
        assert!(AiService::from_config(&ai).is_mock());
    }

    #[test]
    fn request_serialization_matches_wire_contract() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::inline_data("image/png", "AAAA"), Part::text("check")],
            }],
            system_instruction: Some(Content::text("sys")),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(packaging_schema()),
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(value["contents"][0]["parts"][1]["text"], "check");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }
}
