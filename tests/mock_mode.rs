//! With no credential configured, every feature call must resolve into its
//! documented shape after the documented artificial delay. The clock is
//! paused, so the delays are checked exactly without slowing the suite.

use exporizz::api::AiService;
use exporizz::mock;
use exporizz::types::RiskLevel;
use pretty_assertions::assert_eq;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn hs_code_suggestions_arrive_in_shape_and_on_time() {
    let service = AiService::mock();
    let start = Instant::now();

    let suggestions = service.hs_code_suggestions("roasted coffee").await.unwrap();

    assert_eq!(start.elapsed(), mock::HS_CODE_DELAY);
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0].code, "0901.21.00");
    assert_eq!(suggestions[0].duty_usa, "0%");
    assert_eq!(suggestions[2].restrictions, "None");
}

#[tokio::test(start_paused = true)]
async fn dashboard_data_arrives_in_shape_and_on_time() {
    let service = AiService::mock();
    let start = Instant::now();

    let data = service.dashboard_data("Coffee Beans").await.unwrap();

    assert_eq!(start.elapsed(), mock::DASHBOARD_DELAY);
    assert_eq!(data.hs_code, "0901.11.90");
    assert_eq!(data.overall_risk.level, RiskLevel::Moderate);
    assert_eq!(data.top_countries.len(), 5);
    assert_eq!(data.risk_distribution.len(), 4);
    assert_eq!(data.importers.len(), 3);
    // The input product is threaded through the generated leads.
    assert!(data.importers.iter().all(|i| i.product == "Coffee Beans"));
}

#[tokio::test(start_paused = true)]
async fn price_insights_arrive_in_shape_and_on_time() {
    let service = AiService::mock();
    let start = Instant::now();

    let insights = service.price_insights("Coffee Beans", "USA").await.unwrap();

    assert_eq!(start.elapsed(), mock::PRICE_INSIGHTS_DELAY);
    assert!(insights.opportunity.is_some());
    assert!(insights.warning.is_some());
    assert!(insights.suggestion.is_some());
    let points = insights.market_price_data.unwrap();
    assert_eq!(points.len(), 6);
    assert_eq!(points[0].month, "Jan");
}

#[tokio::test(start_paused = true)]
async fn importer_details_derive_a_contact_mailbox() {
    let service = AiService::mock();
    let start = Instant::now();

    let details = service
        .importer_details("EuroTrade GmbH", "Germany", "Coffee Beans")
        .await
        .unwrap();

    assert_eq!(start.elapsed(), mock::IMPORTER_DETAILS_DELAY);
    assert_eq!(details.name, "EuroTrade GmbH");
    assert_eq!(details.email, "procurement@eurotradegmbh.com");
    assert!(!details.estimated_import_volume.is_empty());
}

#[tokio::test(start_paused = true)]
async fn logistics_cost_arrives_in_shape_and_on_time() {
    let service = AiService::mock();
    let start = Instant::now();

    let estimate = service
        .logistics_cost("Coffee Beans", "Mumbai, India", "Hamburg, Germany", 500)
        .await
        .unwrap();

    assert_eq!(start.elapsed(), mock::LOGISTICS_DELAY);
    assert_eq!(estimate.currency, "USD");
    assert!(estimate.low <= estimate.high);
}

#[tokio::test(start_paused = true)]
async fn margin_analysis_quotes_the_margin() {
    let service = AiService::mock();
    let start = Instant::now();

    let analysis = service
        .margin_analysis("Coffee Beans", 17.25, "USA")
        .await
        .unwrap();

    assert_eq!(start.elapsed(), mock::MARGIN_DELAY);
    assert!(analysis.contains("17.2%"));
}

#[tokio::test(start_paused = true)]
async fn packaging_analysis_arrives_in_shape_and_on_time() {
    let service = AiService::mock();
    let start = Instant::now();

    let issues = service.analyze_packaging("AAAA", "image/png").await.unwrap();

    assert_eq!(start.elapsed(), mock::PACKAGING_DELAY);
    assert_eq!(issues.len(), 2);
    assert!(!issues[0].finding.is_empty());
    assert!(!issues[0].recommendation.is_empty());
}

#[tokio::test(start_paused = true)]
async fn assistant_reply_mentions_mock_mode() {
    let service = AiService::mock();
    let start = Instant::now();

    let reply = service.assistant_reply("hello", &[]).await.unwrap();

    assert_eq!(start.elapsed(), mock::ASSISTANT_DELAY);
    assert!(reply.contains("mock mode"));
}
