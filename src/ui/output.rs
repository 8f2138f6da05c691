//! Console rendering for every screen: styled headers, tables, status
//! badges and a bar chart for country volumes.

use console::{style, StyledObject};

use crate::config::Theme;
use crate::types::{
    CostEstimate, DashboardData, DirectoryImporter, DocumentItem, DocumentStatus, HsCodeSuggestion,
    ImporterDetails, MarketPricePoint, NamedValue, PackagingIssue, PriceInsights, RiskLevel,
};

const BAR_WIDTH: usize = 36;

pub struct OutputHandler {
    theme: Theme,
}

impl OutputHandler {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn accent<D>(&self, value: D) -> StyledObject<D> {
        match self.theme {
            Theme::Dark => style(value).cyan().bold(),
            Theme::Light => style(value).blue().bold(),
        }
    }

    pub fn print_banner(&self, mock_mode: bool) {
        println!("{}", self.accent("Exporizz — export assistance"));
        println!("{}", style("Analyze any product to uncover global opportunities.").dim());
        if mock_mode {
            println!(
                "{}",
                style("Running in mock mode: no API key configured, responses are canned.")
                    .yellow()
            );
        }
        println!();
    }

    pub fn print_page_header(&self, title: &str) {
        println!();
        println!("{}", self.accent(title));
        println!("{}", style("─".repeat(title.len().max(12))).dim());
    }

    pub fn print_error(&self, content: &str) {
        println!("{} {}", style("Error:").red().bold(), content);
    }

    pub fn print_info(&self, content: &str) {
        println!("{}", style(content).yellow().dim());
    }

    pub fn print_user_message(&self, content: &str) {
        println!("{} {}", self.accent("You:"), content);
    }

    pub fn print_assistant_message(&self, content: &str) {
        println!("{} {}", style("Exporizz:").green().bold(), content);
    }

    pub fn print_dashboard(&self, product: &str, data: &DashboardData) {
        self.print_page_header(&format!("Live Export Intelligence — {product}"));

        println!("HS Code:            {}", self.accent(&data.hs_code));
        let risk = format!("{:.0} ({} Risk)", data.overall_risk.score, data.overall_risk.level);
        println!("Overall Risk Score: {}", self.risk_style(data.overall_risk.level, risk));
        println!(
            "Document Status:    {} Ready for Export",
            style(format!("{:.0}%", data.document_status)).green()
        );

        println!("\n{}", style("Top 5 Export Countries").bold());
        self.print_bar_chart(&data.top_countries);

        println!("\n{}", style("Risk Distribution").bold());
        for entry in &data.risk_distribution {
            println!("  {:<12} {:>4.0}", entry.name, entry.value);
        }

        println!("\n{}", style("Potential Importers").bold());
        println!("  {:<4} {:<24} {:<12} {}", "ID", "Company Name", "Country", "Product Interest");
        for importer in &data.importers {
            println!(
                "  {:<4} {:<24} {:<12} {}",
                importer.id, importer.name, importer.country, importer.product
            );
        }
        println!(
            "{}",
            style("Use `importer <id>` to view details, `report <file>` to export.").dim()
        );
    }

    fn risk_style(&self, level: RiskLevel, text: String) -> StyledObject<String> {
        match level {
            RiskLevel::Low => style(text).green(),
            RiskLevel::Moderate => style(text).yellow(),
            RiskLevel::High => style(text).red(),
        }
    }

    fn print_bar_chart(&self, entries: &[NamedValue]) {
        let max = entries.iter().map(|e| e.value).fold(0.0_f64, f64::max);
        for entry in entries {
            let width = if max > 0.0 {
                ((entry.value / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let bar: String = "█".repeat(width.max(1));
            println!("  {:<10} {} {:.0}", entry.name, self.accent(bar), entry.value);
        }
    }

    pub fn print_importer_details(&self, details: &ImporterDetails) {
        println!("\n{} ({})", self.accent(&details.name), details.country);
        println!("  {}", details.bio);
        println!("  Key Contact:   {}", details.key_contact);
        println!("  Email:         {}", details.email);
        println!("  Import Volume: {}", details.estimated_import_volume);
    }

    pub fn print_hs_suggestions(&self, suggestions: &[HsCodeSuggestion]) {
        if suggestions.is_empty() {
            self.print_info("No matching HS codes found. Try a more specific description.");
            return;
        }
        for suggestion in suggestions {
            println!("\n{}", self.accent(&suggestion.code));
            println!("  {}", suggestion.description);
            println!(
                "  Duty USA: {:<8} Duty EU: {}",
                suggestion.duty_usa, suggestion.duty_eu
            );
            if suggestion.restrictions != "None" {
                println!(
                    "  {} {}",
                    style("Restrictions:").yellow(),
                    suggestion.restrictions
                );
            }
        }
    }

    pub fn print_insights(&self, insights: &PriceInsights) {
        if let Some(opportunity) = &insights.opportunity {
            println!("{} {}", style("Opportunity:").green().bold(), opportunity);
        }
        if let Some(warning) = &insights.warning {
            println!("{} {}", style("Warning:").yellow().bold(), warning);
        }
        if let Some(suggestion) = &insights.suggestion {
            println!("{} {}", self.accent("Suggestion:"), suggestion);
        }
    }

    pub fn print_price_chart(&self, points: &[MarketPricePoint]) {
        println!("{}", style("Market Price Comparison (USD per Ton)").bold());
        println!("  {:<6} {:>12} {:>12}", "Month", "Market Avg", "Your Price");
        for point in points {
            println!(
                "  {:<6} {:>12.0} {:>12.0}",
                point.month, point.market_avg, point.your_price
            );
        }
    }

    pub fn print_estimate(&self, estimate: &CostEstimate) {
        println!(
            "Estimated cost: {} (estimated)",
            self.accent(format!(
                "{} {:.0} - {:.0}",
                estimate.currency, estimate.low, estimate.high
            ))
        );
    }

    pub fn print_packaging_report(&self, issues: &[PackagingIssue]) {
        if issues.is_empty() {
            println!(
                "{}",
                style("No major issues found! Your packaging looks ready for export.").green()
            );
            return;
        }
        for issue in issues {
            println!("\n{} {}", style("▲").yellow(), style(&issue.finding).bold());
            println!("  {}", issue.recommendation);
        }
    }

    pub fn print_documents(&self, country: &str, documents: &[DocumentItem], rejected_tip: &str) {
        self.print_page_header(&format!("Document Checklist — {country}"));
        for doc in documents {
            let badge = match doc.status {
                DocumentStatus::Ready => style("[Ready]   ").green(),
                DocumentStatus::Pending => style("[Pending] ").yellow(),
                DocumentStatus::Rejected => style("[Rejected]").red(),
            };
            println!("{badge} {}", style(&doc.name).bold());
            println!("           {}", style(&doc.description).dim());
            if doc.status == DocumentStatus::Rejected {
                println!("           {} {}", style("AI Tip:").red(), rejected_tip);
            }
        }
    }

    pub fn print_importer_table(&self, importers: &[&DirectoryImporter]) {
        println!(
            "  {:<4} {:<22} {:<10} {:<12} {:<8}",
            "ID", "Company Name", "Country", "Product", "Size"
        );
        for importer in importers {
            println!(
                "  {:<4} {:<22} {:<10} {:<12} {:<8}",
                importer.id, importer.name, importer.country, importer.product_type, importer.size
            );
        }
        if importers.is_empty() {
            self.print_info("No importers match the current filters.");
        }
    }

    pub fn print_directory_details(&self, importer: &DirectoryImporter) {
        println!("\n{} ({})", self.accent(&importer.name), importer.country);
        println!("  Contact Person:  {}", importer.contact);
        println!("  Email:           {}", importer.email);
        println!("  Company Size:    {}", importer.size);
        println!("  Primary Product: {}", importer.product_type);
    }
}
