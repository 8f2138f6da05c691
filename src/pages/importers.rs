//! Importer directory: a static buyer list with filters, a detail view and
//! outreach email templates.

use crate::types::{CompanySize, DirectoryImporter};

#[derive(Debug, Clone, PartialEq)]
pub struct EmailTemplate {
    pub name: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Default)]
pub struct ImporterFilters {
    pub query: Option<String>,
    pub country: Option<String>,
    pub size: Option<CompanySize>,
}

pub struct ImportersController {
    directory: Vec<DirectoryImporter>,
    pub filters: ImporterFilters,
    pub selected: Option<DirectoryImporter>,
}

impl ImportersController {
    pub fn new() -> Self {
        Self {
            directory: directory(),
            filters: ImporterFilters::default(),
            selected: None,
        }
    }

    pub fn filtered(&self) -> Vec<&DirectoryImporter> {
        self.directory
            .iter()
            .filter(|importer| {
                if let Some(query) = &self.filters.query {
                    if !importer
                        .name
                        .to_lowercase()
                        .contains(&query.to_lowercase())
                    {
                        return false;
                    }
                }
                if let Some(country) = &self.filters.country {
                    if !importer.country.eq_ignore_ascii_case(country) {
                        return false;
                    }
                }
                if let Some(size) = self.filters.size {
                    if importer.size != size {
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    pub fn select(&mut self, id: i64) -> bool {
        match self.directory.iter().find(|i| i.id == id) {
            Some(importer) => {
                self.selected = Some(importer.clone());
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn email_templates() -> [EmailTemplate; 2] {
        [
            EmailTemplate {
                name: "Initial Outreach",
                subject: "Export Partnership Opportunity: High-Quality [Your Product]",
                body: "Dear [Importer Contact Name],\n\nMy name is [Your Name] from [Your \
                       Company]. We are a leading manufacturer of high-quality [Your Product] \
                       in [Your Country] and came across your company as a prominent importer \
                       in [Importer Country].\n\nWe would be delighted to explore a potential \
                       partnership. Would you be available for a brief call next week?\n\nBest \
                       regards,\n[Your Name]",
            },
            EmailTemplate {
                name: "Follow-up",
                subject: "Following up on [Your Product] Export Opportunity",
                body: "Dear [Importer Contact Name],\n\nI hope this email finds you well. I am \
                       writing to follow up on my previous email regarding a potential \
                       partnership for our [Your Product].\n\nWe are confident our products \
                       would be a great addition to your portfolio. Please let me know if you \
                       have any questions.\n\nBest regards,\n[Your Name]",
            },
        ]
    }
}

impl Default for ImportersController {
    fn default() -> Self {
        Self::new()
    }
}

fn directory() -> Vec<DirectoryImporter> {
    let rows = [
        (1, "Global Imports Inc.", "USA", "Textiles", CompanySize::Large, "John Doe", "j.doe@globalimports.com"),
        (2, "EuroTrade GmbH", "Germany", "Auto Parts", CompanySize::Medium, "Helga Schmidt", "h.schmidt@eurotrade.de"),
        (3, "Emirates Traders", "UAE", "Spices", CompanySize::Medium, "Ali Hassan", "ali.h@emirates.ae"),
        (4, "Britannia Goods", "UK", "Tea", CompanySize::Small, "Emily Clark", "e.clark@britgoods.co.uk"),
        (5, "Tokyo Trading Co.", "Japan", "Electronics", CompanySize::Large, "Kenji Tanaka", "tanaka@tokyotrading.jp"),
        (6, "American Food Dist.", "USA", "Spices", CompanySize::Medium, "Maria Garcia", "m.garcia@afd.com"),
    ];

    rows.into_iter()
        .map(
            |(id, name, country, product_type, size, contact, email)| DirectoryImporter {
                id,
                name: name.to_string(),
                country: country.to_string(),
                product_type: product_type.to_string(),
                size,
                contact: contact.to_string(),
                email: email.to_string(),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_compose() {
        let mut controller = ImportersController::new();
        assert_eq!(controller.filtered().len(), 6);

        controller.filters.country = Some("USA".to_string());
        assert_eq!(controller.filtered().len(), 2);

        controller.filters.size = Some(CompanySize::Medium);
        let matches = controller.filtered();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "American Food Dist.");

        controller.filters.query = Some("global".to_string());
        assert!(controller.filtered().is_empty());
    }

    #[test]
    fn select_and_close_drive_the_detail_view() {
        let mut controller = ImportersController::new();
        assert!(controller.select(4));
        assert_eq!(controller.selected.as_ref().unwrap().name, "Britannia Goods");

        controller.close();
        assert!(controller.selected.is_none());

        assert!(!controller.select(99));
    }

    #[test]
    fn both_outreach_templates_are_available() {
        let templates = ImportersController::email_templates();
        assert_eq!(templates[0].name, "Initial Outreach");
        assert!(templates[1].body.contains("follow up"));
    }
}
