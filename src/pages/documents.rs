//! Document checklist: the six standard export documents with their review
//! status, per-destination selection, uploads and a downloadable summary.

use std::fmt::Write as _;
use std::path::Path;

use crate::types::{DocumentItem, DocumentStatus};

pub const COUNTRIES: [&str; 4] = ["USA", "Germany", "UAE", "United Kingdom"];

/// Shown next to rejected items.
pub const REJECTED_TIP: &str =
    "The provided document was blurry. Please re-upload a clear, high-resolution scan.";

pub struct DocumentsController {
    pub country: String,
    pub documents: Vec<DocumentItem>,
}

impl DocumentsController {
    pub fn new() -> Self {
        Self {
            country: COUNTRIES[0].to_string(),
            documents: initial_documents(),
        }
    }

    pub fn set_country(&mut self, country: &str) -> bool {
        match COUNTRIES
            .iter()
            .find(|c| c.eq_ignore_ascii_case(country.trim()))
        {
            Some(known) => {
                self.country = (*known).to_string();
                true
            }
            None => false,
        }
    }

    /// Marks a document as uploaded; it goes back to Pending review.
    /// Returns false when no document matches.
    pub fn mark_uploaded(&mut self, document_name: &str) -> bool {
        let wanted = document_name.trim();
        match self
            .documents
            .iter_mut()
            .find(|doc| doc.name.eq_ignore_ascii_case(wanted))
        {
            Some(doc) => {
                doc.status = DocumentStatus::Pending;
                true
            }
            None => false,
        }
    }

    pub fn ready_percentage(&self) -> f64 {
        if self.documents.is_empty() {
            return 0.0;
        }
        let ready = self
            .documents
            .iter()
            .filter(|doc| doc.status == DocumentStatus::Ready)
            .count();
        ready as f64 / self.documents.len() as f64 * 100.0
    }

    pub fn checklist_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "Export Document Checklist for {}", self.country);
        for doc in &self.documents {
            let _ = writeln!(text);
            let _ = writeln!(text, "[{}] {}: {}", doc.status, doc.name, doc.description);
        }
        text
    }

    pub fn write_checklist(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.checklist_text())
    }
}

impl Default for DocumentsController {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_documents() -> Vec<DocumentItem> {
    let items = [
        (
            "Commercial Invoice",
            "A legal document between the supplier and the customer.",
            DocumentStatus::Ready,
        ),
        (
            "Bill of Lading",
            "A detailed list of a shipment of goods in the form of a receipt.",
            DocumentStatus::Ready,
        ),
        (
            "Packing List",
            "An itemized list of articles in a container or package.",
            DocumentStatus::Pending,
        ),
        (
            "Certificate of Origin",
            "Certifies that goods in a particular export shipment are wholly obtained.",
            DocumentStatus::Ready,
        ),
        (
            "Export License",
            "A government document that authorizes the export of specific goods.",
            DocumentStatus::Rejected,
        ),
        (
            "Insurance Certificate",
            "Proves that insurance coverage has been arranged for the shipment.",
            DocumentStatus::Pending,
        ),
    ];

    items
        .into_iter()
        .map(|(name, description, status)| DocumentItem {
            name: name.to_string(),
            description: description.to_string(),
            status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_moves_document_to_pending() {
        let mut controller = DocumentsController::new();
        assert!(controller.mark_uploaded("export license"));

        let doc = controller
            .documents
            .iter()
            .find(|d| d.name == "Export License")
            .unwrap();
        assert_eq!(doc.status, DocumentStatus::Pending);

        assert!(!controller.mark_uploaded("Letter of Credit"));
    }

    #[test]
    fn unknown_country_is_refused() {
        let mut controller = DocumentsController::new();
        assert!(controller.set_country("germany"));
        assert_eq!(controller.country, "Germany");
        assert!(!controller.set_country("Atlantis"));
        assert_eq!(controller.country, "Germany");
    }

    #[test]
    fn checklist_text_lists_every_document_with_status() {
        let controller = DocumentsController::new();
        let text = controller.checklist_text();
        assert!(text.starts_with("Export Document Checklist for USA"));
        assert!(text.contains("[Ready] Commercial Invoice"));
        assert!(text.contains("[Rejected] Export License"));
        assert_eq!(text.matches('[').count(), 6);
    }

    #[test]
    fn readiness_tracks_ready_documents() {
        let controller = DocumentsController::new();
        assert!((controller.ready_percentage() - 50.0).abs() < f64::EPSILON);
    }
}
