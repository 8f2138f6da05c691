//! Packaging analyzer: attach an image of product packaging, ship it to the
//! model inline as base64, and render the compliance findings.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::ImageFormat;
use tracing::error;

use crate::api::AiService;
use crate::pages::ViewState;
use crate::types::PackagingIssue;

const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

pub const NO_IMAGE: &str = "Please upload an image first.";
pub const NOT_AN_IMAGE: &str =
    "That file doesn't look like an image. Upload a PNG, JPG, WEBP or GIF of your packaging.";
pub const TOO_LARGE: &str = "Image is larger than 10MB. Upload a smaller photo.";
pub const ANALYSIS_FAILED: &str =
    "Failed to analyze the packaging. The AI model might be busy. Please try again.";

#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub base64_data: String,
}

pub struct PackagingController {
    pub attachment: Option<Attachment>,
    pub state: ViewState<Vec<PackagingIssue>>,
}

impl PackagingController {
    pub fn new() -> Self {
        Self {
            attachment: None,
            state: ViewState::Idle,
        }
    }

    /// Reads the file into memory and keeps it as a base64 payload. The
    /// bytes must sniff as a supported image format; anything else is
    /// rejected with a user-facing message, never a crash.
    pub fn attach(&mut self, path: &Path) -> Result<(), String> {
        self.state = ViewState::Idle;
        self.attachment = None;

        let metadata =
            std::fs::metadata(path).map_err(|e| format!("Could not read the file: {e}"))?;
        if metadata.len() > MAX_IMAGE_BYTES {
            return Err(TOO_LARGE.to_string());
        }

        let bytes = std::fs::read(path).map_err(|e| format!("Could not read the file: {e}"))?;
        let format = image::guess_format(&bytes).map_err(|_| NOT_AN_IMAGE.to_string())?;
        let mime_type = match format {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
            _ => return Err(NOT_AN_IMAGE.to_string()),
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "packaging".to_string());

        self.attachment = Some(Attachment {
            file_name,
            mime_type: mime_type.to_string(),
            base64_data: BASE64.encode(&bytes),
        });
        Ok(())
    }

    pub async fn analyze(&mut self, service: &AiService) {
        let Some(attachment) = self.attachment.clone() else {
            self.state = ViewState::Failed(NO_IMAGE.to_string());
            return;
        };

        self.state = ViewState::Loading;
        match service
            .analyze_packaging(&attachment.base64_data, &attachment.mime_type)
            .await
        {
            Ok(issues) => self.state = ViewState::Loaded(issues),
            Err(err) => {
                error!(%err, "packaging analysis failed");
                self.state = ViewState::Failed(ANALYSIS_FAILED.to_string());
            }
        }
    }
}

impl Default for PackagingController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Smallest valid PNG header; enough for format sniffing.
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

    #[test]
    fn non_image_file_is_rejected_with_a_message() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "definitely not pixels").unwrap();

        let mut controller = PackagingController::new();
        let err = controller.attach(file.path()).unwrap_err();
        assert_eq!(err, NOT_AN_IMAGE);
        assert!(controller.attachment.is_none());
    }

    #[test]
    fn png_bytes_are_accepted_and_encoded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PNG_MAGIC).unwrap();

        let mut controller = PackagingController::new();
        controller.attach(file.path()).unwrap();
        let attachment = controller.attachment.as_ref().unwrap();
        assert_eq!(attachment.mime_type, "image/png");
        assert!(!attachment.base64_data.is_empty());
    }

    #[tokio::test]
    async fn analyze_without_attachment_fails_cleanly() {
        let service = AiService::mock();
        let mut controller = PackagingController::new();

        controller.analyze(&service).await;
        assert_eq!(controller.state.failure(), Some(NO_IMAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn mock_analysis_returns_findings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PNG_MAGIC).unwrap();

        let service = AiService::mock();
        let mut controller = PackagingController::new();
        controller.attach(file.path()).unwrap();
        controller.analyze(&service).await;

        let issues = controller.state.as_loaded().unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].finding, "Low Contrast Labeling");
    }
}
