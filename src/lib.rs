// Library exports for Exporizz components

pub mod api;
pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod mock;
pub mod pages;
pub mod shell;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use api::{AiService, GeminiClient};
pub use app::{App, AppEvent, Page};
pub use config::{Config, Theme};
pub use error::{ApiError, ApiResult};
pub use mock::MockService;
pub use pages::ViewState;
pub use ui::OutputHandler;
