//! Session state and its event dispatch.
//!
//! All process-wide state (active page, login flag, current product, theme)
//! lives in one [`App`] struct and changes only through [`AppEvent`]s, so
//! every mutation path is explicit and testable.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::{Config, Theme};
use crate::types::Product;

/// The closed set of screens. Anything not public requires login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    CreateAccount,
    Dashboard,
    HsCodeFinder,
    Pricing,
    Documents,
    Importers,
    PackagingAnalyzer,
}

impl Page {
    pub fn is_public(self) -> bool {
        matches!(self, Page::Home | Page::Login | Page::CreateAccount)
    }

    pub const ALL: [Page; 9] = [
        Page::Home,
        Page::Login,
        Page::CreateAccount,
        Page::Dashboard,
        Page::HsCodeFinder,
        Page::Pricing,
        Page::Documents,
        Page::Importers,
        Page::PackagingAnalyzer,
    ];

    /// Command-line name of the page.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Login => "login",
            Page::CreateAccount => "signup",
            Page::Dashboard => "dashboard",
            Page::HsCodeFinder => "hs-codes",
            Page::Pricing => "pricing",
            Page::Documents => "documents",
            Page::Importers => "importers",
            Page::PackagingAnalyzer => "packaging",
        }
    }

    pub fn parse(input: &str) -> Option<Page> {
        let wanted = input.trim().to_lowercase();
        Page::ALL.into_iter().find(|page| page.slug() == wanted)
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Login => "Login",
            Page::CreateAccount => "Create Account",
            Page::Dashboard => "Dashboard",
            Page::HsCodeFinder => "HS Code Finder",
            Page::Pricing => "Pricing Insights",
            Page::Documents => "Document Checklist",
            Page::Importers => "Importers List",
            Page::PackagingAnalyzer => "Packaging Analyzer",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Navigate(Page),
    LogIn,
    LogOut,
    SetProduct(String),
    ToggleTheme,
}

pub struct App {
    pub config: Config,
    pub page: Page,
    pub logged_in: bool,
    pub product: Product,
    /// Where theme changes are persisted; `None` keeps state in memory only.
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            page: Page::Home,
            logged_in: false,
            product: Product::default(),
            config_path: None,
        }
    }

    pub fn with_persistence(config: Config, config_path: PathBuf) -> Self {
        let mut app = Self::new(config);
        app.config_path = Some(config_path);
        app
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    /// Where a navigation request actually lands: protected pages redirect
    /// to Login while logged out, and Home is the dashboard once logged in.
    pub fn resolve(&self, requested: Page) -> Page {
        if !self.logged_in {
            if requested.is_public() {
                requested
            } else {
                Page::Login
            }
        } else if requested == Page::Home {
            Page::Dashboard
        } else {
            requested
        }
    }

    pub fn dispatch(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Navigate(requested) => {
                self.page = self.resolve(requested);
            }
            AppEvent::LogIn => {
                self.logged_in = true;
                self.page = Page::Dashboard;
            }
            AppEvent::LogOut => {
                self.logged_in = false;
                self.product = Product::default();
                self.page = Page::Home;
            }
            AppEvent::SetProduct(name) => {
                let name = name.trim();
                if !name.is_empty() {
                    self.product = Product {
                        name: name.to_string(),
                    };
                }
            }
            AppEvent::ToggleTheme => {
                self.config.theme = self.config.theme.toggled();
                if let Some(path) = &self.config_path {
                    self.config.save_to_file(path)?;
                }
            }
        }
        Ok(())
    }
}
