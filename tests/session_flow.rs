//! End-to-end session behavior over the mock backend: login, analysis,
//! theme persistence and the logout reset.

use exporizz::api::AiService;
use exporizz::app::{App, AppEvent, Page};
use exporizz::config::{Config, Theme};
use exporizz::pages::dashboard::DashboardController;
use exporizz::types::Product;
use pretty_assertions::assert_eq;

#[tokio::test(start_paused = true)]
async fn a_full_session_walkthrough() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    let mut app = App::with_persistence(Config::default(), config_path.clone());
    let service = AiService::mock();

    // Landing: protected pages bounce to login.
    app.dispatch(AppEvent::Navigate(Page::Importers)).unwrap();
    assert_eq!(app.page, Page::Login);

    app.dispatch(AppEvent::LogIn).unwrap();
    assert_eq!(app.page, Page::Dashboard);

    // Analyze a custom product.
    app.dispatch(AppEvent::SetProduct("Darjeeling Tea".into())).unwrap();
    let mut dashboard = DashboardController::new();
    dashboard.load(&service, &app.product.name).await;
    let data = dashboard.state.as_loaded().unwrap();
    assert!(data.importers.iter().all(|i| i.product == "Darjeeling Tea"));

    // Toggle the theme twice: back where we started, file tracks each flip.
    app.dispatch(AppEvent::ToggleTheme).unwrap();
    assert_eq!(Config::load_from_file(&config_path).unwrap().theme, Theme::Dark);
    app.dispatch(AppEvent::ToggleTheme).unwrap();
    assert_eq!(Config::load_from_file(&config_path).unwrap().theme, Theme::Light);
    assert_eq!(app.theme(), Theme::Light);

    // Logout: back to the public landing page with the default product.
    app.dispatch(AppEvent::LogOut).unwrap();
    assert_eq!(app.page, Page::Home);
    assert_eq!(app.product, Product::default());
    app.dispatch(AppEvent::Navigate(Page::Dashboard)).unwrap();
    assert_eq!(app.page, Page::Login);
}

#[tokio::test]
async fn empty_product_never_leaves_the_dashboard_loading() {
    let service = AiService::mock();
    let mut dashboard = DashboardController::new();

    dashboard.load(&service, "").await;
    assert!(!dashboard.state.is_loading());
    assert_eq!(
        dashboard.state.failure(),
        Some("Enter a product name to analyze.")
    );
}
