use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use exporizz::api::AiService;
use exporizz::app::App;
use exporizz::config::{self, Config};
use exporizz::pages::dashboard::DashboardController;
use exporizz::pages::documents::{DocumentsController, REJECTED_TIP};
use exporizz::pages::hs_code::HsCodeController;
use exporizz::pages::importers::ImportersController;
use exporizz::pages::packaging::PackagingController;
use exporizz::pages::pricing::PricingController;
use exporizz::pages::ViewState;
use exporizz::shell::Shell;
use exporizz::types::{CompanySize, Product};
use exporizz::ui::OutputHandler;

#[derive(Parser)]
#[command(name = "exporizz")]
#[command(about = "AI-powered export assistance: HS codes, market intelligence, logistics and packaging checks", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full export dashboard for a product
    Dashboard {
        #[arg(long)]
        product: Option<String>,
        /// Also write a plain-text report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Suggest HS codes for a product description
    HsCode {
        description: Vec<String>,
    },
    /// AI pricing insights for a target market
    Pricing {
        #[arg(long)]
        product: Option<String>,
        #[arg(long, default_value = "USA")]
        market: String,
    },
    /// Estimate shipping cost between two places
    Logistics {
        #[arg(long)]
        product: Option<String>,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        weight_kg: u32,
    },
    /// Compute and analyze a profit margin
    Margin {
        selling_price: f64,
        cost_of_goods: f64,
        #[arg(long)]
        product: Option<String>,
        #[arg(long, default_value = "USA")]
        market: String,
    },
    /// Analyze a packaging photo for export compliance issues
    Packaging {
        image: PathBuf,
    },
    /// Show the export document checklist
    Documents {
        #[arg(long, default_value = "USA")]
        country: String,
        /// Write the checklist to this file instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Browse the importer directory
    Importers {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        size: Option<String>,
    },
    /// One-off question to the Exporizz assistant
    Chat {
        message: Vec<String>,
    },
    /// Show or set the color theme (light|dark)
    Theme {
        value: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "exporizz=debug" } else { "exporizz=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let config = Config::load_or_default();
    let service = AiService::from_config(&config.ai);
    let out = OutputHandler::new(config.theme);

    match cli.command {
        None => {
            let app = App::with_persistence(config, Config::config_path());
            Shell::new(app, service).run().await
        }
        Some(command) => run_command(command, config, service, out).await,
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    service: AiService,
    out: OutputHandler,
) -> Result<()> {
    match command {
        Commands::Dashboard { product, report } => {
            let product = product.unwrap_or_else(|| Product::default().name);
            let mut controller = DashboardController::new();
            controller.load(&service, &product).await;
            match &controller.state {
                ViewState::Loaded(data) => {
                    out.print_dashboard(&product, data);
                    if let Some(path) = report {
                        controller.write_report(&product, &path)?;
                        out.print_info(&format!("Report written to {}.", path.display()));
                    }
                }
                ViewState::Failed(message) => out.print_error(message),
                _ => {}
            }
        }
        Commands::HsCode { description } => {
            let description = description.join(" ");
            let mut controller = HsCodeController::new();
            controller.find(&service, &description).await;
            match &controller.state {
                ViewState::Loaded(suggestions) => out.print_hs_suggestions(suggestions),
                ViewState::Failed(message) => out.print_error(message),
                _ => {}
            }
        }
        Commands::Pricing { product, market } => {
            let product = product.unwrap_or_else(|| Product::default().name);
            let mut controller = PricingController::new();
            controller.load(&service, &product, &market).await;
            out.print_price_chart(&controller.chart);
            println!();
            if let Some(insights) = controller.insights.as_loaded() {
                out.print_insights(insights);
            }
        }
        Commands::Logistics {
            product,
            from,
            to,
            weight_kg,
        } => {
            let product = product.unwrap_or_else(|| Product::default().name);
            let mut controller = DashboardController::new();
            controller
                .estimate_cost(&service, &product, &from, &to, weight_kg)
                .await;
            match &controller.estimate {
                ViewState::Loaded(estimate) => out.print_estimate(estimate),
                ViewState::Failed(message) => out.print_error(message),
                _ => {}
            }
        }
        Commands::Margin {
            selling_price,
            cost_of_goods,
            product,
            market,
        } => {
            let product = product.unwrap_or_else(|| Product::default().name);
            let mut controller = PricingController::new();
            controller
                .calculate_margin(&service, &product, &market, selling_price, cost_of_goods)
                .await;
            if let Some(margin) = controller.margin_pct {
                println!("Profit Margin: {margin:.1}%");
            }
            if let Some(analysis) = &controller.margin_analysis {
                println!("{analysis}");
            }
        }
        Commands::Packaging { image } => {
            let mut controller = PackagingController::new();
            if let Err(message) = controller.attach(&image) {
                out.print_error(&message);
                return Ok(());
            }
            controller.analyze(&service).await;
            match &controller.state {
                ViewState::Loaded(issues) => out.print_packaging_report(issues),
                ViewState::Failed(message) => out.print_error(message),
                _ => {}
            }
        }
        Commands::Documents { country, output } => {
            let mut controller = DocumentsController::new();
            if !controller.set_country(&country) {
                out.print_error("Supported destinations: USA, Germany, UAE, United Kingdom.");
                return Ok(());
            }
            match output {
                Some(path) => {
                    controller.write_checklist(&path)?;
                    out.print_info(&format!("Checklist written to {}.", path.display()));
                }
                None => out.print_documents(
                    &controller.country,
                    &controller.documents,
                    REJECTED_TIP,
                ),
            }
        }
        Commands::Importers {
            search,
            country,
            size,
        } => {
            let mut controller = ImportersController::new();
            controller.filters.query = search;
            controller.filters.country = country;
            controller.filters.size = size.and_then(|s| match s.to_lowercase().as_str() {
                "small" => Some(CompanySize::Small),
                "medium" => Some(CompanySize::Medium),
                "large" => Some(CompanySize::Large),
                _ => None,
            });
            out.print_importer_table(&controller.filtered());
        }
        Commands::Chat { message } => {
            let message = message.join(" ");
            match service.assistant_reply(&message, &[]).await {
                Ok(reply) => out.print_assistant_message(&reply),
                Err(err) => {
                    tracing::error!(%err, "assistant request failed");
                    out.print_error("Sorry, I am having trouble connecting right now.");
                }
            }
        }
        Commands::Theme { value } => {
            let mut config = config;
            match value.as_deref() {
                None => println!("Theme: {}", config.theme),
                Some("light") => {
                    config.theme = config::Theme::Light;
                    config.save_to_file(Config::config_path())?;
                    println!("Theme: light");
                }
                Some("dark") => {
                    config.theme = config::Theme::Dark;
                    config.save_to_file(Config::config_path())?;
                    println!("Theme: dark");
                }
                Some(other) => out.print_error(&format!("Unknown theme `{other}`; use light or dark.")),
            }
        }
    }

    Ok(())
}
