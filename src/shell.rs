//! Interactive terminal shell: navigation over the closed page set, the
//! login gate, theme toggling and the ever-available assistant chat.

use anyhow::Result;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

use crate::api::AiService;
use crate::app::{App, AppEvent, Page};
use crate::chat::{conversation_turns, ChatMessage, MessageType};
use crate::pages::dashboard::DashboardController;
use crate::pages::documents::{DocumentsController, REJECTED_TIP};
use crate::pages::hs_code::HsCodeController;
use crate::pages::importers::ImportersController;
use crate::pages::packaging::PackagingController;
use crate::pages::pricing::{PricingController, DEFAULT_MARKET};
use crate::pages::ViewState;
use crate::types::CompanySize;
use crate::ui::{spinner, OutputHandler};

pub struct Shell {
    app: App,
    service: AiService,
    out: OutputHandler,
    chat_history: Vec<ChatMessage>,
    dashboard: DashboardController,
    hs_code: HsCodeController,
    pricing: PricingController,
    packaging: PackagingController,
    documents: DocumentsController,
    importers: ImportersController,
}

enum Flow {
    Continue,
    Quit,
}

impl Shell {
    pub fn new(app: App, service: AiService) -> Self {
        let out = OutputHandler::new(app.theme());
        Self {
            app,
            service,
            out,
            chat_history: Vec::new(),
            dashboard: DashboardController::new(),
            hs_code: HsCodeController::new(),
            pricing: PricingController::new(),
            packaging: PackagingController::new(),
            documents: DocumentsController::new(),
            importers: ImportersController::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.out.print_banner(self.service.is_mock());
        self.out
            .print_info("Type `help` for commands, `login` to get started.");

        let mut line_editor = Reedline::create();

        loop {
            let prompt = DefaultPrompt::new(
                DefaultPromptSegment::Basic(format!("exporizz:{}", self.app.page.slug())),
                DefaultPromptSegment::Empty,
            );

            match line_editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    match self.handle_line(&line).await {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => {}
                        Err(err) => self.out.print_error(&err.to_string()),
                    }
                }
                Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => break,
                Err(err) => {
                    self.out.print_error(&format!("input error: {err}"));
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let (command, args) = split_command(line);

        match command {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => self.print_help(),
            "pages" => {
                for page in Page::ALL {
                    println!("  {:<12} {}", page.slug(), page.title());
                }
            }
            "open" => self.open_page(args).await,
            "login" => {
                self.app.dispatch(AppEvent::LogIn)?;
                self.out.print_info("Logged in.");
                self.enter_page().await;
            }
            "logout" => {
                self.app.dispatch(AppEvent::LogOut)?;
                self.out
                    .print_info("Logged out. Product reset to the default.");
            }
            "product" => {
                if args.is_empty() {
                    println!("Current product: {}", self.app.product.name);
                } else {
                    self.app.dispatch(AppEvent::SetProduct(args.to_string()))?;
                    self.out
                        .print_info(&format!("Product set to {}.", self.app.product.name));
                }
            }
            "theme" => {
                self.app.dispatch(AppEvent::ToggleTheme)?;
                self.out.set_theme(self.app.theme());
                self.out
                    .print_info(&format!("Theme switched to {}.", self.app.theme()));
            }
            "ask" => self.ask_assistant(args).await,
            _ => self.handle_page_command(command, args).await,
        }

        Ok(Flow::Continue)
    }

    async fn open_page(&mut self, args: &str) {
        let Some(requested) = Page::parse(args) else {
            self.out
                .print_error("Unknown page. `pages` lists everything.");
            return;
        };

        let landed = self.app.resolve(requested);
        if landed == Page::Login && requested != Page::Login {
            self.out.print_info("Please `login` to access that page.");
        }
        let _ = self.app.dispatch(AppEvent::Navigate(requested));
        self.enter_page().await;
    }

    /// Work a page kicks off when it becomes active, mirroring an on-mount
    /// fetch.
    async fn enter_page(&mut self) {
        match self.app.page {
            Page::Dashboard => {
                let product = self.app.product.name.clone();
                let spin = spinner::start("Analyzing export opportunities...");
                self.dashboard.load(&self.service, &product).await;
                spinner::finish(spin);
                self.render_dashboard();
            }
            Page::Pricing => {
                let product = self.app.product.name.clone();
                let spin = spinner::start("Fetching pricing insights...");
                self.pricing
                    .load(&self.service, &product, DEFAULT_MARKET)
                    .await;
                spinner::finish(spin);
                self.render_pricing();
            }
            Page::Documents => {
                self.out.print_documents(
                    &self.documents.country,
                    &self.documents.documents,
                    REJECTED_TIP,
                );
            }
            Page::Importers => {
                self.out.print_page_header("Importers List");
                self.out.print_importer_table(&self.importers.filtered());
            }
            Page::HsCodeFinder => {
                self.out.print_page_header("HS Code Finder");
                self.out
                    .print_info("Describe your product with `find <description>`.");
            }
            Page::PackagingAnalyzer => {
                self.out.print_page_header("AI Packaging Analyzer");
                self.out
                    .print_info("`upload <image path>` then `analyze` to check your packaging.");
            }
            Page::Home => {
                self.out
                    .print_info("Exporizz helps you take any product global. `login` to begin.");
            }
            Page::Login => {
                self.out.print_info("Use `login` to sign in.");
            }
            Page::CreateAccount => {
                self.out
                    .print_info("Account creation is not wired up; `login` works directly.");
            }
        }
    }

    async fn handle_page_command(&mut self, command: &str, args: &str) {
        match (self.app.page, command) {
            (Page::Dashboard, "analyze") => {
                if !args.is_empty() {
                    let _ = self.app.dispatch(AppEvent::SetProduct(args.to_string()));
                }
                self.enter_page().await;
            }
            (Page::Dashboard, "importer") => {
                let Some(importer) = args
                    .parse::<i64>()
                    .ok()
                    .and_then(|id| self.dashboard.importer_by_id(id))
                else {
                    self.out
                        .print_error("Unknown importer id. The dashboard table lists them.");
                    return;
                };
                let spin = spinner::start("Fetching importer profile...");
                self.dashboard.open_importer(&self.service, importer).await;
                spinner::finish(spin);
                match &self.dashboard.importer_details {
                    ViewState::Loaded(details) => self.out.print_importer_details(details),
                    ViewState::Failed(message) => self.out.print_error(message),
                    _ => {}
                }
            }
            (Page::Dashboard, "close") => {
                self.dashboard.close_importer();
                self.out.print_info("Detail view closed.");
            }
            (Page::Dashboard, "estimate") => {
                let Some((weight_kg, from, to)) = parse_estimate(args) else {
                    self.out
                        .print_error("Usage: estimate <kg> <from> -> <to>");
                    return;
                };
                let product = self.app.product.name.clone();
                let spin = spinner::start("Estimating logistics cost...");
                self.dashboard
                    .estimate_cost(&self.service, &product, &from, &to, weight_kg)
                    .await;
                spinner::finish(spin);
                match &self.dashboard.estimate {
                    ViewState::Loaded(estimate) => self.out.print_estimate(estimate),
                    ViewState::Failed(message) => self.out.print_error(message),
                    _ => {}
                }
            }
            (Page::Dashboard, "report") => {
                let path = if args.is_empty() {
                    "export-analysis.txt"
                } else {
                    args
                };
                match self
                    .dashboard
                    .write_report(&self.app.product.name, std::path::Path::new(path))
                {
                    Ok(true) => self.out.print_info(&format!("Report written to {path}.")),
                    Ok(false) => self
                        .out
                        .print_error("Nothing to report yet. Run `analyze` first."),
                    Err(err) => self.out.print_error(&format!("Could not write report: {err}")),
                }
            }
            (Page::HsCodeFinder, "find") => {
                let spin = spinner::start("Matching HS codes...");
                self.hs_code.find(&self.service, args).await;
                spinner::finish(spin);
                match &self.hs_code.state {
                    ViewState::Loaded(suggestions) => self.out.print_hs_suggestions(suggestions),
                    ViewState::Failed(message) => self.out.print_error(message),
                    _ => {}
                }
            }
            (Page::Pricing, "insights") => {
                let market = if args.is_empty() { DEFAULT_MARKET } else { args };
                let product = self.app.product.name.clone();
                let market = market.to_string();
                let spin = spinner::start("Fetching pricing insights...");
                self.pricing.load(&self.service, &product, &market).await;
                spinner::finish(spin);
                self.render_pricing();
            }
            (Page::Pricing, "margin") => {
                let mut parts = args.split_whitespace();
                let (Some(selling), Some(cost)) = (
                    parts.next().and_then(|v| v.parse::<f64>().ok()),
                    parts.next().and_then(|v| v.parse::<f64>().ok()),
                ) else {
                    self.out
                        .print_error("Usage: margin <selling price> <cost of goods>");
                    return;
                };
                let product = self.app.product.name.clone();
                let spin = spinner::start("Analyzing margin...");
                self.pricing
                    .calculate_margin(&self.service, &product, DEFAULT_MARKET, selling, cost)
                    .await;
                spinner::finish(spin);
                if let Some(margin) = self.pricing.margin_pct {
                    println!("Profit Margin: {margin:.1}%");
                }
                if let Some(analysis) = &self.pricing.margin_analysis {
                    println!("{analysis}");
                }
            }
            (Page::Pricing, "ship") => {
                let Some((weight_kg, to)) = parse_ship(args) else {
                    self.out.print_error("Usage: ship <kg> <destination>");
                    return;
                };
                let product = self.app.product.name.clone();
                let spin = spinner::start("Estimating shipping...");
                self.pricing
                    .estimate_shipping(&self.service, &product, &to, weight_kg)
                    .await;
                spinner::finish(spin);
                match &self.pricing.estimate {
                    ViewState::Loaded(estimate) => self.out.print_estimate(estimate),
                    ViewState::Failed(message) => self.out.print_error(message),
                    _ => {}
                }
            }
            (Page::PackagingAnalyzer, "upload") => {
                match self.packaging.attach(std::path::Path::new(args)) {
                    Ok(()) => {
                        let name = self
                            .packaging
                            .attachment
                            .as_ref()
                            .map(|a| a.file_name.clone())
                            .unwrap_or_default();
                        self.out
                            .print_info(&format!("Attached {name}. Run `analyze` next."));
                    }
                    Err(message) => self.out.print_error(&message),
                }
            }
            (Page::PackagingAnalyzer, "analyze") => {
                let spin = spinner::start("Inspecting packaging...");
                self.packaging.analyze(&self.service).await;
                spinner::finish(spin);
                match &self.packaging.state {
                    ViewState::Loaded(issues) => self.out.print_packaging_report(issues),
                    ViewState::Failed(message) => self.out.print_error(message),
                    _ => {}
                }
            }
            (Page::Documents, "country") => {
                if self.documents.set_country(args) {
                    self.enter_page().await;
                } else {
                    self.out
                        .print_error("Supported destinations: USA, Germany, UAE, United Kingdom.");
                }
            }
            (Page::Documents, "upload") => {
                if self.documents.mark_uploaded(args) {
                    self.out
                        .print_info(&format!("{args} uploaded; back to pending review."));
                } else {
                    self.out.print_error("No document by that name.");
                }
            }
            (Page::Documents, "download") => {
                let path = if args.is_empty() {
                    format!("export-checklist-{}.txt", self.documents.country)
                } else {
                    args.to_string()
                };
                match self.documents.write_checklist(std::path::Path::new(&path)) {
                    Ok(()) => self.out.print_info(&format!("Checklist written to {path}.")),
                    Err(err) => self
                        .out
                        .print_error(&format!("Could not write checklist: {err}")),
                }
            }
            (Page::Importers, "filter") => {
                self.apply_importer_filter(args);
                self.out.print_importer_table(&self.importers.filtered());
            }
            (Page::Importers, "show") => {
                if args.parse::<i64>().ok().map(|id| self.importers.select(id)) == Some(true) {
                    if let Some(selected) = &self.importers.selected {
                        self.out.print_directory_details(selected);
                    }
                } else {
                    self.out.print_error("Unknown importer id.");
                }
            }
            (Page::Importers, "close") => {
                self.importers.close();
                self.out.print_info("Detail view closed.");
            }
            (Page::Importers, "templates") => {
                for template in ImportersController::email_templates() {
                    println!("\n{}\nSubject: {}\n\n{}", template.name, template.subject, template.body);
                }
            }
            _ => {
                self.out
                    .print_error("Unknown command here. `help` lists what works on this page.");
            }
        }
    }

    fn apply_importer_filter(&mut self, args: &str) {
        let (kind, value) = split_command(args);
        match kind {
            "name" => self.importers.filters.query = non_empty(value),
            "country" => self.importers.filters.country = non_empty(value),
            "size" => {
                self.importers.filters.size = match value.to_lowercase().as_str() {
                    "small" => Some(CompanySize::Small),
                    "medium" => Some(CompanySize::Medium),
                    "large" => Some(CompanySize::Large),
                    _ => None,
                }
            }
            "clear" => self.importers.filters = Default::default(),
            _ => self
                .out
                .print_error("Usage: filter name <q> | country <c> | size <s> | clear"),
        }
    }

    /// The floating assistant: available from every page, keeps its own
    /// conversation history.
    async fn ask_assistant(&mut self, message: &str) {
        let message = message.trim();
        if message.is_empty() {
            self.out.print_error("Ask something, e.g. `ask How do I find an importer?`");
            return;
        }

        self.out.print_user_message(message);
        let history = conversation_turns(&self.chat_history);
        self.chat_history
            .push(ChatMessage::new(MessageType::User, message.to_string()));

        let spin = spinner::start("Thinking...");
        let result = self.service.assistant_reply(message, &history).await;
        spinner::finish(spin);

        match result {
            Ok(reply) => {
                self.out.print_assistant_message(&reply);
                self.chat_history
                    .push(ChatMessage::new(MessageType::Assistant, reply));
            }
            Err(err) => {
                tracing::error!(%err, "assistant request failed");
                let message = "Sorry, I am having trouble connecting right now.";
                self.out.print_error(message);
                self.chat_history
                    .push(ChatMessage::new(MessageType::Error, message.to_string()));
            }
        }
    }

    fn render_dashboard(&self) {
        match &self.dashboard.state {
            ViewState::Loaded(data) => self.out.print_dashboard(&self.app.product.name, data),
            ViewState::Failed(message) => self.out.print_error(message),
            _ => {}
        }
    }

    fn render_pricing(&self) {
        self.out
            .print_page_header(&format!("Pricing Insights — {}", self.app.product.name));
        self.out.print_price_chart(&self.pricing.chart);
        println!();
        if let Some(insights) = self.pricing.insights.as_loaded() {
            self.out.print_insights(insights);
        }
        self.out.print_info(
            "`margin <selling> <cost>`, `ship <kg> <destination>`, `insights [market]`.",
        );
    }

    fn print_help(&self) {
        println!("Global commands:");
        println!("  open <page>       Navigate (see `pages`)");
        println!("  login / logout    Toggle the session");
        println!("  product [name]    Show or set the analyzed product");
        println!("  theme             Toggle light/dark");
        println!("  ask <message>     Chat with the Exporizz assistant");
        println!("  quit              Leave");
        println!();
        println!("Page commands:");
        println!("  dashboard:  analyze [product], importer <id>, close, estimate <kg> <from> -> <to>, report [file]");
        println!("  hs-codes:   find <description>");
        println!("  pricing:    insights [market], margin <selling> <cost>, ship <kg> <to>");
        println!("  packaging:  upload <image>, analyze");
        println!("  documents:  country <name>, upload <document>, download [file]");
        println!("  importers:  filter ..., show <id>, close, templates");
    }
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses `<kg> <from> -> <to>`.
fn parse_estimate(args: &str) -> Option<(u32, String, String)> {
    let (kg, rest) = split_command(args);
    let weight_kg = kg.parse::<u32>().ok()?;
    let (from, to) = rest.split_once("->")?;
    let from = from.trim();
    let to = to.trim();
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some((weight_kg, from.to_string(), to.to_string()))
}

/// Parses `<kg> <destination>`.
fn parse_ship(args: &str) -> Option<(u32, String)> {
    let (kg, to) = split_command(args);
    let weight_kg = kg.parse::<u32>().ok()?;
    if to.is_empty() {
        return None;
    }
    Some((weight_kg, to.to_string()))
}
