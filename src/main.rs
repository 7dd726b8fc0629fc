use anyhow::{Context, bail};
use api_client::HttpGateway;
use catalog::Catalog;
use clap::{Parser, Subcommand};
use configuration::{SameSubjectPolicy, Settings};
use core_types::{PredictionMode, Subject, TargetParameters};
use dashboard::{
    DashboardView, TradingSummary, metric_tiles, render_catalog, render_dashboard, render_status,
    render_summary, render_tiles, status_panel,
};
use engine::{ApplyOutcome, CoordinatorPolicy, WorkflowCoordinator};
use events::{SessionState, Slot};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

mod console;

use console::{ConsoleCommand, HELP, parse_command};

/// The main entry point for the Quantdash market dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    // Keep the guard alive so the file writer flushes on exit.
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    let catalog = Catalog::builtin().with_priority(&settings.catalog.priority);

    // Execute the appropriate command
    match cli.command {
        Commands::Catalog(args) => handle_catalog(args, &catalog),
        Commands::Run(args) => handle_run(args, &settings, &catalog).await,
        Commands::Interactive(args) => handle_interactive(args, &settings, &catalog).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A terminal dashboard for quantitative market analysis, AI forecasts and backtests.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to `quantdash.toml` in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the instruments that can be analysed.
    Catalog(CatalogArgs),
    /// Run analysis, prediction and backtest once and print the dashboard.
    Run(RunArgs),
    /// Drive the workflow from an interactive console.
    Interactive(InteractiveArgs),
}

#[derive(Parser)]
struct CatalogArgs {
    /// Only show instruments whose name or symbol contains this text.
    #[arg(long, short)]
    query: Option<String>,
}

#[derive(Parser)]
struct RunArgs {
    /// The symbol to analyse (e.g., "VAS.AX"). Defaults to `session.default_subject`.
    #[arg(long)]
    subject: Option<String>,

    /// Monthly investment target. Non-digits are ignored.
    #[arg(long)]
    monthly: Option<String>,

    /// Total investment target. Non-digits are ignored.
    #[arg(long)]
    total: Option<String>,

    /// Forecasting model: standard (Prophet) or advanced (LSTM).
    #[arg(long, default_value = "standard")]
    mode: PredictionMode,

    /// Stop after the prediction.
    #[arg(long)]
    no_backtest: bool,

    /// Print the final session and dashboard view as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct InteractiveArgs {
    /// The symbol to start with. Defaults to `session.default_subject`.
    #[arg(long)]
    subject: Option<String>,

    /// Override what re-selecting the current instrument does.
    #[arg(long, value_enum)]
    same_subject: Option<SameSubjectPolicy>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_catalog(args: CatalogArgs, catalog: &Catalog) -> anyhow::Result<()> {
    let subjects: Vec<Subject> = catalog
        .filter(args.query.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    if subjects.is_empty() {
        println!("No instruments match.");
    } else {
        println!("{}", render_catalog(&subjects));
    }
    Ok(())
}

/// Runs the three stages in order, waiting for each before starting the next.
async fn handle_run(args: RunArgs, settings: &Settings, catalog: &Catalog) -> anyhow::Result<()> {
    let subject = catalog.resolve(
        args.subject
            .as_deref()
            .unwrap_or(&settings.session.default_subject),
    );
    let policy = CoordinatorPolicy::from_settings(settings);
    let mut coordinator = build_coordinator(settings, subject, policy)?;

    if args.monthly.is_some() || args.total.is_some() {
        let defaults = &settings.session;
        coordinator.set_targets(
            args.monthly
                .as_deref()
                .unwrap_or(&defaults.monthly_target.to_string()),
            args.total
                .as_deref()
                .unwrap_or(&defaults.total_target.to_string()),
        );
    }

    coordinator.refresh();
    settle_with_spinner(&mut coordinator, "Fetching market data...".to_string()).await?;

    if coordinator.state().analysis.is_success() {
        coordinator.run_prediction(args.mode)?;
        settle_with_spinner(
            &mut coordinator,
            format!("Running {} prediction...", args.mode.model_label()),
        )
        .await?;
    }

    if coordinator.state().prediction.is_success() && !args.no_backtest {
        coordinator.run_backtest()?;
        settle_with_spinner(&mut coordinator, "Running backtest...".to_string()).await?;
    }

    let snapshot = coordinator.snapshot();
    if args.json {
        let output = serde_json::json!({
            "session": &*snapshot,
            "view": DashboardView::from_state(&snapshot),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_dashboard(&snapshot));
    }

    let failures: Vec<String> = Slot::ALL
        .iter()
        .filter_map(|&slot| snapshot.error(slot).map(|e| format!("{}: {}", slot, e)))
        .collect();
    if !failures.is_empty() {
        bail!("{}", failures.join("; "));
    }
    Ok(())
}

/// Multiplexes console input and gateway resolutions on one task.
async fn handle_interactive(
    args: InteractiveArgs,
    settings: &Settings,
    catalog: &Catalog,
) -> anyhow::Result<()> {
    let subject = catalog.resolve(
        args.subject
            .as_deref()
            .unwrap_or(&settings.session.default_subject),
    );
    let mut policy = CoordinatorPolicy::from_settings(settings);
    if let Some(same_subject) = args.same_subject {
        policy.same_subject = same_subject;
    }
    let mut coordinator = build_coordinator(settings, subject, policy)?;

    println!("{}\n", HELP);
    // Fetch straight away, like opening the dashboard does.
    coordinator.refresh();
    println!("{}", render_status(&status_panel(coordinator.state())));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                // EOF ends the session like `quit`.
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => execute(&mut coordinator, catalog, command),
                    Err(usage) => println!("{}", usage),
                }
            }
            Some(outcome) = coordinator.next_resolution() => {
                if let ApplyOutcome::Applied(slot) = outcome {
                    print_resolution(coordinator.state(), slot);
                }
            }
        }
    }

    tracing::info!(session = %coordinator.session_id(), "Interactive session ended.");
    Ok(())
}

fn execute(coordinator: &mut WorkflowCoordinator, catalog: &Catalog, command: ConsoleCommand) {
    match command {
        ConsoleCommand::Select(symbol) => {
            coordinator.select_subject(catalog.resolve(&symbol));
            println!("{}", render_status(&status_panel(coordinator.state())));
        }
        ConsoleCommand::Targets { monthly, total } => {
            let targets = coordinator.set_targets(&monthly, &total);
            println!(
                "Targets set to {} monthly / {} total. Run 'refresh' to apply.",
                targets.monthly_target, targets.total_target
            );
        }
        ConsoleCommand::Refresh => {
            coordinator.refresh();
            println!("{}", render_status(&status_panel(coordinator.state())));
        }
        ConsoleCommand::Predict(mode) => match coordinator.run_prediction(mode) {
            Ok(()) => println!("{}", render_status(&status_panel(coordinator.state()))),
            Err(e) => println!("{}", e),
        },
        ConsoleCommand::Backtest => match coordinator.run_backtest() {
            Ok(()) => println!("{}", render_status(&status_panel(coordinator.state()))),
            Err(e) => println!("{}", e),
        },
        ConsoleCommand::Search(query) => {
            let subjects: Vec<Subject> = catalog.filter(&query).into_iter().cloned().collect();
            if subjects.is_empty() {
                println!("No instruments match '{}'.", query);
            } else {
                println!("{}", render_catalog(&subjects));
            }
        }
        ConsoleCommand::Show => print!("{}", render_dashboard(&coordinator.snapshot())),
        ConsoleCommand::Help => println!("{}", HELP),
        ConsoleCommand::Quit | ConsoleCommand::Nothing => {}
    }
}

/// Re-renders what changed after a resolution was applied.
fn print_resolution(state: &SessionState, slot: Slot) {
    println!("{}", render_status(&status_panel(state)));
    match slot {
        Slot::Analysis => {
            if let Some(analysis) = state.analysis.success() {
                println!("{}", render_tiles(&metric_tiles(analysis)));
            }
        }
        Slot::Prediction | Slot::Backtest => {
            if let Some(summary) = TradingSummary::from_state(state) {
                println!("{}", render_summary(&summary));
            }
        }
    }
}

// ==============================================================================
// Helpers
// ==============================================================================

fn build_coordinator(
    settings: &Settings,
    subject: Subject,
    policy: CoordinatorPolicy,
) -> anyhow::Result<WorkflowCoordinator> {
    let gateway = HttpGateway::new(&settings.gateway)
        .context("Failed to build the analytics service client")?;
    tracing::info!(base_url = gateway.base_url(), symbol = %subject.symbol, "Session starting.");

    let targets = TargetParameters::new(
        settings.session.monthly_target,
        settings.session.total_target,
    );
    Ok(WorkflowCoordinator::new(
        Arc::new(gateway),
        subject,
        targets,
        policy,
    ))
}

/// Waits for every pending stage behind a spinner.
async fn settle_with_spinner(
    coordinator: &mut WorkflowCoordinator,
    message: String,
) -> anyhow::Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    coordinator.settle().await;

    spinner.finish_and_clear();
    Ok(())
}
