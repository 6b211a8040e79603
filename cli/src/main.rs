//! CLI entrypoint for agenda-vote
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then replays a scenario through the agenda actor.

use agenda_application::{AgendaActor, AgendaController};
use agenda_domain::{AgendaEvent, OutputFormat};
use agenda_infrastructure::{ConfigLoader, Scenario};
use agenda_presentation::{Cli, ConsoleFormatter, EventPrinter, JsonFormatter, OutputFormatter};
use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    info!("Starting agenda-vote");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    config.validate()?;

    let Some(scenario_path) = cli.scenario.as_deref() else {
        bail!("A scenario file is required. Use --show-config to inspect configuration.");
    };
    let scenario = Scenario::load(scenario_path)
        .with_context(|| format!("Failed to load scenario {}", scenario_path.display()))?;

    // === Dependency Injection ===
    let table = Arc::new(scenario.table()?);
    let turn_order = Arc::new(scenario.turn_order());
    let agenda_config = config.agenda.to_agenda_config();

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    ConsoleFormatter::set_color_enabled(config.output.color);
    let formatter: Box<dyn OutputFormatter> = match format {
        OutputFormat::Text => Box::new(ConsoleFormatter::new(&scenario.seats)),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(EventPrinter::new(formatter).with_quiet(cli.quiet).run(ui_rx));

    let controller = AgendaController::new(table.clone(), turn_order, agenda_config, ui_tx);

    let cancellation = CancellationToken::new();
    let ctrl_c = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let handle = AgendaActor::spawn(controller, cancellation.clone());

    // === Replay ===
    let mut sent = 0;
    for event in scenario.events {
        if cancellation.is_cancelled() {
            warn!("Interrupted after {} events", sent);
            break;
        }
        // The host flips the card before reporting it
        if let AgendaEvent::CardFaceChanged { card, face_up } = &event {
            if let Err(e) = table.set_face_up(card, *face_up) {
                warn!("{}", e);
            }
        }
        handle.send(event)?;
        sent += 1;
    }

    let controller = handle.shutdown().await?;
    if let Some(phase) = controller.current_phase() {
        warn!("Scenario ended with an agenda still in {}", phase);
    }
    drop(controller);

    let resolved = printer.await.context("Output task failed")?;
    info!("Replayed {} events, {} agendas resolved", sent, resolved);

    Ok(())
}

/// Log filter from `env_var` when set, otherwise from the `-v` count
fn log_filter(verbose: u8, env_var: &str) -> EnvFilter {
    EnvFilter::try_from_env(env_var).unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    })
}

/// Install the tracing subscriber
///
/// Logs go to stderr so stdout stays clean for `-o json`. With a log
/// directory a daily rolling file receives the same events.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = log_filter(verbose, EnvFilter::DEFAULT_ENV);

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "agenda-vote.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}
