//! Career Compass CLI and REST API entry point.
//!
//! Binary name: `compass`
//!
//! Parses CLI arguments, sets up tracing, initializes the database and
//! services, then dispatches to a command handler or starts the API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use compass_observe::tracing_setup::{init_tracing, shutdown_tracing, LogFormat, TracingOptions};

use cli::{Cli, Commands, HistoryCommand, SessionCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,compass=debug",
        _ => "trace",
    };
    let format = match cli.command {
        Commands::Serve { .. } if cli.json => LogFormat::Json,
        _ => LogFormat::Pretty,
    };
    init_tracing(&TracingOptions {
        default_level,
        format,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Commands that don't need app state
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "compass", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Careers { search, category } => {
            return cli::careers::list_careers(search.as_deref(), category.as_deref(), cli.json);
        }
        _ => {}
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, "Career Compass API listening");
            if !cli.quiet {
                println!(
                    "  {} Career Compass API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Session { action } => match action {
            SessionCommand::Show => cli::session::show_session(&state, cli.json).await?,
            SessionCommand::New => cli::session::new_session(&state, cli.json).await?,
        },

        Commands::Chat { resume } => {
            cli::chat::loop_runner::run_chat_loop(&state, resume).await?;
        }

        Commands::History { action } => match action {
            HistoryCommand::List => cli::history::list_history(&state, cli.json).await?,
            HistoryCommand::Delete { id, force } => {
                cli::history::delete_conversation(&state, &id, force, cli.json).await?;
            }
            HistoryCommand::Clear { force } => {
                cli::history::clear_history(&state, force, cli.json).await?;
            }
        },

        Commands::Quiz => cli::quiz::run_quiz(&state, cli.json).await?,

        Commands::Completions { .. } | Commands::Careers { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
