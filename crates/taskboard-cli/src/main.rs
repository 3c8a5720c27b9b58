mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use taskboard_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::stderr)
            .init();
    }

    let args = Cli::parse();

    match args.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "taskboard", &mut std::io::stdout());
        }
        command => {
            let config = AppConfig::load();
            let dir = args.dir.unwrap_or_else(|| config.effective_storage_dir());
            let key = args
                .key
                .unwrap_or_else(|| config.effective_storage_key().to_string());

            let mut ctx = CliContext::load(&dir, &key).await;

            match command {
                Commands::Show { query } => {
                    if let Some(query) = query {
                        ctx.repository.set_search_query(query);
                    }
                    handlers::board::show(&ctx);
                }
                Commands::Move { id, to } => {
                    if let Err(e) = handlers::task::move_task(&mut ctx, &id, to).await {
                        output::output_error(&e.to_string());
                    }
                }
                Commands::Reset => {
                    if let Err(e) = handlers::board::reset(&mut ctx).await {
                        output::output_error(&e.to_string());
                    }
                }
                Commands::Completions { .. } => unreachable!("handled above"),
            }
        }
    }

    Ok(())
}
