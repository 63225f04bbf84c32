//! CLI probe over the Deskflow core engines.
//!
//! # Responsibility
//! - Verify `deskflow_core` linkage and render the demo workspace.
//! - Run one generation request against the configured AI service.

mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands};
use deskflow_core::seed::{initial_pages, initial_tasks};
use deskflow_core::{
    columns, format_currency, init_logging, AssistantConfig, BoardService, ContentGenerator,
    GeminiClient, GenerationSlot, GenerationState, LoggingConfig, PageId, WorkspaceService,
};
use log::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&LoggingConfig::from_env()) {
        eprintln!("logging disabled: {err}");
    }

    match cli.command {
        None | Some(Commands::Ping) => {
            println!("deskflow_core ping={}", deskflow_core::ping());
        }
        Some(Commands::Version) => {
            println!("deskflow_core version={}", deskflow_core::core_version());
        }
        Some(Commands::Board) => print_board(),
        Some(Commands::Dashboard) => print_dashboard(),
        Some(Commands::Page { id }) => {
            let workspace = WorkspaceService::new(initial_pages());
            let page = workspace
                .page(&PageId::new(id.as_str()))
                .ok_or_else(|| anyhow!("no page with id {id}"))?;
            println!("{}", serde_json::to_string_pretty(page)?);
        }
        Some(Commands::Caption { topic }) => {
            let client = GeminiClient::new(AssistantConfig::from_env());
            let mut slot = GenerationSlot::new("caption");
            match slot.run(client.generate_caption(&topic)).await {
                GenerationState::Succeeded(draft) => {
                    println!("{}", draft.caption);
                    println!("{}", draft.hashtags.join(" "));
                }
                GenerationState::Failed(message) => return Err(anyhow!(message.clone())),
                _ => warn!("event=cli_caption module=cli status=skipped"),
            }
        }
        Some(Commands::Assist { prompt, context }) => {
            let client = GeminiClient::new(AssistantConfig::from_env());
            let mut slot = GenerationSlot::new("assist");
            match slot.run(client.assist(&prompt, &context)).await {
                GenerationState::Succeeded(reply) => {
                    println!("{}", reply.content);
                    for suggestion in &reply.suggestions {
                        println!("- {suggestion}");
                    }
                }
                GenerationState::Failed(message) => return Err(anyhow!(message.clone())),
                _ => warn!("event=cli_assist module=cli status=skipped"),
            }
        }
    }

    Ok(())
}

fn print_board() {
    let board = BoardService::new(initial_tasks());
    let snapshot = board.snapshot();
    for column in columns(&snapshot.tasks) {
        println!("{} ({})", column.title, column.count());
        for task in &column.tasks {
            println!(
                "  [{}] {} {} {}",
                task.priority.as_str(),
                task.title,
                task.tags.join(","),
                format_currency(task.revenue)
            );
        }
    }
}

fn print_dashboard() {
    let board = BoardService::new(initial_tasks());
    let view = board.snapshot().dashboard();
    println!(
        "tasks={} done={} completion={}% revenue={}",
        view.kpis.total_count,
        view.kpis.done_count,
        view.kpis.completion_rate_percent,
        format_currency(view.kpis.total_revenue)
    );
    for item in &view.initiatives {
        println!("  {} [{}] {}", item.name, item.status.as_str(), item.next_action);
    }
    for line in &view.finance.lines {
        println!("  {:<40} {}", line.name, format_currency(line.revenue));
    }
    println!("forecast={}", format_currency(view.finance.total_forecast));
}
