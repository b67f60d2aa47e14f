use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use wrun_core::configs::runner::RunnerConfig;
use wrun_core::selection::select_runnable;
use wrun_core::supervisor::{RunnerCommand, Supervisor};
use wrun_core::workspace::{discover_packages, WorkspaceDeclaration};

mod dashboard;
mod plain;

/// wrun - workspace process runner
#[derive(Parser)]
#[command(name = "wrun")]
#[command(about = "Run a workspace script across every configured package")]
#[command(version)]
struct Cli {
    /// Script to run in each selected package
    #[arg(default_value = "dev")]
    command: String,
}

/// All fatal startup conditions print one short diagnostic and exit 1.
fn fatal(message: &str) -> ! {
    eprintln!("{} {}", "✖".red().bold(), message.red().bold());
    process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    // Config first: a missing or malformed config aborts before any
    // filesystem scan for packages.
    let config = match RunnerConfig::load(&root) {
        Ok(config) => config,
        Err(e) => fatal(&e.to_string()),
    };

    let Some(declaration) = WorkspaceDeclaration::detect(&root) else {
        fatal("No packages found or no workspace configuration detected.");
    };

    let packages = discover_packages(&root, &declaration);
    if packages.is_empty() {
        fatal("No packages found or no workspace configuration detected.");
    }

    let selection = select_runnable(&packages, &config, &cli.command);
    if selection.is_empty() {
        fatal("No running applications found with the specified command.");
    }

    let command = RunnerCommand::package_script(declaration.package_manager(), &cli.command);
    let (mut supervisor, events) = Supervisor::new();

    if config.dashboard_enabled() {
        for descriptor in &selection {
            supervisor.spawn(descriptor, &command, true)?;
        }
        dashboard::run(supervisor, events).await
    } else {
        for descriptor in &selection {
            println!(
                "{} {} in {}",
                "▶ Running".cyan(),
                cli.command.magenta(),
                descriptor.name.yellow()
            );
            supervisor.spawn(descriptor, &command, false)?;
        }
        plain::execute(supervisor, events).await
    }
}
