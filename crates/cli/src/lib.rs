pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "chaiwala",
    about = "Chaiwala catalog CLI",
    long_about = "Filter the chai catalog, place demo orders, and inspect configuration.",
    after_help = "Examples:\n  chaiwala search chai\n  chaiwala order \"Masala Chai\"\n  chaiwala browse\n  chaiwala doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply one search term to the catalog page and report visible items")]
    Search {
        #[arg(default_value = "", help = "Search term; matched case-insensitively")]
        term: String,
    },
    #[command(about = "Show the order confirmation for an item")]
    Order {
        #[arg(help = "Item name as shown on its card")]
        name: String,
    },
    #[command(
        about = "Read search terms from stdin, one per line (`/order <name>` orders, `/quit` exits)"
    )]
    Browse,
    #[command(about = "List the items in the loaded catalog")]
    Catalog,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, catalog loading, and page binding")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        Command::Search { term } => commands::search::run(&term),
        Command::Order { name } => commands::order::run(&name),
        Command::Browse => commands::browse::run(),
        Command::Catalog => commands::catalog::run(),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => {
            let (passed, output) = commands::doctor::run(json);
            commands::CommandResult { exit_code: if passed { 0 } else { 1 }, output }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
