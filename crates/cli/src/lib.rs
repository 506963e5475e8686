pub mod commands;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "rigquote",
    about = "Rigquote operator CLI",
    long_about = "Resolve free-text bundle descriptions, search the catalog under a budget, \
                  and price quotes from the command line.",
    after_help = "Examples:\n  rigquote quote \"TSK-C3 I5-14400 / 16G DDR5 5600\" --discount bulk\n  rigquote recommend \"budget 8000\"\n  rigquote catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Resolve a free-text bundle description into a catalog selection")]
    Match {
        #[arg(help = "Free-text bundle description")]
        text: String,
    },
    #[command(about = "Search the catalog for the best bundle within a stated budget")]
    Recommend {
        #[arg(help = "Free text carrying anchors and an optional budget")]
        text: String,
    },
    #[command(about = "Price a bundle described in free text and render the quote document")]
    Quote {
        #[arg(help = "Free-text bundle description")]
        text: String,
        #[arg(long, help = "Discount tier id to apply")]
        discount: Option<String>,
        #[arg(long, help = "Markup point id to apply")]
        markup: Option<String>,
        #[arg(long, default_value_t = Decimal::ZERO, help = "Flat rebate subtracted after discount")]
        rebate: Decimal,
    },
    #[command(about = "List catalog categories, models, prices and priority flags")]
    Catalog,
    #[command(about = "Inspect effective configuration values with source precedence")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Match { text } => commands::match_text::run(&text),
        Command::Recommend { text } => commands::recommend::run(&text),
        Command::Quote { text, discount, markup, rebate } => {
            commands::quote::run(&text, discount.as_deref(), markup.as_deref(), rebate)
        }
        Command::Catalog => commands::catalog::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
