mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::simulate::{FormArgs, SimulateArgs};

/// Consórcio bid and contemplation simulator
#[derive(Parser)]
#[command(
    name = "consim",
    version,
    about = "Consórcio bid and contemplation simulator",
    long_about = "Simulates a Brazilian consórcio contract around the moment of \
                  contemplation: financed balance, installments, free and embedded \
                  bids (lances), reducer residuals, and the post-award repayment \
                  figures, with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from typed values (flags, --input file, or piped JSON)
    Simulate(SimulateArgs),
    /// Run a simulation from raw form-field text and print the display slots
    Form(FormArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Form(args) => commands::simulate::run_form(args),
        Commands::Version => {
            println!("consim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
