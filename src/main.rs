use clap::Parser;
use std::path::PathBuf;

use minipy::cli;

#[derive(Parser)]
#[command(name = "minipy")]
#[command(about = "Tree-walking interpreter core for a Python-like scripting language")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Evaluate a parsed syntax tree (JSON from the external parser)
    #[command(alias = "r")]
    Run {
        /// Syntax-tree file; stdin when omitted
        input: Option<PathBuf>,
    },

    /// Validate a syntax tree without running it
    #[command(alias = "c")]
    Check {
        /// Syntax-tree file; stdin when omitted
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { input } => cli::run(input)?,
        Commands::Check { input } => cli::check(input)?,
    }

    Ok(())
}
