//! JuiceScout CLI — migrate a HelpJuice knowledge base export into Help Scout Docs.
//!
//! Reads the exported categories, questions, and answers CSV files, recreates
//! the categories in a Help Scout collection, and creates one article per
//! question.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    commands::load_dotenv()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
