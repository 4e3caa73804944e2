use anyhow::Result;
use clap::Parser;

use chatgate::{
    app::load_config,
    cli::{handle_command, Cli},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logger(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    handle_command(&cli.command, &config).await
}
