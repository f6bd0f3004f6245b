mod cli;
mod error;
mod modules;
mod utils;

use anyhow::Result;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::new()?;
    cli.run().await?;
    Ok(())
}
