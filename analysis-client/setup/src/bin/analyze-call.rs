use std::io;

use analysis_configuration::{load_config, setup_logging};
use analysis_setup::{build_and_run, Cli};
use anyhow::Result;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;
    setup_logging(&config);

    let (recording, options) = cli.into_request();
    let mut stdout = io::stdout().lock();
    build_and_run(config, &recording, options, &mut stdout).await?;
    Ok(())
}
