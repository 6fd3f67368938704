use anyhow::Result;
use clap::Parser;

use frusta_rtpq::args::{Cli, Commands};
use frusta_rtpq::run_demo;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo(args) => run_demo(args).await,
    }
}
