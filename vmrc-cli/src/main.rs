//! Entry point for the `vmrc` command-line client.

use clap::Parser;
use vmrc_cli::cli::{run, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let code = run(cli).await;
    std::process::exit(code);
}
