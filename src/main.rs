mod app;
mod catalog;
mod cli;
mod cli_cmds;
mod decoration;
mod error;
mod gallery;
mod logging;
mod render;
mod share;
mod thumbnail;
mod ui;
mod utils;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    cli::run().await
}
