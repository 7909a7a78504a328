use anyhow::Result;
use clap::Parser;

use super::{Cli, Commands};
use crate::app;
use crate::cli_cmds::*;

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = app::Config::load()?;
    if let Some(dir) = cli.dir {
        config.catalog.folder = dir;
    }

    match cli.command {
        Some(Commands::List { category, json }) => {
            cmd_list(&config, category.as_deref(), json)?;
        }
        Some(Commands::Categories) => {
            cmd_categories(&config)?;
        }
        Some(Commands::Share { id, print }) => {
            cmd_share(&config, id, print)?;
        }
        None => {
            // TUI mode
            app::run_tui(config).await?;
        }
    }

    Ok(())
}
