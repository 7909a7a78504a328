use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keepsake")]
#[command(version)]
#[command(about = "Terminal photo gallery with category filters, a full-screen viewer and share links")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Photo folder (overrides catalog.folder from the config)
    #[arg(short, long)]
    pub(crate) dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List catalog photos, optionally restricted to one category
    List {
        /// Category to show ("all" for everything)
        #[arg(short, long)]
        category: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List categories with their photo counts
    Categories,
    /// Open (or print) the share link for a photo
    Share {
        /// Photo id (1-based)
        id: u32,

        /// Print the link instead of opening it
        #[arg(short, long)]
        print: bool,
    },
}
