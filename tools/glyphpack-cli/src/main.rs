//! Glyphpack CLI — render a glyph catalog into a downloadable zip of PNGs.
//!
//! Usage:
//!   glyphpack run [OPTIONS]     Render the catalog and write emojis.zip
//!   glyphpack info [OPTIONS]    Show catalog information
//!   glyphpack check             Check font and encoder availability

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "glyphpack",
    about = "Batch-render emoji glyphs to PNG and package them as a zip",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every catalog glyph and write the archive
    Run {
        /// Catalog URL to fetch (JSON object of name -> glyph)
        #[arg(long)]
        catalog_url: Option<String>,

        /// Local catalog JSON file (takes precedence over the URL)
        #[arg(long)]
        catalog_file: Option<PathBuf>,

        /// Output directory for emojis.zip
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Font file to render with
        #[arg(long)]
        font: Option<PathBuf>,

        /// Preferred system font family
        #[arg(long)]
        font_family: Option<String>,
    },

    /// Show catalog information without rendering
    Info {
        /// Catalog URL to fetch
        #[arg(long)]
        catalog_url: Option<String>,

        /// Local catalog JSON file
        #[arg(long)]
        catalog_file: Option<PathBuf>,
    },

    /// Check font and encoder availability
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    glyphpack_common::logging::init_logging(&glyphpack_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Run {
            catalog_url,
            catalog_file,
            output,
            font,
            font_family,
        } => commands::run::run(catalog_url, catalog_file, output, font, font_family).await,
        Commands::Info {
            catalog_url,
            catalog_file,
        } => commands::info::run(catalog_url, catalog_file).await,
        Commands::Check => commands::check::run().await,
    }
}
