use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "axe-catalog")]
#[command(about = "Axe catalog companion: stamp search, measurement templates, stamp cropping", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search stamps and print grouped results
    Search {
        /// Free-text query
        query: Option<String>,

        /// Manufacturer filter
        #[arg(short, long)]
        manufacturer: Option<String>,

        /// Stamp type filter
        #[arg(short = 't', long)]
        stamp_type: Option<String>,

        /// Exact instead of partial matching
        #[arg(long)]
        exact: bool,

        /// Combine criteria with OR instead of AND
        #[arg(long)]
        or: bool,

        /// Symbol id (repeatable)
        #[arg(short, long = "symbol")]
        symbols: Vec<u32>,
    },

    /// List measurement templates
    Templates {
        /// Catalog JSON with `types` and/or `templates`
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Crop a stamp image by percentages and write a JPEG
    Crop {
        #[arg(required = true)]
        input: PathBuf,

        /// Left edge, percent of width
        #[arg(long)]
        x: f64,

        /// Top edge, percent of height
        #[arg(long)]
        y: f64,

        /// Width, percent
        #[arg(long)]
        width: f64,

        /// Height, percent
        #[arg(long)]
        height: f64,

        /// Output file (default: <stem>_crop.jpg next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change settings
    Config {
        #[arg(long)]
        set_base_url: Option<String>,

        #[arg(long)]
        set_session: Option<String>,

        #[arg(long)]
        show: bool,
    },
}
