use clap::{Args, Parser, Subcommand, ValueEnum};
use sitescope_core::AggregateOp;
use std::path::PathBuf;

/// CLI arguments for sitescope
#[derive(Debug, Parser)]
#[command(
    name = "sitescope",
    version,
    about = "Per-canton summaries of store, population and competitor datasets"
)]
pub struct CliArgs {
    /// Path to a TOML config file (default: ./sitescope.toml if present)
    #[arg(short = 'c', long = "config", global = true, env = "SITESCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Optional CSV (code,name) replacing the built-in canton table
    #[arg(long = "region-table", global = true)]
    pub region_table: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "format", global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// The three datasets of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetKind {
    Stores,
    Population,
    Competitors,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Stores,
        DatasetKind::Population,
        DatasetKind::Competitors,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            DatasetKind::Stores => "Store Locations",
            DatasetKind::Population => "Population Density",
            DatasetKind::Competitors => "Competitor Stores",
        }
    }
}

/// Options shared by the per-dataset pages.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Read this CSV instead of the configured one
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Add an aggregate column over this attribute (e.g. rating)
    #[arg(short = 'm', long = "mean")]
    pub attribute: Option<String>,

    /// Statistic used for --mean: mean, sum, min or max
    #[arg(long = "op", default_value = "mean")]
    pub op: AggregateOp,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Project overview with record and region counts per dataset
    Overview,

    /// Per-canton summary of our store locations
    Stores(PageArgs),

    /// Per-canton summary of the population density samples
    Population(PageArgs),

    /// Per-canton summary of competitor store locations
    Competitors(PageArgs),

    /// Join per-canton values with the boundary file
    Choropleth {
        /// Dataset to map
        #[arg(value_enum)]
        dataset: DatasetKind,

        /// "count" or an attribute name
        #[arg(long = "value", default_value = "count")]
        value: String,

        /// Read this CSV instead of the configured one
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,

        /// Statistic used for an attribute --value: mean, sum, min or max
        #[arg(long = "op", default_value = "mean")]
        op: AggregateOp,

        /// Boundary GeoJSON, overrides the config
        #[arg(short = 'b', long = "boundaries")]
        boundaries: Option<PathBuf>,
    },

    /// List the region code table
    Regions {
        /// Only names containing this text (accent-insensitive)
        query: Option<String>,
    },

    /// Normalize region ids (codes become full names)
    Normalize {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Write a default config file
    InitConfig {
        #[arg(default_value = "sitescope.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
