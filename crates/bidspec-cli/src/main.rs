mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use bidspec_core::error::BidspecError;
use bidspec_core::parsing::rows::ClusterConfig;
use bidspec_core::specs::set::SpecSet;
use bidspec_core::ExtractOptions;

#[derive(Parser)]
#[command(
    name = "bidspec",
    version,
    about = "Extract bid items and compile their technical specifications"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a bid schedule.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Specification set: ladotd-2016 or txdot-2024
    #[arg(long = "spec-set", value_name = "ID", default_value = "ladotd-2016")]
    pub spec_set: String,

    /// Only accept header rows that also name a unit column
    #[arg(long)]
    pub require_unit: bool,

    /// Line spacing at or above this is never taken as the row pitch
    #[arg(long, value_name = "POINTS")]
    pub row_tolerance_ceiling: Option<f32>,

    /// Multiplier applied to the detected row pitch
    #[arg(long, value_name = "FACTOR")]
    pub slack_factor: Option<f32>,

    /// Row tolerance used when no row pitch can be detected
    #[arg(long, value_name = "POINTS")]
    pub default_tolerance: Option<f32>,
}

impl InputArgs {
    pub fn spec_set(&self) -> Result<SpecSet, BidspecError> {
        SpecSet::from_id(&self.spec_set)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        let defaults = ClusterConfig::default();
        let cluster = ClusterConfig {
            outlier_ceiling: self.row_tolerance_ceiling.unwrap_or(defaults.outlier_ceiling),
            slack_factor: self.slack_factor.unwrap_or(defaults.slack_factor),
            default_tolerance: self.default_tolerance.unwrap_or(defaults.default_tolerance),
            ..defaults
        };
        ExtractOptions {
            cluster,
            require_unit_header: self.require_unit,
            ..ExtractOptions::default()
        }
    }
}

/// Where specification catalogs are read from.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Directory holding <set id>/specifications.json and <set id>/supplementalSpecs.json
    /// (default: bundled catalogs)
    #[arg(long, value_name = "DIR", env = "BIDSPEC_CATALOG_DIR")]
    pub catalog_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract bid items from a PDF, CSV or XLSX file
    Extract {
        /// Path to PDF, CSV or XLSX file
        input_file: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write extracted items to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Match bid items against a specification catalog
    Match {
        /// Path to PDF, CSV or XLSX file
        input_file: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Write a specification report for the items of a bid schedule
    Report {
        /// Path to PDF, CSV or XLSX file
        input_file: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Directory the report is written to
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Items listed in the report's item table
        #[arg(long, value_name = "N", default_value_t = 15)]
        max_rows: usize,
    },
    /// Inspect the known specification sets
    Sets {
        #[command(subcommand)]
        action: SetsAction,
    },
}

#[derive(Subcommand)]
enum SetsAction {
    /// List known specification sets
    List,
    /// Explain the item number grammar and catalog of a set
    Explain {
        /// Set id (e.g., "ladotd-2016")
        id: String,

        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            input,
            output,
            out,
        } => commands::extract::run(input_file, &input, &output, out),
        Commands::Match {
            input_file,
            input,
            catalog,
            output,
        } => commands::match_items::run(input_file, &input, &catalog, &output),
        Commands::Report {
            input_file,
            input,
            catalog,
            out_dir,
            max_rows,
        } => commands::report::run(input_file, &input, &catalog, out_dir, max_rows),
        Commands::Sets { action } => match action {
            SetsAction::List => commands::sets::list(),
            SetsAction::Explain { id, catalog } => commands::sets::explain(&id, &catalog),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
