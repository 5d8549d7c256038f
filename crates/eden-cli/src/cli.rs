//! CLI argument definitions for the EDEN region registry.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "eden",
    version,
    about = "EDEN region registry - normalize ecoregion boundaries into a canonical store",
    long_about = "Build a canonical region registry from published boundary files.\n\n\
                  Matches source polygons against a region catalog, repairs invalid\n\
                  geometry, computes equal-area sizes, and writes a layered geometry\n\
                  store plus a flat bounds table for downstream tools."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prepare a region registry layer from a boundary source.
    Prep(PrepArgs),

    /// Print the area of interest for a catalog selection.
    Aoi(AoiArgs),

    /// List the regions in a catalog.
    Regions(RegionsArgs),
}

#[derive(Parser)]
pub struct PrepArgs {
    /// Boundary source shapefile (.shp with .dbf and .prj sidecars).
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Region catalog YAML.
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: PathBuf,

    /// Catalog scheme to select.
    #[arg(long = "scheme", value_name = "SCHEME")]
    pub scheme: String,

    /// Catalog level to select.
    #[arg(long = "level", value_name = "LEVEL")]
    pub level: i64,

    /// Geometry store directory (default: <SOURCE dir>/registry).
    #[arg(long = "store", value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Layer name inside the store (default derived from scheme and level).
    #[arg(long = "layer", value_name = "NAME")]
    pub layer: Option<String>,

    /// Bounds table path (default: <store>/bounds.parquet).
    #[arg(long = "bounds", value_name = "PATH")]
    pub bounds: Option<PathBuf>,

    /// Attribute column holding the region code (default: inferred).
    #[arg(long = "code-field", value_name = "COLUMN")]
    pub code_field: Option<String>,

    /// CRS the registry is written in.
    #[arg(long = "target-crs", value_name = "CRS", default_value = "EPSG:4326")]
    pub target_crs: String,

    /// Equal-area CRS used for area computation.
    #[arg(long = "area-crs", value_name = "CRS", default_value = "EPSG:5070")]
    pub area_crs: String,

    /// Keep multi-part regions as separate rows instead of dissolving per uid.
    #[arg(long = "no-dissolve")]
    pub no_dissolve: bool,

    /// Also write a QA spreadsheet export (CSV).
    #[arg(long = "qa", value_name = "PATH")]
    pub qa: Option<PathBuf>,

    /// Run the pipeline and report without writing any artifacts.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct AoiArgs {
    /// Region catalog YAML.
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: PathBuf,

    /// Catalog scheme to select.
    #[arg(long = "scheme", value_name = "SCHEME")]
    pub scheme: String,

    /// Catalog level to select.
    #[arg(long = "level", value_name = "LEVEL")]
    pub level: i64,

    /// Computed bounds table; preferred over catalog bounds when it exists.
    #[arg(long = "bounds", value_name = "PATH")]
    pub bounds: Option<PathBuf>,

    /// Decimal places in the printed bbox.
    #[arg(long = "precision", value_name = "N", default_value_t = 5)]
    pub precision: usize,
}

#[derive(Parser)]
pub struct RegionsArgs {
    /// Region catalog YAML.
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Only list regions of this scheme.
    #[arg(long = "scheme", value_name = "SCHEME")]
    pub scheme: Option<String>,

    /// Only list regions of this level.
    #[arg(long = "level", value_name = "LEVEL")]
    pub level: Option<i64>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn prep_parses_with_defaults() {
        let cli = Cli::parse_from([
            "eden",
            "prep",
            "boundaries.shp",
            "--catalog",
            "regions.yml",
            "--scheme",
            "EPA_US",
            "--level",
            "3",
        ]);
        let Command::Prep(args) = cli.command else {
            panic!("expected prep");
        };
        assert_eq!(args.target_crs, "EPSG:4326");
        assert_eq!(args.area_crs, "EPSG:5070");
        assert!(!args.no_dissolve);
        assert!(!args.dry_run);
    }
}
