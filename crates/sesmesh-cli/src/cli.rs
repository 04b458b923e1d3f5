use clap::{Args, Parser, Subcommand};
use sesmesh::engine::extraction::ExtractionAlgorithm;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "sesmesh - Generate colored solvent-excluded surface meshes from PDB structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel field sampling.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the solvent-excluded surface of selected chains and write it as a PLY mesh.
    Surface(SurfaceArgs),
    /// List the chain identifiers present in a PDB file.
    Chains(ChainsArgs),
}

/// Arguments for the `surface` subcommand.
#[derive(Args, Debug)]
pub struct SurfaceArgs {
    /// Path to the input PDB file.
    #[arg(required = true, value_name = "PDB")]
    pub input: PathBuf,

    /// Directory the mesh is written to. Defaults to the current directory.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Distance between grid samples, in Angstroms.
    #[arg(short = 'g', long, value_name = "FLOAT")]
    pub grid_spacing: Option<f64>,

    /// Radius of the solvent probe sphere, in Angstroms.
    #[arg(short = 'p', long, value_name = "FLOAT")]
    pub probe_radius: Option<f64>,

    /// Chains to include, e.g. 'A-E' or 'ABDEG'. Defaults to 'A-Z'.
    #[arg(long, value_name = "SPEC")]
    pub chains: Option<String>,

    /// Isosurface extraction algorithm.
    #[arg(short, long, value_name = "NAME")]
    pub algorithm: Option<ExtractionAlgorithm>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S surface.grid-spacing=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `chains` subcommand.
#[derive(Args, Debug)]
pub struct ChainsArgs {
    /// Path to the input PDB file.
    #[arg(required = true, value_name = "PDB")]
    pub input: PathBuf,
}
