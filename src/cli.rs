//! Command-line Arguments
//!
//! Every argument is optional; with none at all the tool behaves exactly as it
//! always has, reading `metadata.csv` from and writing the manifest into the
//! current directory.

use clap::{ArgAction, Parser, ValueEnum};
use manifest_config::{ConfigOverrides, Ordering};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Build a CSV ingest manifest from a directory of digital objects")]
pub struct Cli {
    /// Directory containing one subdirectory per digital object [default: current directory]
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,
    /// Metadata lookup file keyed by `source_metadata_identifier`
    #[arg(short, long, value_name = "PATH")]
    pub metadata: Option<PathBuf>,
    /// Where to write the manifest
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Additional configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Order of rows (and of file names within a row)
    #[arg(long, value_enum)]
    pub ordering: Option<OrderingArg>,
    /// More output (repeat for even more)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,
    /// Only report warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OrderingArg {
    /// Sorted by directory and file name
    Identifier,
    /// Platform directory iteration order
    Filesystem,
}
impl From<OrderingArg> for Ordering {
    fn from(value: OrderingArg) -> Self {
        match value {
            OrderingArg::Identifier => Self::Identifier,
            OrderingArg::Filesystem => Self::Filesystem,
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            metadata: self.metadata.clone(),
            output: self.output.clone(),
            ordering: self.ordering.map(Ordering::from),
        }
    }

    /// Default log filter when `RUST_LOG` isn't set.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}
