pub mod convert;
pub mod fetch;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rdfinator_core::GraphFormat;

#[derive(Parser)]
#[command(
    name = "rdfinator",
    about = "Convert EAC-CPF archival records into an ORG/PROV linked-data graph",
    version
)]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a directory of EAC-CPF records into one graph
    Convert {
        /// Directory of *.xml records
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file, or - for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Serialization format
        #[arg(short, long, value_parser = parse_format)]
        format: Option<GraphFormat>,
        /// Print conversion counts
        #[arg(long, value_enum)]
        stats: Option<StatsFormat>,
    },
    /// Download records and the corporate bodies they relate to
    Fetch {
        /// Record identifiers to start from
        #[arg(default_values_t = [String::from("A000196")])]
        ids: Vec<String>,
        /// Directory to store records in
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Record URL prefix; the identifier is appended
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatsFormat {
    Text,
    Json,
}

fn parse_format(value: &str) -> Result<GraphFormat, String> {
    value.parse()
}
