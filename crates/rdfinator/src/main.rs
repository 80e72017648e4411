mod cli;

use anyhow::Result;
use clap::Parser;

use cli::convert::ConvertArgs;
use cli::fetch::FetchArgs;
use cli::{Cli, Commands};
use rdfinator_core::Config;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = Config::load(args.config.as_deref())?;
    tracing::debug!(?config, "Configuration loaded");

    match args.command {
        Commands::Convert {
            input,
            output,
            format,
            stats,
        } => cli::convert::run(
            config,
            ConvertArgs {
                input,
                output,
                format,
                stats,
            },
        ),
        Commands::Fetch {
            ids,
            output,
            base_url,
        } => cli::fetch::run(
            config,
            FetchArgs {
                ids,
                output,
                base_url,
            },
        ),
    }
}
