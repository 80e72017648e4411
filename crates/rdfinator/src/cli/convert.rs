use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rdfinator_core::{serialize, Config, ConvertStats, Converter, GraphFormat};

use super::StatsFormat;

pub struct ConvertArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<GraphFormat>,
    pub stats: Option<StatsFormat>,
}

pub fn run(mut config: Config, args: ConvertArgs) -> Result<()> {
    if let Some(input) = args.input {
        config.convert.input_dir = input;
    }
    if let Some(output) = args.output {
        config.convert.output = output;
    }
    if let Some(format) = args.format {
        config.convert.format = format;
    }

    let input = &config.convert.input_dir;
    let mut converter = Converter::new(config.namespace.namespace());
    converter
        .add_directory(input)
        .with_context(|| format!("failed to convert records in {}", input.display()))?;
    let (graph, stats) = converter.finish();

    let text = serialize(&graph, config.convert.format).context("failed to serialize graph")?;
    let to_stdout = config.convert.output == Path::new("-");
    if to_stdout {
        std::io::stdout().write_all(text.as_bytes())?;
    } else {
        std::fs::write(&config.convert.output, text)
            .with_context(|| format!("failed to write {}", config.convert.output.display()))?;
    }

    match args.stats {
        Some(format) if !to_stdout => println!("{}", render_stats(&stats, format)?),
        Some(format) => eprintln!("{}", render_stats(&stats, format)?),
        None => eprintln!(
            "Wrote {} triples from {} files to {}",
            stats.triples,
            stats.files,
            config.convert.output.display()
        ),
    }

    Ok(())
}

fn render_stats(stats: &ConvertStats, format: StatsFormat) -> Result<String> {
    Ok(match format {
        StatsFormat::Json => serde_json::to_string_pretty(stats)?,
        StatsFormat::Text => format!(
            "files: {}\npersons: {}\ncorporate bodies: {}\nother entities: {}\nplaces: {}\ntriples: {}",
            stats.files,
            stats.persons,
            stats.corporate_bodies,
            stats.other_entities,
            stats.places,
            stats.triples
        ),
    })
}
