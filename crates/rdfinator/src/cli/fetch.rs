use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rdfinator_core::{extract_record_id, Config, OaiClient, RecordId, RecordStore, Retriever};

pub struct FetchArgs {
    pub ids: Vec<String>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
}

pub fn run(mut config: Config, args: FetchArgs) -> Result<()> {
    if let Some(output) = args.output {
        config.retrieve.output_dir = output;
    }
    if let Some(base_url) = args.base_url {
        config.retrieve.base_url = base_url;
    }

    let roots = parse_ids(&args.ids)?;
    let client = OaiClient::new(&config.retrieve).context("failed to build HTTP client")?;
    let store = RecordStore::new(config.retrieve.output_dir.clone());
    let retriever = Retriever::new(client, store.clone(), config.retrieve.follow.clone());

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime
        .block_on(retriever.retrieve(&roots))
        .context("record retrieval failed")?;

    for id in &report.fetched {
        println!("{}", store.path_for(id).display());
    }
    eprintln!(
        "Fetched {} records into {} ({} already known)",
        report.fetched.len(),
        store.dir().display(),
        report.duplicates
    );

    Ok(())
}

fn parse_ids(raw: &[String]) -> Result<Vec<RecordId>> {
    raw.iter()
        .map(|value| match extract_record_id(value) {
            Some(id) => Ok(id),
            None => bail!("'{value}' does not contain a record identifier"),
        })
        .collect()
}
