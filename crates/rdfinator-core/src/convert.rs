use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::projector::Projector;
use crate::record::{parse_record, parse_record_file, EntityDescription, EntityKind};
use crate::vocab::Namespace;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertStats {
    pub files: usize,
    pub persons: usize,
    pub corporate_bodies: usize,
    pub other_entities: usize,
    pub places: usize,
    pub triples: usize,
}

/// Single-pass conversion of EAC-CPF records into one graph.
///
/// Any malformed record aborts the run; nothing is rolled back, so a failed
/// converter should be discarded.
#[derive(Debug)]
pub struct Converter {
    projector: Projector,
    stats: ConvertStats,
}

impl Converter {
    #[must_use]
    pub fn new(local: Namespace) -> Self {
        Self {
            projector: Projector::new(local),
            stats: ConvertStats::default(),
        }
    }

    /// Convert every entity description in an in-memory document.
    pub fn add_document(&mut self, document: &str) -> Result<usize> {
        let entities = parse_record(document)?;
        Ok(self.add_entities(entities))
    }

    pub fn add_file(&mut self, path: &Path) -> Result<usize> {
        tracing::info!("Converting {}", path.display());
        let entities = parse_record_file(path)?;
        self.stats.files += 1;
        Ok(self.add_entities(entities))
    }

    /// Convert all `*.xml` files directly inside `dir`, in path order.
    pub fn add_directory(&mut self, dir: &Path) -> Result<usize> {
        let files = record_files(dir)?;
        if files.is_empty() {
            tracing::warn!("No .xml records in {}", dir.display());
        }

        let mut entities = 0;
        for file in files {
            entities += self.add_file(&file)?;
        }
        Ok(entities)
    }

    fn add_entities(&mut self, entities: Vec<EntityDescription>) -> usize {
        let count = entities.len();
        for entity in entities {
            match entity.kind {
                EntityKind::Person => self.stats.persons += 1,
                EntityKind::CorporateBody => self.stats.corporate_bodies += 1,
                EntityKind::Other(_) => self.stats.other_entities += 1,
            }
            self.projector.project(entity);
        }
        count
    }

    #[must_use]
    pub fn stats(&self) -> ConvertStats {
        ConvertStats {
            places: self.projector.places().len(),
            triples: self.projector.graph().len(),
            ..self.stats.clone()
        }
    }

    #[must_use]
    pub fn graph(&self) -> &Graph {
        self.projector.graph()
    }

    #[must_use]
    pub fn finish(self) -> (Graph, ConvertStats) {
        let stats = self.stats();
        (self.projector.into_graph(), stats)
    }
}

fn record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::from(e).in_file(dir))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_xml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xml"));
        if is_xml && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
