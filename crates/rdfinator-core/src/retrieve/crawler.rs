use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use super::{RecordSource, RecordStore, RetrieveError, RetrieveResult};
use crate::identifier::{classify_relation_target, RecordId};
use crate::relations::RelationType;
use crate::xml::parse_document;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RetrievalReport {
    /// Records fetched and stored, in fetch order
    pub fetched: Vec<RecordId>,
    /// Relation targets skipped because they were already known
    pub duplicates: usize,
}

/// Breadth-first fetch of records and the corporate bodies they relate to.
pub struct Retriever<S> {
    source: S,
    store: RecordStore,
    follow: Vec<RelationType>,
}

impl<S: RecordSource> Retriever<S> {
    pub fn new(source: S, store: RecordStore, follow: Vec<RelationType>) -> Self {
        Self {
            source,
            store,
            follow,
        }
    }

    /// Fetch every root and, transitively, each corporate-body target of a
    /// followed relation. Each identifier is fetched at most once per call.
    pub async fn retrieve(&self, roots: &[RecordId]) -> RetrieveResult<RetrievalReport> {
        let mut report = RetrievalReport::default();
        let mut visited: HashSet<RecordId> = HashSet::new();
        let mut frontier: VecDeque<RecordId> = VecDeque::new();

        for root in roots {
            if visited.insert(root.clone()) {
                frontier.push_back(root.clone());
            } else {
                report.duplicates += 1;
            }
        }

        while let Some(id) = frontier.pop_front() {
            tracing::info!("Fetching {id}");
            let document = self.source.fetch(&id).await?;
            let path = self.store.save(&id, &document).await?;
            tracing::debug!("Saved {id} to {}", path.display());

            for target in self.related_records(&id, &document)? {
                if visited.insert(target.clone()) {
                    tracing::debug!("Queueing {target} from {id}");
                    frontier.push_back(target);
                } else {
                    tracing::debug!("{target} already known, skipping");
                    report.duplicates += 1;
                }
            }

            report.fetched.push(id);
        }

        Ok(report)
    }

    fn related_records(&self, id: &RecordId, document: &str) -> RetrieveResult<Vec<RecordId>> {
        let root = parse_document(document).map_err(|source| RetrieveError::Record {
            id: id.to_string(),
            source,
        })?;

        Ok(root
            .descendants("cpfRelation")
            .into_iter()
            .filter(|relation| {
                let relation_type =
                    RelationType::parse(relation.attribute("cpfRelationType").unwrap_or(""));
                self.follow.contains(&relation_type)
            })
            .filter_map(classify_relation_target)
            .collect())
    }
}
