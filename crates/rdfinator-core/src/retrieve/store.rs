use std::path::{Path, PathBuf};

use super::RetrieveResult;
use crate::identifier::RecordId;

/// Local directory of fetched records, one `{id}.xml` file each.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, id: &RecordId) -> PathBuf {
        self.dir.join(format!("{id}.xml"))
    }

    /// Write `document`, replacing any earlier copy.
    pub async fn save(&self, id: &RecordId, document: &str) -> RetrieveResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(id);
        tokio::fs::write(&path, document).await?;
        Ok(path)
    }
}
