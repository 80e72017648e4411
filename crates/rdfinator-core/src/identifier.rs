use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::xml::Element;

/// `relationEntry@localType` value marking a corporate-body target.
pub const CORPORATE_BODY: &str = "Corporate Body";

/// `relationEntry@localType` value marking a person target.
pub const PERSON: &str = "Person";

static RECORD_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][0-9]{6}").expect("record id pattern is valid"));

const DOCUMENT_SUFFIXES: [&str; 2] = [".html", ".htm"];

/// Canonical record identifier: one letter followed by six digits, e.g. `A000196`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// First `letter + six digits` run in `text`.
#[must_use]
pub fn extract_record_id(text: &str) -> Option<RecordId> {
    RECORD_ID
        .find(text)
        .map(|m| RecordId(m.as_str().to_string()))
}

/// Record identifier of a `cpfRelation` target, only when the relation
/// declares that target as a corporate body.
#[must_use]
pub fn classify_relation_target(relation: &Element) -> Option<RecordId> {
    let entry = relation.find("relationEntry")?;
    if entry.attribute("localType") != Some(CORPORATE_BODY) {
        return None;
    }

    relation
        .xlink_href()
        .and_then(extract_record_id)
}

/// Drop a trailing `.htm`/`.html` so a page locator becomes a bare reference.
#[must_use]
pub fn strip_document_suffix(text: &str) -> &str {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();

    DOCUMENT_SUFFIXES
        .iter()
        .find(|suffix| lower.ends_with(*suffix))
        .map_or(trimmed, |suffix| &trimmed[..trimmed.len() - suffix.len()])
}
