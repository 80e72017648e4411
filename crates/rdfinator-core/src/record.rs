//! EAC-CPF record reader.
//!
//! Pulls the parts of a `cpfDescription` the projector needs into plain
//! structs. Apart from the identity block, every section is optional.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identifier::{classify_relation_target, extract_record_id, strip_document_suffix, RecordId};
use crate::relations::RelationType;
use crate::xml::{parse_document, Element};

/// Name-part key used when a `part` carries no `localType`.
pub const UNTYPED_PART: &str = "untyped";

/// `placeRole` text selecting an organization's primary site.
pub const START_PLACE: &str = "Start Place";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Person,
    CorporateBody,
    Other(String),
}

impl EntityKind {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "person" => Self::Person,
            "corporateBody" => Self::CorporateBody,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "person",
            Self::CorporateBody => "corporateBody",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceReference {
    /// Dedup key and identifier suffix.
    pub slug: String,
    pub address: String,
}

impl PlaceReference {
    /// Build from a free-text place label; `None` when no usable slug remains.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let slug = slugify(label.split(',').next().unwrap_or_default());
        (!slug.is_empty()).then(|| Self {
            slug,
            address: label.to_string(),
        })
    }
}

/// Keep only word characters.
#[must_use]
pub fn slugify(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDeclaration {
    pub relation_type: RelationType,
    /// `relationEntry@localType`, e.g. `Corporate Body` or `Person`.
    pub target_kind: Option<String>,
    /// `xlink:href` as written.
    pub href: Option<String>,
    /// Set when the target is a corporate body carrying a record identifier.
    pub local_target: Option<RecordId>,
}

impl RelationDeclaration {
    fn from_element(relation: &Element) -> Self {
        Self {
            relation_type: RelationType::parse(relation.attribute("cpfRelationType").unwrap_or("")),
            target_kind: relation
                .find("relationEntry")
                .and_then(|entry| entry.attribute("localType"))
                .map(str::to_string),
            href: relation
                .xlink_href()
                .map(str::trim)
                .filter(|href| !href.is_empty())
                .map(str::to_string),
            local_target: classify_relation_target(relation),
        }
    }

    /// Bare external reference for targets that are not local records.
    #[must_use]
    pub fn external_reference(&self) -> Option<&str> {
        self.href.as_deref().map(strip_document_suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescription {
    pub id: RecordId,
    /// `entityId` with the document suffix removed.
    pub source_uri: String,
    pub kind: EntityKind,
    pub name_parts: BTreeMap<String, String>,
    pub biography: Option<String>,
    pub subjects: Vec<String>,
    pub dates: Option<DateRange>,
    pub place: Option<PlaceReference>,
    pub relations: Vec<RelationDeclaration>,
}

impl EntityDescription {
    #[must_use]
    pub fn name_part(&self, key: &str) -> Option<&str> {
        self.name_parts.get(key).map(String::as_str)
    }

    fn from_element(description: &Element) -> Result<Self> {
        let entity_id = description
            .find("entityId")
            .ok_or(Error::MissingElement("entityId"))?
            .text();
        let id = extract_record_id(&entity_id)
            .ok_or_else(|| Error::MissingRecordId(entity_id.clone()))?;
        let kind = description
            .find("entityType")
            .map(|e| EntityKind::parse(&e.text()))
            .ok_or(Error::MissingElement("entityType"))?;

        Ok(Self {
            source_uri: strip_document_suffix(&entity_id).to_string(),
            id,
            kind,
            name_parts: description
                .find("nameEntry")
                .map(parse_name_parts)
                .unwrap_or_default(),
            biography: description.find("abstract").and_then(Element::non_empty_text),
            subjects: description
                .find("functions")
                .map(|functions| {
                    functions
                        .descendants("term")
                        .into_iter()
                        .filter_map(Element::non_empty_text)
                        .collect()
                })
                .unwrap_or_default(),
            dates: description.find("dateRange").map(parse_date_range),
            place: find_start_place(description),
            relations: description
                .descendants("cpfRelation")
                .into_iter()
                .map(RelationDeclaration::from_element)
                .collect(),
        })
    }
}

fn parse_name_parts(name_entry: &Element) -> BTreeMap<String, String> {
    let mut parts = BTreeMap::new();
    for part in name_entry.descendants("part") {
        let Some(text) = part.non_empty_text() else {
            continue;
        };
        let key = part.attribute("localType").unwrap_or(UNTYPED_PART);
        parts.insert(key.to_string(), text);
    }
    parts
}

fn parse_date_range(range: &Element) -> DateRange {
    let date = |name: &str| {
        range.find(name).and_then(|e| {
            e.attribute("standardDate")
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .or_else(|| e.non_empty_text())
        })
    };

    DateRange {
        from: date("fromDate"),
        to: date("toDate"),
    }
}

fn find_start_place(description: &Element) -> Option<PlaceReference> {
    description
        .descendants("place")
        .into_iter()
        .find(|place| {
            place
                .descendants("placeRole")
                .iter()
                .any(|role| role.text() == START_PLACE)
        })
        .and_then(|place| place.find("placeEntry"))
        .and_then(|entry| PlaceReference::from_label(&entry.text()))
}

/// Every entity description in an EAC-CPF document.
pub fn parse_record(document: &str) -> Result<Vec<EntityDescription>> {
    let root = parse_document(document)?;
    let blocks: Vec<&Element> = if root.local_name() == "cpfDescription" {
        vec![&root]
    } else {
        root.descendants("cpfDescription")
    };

    if blocks.is_empty() {
        return Err(Error::MissingElement("cpfDescription"));
    }

    blocks
        .into_iter()
        .map(EntityDescription::from_element)
        .collect()
}

/// Read and parse one record file; errors name the file.
pub fn parse_record_file(path: &Path) -> Result<Vec<EntityDescription>> {
    let document = std::fs::read_to_string(path).map_err(|e| Error::from(e).in_file(path))?;
    parse_record(&document).map_err(|e| e.in_file(path))
}
