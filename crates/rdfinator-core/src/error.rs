use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid XML attribute: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Unbalanced XML: {0}")]
    UnbalancedXml(String),

    #[error("Missing element <{0}>")]
    MissingElement(&'static str),

    #[error("No record identifier in entityId: {0:?}")]
    MissingRecordId(String),

    #[error("{path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid IRI <{iri}>: {source}")]
    InvalidIri {
        iri: String,
        #[source]
        source: oxrdf::IriParseError,
    },

    #[error("{term} cannot be used as {position}")]
    MisplacedTerm { position: &'static str, term: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Attach the originating file to a parse failure.
    #[must_use]
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
