mod client;
mod crawler;
mod store;

pub use client::{extract_eac_cpf, OaiClient, RecordSource};
pub use crawler::{RetrievalReport, Retriever};
pub use store::RecordStore;

#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Malformed response: {0}")]
    Envelope(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unreadable record {id}: {source}")]
    Record {
        id: String,
        #[source]
        source: crate::Error,
    },
    #[error("No eac-cpf record in response for {0}")]
    MissingRecord(String),
}

pub type RetrieveResult<T> = Result<T, RetrieveError>;
