pub mod config;
pub mod convert;
pub mod error;
pub mod graph;
pub mod identifier;
pub mod places;
pub mod projector;
pub mod record;
pub mod relations;
pub mod retrieve;
pub mod serialize;
pub mod vocab;
pub mod xml;

pub use config::{Config, ConfigError, ConvertConfig, NamespaceConfig, RetrieveConfig};
pub use convert::{ConvertStats, Converter};
pub use error::{Error, Result};
pub use graph::{Graph, Term, Triple};
pub use identifier::{extract_record_id, RecordId};
pub use projector::Projector;
pub use record::{parse_record, parse_record_file, EntityDescription, EntityKind};
pub use relations::RelationType;
pub use retrieve::{OaiClient, RecordSource, RecordStore, RetrievalReport, RetrieveError, Retriever};
pub use serialize::{serialize, to_ntriples, to_turtle, GraphFormat};
pub use vocab::Namespace;
