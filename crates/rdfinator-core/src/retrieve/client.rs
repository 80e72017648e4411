use std::time::Duration;

use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use url::Url;

use super::{RetrieveError, RetrieveResult};
use crate::config::RetrieveConfig;
use crate::identifier::RecordId;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Somewhere EAC-CPF documents can be fetched from by record identifier.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// The standalone `eac-cpf` document for `id`.
    async fn fetch(&self, id: &RecordId) -> RetrieveResult<String>;
}

/// OAI-PMH `GetRecord` client for the EOAS provider.
pub struct OaiClient {
    base_url: String,
    inner: Client,
}

impl OaiClient {
    pub fn new(config: &RetrieveConfig) -> RetrieveResult<Self> {
        Url::parse(&config.base_url)?;

        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("rdfinator/{}", env!("CARGO_PKG_VERSION")));
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(Duration::from_secs(u64::from(config.request_timeout_seconds)))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            inner,
        })
    }

    #[must_use]
    pub fn record_url(&self, id: &RecordId) -> String {
        format!("{}{id}", self.base_url)
    }
}

#[async_trait::async_trait]
impl RecordSource for OaiClient {
    async fn fetch(&self, id: &RecordId) -> RetrieveResult<String> {
        let url = self.record_url(id);
        tracing::debug!("GET {url}");

        let body = self
            .inner
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        extract_eac_cpf(&body)?.ok_or_else(|| RetrieveError::MissingRecord(id.to_string()))
    }
}

/// Cut the first `eac-cpf` element out of a response envelope, as a
/// standalone document. `None` when the response carries no record, as with
/// an OAI-PMH `idDoesNotExist` error.
pub fn extract_eac_cpf(response: &str) -> RetrieveResult<Option<String>> {
    let mut reader = Reader::from_str(response);
    let mut start = None;
    let mut depth = 0usize;

    loop {
        let before = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"eac-cpf" => {
                if depth == 0 {
                    start = Some(before);
                }
                depth += 1;
            }
            Event::End(e) if e.local_name().as_ref() == b"eac-cpf" => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(start) = start {
                        let end = reader.buffer_position() as usize;
                        return Ok(Some(standalone(&response[start..end])));
                    }
                }
            }
            Event::Empty(e) if depth == 0 && e.local_name().as_ref() == b"eac-cpf" => {
                let end = reader.buffer_position() as usize;
                return Ok(Some(standalone(&response[before..end])));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn standalone(element: &str) -> String {
    format!("{XML_DECLARATION}{}\n", element.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OAI-PMH xmlns="http://www.openarchives.org/OAI/2.0/">
  <responseDate>2014-02-01T00:00:00Z</responseDate>
  <GetRecord><record><metadata>
    <eac-cpf xmlns="urn:isbn:1-931666-33-4"><cpfDescription><identity><entityId>A000196</entityId></identity></cpfDescription></eac-cpf>
  </metadata></record></GetRecord>
</OAI-PMH>"#;

    #[test]
    fn test_extract_from_envelope() {
        let record = extract_eac_cpf(ENVELOPE).unwrap().unwrap();
        assert!(record.starts_with(XML_DECLARATION));
        assert!(record.contains(r#"<eac-cpf xmlns="urn:isbn:1-931666-33-4">"#));
        assert!(record.trim_end().ends_with("</eac-cpf>"));
        assert!(!record.contains("OAI-PMH"));
    }

    #[test]
    fn test_extract_missing_record() {
        let error = r#"<OAI-PMH><error code="idDoesNotExist">No such record</error></OAI-PMH>"#;
        assert!(extract_eac_cpf(error).unwrap().is_none());
    }

    #[test]
    fn test_record_url() {
        let config = RetrieveConfig {
            base_url: "http://localhost:8080/record?id=".to_string(),
            ..Default::default()
        };
        let client = OaiClient::new(&config).unwrap();
        let id = crate::identifier::extract_record_id("A000196").unwrap();
        assert_eq!(client.record_url(&id), "http://localhost:8080/record?id=A000196");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = RetrieveConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(OaiClient::new(&config), Err(RetrieveError::Url(_))));
    }
}
