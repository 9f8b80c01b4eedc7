//! Remote content store over the HTTP query API.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use ureq::Agent;

use folio_config::StoreConfig;

use crate::error::StoreError;
use crate::query::Query;
use crate::store::ContentStore;

/// RFC 3986 unreserved characters are left as is.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE_SET).to_string()
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Content store client.
pub struct HttpStore {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpStore {
    /// Create a client from store configuration.
    pub fn new(config: &StoreConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        let host = if config.use_cdn {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };

        Self {
            agent,
            base_url: format!(
                "https://{}.{host}/v{}/data/query/{}",
                config.project_id, config.api_version, config.dataset
            ),
            token: config.token.clone(),
        }
    }

    /// Full request URL for a query, parameters JSON-encoded.
    fn query_url(&self, query: &Query) -> String {
        let mut url = format!("{}?query={}", self.base_url, encode(&query.groq()));
        for (name, value) in query.params() {
            url.push_str(&format!("&%24{name}={}", encode(&value.to_string())));
        }
        url
    }
}

impl ContentStore for HttpStore {
    fn query(&self, query: &Query) -> Result<Value, StoreError> {
        let url = self.query_url(query);
        debug!(query = query.name(), "Querying content store");

        let mut request = self.agent.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let response = request.call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(StoreError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let response: QueryResponse = body_reader.read_json()?;
        Ok(response.result)
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}
