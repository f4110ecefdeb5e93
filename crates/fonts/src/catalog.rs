//! Google Fonts catalog access.
//!
//! The catalog is reached through a [`CatalogConnector`], which hands out one
//! [`CatalogClient`] per registration batch. [`HttpConnector`] is the real
//! HTTPS implementation; tests substitute their own.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Catalog endpoint; the form-encoded family name is appended.
pub const CATALOG_URL: &str = "https://fonts.google.com/download/list?family=";

/// Length of the `)]}'\n` guard in front of every catalog response.
const RESPONSE_GUARD_LEN: usize = 5;

/// Global timeout for all catalog requests.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum accepted response body (font files included).
const MAX_RESPONSE_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("failed to read response from {url}: {message}")]
    Body { url: String, message: String },
}

/// An open connection to the catalog.
pub trait CatalogClient {
    /// Performs a GET request and returns the full response body.
    ///
    /// Non-success statuses are errors.
    fn get(&mut self, url: &str) -> Result<Vec<u8>, CatalogError>;

    /// Releases the client's connections. Called exactly once.
    fn close(&mut self) {}
}

/// Creates catalog clients.
pub trait CatalogConnector: Send + Sync + Debug {
    fn connect(&self) -> Box<dyn CatalogClient>;
}

/// URL of the catalog listing for `family`.
pub fn catalog_url(family: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(family.as_bytes()).collect();
    format!("{}{}", CATALOG_URL, encoded)
}

/// Strips the response guard and returns the `manifest` object.
pub fn parse_catalog_response(body: &[u8]) -> Result<Value, String> {
    let json = body
        .get(RESPONSE_GUARD_LEN..)
        .ok_or_else(|| format!("response is only {} bytes long", body.len()))?;
    let mut value: Value = serde_json::from_slice(json).map_err(|e| e.to_string())?;
    match value.get_mut("manifest").map(Value::take) {
        Some(manifest @ Value::Object(_)) => Ok(manifest),
        Some(_) => Err("`manifest` is not an object".to_string()),
        None => Err("response has no `manifest`".to_string()),
    }
}

/// The parts of a family manifest used to populate the cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub files: Vec<ManifestFile>,
    #[serde(default, rename = "fileRefs")]
    pub file_refs: Vec<FileRef>,
}

/// A file shipped inline in the manifest (licence text, etc).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestFile {
    pub filename: String,
    pub contents: String,
}

/// A font file to download separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub filename: String,
    pub url: String,
}

/// HTTPS connector built on `ureq` with native TLS.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    user_agent: String,
}

impl HttpConnector {
    pub fn new() -> Self {
        Self {
            user_agent: format!("styled-prose/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogConnector for HttpConnector {
    fn connect(&self) -> Box<dyn CatalogClient> {
        let tls_config = TlsConfig::builder()
            .provider(TlsProvider::NativeTls)
            .root_certs(RootCerts::PlatformVerifier)
            .build();

        let agent: Agent = Agent::config_builder()
            .tls_config(tls_config)
            .timeout_global(Some(HTTP_TIMEOUT))
            .build()
            .into();

        log::debug!("Opened font catalog client ({})", self.user_agent);
        Box::new(HttpClient {
            agent: Some(agent),
            user_agent: self.user_agent.clone(),
        })
    }
}

struct HttpClient {
    agent: Option<Agent>,
    user_agent: String,
}

impl CatalogClient for HttpClient {
    fn get(&mut self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let agent = self.agent.as_ref().ok_or_else(|| CatalogError::Request {
            url: url.to_string(),
            message: "client already closed".to_string(),
        })?;

        agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| CatalogError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?
            .into_body()
            .with_config()
            .limit(MAX_RESPONSE_SIZE)
            .read_to_vec()
            .map_err(|e| CatalogError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    fn close(&mut self) {
        if self.agent.take().is_some() {
            log::debug!("Closed font catalog client");
        }
    }
}

/// A client that is only connected on first use and closed when dropped.
pub(crate) struct LazyClient<'a> {
    connector: &'a dyn CatalogConnector,
    client: Option<Box<dyn CatalogClient>>,
}

impl<'a> LazyClient<'a> {
    pub(crate) fn new(connector: &'a dyn CatalogConnector) -> Self {
        Self {
            connector,
            client: None,
        }
    }

    pub(crate) fn get(&mut self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let connector = self.connector;
        self.client
            .get_or_insert_with(|| connector.connect())
            .get(url)
    }
}

impl Drop for LazyClient<'_> {
    fn drop(&mut self) {
        if let Some(mut client) = self.client.take() {
            client.close();
        }
    }
}
