//! HTTP(S) collection source.
//!
//! Read-only: a document fetched from a URL is exported to a local file
//! instead of being written back.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::storage::{CollectionSource, LoadError, WriteError};

/// A collection document served over HTTP.
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    /// Create a source for `url` whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Transport` if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Transport {
                location: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    fn transport_error(&self, e: &reqwest::Error) -> LoadError {
        LoadError::Transport {
            location: self.url.clone(),
            message: e.to_string(),
        }
    }
}

impl CollectionSource for HttpSource {
    fn read_document(&self) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                location: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| self.transport_error(&e))
    }

    fn write_document(&self, _contents: &[u8]) -> Result<(), WriteError> {
        Err(WriteError::ReadOnly(self.url.clone()))
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}
