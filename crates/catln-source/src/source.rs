//! Sources of compiler dumps.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::error::SourceError;

/// Address of a locally running compiler server.
pub const DEFAULT_URL: &str = "http://localhost:8080";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can produce the JSON payload for a server path.
pub trait DocumentSource {
    /// Fetches the payload served at `path`, e.g. `/pages`.
    fn fetch(&self, path: &str) -> Result<Value, SourceError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn fetch(&self, path: &str) -> Result<Value, SourceError> {
        (**self).fetch(path)
    }
}

impl<S: DocumentSource + ?Sized> DocumentSource for Box<S> {
    fn fetch(&self, path: &str) -> Result<Value, SourceError> {
        (**self).fetch(path)
    }
}

/// Settings for [`HttpSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    /// Server address without a trailing path, e.g. `http://localhost:8080`.
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

impl HttpSourceConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: REQUEST_TIMEOUT,
            user_agent: format!("catln-webdocs/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Fetches dumps from a running compiler server with blocking GET requests.
pub struct HttpSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self, path: &str) -> Result<Value, SourceError> {
        let url = self.config.url(path);
        debug!(%url, "fetching dump");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Value>().map_err(|e| SourceError::Json {
            origin: url,
            message: e.to_string(),
        })
    }
}

/// Reads dumps saved as `<root>/<path>.json`, e.g. `dumps/pages.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File holding the dump for `path`.
    pub fn file_for(&self, path: &str) -> Result<PathBuf, SourceError> {
        let relative = path.trim_matches('/');
        let invalid = relative.is_empty()
            || relative
                .split('/')
                .any(|segment| segment.is_empty() || segment == "." || segment == "..");
        if invalid {
            return Err(SourceError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(format!("{relative}.json")))
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self, path: &str) -> Result<Value, SourceError> {
        let file = self.file_for(path)?;
        debug!(file = %file.display(), "reading dump");

        let contents = fs::read_to_string(&file).map_err(|e| SourceError::Io {
            path: file.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|e| SourceError::Json {
            origin: file.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_with_a_single_slash() {
        let config = HttpSourceConfig::new("http://localhost:8080/");
        assert_eq!(config.url("/pages"), "http://localhost:8080/pages");
        assert_eq!(config.url("llvm"), "http://localhost:8080/llvm");
    }

    #[test]
    fn default_config_points_at_localhost() {
        let config = HttpSourceConfig::default();
        assert_eq!(config.base_url, DEFAULT_URL);
        assert_eq!(config.timeout, REQUEST_TIMEOUT);
        assert!(config.user_agent.starts_with("catln-webdocs/"));
    }

    #[test]
    fn directory_paths_stay_inside_the_root() {
        let source = DirectorySource::new("/dumps");
        assert_eq!(
            source.file_for("/pages").unwrap(),
            PathBuf::from("/dumps/pages.json")
        );
        assert_eq!(
            source.file_for("/a/b").unwrap(),
            PathBuf::from("/dumps/a/b.json")
        );
        assert!(matches!(
            source.file_for("/../etc"),
            Err(SourceError::InvalidPath(_))
        ));
        assert!(source.file_for("/").is_err());
    }
}
