//! Catalog Loader: fetch the font catalog document once at startup.
//!
//! The fetch itself is blocking (ureq or a file read) and runs on tokio's
//! blocking pool. The result comes back through a oneshot channel held by
//! [`PendingCatalog`]; dropping it aborts the task so a late result never
//! reaches a torn-down session.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use typepad_config::Config;
use typepad_fonts::{CatalogError, FontCatalog};

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// `http://` or `https://` URL.
    Url(String),
    /// Local file path.
    File(PathBuf),
}

impl CatalogSource {
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Url(url) => write!(f, "{url}"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Limits applied to a catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_bytes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl FetchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: Duration::from_secs(config.fetch_timeout_secs),
            max_bytes: config.max_catalog_bytes,
        }
    }
}

/// Why a catalog could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("catalog request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Transport failure: DNS, TLS, timeout, truncated body.
    #[error("catalog request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Local catalog file could not be read.
    #[error("failed to read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file exceeds the configured size limit.
    #[error("catalog file {path:?} is {size} bytes, over the {limit} byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: usize },

    /// The document was fetched but is not a catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The loader went away before producing a result.
    #[error("catalog load was cancelled")]
    Cancelled,
}

/// Fetch and parse the catalog, blocking the calling thread.
pub fn fetch_catalog(
    source: &CatalogSource,
    options: &FetchOptions,
) -> Result<FontCatalog, LoadError> {
    crate::debug_info!("CATALOG", "Fetching catalog from {}", source);

    let body = match source {
        CatalogSource::Url(url) => fetch_url(url, options)?,
        CatalogSource::File(path) => read_file(path, options)?,
    };

    let catalog = FontCatalog::from_json(&body)?;
    crate::debug_info!(
        "CATALOG",
        "Loaded {} families from {}",
        catalog.len(),
        source
    );
    Ok(catalog)
}

fn fetch_url(url: &str, options: &FetchOptions) -> Result<String, LoadError> {
    let agent = crate::http::agent(options.timeout);

    let mut response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::StatusCode(status) => LoadError::Status {
            url: url.to_string(),
            status,
        },
        other => LoadError::Http {
            url: url.to_string(),
            message: other.to_string(),
        },
    })?;

    response
        .body_mut()
        .with_config()
        .limit(options.max_bytes as u64)
        .read_to_string()
        .map_err(|e| LoadError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })
}

fn read_file(path: &Path, options: &FetchOptions) -> Result<String, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > options.max_bytes as u64 {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: options.max_bytes,
        });
    }
    std::fs::read_to_string(path).map_err(io_err)
}

/// An in-flight catalog load.
pub struct PendingCatalog {
    source: CatalogSource,
    rx: oneshot::Receiver<Result<FontCatalog, LoadError>>,
    task: tokio::task::JoinHandle<()>,
}

impl PendingCatalog {
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Non-blocking poll. `None` while the fetch is still running.
    pub fn try_take(&mut self) -> Option<Result<FontCatalog, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(LoadError::Cancelled)),
        }
    }

    /// Wait for the fetch to finish.
    pub async fn wait(mut self) -> Result<FontCatalog, LoadError> {
        (&mut self.rx).await.unwrap_or(Err(LoadError::Cancelled))
    }
}

impl Drop for PendingCatalog {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl fmt::Debug for PendingCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCatalog")
            .field("source", &self.source)
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

/// Spawns catalog loads on a tokio runtime.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Start loading `source` in the background.
    pub fn start(
        source: CatalogSource,
        options: FetchOptions,
        runtime: &Arc<tokio::runtime::Runtime>,
    ) -> PendingCatalog {
        let (tx, rx) = oneshot::channel();
        let task_source = source.clone();

        let task = runtime.spawn(async move {
            let label = task_source.to_string();
            // ureq is synchronous
            let result =
                match tokio::task::spawn_blocking(move || fetch_catalog(&task_source, &options))
                    .await
                {
                    Ok(result) => result,
                    Err(e) => {
                        log::error!("Catalog fetch task panicked for {}: {}", label, e);
                        Err(LoadError::Cancelled)
                    }
                };

            if tx.send(result).is_err() {
                log::debug!("Catalog receiver for {} dropped, discarding result", label);
            }
        });

        PendingCatalog { source, rx, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            CatalogSource::parse("https://fonts.example/catalog.json"),
            CatalogSource::Url("https://fonts.example/catalog.json".into())
        );
        assert_eq!(
            CatalogSource::parse(" http://localhost:8080/fonts.json "),
            CatalogSource::Url("http://localhost:8080/fonts.json".into())
        );
        assert_eq!(
            CatalogSource::parse("fonts.json"),
            CatalogSource::File(PathBuf::from("fonts.json"))
        );
    }

    #[test]
    fn test_default_options() {
        let options = FetchOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.max_bytes, 1_048_576);
    }
}
