//! Local fixtures standing in for network resources.

use std::path::{Path, PathBuf};

use gl_parity_core::{Error, Result};

/// Map `url` to a local file with `map_fn` and read it as UTF-8 text.
///
/// No caching and no retries: every call reads the file again.
pub async fn load_fixture<F>(url: &str, map_fn: F) -> Result<String>
where
    F: FnOnce(&str) -> PathBuf,
{
    let path = map_fn(url);
    tracing::debug!("Loading fixture for {} from {}", url, path.display());

    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| Error::FixtureNotFound {
            url: url.to_string(),
            path,
            source,
        })
}

/// A directory of fixtures addressed by URL path.
///
/// `http://host/api/a.json` maps to `<root>/api/a.json`; the scheme, host,
/// query and fragment are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRoot {
    root: PathBuf,
}

impl FixtureRoot {
    /// Create a fixture root at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path for `url`.
    pub fn map(&self, url: &str) -> PathBuf {
        let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        let path = if url.contains("://") {
            without_scheme
                .split_once('/')
                .map_or("", |(_host, path)| path)
        } else {
            without_scheme
        };
        let path = path.split(['?', '#']).next().unwrap_or_default();

        path.split('/')
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    /// Load the fixture for `url`.
    pub async fn load(&self, url: &str) -> Result<String> {
        load_fixture(url, |u| self.map(u)).await
    }
}
