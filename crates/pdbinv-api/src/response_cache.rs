// On-disk cache of raw PuppetDB responses for development runs.
//
// Each endpoint URL maps to one file named after the SHA-256 of the full URL,
// so names stay short for any host and distinct URLs never share a file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;

/// Directory of cached response bodies, keyed by full endpoint URL.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the cached body for `url`.
    pub fn path_for(&self, url: &Url) -> PathBuf {
        let digest = Sha256::digest(url.as_str().as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    /// Cached body for `url`, or `None` when nothing has been stored yet.
    pub async fn load(&self, url: &Url) -> Result<Option<String>, Error> {
        let path = self.path_for(url);
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => {
                debug!(path = %path.display(), "response cache hit");
                Ok(Some(body))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %path.display(), "response cache miss");
                Ok(None)
            }
            Err(source) => Err(Error::ResponseCache { path, source }),
        }
    }

    /// Persist `body` as the cached response for `url`.
    pub async fn store(&self, url: &Url, body: &str) -> Result<(), Error> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| Error::ResponseCache {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(url);
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| Error::ResponseCache {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = body.len(), "response cached");
        Ok(())
    }
}
