//! Local directory backend
//!
//! Revisions are the SHA-256 of the stored bytes, so a writer holding a
//! stale revision is refused the same way the remote store refuses it.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::ContentPublisher;
use crate::errors::{AppError, AppResult, PublishError};

pub struct LocalPublisher {
    root: PathBuf,
}

impl LocalPublisher {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a document path inside the root directory
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path);
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if path.is_empty() || !is_plain {
            return Err(AppError::validation(format!(
                "artifact path '{path}' must be relative to the output directory"
            )));
        }
        Ok(self.root.join(relative))
    }

    fn revision_of(bytes: &[u8]) -> String {
        hex::encode(Sha256::digest(bytes))
    }

    async fn read_revision(&self, file: &Path) -> AppResult<Option<String>> {
        match tokio::fs::read(file).await {
            Ok(bytes) => Ok(Some(Self::revision_of(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ContentPublisher for LocalPublisher {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn get_current_revision(&self, path: &str) -> AppResult<Option<String>> {
        let file = self.resolve(path)?;
        self.read_revision(&file).await
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        _message: &str,
        revision: Option<&str>,
    ) -> AppResult<()> {
        let file = self.resolve(path)?;
        let current = self.read_revision(&file).await?;
        if current.as_deref() != revision {
            return Err(PublishError::Conflict {
                path: path.to_string(),
            }
            .into());
        }

        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file, content).await?;
        debug!(path = %file.display(), bytes = content.len(), "Wrote artifact");
        Ok(())
    }
}
