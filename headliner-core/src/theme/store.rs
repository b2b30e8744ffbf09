use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::color::{DEFAULT_BACKGROUND, ThemeColor};
use super::contrast::ThemePalette;

#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("failed to read theme file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write theme file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a theme change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeUpdate {
    Applied(ThemeColor),
    /// Candidate was not a 6-digit hex color; nothing was written.
    Rejected,
}

/// File-backed holder of the single global background color.
///
/// The file contains one `#RRGGBB` token. Writes land through a temporary
/// file and a rename, so concurrent readers observe either the old or the
/// new value. There is no further coordination: the last write wins.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the default color if nothing has been persisted yet.
    /// Returns `true` when the file was created.
    pub async fn initialize(&self) -> Result<bool, ThemeStoreError> {
        let exists = tokio::fs::try_exists(&self.path).await.map_err(|source| {
            ThemeStoreError::Read {
                path: self.path.clone(),
                source,
            }
        })?;
        if exists {
            debug!(path = %self.path.display(), "theme file present");
            return Ok(false);
        }

        self.persist(ThemeColor::default_background()).await?;
        info!(
            path = %self.path.display(),
            "initialized theme file with default background"
        );
        Ok(true)
    }

    /// The persisted value, trimmed but otherwise unvalidated.
    pub async fn read_raw(&self) -> Result<String, ThemeStoreError> {
        let contents =
            tokio::fs::read_to_string(&self.path).await.map_err(|source| {
                ThemeStoreError::Read {
                    path: self.path.clone(),
                    source,
                }
            })?;
        Ok(contents.trim().to_string())
    }

    /// The persisted value, or the default background when it cannot be read.
    pub async fn current(&self) -> String {
        match self.read_raw().await {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "falling back to default background");
                DEFAULT_BACKGROUND.to_string()
            }
        }
    }

    pub async fn palette(&self) -> ThemePalette {
        ThemePalette::resolve(self.current().await)
    }

    /// Validates `candidate` and persists it as `#RRGGBB` when it is a
    /// 6-digit hex color. Invalid candidates leave the stored value alone.
    pub async fn write(
        &self,
        candidate: &str,
    ) -> Result<ThemeUpdate, ThemeStoreError> {
        let Some(color) = ThemeColor::parse(candidate) else {
            debug!(candidate, "ignoring invalid theme color");
            return Ok(ThemeUpdate::Rejected);
        };

        self.persist(color.clone()).await?;
        info!(color = %color, "theme color updated");
        Ok(ThemeUpdate::Applied(color))
    }

    async fn persist(&self, color: ThemeColor) -> Result<(), ThemeStoreError> {
        let path = self.path.clone();
        let write_path = path.clone();
        tokio::task::spawn_blocking(move || {
            write_atomically(&write_path, &color.to_string())
        })
        .await
        .map_err(io::Error::other)
        .and_then(|result| result)
        .map_err(|source| ThemeStoreError::Write { path, source })
    }
}

fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.flush()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ContrastColor;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ThemeStore {
        ThemeStore::new(dir.path().join("theme.txt"))
    }

    #[tokio::test]
    async fn initialize_writes_default_once() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.initialize().await.unwrap());
        assert_eq!(store.read_raw().await.unwrap(), "#ffffff");

        store.write("#123456").await.unwrap();
        assert!(!store.initialize().await.unwrap());
        assert_eq!(store.current().await, "#123456");
    }

    #[tokio::test]
    async fn initialize_leaves_existing_content_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "not-a-color\n").unwrap();

        assert!(!store.initialize().await.unwrap());
        assert_eq!(store.current().await, "not-a-color");
    }

    #[tokio::test]
    async fn missing_file_reads_as_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(matches!(
            store.read_raw().await,
            Err(ThemeStoreError::Read { .. })
        ));
        assert_eq!(store.current().await, "#ffffff");
    }

    #[tokio::test]
    async fn write_without_hash_persists_with_hash() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let update = store.write("123abc").await.unwrap();
        let expected = ThemeColor::parse("123abc").unwrap();
        assert_eq!(update, ThemeUpdate::Applied(expected));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "#123abc");
    }

    #[tokio::test]
    async fn invalid_write_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write("#0a0b0c").await.unwrap();

        for candidate in ["notacolor", "#12345", "", "#gggggg"] {
            let update = store.write(candidate).await.unwrap();
            assert_eq!(update, ThemeUpdate::Rejected);
        }
        assert_eq!(store.current().await, "#0a0b0c");
    }

    #[tokio::test]
    async fn palette_pairs_background_with_contrast() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write("#000000").await.unwrap();

        let palette = store.palette().await;
        assert_eq!(palette.background, "#000000");
        assert_eq!(palette.text, ContrastColor::White);
    }

    #[tokio::test]
    async fn write_into_missing_directory_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("theme.txt");
        let store = ThemeStore::new(path);

        assert!(matches!(
            store.write("#abcdef").await,
            Err(ThemeStoreError::Write { .. })
        ));
    }
}
