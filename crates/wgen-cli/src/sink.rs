//! Filesystem sink: one pretty-printed JSON file per document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use wgen_core::render::TaskDocument;

/// Writes documents into a destination directory, creating it if absent.
/// Writes are independent per document; a failure does not roll back files
/// already written.
#[derive(Debug)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Create the sink, creating `dir` and its parents if needed.
    pub fn create(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `<name>.json`: 2-space indented, UTF-8, non-ASCII preserved.
    pub fn write(&self, name: &str, document: &TaskDocument) -> anyhow::Result<PathBuf> {
        let path = self.dir.join(format!("{name}.json"));
        let body = serde_json::to_string_pretty(document)
            .with_context(|| format!("failed to serialize document '{name}'"))?;
        fs::write(&path, body)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        Ok(path)
    }
}
