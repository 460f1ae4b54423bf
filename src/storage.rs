use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use log::debug;

pub const PDF_ROUTE: &str = "/pdfs";
const PDF_EXTENSION: &str = ".pdf";

/// Flat directory of uploaded documents. The directory is the only source of truth.
#[derive(Clone, Debug)]
pub struct PdfStore {
    dir: PathBuf,
}

impl PdfStore {
    /// Opens the store, creating the directory if it does not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under `filename`, replacing any existing file of that name.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(())
    }

    /// Names ending in `.pdf`, newest modification time first.
    pub async fn list_pdfs(&self) -> io::Result<Vec<String>> {
        let mut entries: Vec<(String, SystemTime)> = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = dir.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.ends_with(PDF_EXTENSION) {
                continue;
            }
            // Follows symlinks so a linked document sorts by its target's mtime.
            let modified = tokio::fs::metadata(entry.path()).await?.modified()?;
            entries.push((name, modified));
        }

        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(entries.into_iter().map(|(name, _)| name).collect())
    }
}

/// Public URL under which a stored file is served.
pub fn public_url(filename: &str) -> String {
    format!("{PDF_ROUTE}/{filename}")
}

/// Accepts only a single plain path component, so uploads cannot escape the store.
pub fn is_valid_filename(filename: &str) -> bool {
    if filename.is_empty() || filename.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
