//! Reading record documents from the records directory.

use desec_core::{DesecError, RecordDocument, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// List the `*.json` files directly inside `dir`, sorted by file name.
pub async fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source| DesecError::Read {
        path: dir.display().to_string(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_err)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let path = entry.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if is_json && entry.file_type().await.map_err(read_err)?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "found record documents");
    Ok(files)
}

/// Read and parse one record document.
pub async fn load_document(path: &Path) -> Result<RecordDocument> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DesecError::Read {
            path: path.display().to_string(),
            source,
        })?;

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    RecordDocument::from_json(&name, &text)
}
