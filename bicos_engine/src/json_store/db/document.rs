use std::path::{Path, PathBuf};

use log::*;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{db_types::Document, traits::StoreError};

/// Reads and parses the document at `path`. Returns `None` if the file does not exist.
pub async fn load_document(path: &Path) -> Result<Option<Document>, StoreError> {
    let contents = match tokio::fs::read(path).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::PersistenceError(format!("Could not read {}. {e}", path.display()))),
    };
    let doc = serde_json::from_slice::<Document>(&contents)
        .map_err(|e| StoreError::PersistenceError(format!("{} is not a valid data file. {e}", path.display())))?;
    debug!(
        "🗃️ Loaded {}: {} stores, {} products, {} conversations, {} transactions",
        path.display(),
        doc.stores.len(),
        doc.products.len(),
        doc.conversations.len(),
        doc.transactions.len()
    );
    Ok(Some(doc))
}

/// Serializes the document pretty-printed, indented with tabs.
pub fn to_pretty_json(doc: &Document) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::with_capacity(4096);
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    doc.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Replaces the file at `path` with the full contents of `doc`.
///
/// The data is written to a sibling temporary file which is then renamed over the original, so a failed write
/// leaves the previous file intact.
pub async fn write_document(path: &Path, doc: &Document) -> Result<(), StoreError> {
    let data = to_pretty_json(doc)?;
    let tmp = temp_path_for(path);
    tokio::fs::write(&tmp, &data)
        .await
        .map_err(|e| StoreError::PersistenceError(format!("Could not write {}. {e}", tmp.display())))?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(StoreError::PersistenceError(format!("Could not replace {}. {e}", path.display())));
    }
    trace!("🗃️ {} bytes written to {}", data.len(), path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "data.json".into());
    path.with_file_name(format!(".{name}.tmp"))
}
