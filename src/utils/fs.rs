//! Filesystem helpers shared by the run-state store and output writers.

use log::debug;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Create `dir` (and parents) if it does not exist yet
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        debug!("Creating directory: {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Write `contents` to `path` so readers see either the old file or the new one
///
/// The bytes go to a temp file in the target directory first, which is then
/// renamed over `path`. The temp file is removed on every error path.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
