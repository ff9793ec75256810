//! Filesystem primitives for the store: owner-only directories and files,
//! whole-file JSON writes, and reads that never fail.
//!
//! On platforms without POSIX permission bits the permission steps are
//! no-ops; everything else behaves the same.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{Result, StoreError};

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};

/// Mode for the store directory: owner read/write/traverse only.
pub const DIR_MODE: u32 = 0o700;

/// Mode for every managed file: owner read/write only.
pub const FILE_MODE: u32 = 0o600;

/// Create `dir` (and missing parents) owner-only if it does not exist.
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);
    builder.create(dir).map_err(|e| StoreError::io(dir, e))?;
    debug!(path = %dir.display(), "Created store directory");
    Ok(())
}

/// Reset the store directory to [`DIR_MODE`] if it exists.
pub fn harden_dir(dir: &Path) -> Result<()> {
    restrict(dir, DIR_MODE)
}

/// Reset a managed file to [`FILE_MODE`] if it exists.
pub fn harden_file(path: &Path) -> Result<()> {
    restrict(path, FILE_MODE)
}

#[cfg(unix)]
fn restrict(path: &Path, mode: u32) -> Result<()> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    let current = meta.permissions().mode() & 0o777;
    if current == mode {
        return Ok(());
    }
    warn!(
        path = %path.display(),
        from = %format!("{current:o}"),
        to = %format!("{mode:o}"),
        "Tightening permissions"
    );
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| StoreError::io(path, e))
}

#[cfg(not(unix))]
fn restrict(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Serialize `value` as pretty JSON and replace `path` with it.
///
/// The data goes to a hidden sibling file created with [`FILE_MODE`] and is
/// then renamed over `path`, so readers see either the old record or the
/// new one in full.
pub fn write_private_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let contents =
        serde_json::to_string_pretty(value).map_err(|e| StoreError::serialize(path, e))?;
    let tmp = temp_path_for(path);

    if let Err(e) = write_private(&tmp, contents.as_bytes()) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::io(path, e));
    }
    trace!(path = %path.display(), bytes = contents.len(), "Wrote record");
    Ok(())
}

/// Write `bytes` to a fresh owner-only file, replacing whatever was there.
fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(FILE_MODE);
    let mut file = opts.open(path).map_err(|e| StoreError::io(path, e))?;
    // `mode` only applies on creation; a leftover temp file keeps its old bits.
    harden_file(path)?;
    file.write_all(bytes).map_err(|e| StoreError::io(path, e))?;
    file.sync_all().map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// Hidden sibling used while replacing `path`.
///
/// Example: `~/.gmcli/accounts.json` → `~/.gmcli/.accounts.json.tmp`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let filename = path.file_name().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!(".{filename}.tmp"))
}

/// Read and decode a JSON record.
///
/// Returns `None` when the file is missing, unreadable, or does not decode
/// as `T`. Failures are logged at debug level and never reported.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Unreadable record, treating as absent");
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Malformed record, treating as absent");
            None
        }
    }
}

/// Delete `path`. Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::io(path, e)),
    }
}
