//! Atomic JSON document I/O with corruption recovery.

use super::{StoreError, StoreResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const EMPTY_DOCUMENT: &[u8] = b"[]";
const MAX_BACKUP_ATTEMPTS: u32 = 1000;

/// Creates the parent directory and an empty `[]` document when missing.
pub(crate) fn ensure_file(path: &Path) -> StoreResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|err| StoreError::io("create directory", dir, err))?;
    }
    if path.exists() {
        return Ok(());
    }
    write_bytes_atomic(path, EMPTY_DOCUMENT)?;
    debug!(
        "event=store_init module=store status=ok file={}",
        display_name(path)
    );
    Ok(())
}

/// Reads and parses a document.
///
/// Returns `Ok(None)` when the document is empty or was corrupted; a
/// corrupted file is copied to a timestamped `.bak` sibling first.
/// `check` runs after parsing; a failed check counts as corruption.
pub(crate) fn read_document<T, F>(path: &Path, check: F) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    F: FnOnce(&T) -> Result<(), String>,
{
    ensure_file(path)?;
    let raw = fs::read(path).map_err(|err| StoreError::io("read", path, err))?;
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let parsed = serde_json::from_slice::<T>(&raw)
        .map_err(|err| err.to_string())
        .and_then(|value| check(&value).map(|()| value));

    match parsed {
        Ok(value) => Ok(Some(value)),
        Err(reason) => {
            let backup = backup_corrupted(path, &raw)?;
            warn!(
                "event=store_recover module=store status=recovered file={} backup={} reason={}",
                display_name(path),
                backup.display(),
                reason.replace(['\n', '\r'], " ")
            );
            Ok(None)
        }
    }
}

/// Serializes `value` pretty-printed and atomically replaces `path`.
pub(crate) fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let body = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &body)
}

fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = sibling_path(path, ".tmp");
    let written = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .map_err(|err| StoreError::io("write temp file", &tmp, err));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::io("replace", path, err));
    }
    Ok(())
}

/// Writes `raw` to `<file>.<epoch_ms>.bak`, adding `-N` when that exists.
fn backup_corrupted(path: &Path, raw: &[u8]) -> StoreResult<PathBuf> {
    let millis = chrono::Utc::now().timestamp_millis();
    for attempt in 0..MAX_BACKUP_ATTEMPTS {
        let suffix = if attempt == 0 {
            format!(".{millis}.bak")
        } else {
            format!(".{millis}-{attempt}.bak")
        };
        let backup = sibling_path(path, &suffix);
        match OpenOptions::new().write(true).create_new(true).open(&backup) {
            Ok(mut file) => {
                file.write_all(raw)
                    .and_then(|()| file.sync_all())
                    .map_err(|err| StoreError::io("write backup", &backup, err))?;
                return Ok(backup);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(StoreError::io("create backup", &backup, err)),
        }
    }
    Err(StoreError::io(
        "create backup",
        path,
        std::io::Error::new(ErrorKind::AlreadyExists, "no free backup name"),
    ))
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
