//! Atomic write primitives
//!
//! Uses temp→fsync→rename so readers only ever see the old or the new file

use crate::errors::{io_error, persistence_error, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sibling temp path for `target_path`: `<name>.tmp` in the same directory
pub fn temp_path_for(target_path: &Path) -> Result<PathBuf> {
    let file_name = target_path
        .file_name()
        .ok_or_else(|| persistence_error("atomic_write", "target path has no file name"))?;

    let mut temp_name = OsString::from(file_name);
    temp_name.push(".tmp");
    Ok(target_path.with_file_name(temp_name))
}

/// Atomically write bytes to a file
///
/// Parent directories are created on demand. The content is flushed to disk
/// before the temp file replaces the target, so a crash leaves either the
/// previous file or the complete new one.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_snapshot_dir", e))?;
        }
    }

    let temp_path = temp_path_for(target_path)?;

    let write_temp = || -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()
    };
    if let Err(e) = write_temp() {
        fs::remove_file(&temp_path).ok();
        return Err(io_error("write_snapshot_temp", e));
    }

    if let Err(e) = fs::rename(&temp_path, target_path) {
        fs::remove_file(&temp_path).ok();
        return Err(io_error("rename_snapshot_temp", e));
    }

    Ok(())
}
