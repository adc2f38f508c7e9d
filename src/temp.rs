//! Temporary file management module
//!
//! This module provides RAII-based temporary file handling with automatic cleanup.
//! The store writes documents through a temporary sibling file and renames it
//! over the target once the content is complete.

use std::fs::{self, File};
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Guard for a temporary file that is deleted on drop unless persisted
#[derive(Debug)]
pub(crate) struct TempGuard {
    path: PathBuf,
    persisted: bool,
}

impl TempGuard {
    /// Get the path to the temporary file
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Moves the temporary file to `target`, replacing it if it exists.
    ///
    /// After a successful rename the guard no longer removes anything.
    pub(crate) fn persist(mut self, target: &Path) -> io::Result<()> {
        fs::rename(&self.path, target)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if !self.persisted {
            // Silently ignore errors during cleanup
            let _ = fs::remove_file(&self.path);
        }
    }
}

impl Deref for TempGuard {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.path()
    }
}

/// Creates a temporary file inside `dir` and returns a guard that will clean
/// it up on drop
///
/// The file gets a unique name generated using ULID (monotonic, sortable
/// unique identifier). Keeping it in the target's directory means a later
/// [`TempGuard::persist`] is a same-filesystem rename.
///
/// # Examples
///
/// ```ignore
/// let temp = create_temp_file(&data_dir, "show", "tmp")?;
/// fs::write(temp.path(), content)?;
/// temp.persist(&data_dir.join("show.json"))?;
/// ```
pub(crate) fn create_temp_file(dir: &Path, prefix: &str, extension: &str) -> io::Result<TempGuard> {
    let ulid = ulid::Ulid::new();
    let filename = format!("{}_{}.{}", prefix, ulid, extension);

    let path = dir.join(filename);

    File::create(&path)?;

    Ok(TempGuard {
        path,
        persisted: false,
    })
}
