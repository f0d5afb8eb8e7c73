//! Durable append: copy, extend, and atomically replace the log file.
//!
//! An append is staged into a temporary file next to the log and only becomes
//! visible when [`StagedAppend::commit`] renames it over the original. A
//! staged append that is dropped (or a process that dies before the rename)
//! leaves the log byte-identical.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// A new log file, fully written and synced, waiting to replace the old one.
#[derive(Debug)]
pub struct StagedAppend {
    temp: NamedTempFile,
    target: PathBuf,
    dir: PathBuf,
}

impl StagedAppend {
    /// Writes the current contents of `target` plus `line` to a temporary
    /// file in the same directory.
    ///
    /// A missing `target` stages a file holding only `line`.
    pub fn new(target: &Path, line: &str) -> io::Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;

        match fs::read(target) {
            Ok(existing) => {
                temp.write_all(&existing)?;
                if existing.last().is_some_and(|&b| b != b'\n') {
                    temp.write_all(b"\n")?;
                }
                let permissions = fs::metadata(target)?.permissions();
                fs::set_permissions(temp.path(), permissions)?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        temp.write_all(line.as_bytes())?;
        temp.write_all(b"\n")?;
        temp.as_file().sync_all()?;

        Ok(Self {
            temp,
            target: target.to_path_buf(),
            dir: dir.to_path_buf(),
        })
    }

    #[cfg(test)]
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Atomically replaces the target with the staged file, then syncs the
    /// directory so the rename itself survives a power loss.
    pub fn commit(self) -> io::Result<()> {
        self.temp.persist(&self.target).map_err(|e| e.error)?;
        sync_dir(&self.dir)
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

// Directories cannot be opened as files here; the rename is all we get.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
