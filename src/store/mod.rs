mod csv_format;

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fd_lock::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::Ledger;

/// CSV-backed home of the full expense history.
///
/// Every write goes to a fresh temp file in the ledger's directory that is
/// then renamed over the ledger, so a crash mid-save leaves the previous
/// contents intact. Writers take an exclusive advisory lock on a sibling
/// `<file>.lock`, held from load to rename in `update`. Any number of
/// handles, in one process or several, can share a path without losing
/// each other's changes.
pub(crate) struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger. A missing file is an empty ledger; anything else
    /// that goes wrong is reported.
    pub(crate) fn load(&self) -> Result<Ledger> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No ledger file yet, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(e.into()),
        };
        let ledger = csv_format::read_ledger(file).inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Ledger file is unreadable");
        })?;
        debug!(path = %self.path.display(), records = ledger.len(), "Loaded ledger");
        Ok(ledger)
    }

    /// Replace the stored ledger with `ledger`.
    pub(crate) fn save(&self, ledger: &Ledger) -> Result<()> {
        self.locked(|| self.replace(ledger))
    }

    /// Locked read-modify-write. `apply` sees the ledger as currently stored;
    /// if it returns an error nothing is written.
    pub(crate) fn update<T>(
        &self,
        apply: impl FnOnce(&mut Ledger) -> Result<T>,
    ) -> Result<(Ledger, T)> {
        self.locked(|| {
            let mut ledger = self.load()?;
            let value = apply(&mut ledger)?;
            self.replace(&ledger)?;
            Ok((ledger, value))
        })
    }

    /// Run `f` while holding the exclusive lock on `<file>.lock`. The lock
    /// is released when the lock file handle drops.
    fn locked<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        fs::create_dir_all(self.dir())?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(lock_path(&self.path))?;
        let mut lock = RwLock::new(file);
        let _guard = lock.write()?;
        f()
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn replace(&self, ledger: &Ledger) -> Result<()> {
        let bytes = csv_format::to_csv_bytes(ledger)?;

        // Unpersisted temp files are removed on drop.
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        info!(path = %self.path.display(), records = ledger.len(), "Saved ledger");
        Ok(())
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("ledger"));
    name.push(".lock");
    path.with_file_name(name)
}

/// Serialize the full ledger in the on-disk format, for download or export.
/// Independent of whatever is currently on disk.
pub(crate) fn export_bytes(ledger: &Ledger) -> Result<Vec<u8>> {
    Ok(csv_format::to_csv_bytes(ledger)?)
}

/// Write an export file. Returns the number of records written.
pub(crate) fn export_to_path(ledger: &Ledger, path: &Path) -> Result<usize> {
    let bytes = export_bytes(ledger)?;
    fs::write(path, bytes)?;
    info!(path = %path.display(), records = ledger.len(), "Exported ledger");
    Ok(ledger.len())
}
