//! Scoped upload storage
//!
//! Every accepted upload is persisted under the configured uploads
//! directory for the lifetime of its request and removed on every exit
//! path, success or failure, by tying deletion to `Drop`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// A transiently stored upload, deleted when the guard drops
pub struct UploadGuard {
    path: PathBuf,
}

impl UploadGuard {
    /// Persist upload bytes under `dir` with a collision-free name
    pub fn persist(dir: &Path, bytes: &[u8]) -> io::Result<Self> {
        let path = dir.join(format!("{}.pdf", Uuid::new_v4()));
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "upload persisted");
        Ok(Self { path })
    }

    /// Location of the stored file while the guard lives
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "upload removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove upload"),
        }
    }
}
