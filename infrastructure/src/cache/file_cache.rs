//! File-backed [`MetadataCache`] adapter

use super::envelope::CacheEnvelope;
use mcpmap_application::{CacheError, CacheHit, MetadataCache};
use mcpmap_domain::{CacheKey, ServerMetadata};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One `<key>.json` file per connection fingerprint inside `dir`.
///
/// Writes go to `<key>.json.tmp` first and are renamed into place, so a
/// reader never observes a partial file. Concurrent writers are not
/// coordinated: the last rename wins.
#[derive(Debug, Clone)]
pub struct FileMetadataCache {
    dir: PathBuf,
}

impl FileMetadataCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    fn ensure_dir(&self) -> Result<(), CacheError> {
        create_private_dir(&self.dir).map_err(|source| CacheError::Directory {
            path: self.dir.clone(),
            source,
        })
    }
}

impl MetadataCache for FileMetadataCache {
    fn load(&self, key: &CacheKey) -> Result<Option<CacheHit>, CacheError> {
        self.ensure_dir()?;
        let path = self.entry_path(key);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Cache miss for {}", key);
                return Ok(None);
            }
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        match CacheEnvelope::decode(&bytes) {
            Ok(envelope) => Ok(Some(CacheHit::fresh(envelope.data))),
            Err(e) => {
                let corrupt = CacheError::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                };
                warn!("Discarding cache file: {}", corrupt);
                if let Err(e) = fs::remove_file(&path) {
                    debug!("Failed to remove {}: {}", path.display(), e);
                }
                Ok(None)
            }
        }
    }

    fn save(&self, key: &CacheKey, data: &ServerMetadata) -> Result<(), CacheError> {
        self.ensure_dir()?;

        let envelope = CacheEnvelope::wrap(data.clone());
        let bytes = serde_json::to_vec_pretty(&envelope)?;

        let path = self.entry_path(key);
        let tmp = self.dir.join(format!("{}.tmp", key.file_name()));

        if let Err(source) = write_private(&tmp, &bytes) {
            let _ = fs::remove_file(&tmp);
            return Err(CacheError::Io { path: tmp, source });
        }

        if let Err(source) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(CacheError::Io { path, source });
        }

        debug!("Wrote cache file {}", path.display());
        Ok(())
    }

    fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
