//! Whole-directory cache operations

use super::envelope::count_items;
use chrono::{DateTime, Utc};
use mcpmap_application::{CacheError, CacheFileInfo, CacheInfo, CacheMaintenance};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`CacheMaintenance`] over a cache directory.
///
/// Only `*.json` entries are considered; temp files and anything else in
/// the directory are left alone.
#[derive(Debug, Clone)]
pub struct CacheDirectory {
    dir: PathBuf,
}

impl CacheDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache entry files, or `None` when the directory does not exist.
    fn entries(&self) -> Result<Option<Vec<PathBuf>>, CacheError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Directory {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut paths: Vec<PathBuf> = read_dir
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| is_cache_file(path))
            .collect();
        paths.sort();
        Ok(Some(paths))
    }
}

fn is_cache_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

impl CacheMaintenance for CacheDirectory {
    fn clear_all(&self) -> Result<usize, CacheError> {
        let Some(paths) = self.entries()? else {
            return Ok(0);
        };

        for path in &paths {
            fs::remove_file(path).map_err(|source| CacheError::Io {
                path: path.clone(),
                source,
            })?;
            debug!("Removed {}", path.display());
        }

        Ok(paths.len())
    }

    fn info(&self) -> Result<CacheInfo, CacheError> {
        let mut info = CacheInfo {
            cache_dir: self.dir.clone(),
            total_files: 0,
            total_size: 0,
            files: Vec::new(),
        };

        let Some(paths) = self.entries()? else {
            return Ok(info);
        };

        for path in paths {
            let Some(file) = describe(&path) else {
                debug!("Skipping unreadable cache file {}", path.display());
                continue;
            };
            info.total_files += 1;
            info.total_size += file.size;
            info.files.push(file);
        }

        Ok(info)
    }
}

fn describe(path: &Path) -> Option<CacheFileInfo> {
    let metadata = fs::metadata(path).ok()?;
    let modified: DateTime<Utc> = metadata.modified().ok()?.into();
    let (tools_count, resources_count, prompts_count) = fs::read(path)
        .map(|bytes| count_items(&bytes))
        .unwrap_or((0, 0, 0));

    Some(CacheFileInfo {
        name: path.file_name()?.to_string_lossy().into_owned(),
        size: metadata.len(),
        modified,
        tools_count,
        resources_count,
        prompts_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FileMetadataCache;
    use mcpmap_application::MetadataCache;
    use mcpmap_domain::{CacheKey, ServerMetadata, ToolRecord};
    use tempfile::tempdir;

    fn seed(dir: &Path) {
        let cache = FileMetadataCache::new(dir);
        let data = ServerMetadata {
            tools: vec![ToolRecord::new("a"), ToolRecord::new("b")],
            ..Default::default()
        };
        cache.save(&CacheKey::derive("u1", "sse", "", "c"), &data).unwrap();
        cache
            .save(&CacheKey::derive("u2", "http", "", "c"), &ServerMetadata::default())
            .unwrap();
        fs::write(dir.join("notes.txt"), "keep me").unwrap();
        fs::write(dir.join("zz-broken.json"), "{oops").unwrap();
    }

    #[test]
    fn test_info_on_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let info = CacheDirectory::new(dir.path().join("absent")).info().unwrap();
        assert_eq!(info.total_files, 0);
        assert!(info.files.is_empty());
    }

    #[test]
    fn test_info_counts_and_sorts() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let info = CacheDirectory::new(dir.path()).info().unwrap();

        assert_eq!(info.total_files, 3);
        assert_eq!(info.files.iter().map(|f| f.size).sum::<u64>(), info.total_size);
        let names: Vec<&str> = info.files.iter().map(|f| f.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let tool_counts: Vec<usize> = info.files.iter().map(|f| f.tools_count).collect();
        assert!(tool_counts.contains(&2));
        // The unparsable file is listed with zero items.
        let broken = info.files.iter().find(|f| f.name == "zz-broken.json").unwrap();
        assert_eq!(
            (broken.tools_count, broken.resources_count, broken.prompts_count),
            (0, 0, 0)
        );
    }

    #[test]
    fn test_clear_all_removes_only_json() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let removed = CacheDirectory::new(dir.path()).clear_all().unwrap();

        assert_eq!(removed, 3);
        assert!(dir.path().join("notes.txt").exists());
        assert_eq!(CacheDirectory::new(dir.path()).info().unwrap().total_files, 0);
    }

    #[test]
    fn test_clear_all_on_missing_dir() {
        let dir = tempdir().unwrap();
        let removed = CacheDirectory::new(dir.path().join("absent")).clear_all().unwrap();
        assert_eq!(removed, 0);
    }
}
