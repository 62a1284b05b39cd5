//! Cache directory resolution

use std::path::{Path, PathBuf};

const APP_DIR: &str = "mcpmap";

/// Default cache directory.
///
/// `$XDG_CACHE_HOME/mcpmap` when set, otherwise the platform cache directory
/// plus `mcpmap`. Windows adds a trailing `cache` component.
pub fn default_cache_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    let base = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR);

    if cfg!(windows) {
        base.join("cache")
    } else {
        base
    }
}

/// Configured override, or [`default_cache_dir`].
pub fn resolve_cache_dir(configured: Option<&Path>) -> PathBuf {
    configured
        .map(Path::to_path_buf)
        .unwrap_or_else(default_cache_dir)
}
