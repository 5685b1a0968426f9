use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::APP_DIR_NAME;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
    #[error("model {0} not found locally and has no download URL")]
    NotFound(String),
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Locates model files by name.
///
/// Resolution order:
/// 1. cache directory
/// 2. bundled directory, if configured
/// 3. download into the cache, if the model has a URL
pub struct ModelResolver {
    cache_dir: PathBuf,
    bundled_dir: Option<PathBuf>,
}

impl ModelResolver {
    pub fn new(cache_dir: PathBuf, bundled_dir: Option<PathBuf>) -> Self {
        Self {
            cache_dir,
            bundled_dir,
        }
    }

    /// Resolver rooted at the platform cache directory.
    pub fn with_platform_cache(bundled_dir: Option<PathBuf>) -> Result<Self, ModelResolveError> {
        Ok(Self::new(platform_cache_dir()?, bundled_dir))
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns a local path for `name` without touching the network.
    pub fn find_local(&self, name: &str) -> Option<PathBuf> {
        let cached = self.cache_dir.join(name);
        if cached.exists() {
            return Some(cached);
        }
        self.bundled_dir
            .as_ref()
            .map(|dir| dir.join(name))
            .filter(|p| p.exists())
    }

    pub fn resolve(
        &self,
        name: &str,
        url: Option<&str>,
        progress: Option<ProgressFn>,
    ) -> Result<PathBuf, ModelResolveError> {
        if let Some(path) = self.find_local(name) {
            log::debug!("Model {name} found at {}", path.display());
            return Ok(path);
        }
        let url = url.ok_or_else(|| ModelResolveError::NotFound(name.to_string()))?;

        fs::create_dir_all(&self.cache_dir).map_err(ModelResolveError::CacheDir)?;
        let dest = self.cache_dir.join(name);
        log::info!("Downloading {name} from {url}");
        download(url, &dest, progress)?;
        Ok(dest)
    }
}

/// Platform model cache directory.
///
/// - macOS: `~/Library/Application Support/Face Score/models/`
/// - Linux: `$XDG_CACHE_HOME/Face Score/models/` or `~/.cache/Face Score/models/`
/// - Windows: `%LOCALAPPDATA%/Face Score/models/`
pub fn platform_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "macos"))]
    let base = dirs::cache_dir();

    base.map(|d| d.join(APP_DIR_NAME).join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

/// Downloads into `<dest>.part` and renames on success.
fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let download_err = |source| ModelResolveError::Download {
        url: url.to_string(),
        source,
    };
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(download_err)?;
    let total = response.content_length().unwrap_or(0);
    let bytes = response.bytes().map_err(download_err)?;

    let temp_path = dest.with_extension("part");
    let written = write_chunks(&temp_path, &bytes, total, progress.as_ref())
        .and_then(|_| fs::rename(&temp_path, dest));
    if let Err(source) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(ModelResolveError::Write {
            path: dest.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn write_chunks(
    path: &Path,
    bytes: &[u8],
    total: u64,
    progress: Option<&ProgressFn>,
) -> std::io::Result<()> {
    const CHUNK_SIZE: usize = 1024 * 1024;

    let mut file = fs::File::create(path)?;
    let mut downloaded: u64 = 0;
    for chunk in bytes.chunks(CHUNK_SIZE) {
        file.write_all(chunk)?;
        downloaded += chunk.len() as u64;
        if let Some(cb) = progress {
            cb(downloaded, total);
        }
    }
    file.flush()
}
