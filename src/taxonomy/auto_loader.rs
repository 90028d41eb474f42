use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::{ClassifierError, Result, TaxonomyErrorKind};

use super::loader::{
    ExpiryPolicy, Taxonomy, TaxonomyLoader, DEFAULT_CACHE_FILENAME, DEFAULT_TAXONOMY_URL,
};
use super::tree::load_taxonomy_file;

/// Taxonomy loader that downloads the JSON and keeps a local cache file.
///
/// The cache is refreshed when the [`ExpiryPolicy`] says it is stale. A failed
/// refresh falls back to the existing cache file when there is one.
pub struct AutoTaxonomyLoader {
    pub cache_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub url: String,
    pub expiry: ExpiryPolicy,

    data: RwLock<Option<Taxonomy>>,
    download_lock: Mutex<()>,
}

impl AutoTaxonomyLoader {
    /// Create a loader for the default OKVED URL with a daily expiry
    pub fn new() -> Self {
        Self {
            cache_path: None,
            data_dir: None,
            url: DEFAULT_TAXONOMY_URL.to_string(),
            expiry: ExpiryPolicy::default(),
            data: RwLock::new(None),
            download_lock: Mutex::new(()),
        }
    }

    /// Set data directory holding the cache file
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set an explicit cache file path (overrides the data directory)
    pub fn with_cache_path(mut self, path: impl AsRef<Path>) -> Self {
        self.cache_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set custom taxonomy URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set cache expiry policy
    pub fn with_expiry(mut self, expiry: ExpiryPolicy) -> Self {
        self.expiry = expiry;
        self
    }

    /// Resolved cache file path
    pub fn get_cache_path(&self) -> PathBuf {
        if let Some(ref path) = self.cache_path {
            return path.clone();
        }

        match self.data_dir {
            Some(ref dir) => dir.join(DEFAULT_CACHE_FILENAME),
            None => PathBuf::from(DEFAULT_CACHE_FILENAME),
        }
    }

    /// Drop the in-memory tree so the next load goes back to disk
    pub fn invalidate(&self) {
        *self.data.write() = None;
    }

    /// Check if file needs download
    fn should_download(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => {
                if meta.len() == 0 {
                    return true;
                }
                match meta.modified() {
                    Ok(mtime) => self.expiry.is_stale(mtime, SystemTime::now()),
                    Err(_) => true,
                }
            }
            Err(_) => true,
        }
    }

    /// Download the taxonomy to `path`, verifying it before replacing the cache
    fn download(&self, path: &Path) -> Result<()> {
        let _lock = self.download_lock.lock();

        // Another caller may have refreshed it while we waited
        if !self.should_download(path) {
            return Ok(());
        }

        info!(path = %path.display(), url = %self.url, "downloading taxonomy");

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = path.with_extension("tmp");

        let response = ureq::get(self.url.as_str()).call().map_err(|e| {
            ClassifierError::taxonomy(
                TaxonomyErrorKind::DownloadFailed,
                format!("Download failed: {}", e),
            )
        })?;

        let (_, body) = response.into_parts();
        if let Err(e) = write_body(body.into_reader(), &tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ClassifierError::taxonomy(
                TaxonomyErrorKind::DownloadFailed,
                format!("Download interrupted: {}", e),
            ));
        }

        if let Err(e) = load_taxonomy_file(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ClassifierError::taxonomy(
                TaxonomyErrorKind::DownloadFailed,
                format!("Verification failed: {}", e),
            ));
        }

        fs::rename(&tmp_path, path)?;

        info!(path = %path.display(), "taxonomy downloaded");
        Ok(())
    }

    /// Ensure the cache file exists and is fresh enough, downloading if needed
    fn ensure_downloaded(&self) -> Result<PathBuf> {
        let path = self.get_cache_path();

        if self.should_download(&path) {
            debug!(path = %path.display(), "taxonomy cache missing or stale");
            if let Err(e) = self.download(&path) {
                if !path.exists() {
                    return Err(e);
                }
                warn!(error = %e, "taxonomy download failed, using existing cache");
            }
        } else {
            debug!(path = %path.display(), "taxonomy cache is fresh");
        }

        Ok(path)
    }
}

impl Default for AutoTaxonomyLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn write_body(mut reader: impl Read, path: &Path) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    io::copy(&mut reader, &mut file)?;
    file.flush()
}

impl TaxonomyLoader for AutoTaxonomyLoader {
    /// Serve the in-memory tree while the cache file is fresh; once the expiry
    /// policy marks it stale the next call refreshes it. A failed refresh keeps
    /// serving the tree already in memory.
    fn load(&self) -> Result<Taxonomy> {
        let cached = self.data.read().clone();
        if let Some(ref data) = cached {
            if !self.should_download(&self.get_cache_path()) {
                return Ok(data.clone());
            }
            debug!("in-memory taxonomy expired");
        }

        let loaded = self
            .ensure_downloaded()
            .and_then(|path| load_taxonomy_file(&path));
        match loaded {
            Ok(tree) => {
                let data = Arc::new(tree);
                *self.data.write() = Some(data.clone());
                Ok(data)
            }
            Err(e) => match cached {
                Some(data) => {
                    warn!(error = %e, "taxonomy refresh failed, keeping loaded tree");
                    Ok(data)
                }
                None => Err(e),
            },
        }
    }
}
