use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};
use parking_lot::RwLock;

use crate::error::{ClassifierError, Result, TaxonomyErrorKind};
use crate::types::ClassificationNode;

use super::tree::{load_taxonomy_file, validate_taxonomy};

/// Shared, immutable taxonomy tree
pub type Taxonomy = Arc<Vec<ClassificationNode>>;

/// Public OKVED taxonomy in JSON form
pub const DEFAULT_TAXONOMY_URL: &str = "https://gist.githubusercontent.com/dmitry-naumenko/\
    5a8afef9d94e9bcf9d91052dd65089ab/raw/c19ebdf3594e60db183cc2a9be9a7996a63dbf66/\
    %25D0%25BE%25D0%25BA%25D0%25B2%25D1%258D%25D0%25B4.json";

/// File name of the local taxonomy cache
pub const DEFAULT_CACHE_FILENAME: &str = "okved_cache.json";

/// Trait for loading the classification taxonomy
pub trait TaxonomyLoader: Send + Sync {
    /// Load the full taxonomy tree
    fn load(&self) -> Result<Taxonomy>;
}

impl<T: TaxonomyLoader + ?Sized> TaxonomyLoader for Box<T> {
    fn load(&self) -> Result<Taxonomy> {
        (**self).load()
    }
}

/// When a cached taxonomy file must be fetched again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    /// Stale once the local calendar date has moved past the file's modification date
    #[default]
    Daily,
    /// Stale once the file is older than the interval
    Interval(Duration),
}

impl ExpiryPolicy {
    /// Check if a file modified at `modified` is stale at `now`
    pub fn is_stale(&self, modified: SystemTime, now: SystemTime) -> bool {
        match self {
            ExpiryPolicy::Daily => {
                let modified: DateTime<Local> = modified.into();
                let now: DateTime<Local> = now.into();
                modified.date_naive() < now.date_naive()
            }
            ExpiryPolicy::Interval(interval) => now
                .duration_since(modified)
                .map(|age| age > *interval)
                .unwrap_or(true),
        }
    }
}

/// File-based loader reading a local taxonomy JSON once
pub struct FileTaxonomyLoader {
    path: PathBuf,
    data: RwLock<Option<Taxonomy>>,
}

impl FileTaxonomyLoader {
    /// Create a loader for the given JSON file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            data: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaxonomyLoader for FileTaxonomyLoader {
    fn load(&self) -> Result<Taxonomy> {
        if let Some(ref data) = *self.data.read() {
            return Ok(data.clone());
        }

        let data = Arc::new(load_taxonomy_file(&self.path)?);
        *self.data.write() = Some(data.clone());
        Ok(data)
    }
}

/// Nil loader - returns errors for all operations
pub struct NilTaxonomyLoader;

impl TaxonomyLoader for NilTaxonomyLoader {
    fn load(&self) -> Result<Taxonomy> {
        Err(ClassifierError::taxonomy(
            TaxonomyErrorKind::NotConfigured,
            "Taxonomy not available",
        ))
    }
}

/// In-memory loader for testing and embedding
pub struct MemoryTaxonomyLoader {
    data: Taxonomy,
}

impl MemoryTaxonomyLoader {
    /// Wrap an already materialized tree.
    ///
    /// The tree is not validated; use [`MemoryTaxonomyLoader::validated`] for untrusted data.
    pub fn new(nodes: Vec<ClassificationNode>) -> Self {
        Self {
            data: Arc::new(nodes),
        }
    }

    /// Wrap a tree after checking its invariants
    pub fn validated(nodes: Vec<ClassificationNode>) -> Result<Self> {
        validate_taxonomy(&nodes)?;
        Ok(Self::new(nodes))
    }
}

impl Default for MemoryTaxonomyLoader {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TaxonomyLoader for MemoryTaxonomyLoader {
    fn load(&self) -> Result<Taxonomy> {
        Ok(self.data.clone())
    }
}
