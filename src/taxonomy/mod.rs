//! Taxonomy provider: JSON decoding, invariant checks and loaders.

mod auto_loader;
mod loader;
mod tree;

pub use auto_loader::AutoTaxonomyLoader;
pub use loader::{
    ExpiryPolicy, FileTaxonomyLoader, MemoryTaxonomyLoader, NilTaxonomyLoader, Taxonomy,
    TaxonomyLoader, DEFAULT_CACHE_FILENAME, DEFAULT_TAXONOMY_URL,
};
pub use tree::{load_taxonomy_file, parse_taxonomy, validate_taxonomy, MAX_TAXONOMY_DEPTH};
