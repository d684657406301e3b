// this_file: crates/serpwidth-fontdb/src/font_cache.rs

//! Path-keyed font cache with at-most-once loading.
//!
//! Each path owns a `OnceCell`. The first caller for a path runs the loader
//! inside that cell; anyone arriving while it runs blocks on the same cell
//! and receives the same `Arc<Font>`. A failed load leaves the cell empty so
//! the next caller may try again.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;

use serpwidth_core::error::FontLoadError;

use crate::Font;

/// Font cache statistics for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Paths with a loaded font.
    pub entries: usize,
    /// Lookups answered without loading.
    pub hits: usize,
    /// Loader invocations (successful or not).
    pub loads: usize,
}

/// Process-wide cache of parsed fonts, keyed by file path.
#[derive(Default)]
pub struct FontCache {
    cells: DashMap<PathBuf, Arc<OnceCell<Arc<Font>>>>,
    hits: AtomicUsize,
    loads: AtomicUsize,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached font for `path`, running `load` only if no font
    /// for that path has been loaded yet.
    ///
    /// # Errors
    /// Whatever `load` returns; the failure is not cached.
    pub fn get_or_load<F>(&self, path: &Path, load: F) -> Result<Arc<Font>, FontLoadError>
    where
        F: FnOnce() -> Result<Font, FontLoadError>,
    {
        // Clone the cell out so the shard lock is released before loading
        let cell = self
            .cells
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone();

        if let Some(font) = cell.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("Font cache hit: {}", path.display());
            return Ok(Arc::clone(font));
        }

        // Another thread may fill the cell while we wait on it
        let mut loaded = false;
        let font = cell.get_or_try_init(|| {
            loaded = true;
            self.loads.fetch_add(1, Ordering::Relaxed);
            log::info!("Loading font {}", path.display());
            load().map(Arc::new)
        })?;
        if !loaded {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        Ok(Arc::clone(font))
    }

    /// The cached font for `path`, if one has been loaded
    pub fn get(&self, path: &Path) -> Option<Arc<Font>> {
        self.cells
            .get(path)
            .and_then(|cell| cell.value().get().cloned())
    }

    /// Return current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self
                .cells
                .iter()
                .filter(|entry| entry.value().get().is_some())
                .count(),
            hits: self.hits.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
        }
    }

    /// Drop every cached font.
    ///
    /// Fonts still held elsewhere stay alive until their last `Arc` goes.
    pub fn clear(&self) {
        self.cells.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.loads.store(0, Ordering::Relaxed);
    }
}
