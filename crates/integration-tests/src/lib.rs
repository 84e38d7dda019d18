//! Integration tests for the Cendev storefront.
//!
//! Every test runs against [`FileStorage`] in a fresh temporary directory,
//! so reopening a [`Storefront`] on the same [`TestContext`] behaves like
//! restarting the application.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cendev-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cendev_storefront::storage::{FileStorage, StorageResult};
use cendev_storefront::{Storefront, StorefrontConfig};
use tempfile::TempDir;

/// A temporary data directory shared by the storefronts a test opens.
#[derive(Debug)]
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// The data directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration pointing at this context's directory, with no
    /// simulated auth latency.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig::default()
            .with_data_dir(self.path())
            .with_auth_latency(Duration::ZERO)
    }

    /// Open (or reopen) a storefront on this context's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the storefront cannot be opened.
    pub fn open(&self) -> cendev_storefront::Result<Storefront> {
        Storefront::open(self.config())
    }

    /// A raw file adapter over this context's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened.
    pub fn storage(&self) -> StorageResult<Arc<FileStorage>> {
        FileStorage::open(self.path()).map(Arc::new)
    }
}
