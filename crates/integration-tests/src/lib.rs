//! Shared fixtures for the end-to-end tests.
//!
//! Each [`TestContext`] owns a fresh temporary data directory and an
//! [`Engine`] opened over it with the default admin bootstrap. Dropping the
//! context removes the directory.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)] // test support crate

use std::path::Path;

use tempfile::TempDir;

use arcadia_engine::{Engine, EngineConfig};

/// A fresh engine over a temporary data directory.
pub struct TestContext {
    dir: TempDir,
    pub engine: Engine,
}

impl TestContext {
    /// Open an engine over a brand-new temporary directory.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let engine = Engine::open(EngineConfig::at(dir.path())).unwrap();
        Self { dir, engine }
    }

    /// Drop the engine and reopen a new one over the same directory,
    /// simulating a process restart.
    #[must_use]
    pub fn reopen(self) -> Self {
        let Self { dir, engine } = self;
        drop(engine);
        let engine = Engine::open(EngineConfig::at(dir.path())).unwrap();
        Self { dir, engine }
    }

    /// The data directory backing this context.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
