//! Test support utilities for envop integration tests.
//!
//! Provides isolated test environments, a stub store server and helper
//! commands.

#![allow(dead_code)]

pub mod fixtures;
pub mod server;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use server::Server;

use envop::core::store::Memory;
use tempfile::TempDir;

/// Token the stub server accepts.
pub const TOKEN: &str = "test-token";

/// Test environment with isolated temp directories.
///
/// Each test gets its own working dir and home dir, and optionally a stub
/// store server. Child processes use `.current_dir()` and explicit env vars,
/// so tests can safely run in parallel.
pub struct Test {
    /// Working directory for envop, where .env files go
    pub dir: TempDir,
    /// Temporary home directory, holds ~/.envop.toml
    pub home: TempDir,
    /// Stub store, if the test talks to one
    pub server: Option<Server>,
}

impl Test {
    /// Create a test environment with no store.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self {
            dir,
            home,
            server: None,
        }
    }

    /// Create a test environment backed by a stub server serving `store`.
    pub fn with_store(store: Memory) -> Self {
        let mut t = Self::new();
        t.server = Some(Server::start(store, TOKEN));
        t
    }

    /// The stub server. Panics if the test has none.
    pub fn server(&self) -> &Server {
        self.server.as_ref().expect("test has no server")
    }

    /// Write a file in the working directory.
    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.dir.path().join(name), contents).expect("failed to write file");
    }

    /// Read a file from the working directory.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("failed to read file")
    }

    /// Write `~/.envop.toml`.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.home.path().join(".envop.toml"), contents)
            .expect("failed to write config");
    }
}
