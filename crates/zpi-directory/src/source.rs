//! Snapshot source trait
//!
//! Defines the interface the CLI uses to obtain directory entries.
//! Implementations exist for LDAP and for in-memory entry sets.

use async_trait::async_trait;
use zpi_core::{DirectoryEntry, Result, Snapshot};

/// Provider of a complete, immutable directory snapshot
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Read every entry under the configured base
    async fn fetch(&self) -> Result<Snapshot>;
}

/// Snapshot source over entries already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    snapshot: Snapshot,
}

impl MemorySource {
    pub fn new(base_dn: impl Into<String>, entries: Vec<DirectoryEntry>) -> Self {
        Self {
            snapshot: Snapshot::new(base_dn, entries),
        }
    }
}

#[async_trait]
impl SnapshotSource for MemorySource {
    async fn fetch(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }
}
