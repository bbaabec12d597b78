//! Directory snapshot providers
//!
//! Reads the entries the inspector works on. The LDAP provider performs a
//! single unpaged subtree search and returns the whole result set.

pub mod ldap;
pub mod source;

pub use ldap::{LdapClient, LdapConfig};
pub use source::{MemorySource, SnapshotSource};
