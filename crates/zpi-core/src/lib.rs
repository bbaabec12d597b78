//! Zimbra Permissions Inspector core library
//!
//! Directory entry types, ACE parsing, and the derivation of list catalogs,
//! send-to-list authorizations and send-as grants from a directory snapshot.

pub mod error;
pub mod inspector;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
pub use inspector::{authorized_senders, Classification, LoginIndex, PermissionInspector};
pub use schema::SchemaMappings;
pub use types::{
    Ace, AceGrant, AuthorizedSender, DirectoryEntry, GranteeType, ListEntry, ListKind,
    ResolvedSendAs, Right, RightToken, SendAsGrant, Snapshot,
};

/// Inspector version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder shown for grantee identifiers that resolve to no login name
pub const NOT_FOUND_PLACEHOLDER: &str = "(not found)";
