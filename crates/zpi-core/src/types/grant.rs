//! Derived list and grant types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of mailing list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Dynamic group, keyed by `cn`
    Dynamic,
    /// Static distribution list, keyed by `uid`
    Static,
}

impl ListKind {
    /// Classification order used when building the catalog
    pub const ALL: [ListKind; 2] = [ListKind::Dynamic, ListKind::Static];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Dynamic => "dynamic",
            ListKind::Static => "static",
        }
    }
}

impl FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dynamic" => Ok(ListKind::Dynamic),
            "static" => Ok(ListKind::Static),
            _ => Err(format!("Invalid list kind: {}", s)),
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mailing list found in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub kind: ListKind,
}

impl ListEntry {
    pub fn new(name: impl Into<String>, kind: ListKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl std::fmt::Display for ListEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ( {} )", self.name, self.kind)
    }
}

/// A raw ACE value attached to a list or account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AceGrant {
    /// Display key of the entry owning the ACE
    pub subject: String,
    /// ACE value, verbatim
    pub ace: String,
}

impl AceGrant {
    pub fn new(subject: impl Into<String>, ace: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ace: ace.into(),
        }
    }
}

/// Grantee allowed to send to a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedSender {
    pub grantee: String,
    /// Account (or list) name carrying the grantee identifier
    pub account: Option<String>,
}

impl AuthorizedSender {
    pub fn account_display(&self) -> &str {
        self.account.as_deref().unwrap_or(crate::NOT_FOUND_PLACEHOLDER)
    }
}

/// Permission for `grantee` to send as `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendAsGrant {
    /// Internal identifier of the delegate
    pub grantee: String,
    /// List name or account login the delegate may send as
    pub target: String,
}

impl SendAsGrant {
    pub fn new(grantee: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            grantee: grantee.into(),
            target: target.into(),
        }
    }
}

/// Send-as grant with the delegate resolved to a login name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSendAs {
    /// Login of the delegate, if the identifier maps to an account
    pub owner: Option<String>,
    pub grantee: String,
    pub target: String,
}

impl ResolvedSendAs {
    /// Owner login, or the placeholder when unresolved
    pub fn owner_display(&self) -> &str {
        self.owner.as_deref().unwrap_or(crate::NOT_FOUND_PLACEHOLDER)
    }
}
