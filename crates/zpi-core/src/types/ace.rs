//! Access Control Entry (ACE) types
//!
//! Zimbra stores grants as `zimbraACE` values of the form
//! `<grantee-id> [<grantee-type>] <right> [<right> ...]`, where a right
//! prefixed with `-` is a revocation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Grantee Types
// ============================================================================

/// Kind of principal an ACE applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GranteeType {
    /// Internal user account
    User,
    /// Internal group
    Group,
    /// External group
    ExternalGroup,
    /// Any authenticated user
    AllAuthenticated,
    /// Users of a domain
    Domain,
    /// External domain
    ExternalDomain,
    /// Guest with a password
    Guest,
    /// Access key holder
    Key,
    /// Public, no authentication
    Public,
    /// Email address
    Email,
}

impl FromStr for GranteeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usr" => Ok(GranteeType::User),
            "grp" => Ok(GranteeType::Group),
            "egp" => Ok(GranteeType::ExternalGroup),
            "all" => Ok(GranteeType::AllAuthenticated),
            "dom" => Ok(GranteeType::Domain),
            "edom" => Ok(GranteeType::ExternalDomain),
            "gst" => Ok(GranteeType::Guest),
            "key" => Ok(GranteeType::Key),
            "pub" => Ok(GranteeType::Public),
            "email" => Ok(GranteeType::Email),
            _ => Err(format!("Invalid grantee type: {}", s)),
        }
    }
}

impl std::fmt::Display for GranteeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GranteeType::User => write!(f, "usr"),
            GranteeType::Group => write!(f, "grp"),
            GranteeType::ExternalGroup => write!(f, "egp"),
            GranteeType::AllAuthenticated => write!(f, "all"),
            GranteeType::Domain => write!(f, "dom"),
            GranteeType::ExternalDomain => write!(f, "edom"),
            GranteeType::Guest => write!(f, "gst"),
            GranteeType::Key => write!(f, "key"),
            GranteeType::Public => write!(f, "pub"),
            GranteeType::Email => write!(f, "email"),
        }
    }
}

// ============================================================================
// Rights
// ============================================================================

/// Rights the inspector reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Right {
    /// Deliver mail to a distribution list
    #[serde(rename = "sendToDistList")]
    SendToDistList,
    /// Send mail as a distribution list
    #[serde(rename = "sendAsDistList")]
    SendAsDistList,
    /// Send mail as an account
    #[serde(rename = "sendAs")]
    SendAs,
}

impl Right {
    pub fn as_str(&self) -> &'static str {
        match self {
            Right::SendToDistList => "sendToDistList",
            Right::SendAsDistList => "sendAsDistList",
            Right::SendAs => "sendAs",
        }
    }
}

impl FromStr for Right {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sendToDistList" => Ok(Right::SendToDistList),
            "sendAsDistList" => Ok(Right::SendAsDistList),
            "sendAs" => Ok(Right::SendAs),
            _ => Err(format!("Unsupported right: {}", s)),
        }
    }
}

impl std::fmt::Display for Right {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parsed ACE
// ============================================================================

/// One right token of an ACE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightToken {
    /// Right name without the revocation prefix
    pub name: String,
    /// Token carried a leading `-`
    pub revoked: bool,
}

impl RightToken {
    fn parse(token: &str) -> Self {
        match token.strip_prefix('-') {
            Some(name) => Self {
                name: name.to_string(),
                revoked: true,
            },
            None => Self {
                name: token.to_string(),
                revoked: false,
            },
        }
    }
}

/// A parsed `zimbraACE` value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ace {
    /// Internal identifier of the grantee
    pub grantee: String,
    /// Grantee type keyword, when present
    pub grantee_type: Option<GranteeType>,
    /// Right tokens in order of appearance
    pub rights: Vec<RightToken>,
}

impl Ace {
    /// Parse an ACE string. Returns `None` for blank values.
    pub fn parse(text: &str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let grantee = tokens.next()?.to_string();

        let mut grantee_type = None;
        let mut rights = Vec::new();

        for (idx, token) in tokens.enumerate() {
            if idx == 0 {
                if let Ok(kind) = GranteeType::from_str(token) {
                    grantee_type = Some(kind);
                    continue;
                }
            }
            rights.push(RightToken::parse(token));
        }

        Some(Self {
            grantee,
            grantee_type,
            rights,
        })
    }

    /// Whether the ACE names `right` exactly, without also revoking it.
    ///
    /// Matching is per token: `-sendToDistList` is a revocation of
    /// `sendToDistList`, never a grant of it.
    pub fn grants(&self, right: Right) -> bool {
        let name = right.as_str();
        let granted = self.rights.iter().any(|r| !r.revoked && r.name == name);
        let revoked = self.rights.iter().any(|r| r.revoked && r.name == name);
        granted && !revoked
    }

    /// Whether the ACE carries a revocation of `right`
    pub fn revokes(&self, right: Right) -> bool {
        self.rights
            .iter()
            .any(|r| r.revoked && r.name == right.as_str())
    }
}

impl FromStr for Ace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ace::parse(s).ok_or_else(|| "Empty ACE".to_string())
    }
}

impl std::fmt::Display for Ace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grantee)?;
        if let Some(kind) = self.grantee_type {
            write!(f, " {}", kind)?;
        }
        for right in &self.rights {
            if right.revoked {
                write!(f, " -{}", right.name)?;
            } else {
                write!(f, " {}", right.name)?;
            }
        }
        Ok(())
    }
}
