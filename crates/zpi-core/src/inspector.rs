//! Permission derivation over a directory snapshot
//!
//! Every query recomputes its view from the entries; nothing is cached
//! between calls.

use crate::error::{Error, Result};
use crate::schema::SchemaMappings;
use crate::types::{
    Ace, AceGrant, AuthorizedSender, DirectoryEntry, ListEntry, ListKind, ResolvedSendAs, Right,
    SendAsGrant, Snapshot,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Lists and ACE values collected from list entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub lists: Vec<ListEntry>,
    pub grants: Vec<AceGrant>,
}

impl Classification {
    fn extend(&mut self, other: Classification) {
        self.lists.extend(other.lists);
        self.grants.extend(other.grants);
    }
}

/// Read-only view deriving permissions from directory entries
pub struct PermissionInspector<'a> {
    entries: &'a [DirectoryEntry],
    schema: &'a SchemaMappings,
}

impl<'a> PermissionInspector<'a> {
    pub fn new(entries: &'a [DirectoryEntry], schema: &'a SchemaMappings) -> Self {
        Self { entries, schema }
    }

    pub fn from_snapshot(snapshot: &'a Snapshot, schema: &'a SchemaMappings) -> Self {
        Self::new(&snapshot.entries, schema)
    }

    /// Collect lists of one kind together with their ACE values
    pub fn classify(&self, kind: ListKind) -> Classification {
        let marker = self.schema.list_marker(kind);
        let key = self.schema.list_key(kind);
        let mut out = Classification::default();

        for entry in self.entries {
            if !entry.has_object_class(&self.schema.object_class, marker) {
                continue;
            }

            let Some(name) = entry.first(key) else {
                debug!(dn = %entry.dn, attr = key, "Skipping {} list without key attribute", kind);
                continue;
            };

            for ace in entry.values(&self.schema.ace) {
                out.grants.push(AceGrant::new(name, ace.as_str()));
            }
            out.lists.push(ListEntry::new(name, kind));
        }

        out
    }

    /// Both kinds, dynamic lists first
    fn classify_all(&self) -> Classification {
        let mut out = Classification::default();
        for kind in ListKind::ALL {
            out.extend(self.classify(kind));
        }
        out
    }

    /// Every mailing list with its kind, in encounter order per kind
    pub fn list_catalog(&self) -> Vec<ListEntry> {
        self.classify_all().lists
    }

    /// Raw ACE values of every list
    pub fn list_ace_grants(&self) -> Vec<AceGrant> {
        self.classify_all().grants
    }

    /// Grantee identifiers allowed to send to `list`
    pub fn authorized_senders_for(&self, list: &str) -> Result<Vec<String>> {
        let Classification { lists, grants } = self.classify_all();

        if !lists.iter().any(|l| l.name == list) {
            return Err(Error::ListNotFound(list.to_string()));
        }

        let senders = authorized_senders(&grants, list);
        if senders.is_empty() {
            return Err(Error::NoPermissions(list.to_string()));
        }

        Ok(senders)
    }

    /// Authorized senders of `list`, each mapped to an account name
    pub fn resolved_senders_for(&self, list: &str) -> Result<Vec<AuthorizedSender>> {
        let senders = self.authorized_senders_for(list)?;

        Ok(senders
            .into_iter()
            .map(|grantee| {
                let account = self.resolve_account(&grantee).map(str::to_string);
                if account.is_none() {
                    warn!(grantee = %grantee, list, "No account found for grantee");
                }
                AuthorizedSender { grantee, account }
            })
            .collect())
    }

    /// Login name of the person entry carrying `identifier`
    pub fn resolve_login(&self, identifier: &str) -> Option<&'a str> {
        let schema = self.schema;
        self.entries
            .iter()
            .filter(|e| e.has_object_class(&schema.object_class, &schema.person_class))
            .find_map(|e| {
                let id = e.first(&schema.identifier)?;
                let login = e.first(&schema.login)?;
                (id == identifier).then_some(login)
            })
    }

    /// Login name of any entry carrying `identifier`. Send-to rights may be
    /// granted to lists and groups as well as to accounts.
    pub fn resolve_account(&self, identifier: &str) -> Option<&'a str> {
        let schema = self.schema;
        self.entries.iter().find_map(|e| {
            let id = e.first(&schema.identifier)?;
            let login = e.first(&schema.login)?;
            (id == identifier).then_some(login)
        })
    }

    /// Identifier to login mapping over person entries, built once
    pub fn login_index(&self) -> LoginIndex<'a> {
        LoginIndex::build(self.entries, self.schema)
    }

    /// Send-as grants on lists, then on accounts.
    ///
    /// Only the first ACE value of each account is inspected.
    pub fn send_as_grants(&self) -> Vec<SendAsGrant> {
        let schema = self.schema;
        let mut out = Vec::new();

        for grant in self.list_ace_grants() {
            if let Some(ace) = Ace::parse(&grant.ace) {
                if ace.grants(Right::SendAsDistList) {
                    out.push(SendAsGrant::new(ace.grantee, grant.subject));
                }
            }
        }

        for entry in self.entries {
            if !entry.has_object_class(&schema.object_class, &schema.person_class) {
                continue;
            }

            let (Some(first_ace), Some(login)) = (entry.first(&schema.ace), entry.first(&schema.login))
            else {
                continue;
            };

            if let Some(ace) = Ace::parse(first_ace) {
                if ace.grants(Right::SendAs) {
                    out.push(SendAsGrant::new(ace.grantee, login));
                }
            }
        }

        out
    }

    /// Send-as grants with delegates resolved to login names
    pub fn resolved_send_as(&self) -> Vec<ResolvedSendAs> {
        let index = self.login_index();

        self.send_as_grants()
            .into_iter()
            .map(|grant| {
                let owner = index.resolve(&grant.grantee).map(str::to_string);
                if owner.is_none() {
                    warn!(grantee = %grant.grantee, target = %grant.target, "Unresolved send-as owner");
                }
                ResolvedSendAs {
                    owner,
                    grantee: grant.grantee,
                    target: grant.target,
                }
            })
            .collect()
    }
}

/// Grantees of positive `sendToDistList` ACEs on `list`, in order, with
/// duplicates kept
pub fn authorized_senders(grants: &[AceGrant], list: &str) -> Vec<String> {
    grants
        .iter()
        .filter(|g| g.subject == list)
        .filter_map(|g| Ace::parse(&g.ace))
        .filter(|ace| ace.grants(Right::SendToDistList))
        .map(|ace| ace.grantee)
        .collect()
}

/// Identifier to login lookup table. The first person entry carrying an
/// identifier wins, matching a linear scan.
#[derive(Debug, Default)]
pub struct LoginIndex<'a> {
    logins: HashMap<&'a str, &'a str>,
}

impl<'a> LoginIndex<'a> {
    pub fn build(entries: &'a [DirectoryEntry], schema: &SchemaMappings) -> Self {
        let mut logins = HashMap::new();

        for entry in entries {
            if !entry.has_object_class(&schema.object_class, &schema.person_class) {
                continue;
            }
            if let (Some(id), Some(login)) = (entry.first(&schema.identifier), entry.first(&schema.login)) {
                logins.entry(id).or_insert(login);
            }
        }

        Self { logins }
    }

    pub fn resolve(&self, identifier: &str) -> Option<&'a str> {
        self.logins.get(identifier).copied()
    }

    pub fn len(&self) -> usize {
        self.logins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logins.is_empty()
    }
}
