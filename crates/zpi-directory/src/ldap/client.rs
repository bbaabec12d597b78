//! LDAP Client implementation
//!
//! Handles the connection, the admin bind and the subtree search that
//! produce a directory snapshot. Supports LDAP, LDAPS and STARTTLS.

use crate::ldap::types::LdapConfig;
use crate::source::SnapshotSource;
use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use std::time::Duration;
use tracing::{debug, info};
use zpi_core::{DirectoryEntry, Error, Result, Snapshot};

/// Result code for invalid credentials
const RC_INVALID_CREDENTIALS: u32 = 49;
/// Result code for server busy
const RC_BUSY: u32 = 51;
/// Result code for server unavailable
const RC_UNAVAILABLE: u32 = 52;
/// Result code for unwilling to perform (e.g. account locked, empty password)
const RC_UNWILLING_TO_PERFORM: u32 = 53;

/// LDAP client reading directory snapshots
pub struct LdapClient {
    config: LdapConfig,
}

impl LdapClient {
    /// Create a new LDAP client
    pub fn new(config: LdapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LdapConfig {
        &self.config
    }

    /// Bind and read every entry under the configured base
    pub async fn fetch_snapshot(&self) -> Result<Snapshot> {
        self.config.validate().map_err(Error::Config)?;

        let (conn, mut ldap) = self.create_connection().await?;
        ldap3::drive!(conn);

        if let Err(e) = self.bind(&mut ldap).await {
            let _ = ldap.unbind().await;
            return Err(e);
        }

        let entries = self.search(&mut ldap).await;
        let _ = ldap.unbind().await;
        let entries = entries?;

        info!(
            base_dn = %self.config.base_dn,
            entries = entries.len(),
            "Directory snapshot captured"
        );

        Ok(Snapshot::new(self.config.base_dn.clone(), entries))
    }

    // =========================================================================
    // Private methods
    // =========================================================================

    /// Create LDAP connection with proper TLS settings
    async fn create_connection(&self) -> Result<(LdapConnAsync, Ldap)> {
        let settings = LdapConnSettings::new()
            .set_conn_timeout(Duration::from_secs(self.config.timeout_seconds))
            .set_starttls(self.config.start_tls)
            .set_no_tls_verify(self.config.skip_tls_verify);

        debug!("Connecting to LDAP server: {}", self.config.server_url);

        LdapConnAsync::with_settings(settings, &self.config.server_url)
            .await
            .map_err(|e| Error::ServerDown(format!("{}: {}", self.config.server_url, e)))
    }

    async fn bind(&self, ldap: &mut Ldap) -> Result<()> {
        debug!("Binding as: {}", self.config.bind_dn);

        let result = ldap
            .simple_bind(&self.config.bind_dn, &self.config.bind_password)
            .await
            .map_err(|e| Error::ServerDown(format!("Bind failed: {}", e)))?;

        if result.rc != 0 {
            return Err(bind_error(result.rc, &result.text));
        }

        Ok(())
    }

    async fn search(&self, ldap: &mut Ldap) -> Result<Vec<DirectoryEntry>> {
        let attrs = self.config.schema.requested_attributes();

        debug!(
            base_dn = %self.config.base_dn,
            filter = %self.config.filter,
            ?attrs,
            "Searching directory subtree"
        );

        let (rs, _res) = ldap
            .search(&self.config.base_dn, Scope::Subtree, &self.config.filter, attrs)
            .await
            .map_err(|e| Error::Search(e.to_string()))?
            .success()
            .map_err(|e| Error::Search(e.to_string()))?;

        Ok(rs
            .into_iter()
            .map(|result| to_directory_entry(SearchEntry::construct(result)))
            .collect())
    }
}

#[async_trait]
impl SnapshotSource for LdapClient {
    async fn fetch(&self) -> Result<Snapshot> {
        self.fetch_snapshot().await
    }
}

/// Map a non-zero bind result code to an error
fn bind_error(rc: u32, text: &str) -> Error {
    match rc {
        RC_INVALID_CREDENTIALS => Error::InvalidCredentials,
        RC_UNWILLING_TO_PERFORM => Error::UnwillingToPerform(text.to_string()),
        RC_BUSY | RC_UNAVAILABLE => Error::ServerDown(format!("server returned code {}", rc)),
        other => Error::Bind(other),
    }
}

/// Keep the textual attributes of a search entry
fn to_directory_entry(entry: SearchEntry) -> DirectoryEntry {
    DirectoryEntry {
        dn: entry.dn,
        attributes: entry.attrs.into_iter().collect(),
    }
}
