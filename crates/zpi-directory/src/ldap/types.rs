//! LDAP connection configuration

use serde::{Deserialize, Serialize};
use url::Url;
use zpi_core::SchemaMappings;

/// LDAP server configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LdapConfig {
    /// LDAP server URL (ldap://, ldaps:// or ldapi://)
    /// Example: "ldap://zimbra.example.com:389"
    pub server_url: String,

    /// Use STARTTLS for connection upgrade
    #[serde(default)]
    pub start_tls: bool,

    /// Skip TLS certificate verification (not recommended for production)
    #[serde(default)]
    pub skip_tls_verify: bool,

    /// Bind DN of the directory admin
    /// Example: "uid=zimbra,cn=admins,cn=zimbra"
    pub bind_dn: String,

    /// Bind password, never serialized
    #[serde(default, skip_serializing)]
    pub bind_password: String,

    /// Search base
    /// Example: "dc=example,dc=com"
    pub base_dn: String,

    /// Search filter
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Object class and attribute names
    #[serde(default)]
    pub schema: SchemaMappings,
}

fn default_filter() -> String {
    "(objectClass=*)".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for LdapConfig {
    fn default() -> Self {
        Self {
            server_url: "ldap://localhost:389".to_string(),
            start_tls: false,
            skip_tls_verify: false,
            bind_dn: String::new(),
            bind_password: String::new(),
            base_dn: String::new(),
            filter: default_filter(),
            timeout_seconds: default_timeout(),
            schema: SchemaMappings::default(),
        }
    }
}

impl std::fmt::Debug for LdapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LdapConfig")
            .field("server_url", &self.server_url)
            .field("start_tls", &self.start_tls)
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &"***")
            .field("base_dn", &self.base_dn)
            .field("filter", &self.filter)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("schema", &self.schema)
            .finish()
    }
}

impl LdapConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server_url.is_empty() {
            return Err("Server URL is required".to_string());
        }

        let url = Url::parse(&self.server_url)
            .map_err(|e| format!("Invalid server URL '{}': {}", self.server_url, e))?;

        match url.scheme() {
            "ldap" | "ldaps" | "ldapi" => {}
            other => {
                return Err(format!(
                    "Server URL must start with ldap://, ldaps:// or ldapi://, got {}://",
                    other
                ))
            }
        }

        if self.start_tls && url.scheme() != "ldap" {
            return Err("STARTTLS requires an ldap:// server URL".to_string());
        }

        if self.bind_dn.is_empty() {
            return Err("Bind DN is required".to_string());
        }

        if self.base_dn.is_empty() {
            return Err("Base DN is required".to_string());
        }

        if self.filter.is_empty() {
            return Err("Search filter is required".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("Timeout must be at least one second".to_string());
        }

        self.schema.validate()
    }
}
