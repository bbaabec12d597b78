//! Configuration management for the inspector CLI
//!
//! Config file location: ~/.zpi/config.toml
//!
//! Example config:
//! ```toml
//! [default]
//! server = "ldap://zimbra.example.com:389"
//! base_dn = "dc=example,dc=com"
//! bind_dn = "uid=zimbra,cn=admins,cn=zimbra"
//! start_tls = true
//!
//! [lab]
//! server = "ldaps://zimbra-lab.example.com"
//! base_dn = "dc=lab,dc=example,dc=com"
//! bind_dn = "uid=zimbra,cn=admins,cn=zimbra"
//! skip_tls_verify = true
//!
//! [lab.schema]
//! login = "uid"
//! ```
//!
//! The bind password is never read from the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use zpi_core::SchemaMappings;
use zpi_directory::LdapConfig;

/// One connection profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URI of the Zimbra LDAP server
    pub server: Option<String>,

    /// Search base
    pub base_dn: Option<String>,

    /// Admin bind DN
    pub bind_dn: Option<String>,

    /// Upgrade the connection with STARTTLS
    #[serde(default)]
    pub start_tls: bool,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub skip_tls_verify: bool,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Search filter
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Object class and attribute names
    #[serde(default)]
    pub schema: SchemaMappings,
}

fn default_timeout() -> u64 {
    10
}

fn default_filter() -> String {
    "(objectClass=*)".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            base_dn: None,
            bind_dn: None,
            start_tls: false,
            skip_tls_verify: false,
            timeout: default_timeout(),
            filter: default_filter(),
            schema: SchemaMappings::default(),
        }
    }
}

/// Configuration file with multiple profiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(flatten)]
    pub profiles: HashMap<String, Config>,
}

impl Config {
    /// Get config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let home = directories::BaseDirs::new()
            .context("Could not determine home directory")?
            .home_dir()
            .to_path_buf();

        Ok(home.join(".zpi"))
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load a profile from `path`, or from the default location.
    ///
    /// A missing default file yields the default profile; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>, profile: &str) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path, profile),
            None => {
                let path = Self::config_path()?;
                if path.exists() {
                    Self::load_from(&path, profile)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Load a profile from a specific file
    pub fn load_from(path: &Path, profile: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config_file: ConfigFile =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        match config_file.profiles.get(profile) {
            Some(config) => Ok(config.clone()),
            None if profile == "default" => Ok(Config::default()),
            None => anyhow::bail!("Profile '{}' not found in {:?}", profile, path),
        }
    }

    /// Build the LDAP configuration for this profile
    pub fn to_ldap_config(&self, bind_password: String) -> Result<LdapConfig> {
        let server_url = self
            .server
            .clone()
            .context("Server not configured. Pass SERVER, set ZPI_SERVER or add it to a profile")?;
        let base_dn = self
            .base_dn
            .clone()
            .context("Base DN not configured. Pass BASEDN, set ZPI_BASE_DN or add it to a profile")?;
        let bind_dn = self.bind_dn.clone().context(
            "Admin user not configured. Pass LDAP_ADMIN, set ZPI_BIND_DN or add it to a profile",
        )?;

        let config = LdapConfig {
            server_url,
            start_tls: self.start_tls,
            skip_tls_verify: self.skip_tls_verify,
            bind_dn,
            bind_password,
            base_dn,
            filter: self.filter.clone(),
            timeout_seconds: self.timeout,
            schema: self.schema.clone(),
        };

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

        Ok(config)
    }
}
