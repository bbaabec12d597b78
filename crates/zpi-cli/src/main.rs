//! Zimbra Permissions Inspector
//!
//! Reports mailing lists, the accounts allowed to send to a list, and the
//! "send as" delegations of a Zimbra directory.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use commands::{CommandContext, Query};
use config::Config;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zpi_directory::{LdapClient, LdapConfig};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "zimbra-permissions-inspector")]
#[command(version = zpi_core::VERSION)]
#[command(about = "Query sending permissions on a Zimbra server", long_about = None)]
struct Cli {
    /// URI formatted address of the Zimbra server
    #[arg(value_name = "SERVER", env = "ZPI_SERVER")]
    server: Option<String>,

    /// Searchbase or base DN of the Zimbra LDAP server
    #[arg(value_name = "BASEDN", env = "ZPI_BASE_DN")]
    base_dn: Option<String>,

    /// Admin user of the Zimbra LDAP server
    #[arg(value_name = "LDAP_ADMIN", env = "ZPI_BIND_DN")]
    ldap_admin: Option<String>,

    /// Query which Zimbra accounts have permissions to send mails to the given ZDL
    #[arg(short = 'l', long, value_name = "LIST", conflicts_with = "sendas")]
    zdl: Option<String>,

    /// Query 'send as' permissions on both Zimbra accounts and ZDLs
    #[arg(short = 's', long)]
    sendas: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile
    #[arg(long, env = "ZPI_PROFILE", default_value = "default")]
    profile: String,

    /// Upgrade the connection with STARTTLS
    #[arg(long)]
    starttls: bool,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Connection timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ZPI_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn query(&self) -> Query {
        match (&self.zdl, self.sendas) {
            (Some(list), _) => Query::Senders(list.clone()),
            (None, true) => Query::SendAs,
            // No query option given: show existing lists
            (None, false) => Query::Lists,
        }
    }

    /// Apply command-line values over a profile
    fn apply_to(&self, config: &mut Config) {
        if let Some(server) = &self.server {
            config.server = Some(server.clone());
        }
        if let Some(base_dn) = &self.base_dn {
            config.base_dn = Some(base_dn.clone());
        }
        if let Some(bind_dn) = &self.ldap_admin {
            config.bind_dn = Some(bind_dn.clone());
        }
        if self.starttls {
            config.start_tls = true;
        }
        if self.insecure {
            config.skip_tls_verify = true;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
    }
}

/// Profile merged with command-line values, checked before any prompt.
/// The bind password is filled in afterwards.
fn connection_config(cli: &Cli) -> Result<LdapConfig> {
    let mut config = Config::load(cli.config.as_deref(), &cli.profile)?;
    cli.apply_to(&mut config);
    config.to_ldap_config(String::new())
}

/// Bind password from ZPI_BIND_PASSWORD, or prompted for
fn read_credentials() -> zpi_core::Result<String> {
    if let Ok(password) = std::env::var("ZPI_BIND_PASSWORD") {
        debug!("Using bind password from ZPI_BIND_PASSWORD");
        return Ok(password);
    }

    eprintln!();
    dialoguer::Password::new()
        .with_prompt("Please, enter your Zimbra credentials")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| zpi_core::Error::Prompt(e.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load profile, then override with CLI args
    let mut ldap_config = connection_config(&cli)?;
    ldap_config.bind_password = read_credentials()?;

    let ctx = CommandContext {
        output_format: cli.output,
        schema: ldap_config.schema.clone(),
    };
    let client = LdapClient::new(ldap_config);

    let output = commands::execute(&ctx, &client, &cli.query())
        .await
        .context("Query failed")?;
    print!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("zimbra-permissions-inspector").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_default_query_is_lists() {
        let cli = parse(&["ldap://zimbra.example.com", "dc=example,dc=com", "uid=zimbra"]);
        assert_eq!(cli.query(), Query::Lists);
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_zdl_and_sendas_queries() {
        let cli = parse(&["ldap://zimbra.example.com", "dc=example,dc=com", "uid=zimbra", "-l", "sales"]);
        assert_eq!(cli.query(), Query::Senders("sales".to_string()));

        let cli = parse(&["ldap://zimbra.example.com", "dc=example,dc=com", "uid=zimbra", "--sendas"]);
        assert_eq!(cli.query(), Query::SendAs);
    }

    #[test]
    fn test_zdl_conflicts_with_sendas() {
        let result = Cli::try_parse_from([
            "zimbra-permissions-inspector",
            "ldap://zimbra.example.com",
            "dc=example,dc=com",
            "uid=zimbra",
            "-l",
            "sales",
            "-s",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_profile() {
        let cli = parse(&[
            "ldaps://zimbra.example.com",
            "dc=example,dc=com",
            "uid=zimbra,cn=admins,cn=zimbra",
            "--timeout",
            "30",
            "--insecure",
            "-o",
            "json",
        ]);

        let mut config = Config {
            server: Some("ldap://old.example.com".to_string()),
            ..Default::default()
        };
        cli.apply_to(&mut config);

        assert_eq!(config.server.as_deref(), Some("ldaps://zimbra.example.com"));
        assert_eq!(config.bind_dn.as_deref(), Some("uid=zimbra,cn=admins,cn=zimbra"));
        assert_eq!(config.timeout, 30);
        assert!(config.skip_tls_verify);
        assert!(!config.start_tls);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_incomplete_config_fails_without_password() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let cli = parse(&["ldap://zimbra.example.com", "-c", path]);
        let err = connection_config(&cli).unwrap_err();
        assert!(err.to_string().contains("Base DN not configured"));

        let cli = parse(&[
            "ldap://zimbra.example.com",
            "dc=example,dc=com",
            "uid=zimbra",
            "-c",
            path,
        ]);
        let ldap = connection_config(&cli).unwrap();
        assert_eq!(ldap.base_dn, "dc=example,dc=com");
        assert!(ldap.bind_password.is_empty());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
