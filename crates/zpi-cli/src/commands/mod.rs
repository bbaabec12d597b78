//! CLI query implementations

pub mod lists;
pub mod send_as;
pub mod senders;

use crate::OutputFormat;
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use zpi_core::{PermissionInspector, SchemaMappings, Snapshot};
use zpi_directory::SnapshotSource;

/// What to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Every list and its kind
    Lists,
    /// Accounts allowed to send to one list
    Senders(String),
    /// Every send-as delegation
    SendAs,
}

/// Context passed to all commands
pub struct CommandContext {
    pub output_format: OutputFormat,
    pub schema: SchemaMappings,
}

impl CommandContext {
    /// Check if output should be JSON
    pub fn is_json(&self) -> bool {
        matches!(self.output_format, OutputFormat::Json)
    }
}

/// JSON envelope shared by every report
#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    generated_at: String,
    base_dn: &'a str,
    #[serde(flatten)]
    view: T,
}

#[derive(Serialize)]
struct QueryErrorReport<'a> {
    error: &'static str,
    message: String,
    base_dn: &'a str,
}

pub(crate) fn to_json<T: Serialize>(snapshot: &Snapshot, view: T) -> zpi_core::Result<String> {
    let report = Report {
        generated_at: Utc::now().to_rfc3339(),
        base_dn: &snapshot.base_dn,
        view,
    };

    let mut json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
    json.push('\n');
    Ok(json)
}

/// Render one query over a snapshot
pub fn render(ctx: &CommandContext, snapshot: &Snapshot, query: &Query) -> zpi_core::Result<String> {
    let inspector = PermissionInspector::from_snapshot(snapshot, &ctx.schema);

    match query {
        Query::Lists => lists::render(ctx, snapshot, &inspector),
        Query::Senders(list) => senders::render(ctx, snapshot, &inspector, list),
        Query::SendAs => send_as::render(ctx, snapshot, &inspector),
    }
}

/// Render a query that ended without results (unknown list, no grants)
pub fn render_query_error(ctx: &CommandContext, snapshot: &Snapshot, err: &zpi_core::Error) -> Result<String> {
    if ctx.is_json() {
        let report = QueryErrorReport {
            error: err.code(),
            message: err.to_string(),
            base_dn: &snapshot.base_dn,
        };
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(format!("\n{}\n\n", err.to_string().yellow()))
    }
}

/// Fetch a snapshot and render the result of `query`.
///
/// Unknown lists and lists without grants are reported, not propagated.
pub async fn execute(ctx: &CommandContext, source: &dyn SnapshotSource, query: &Query) -> Result<String> {
    let snapshot = source
        .fetch()
        .await
        .context("Failed to read the directory")?;

    tracing::debug!(entries = snapshot.len(), ?query, "Running query");

    match render(ctx, &snapshot, query) {
        Ok(output) => Ok(output),
        Err(e) if e.is_query_error() => render_query_error(ctx, &snapshot, &e),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use zpi_core::DirectoryEntry;
    use zpi_directory::MemorySource;

    pub(crate) fn text_ctx() -> CommandContext {
        colored::control::set_override(false);
        CommandContext {
            output_format: OutputFormat::Text,
            schema: SchemaMappings::default(),
        }
    }

    pub(crate) fn json_ctx() -> CommandContext {
        CommandContext {
            output_format: OutputFormat::Json,
            schema: SchemaMappings::default(),
        }
    }

    pub(crate) fn sample_snapshot() -> Snapshot {
        Snapshot::new(
            "dc=example,dc=com",
            vec![
                DirectoryEntry::new("cn=sales,ou=groups,dc=example,dc=com")
                    .with_attr("objectClass", ["zimbraGroup"])
                    .with_attr("cn", ["sales"])
                    .with_attr(
                        "zimbraACE",
                        [
                            "idA usr sendToDistList",
                            "idB usr -sendToDistList sendToDistList",
                            "idB usr sendAsDistList",
                        ],
                    ),
                DirectoryEntry::new("uid=board,ou=people,dc=example,dc=com")
                    .with_attr("objectClass", ["zimbraDistributionList"])
                    .with_attr("uid", ["board"])
                    .with_attr("zimbraId", ["idL"]),
                DirectoryEntry::new("uid=alice,ou=people,dc=example,dc=com")
                    .with_attr("objectClass", ["inetOrgPerson", "zimbraAccount"])
                    .with_attr("uid", ["alice"])
                    .with_attr("zimbraId", ["idA"]),
                DirectoryEntry::new("uid=bob,ou=people,dc=example,dc=com")
                    .with_attr("objectClass", ["inetOrgPerson", "zimbraAccount"])
                    .with_attr("uid", ["bob"])
                    .with_attr("zimbraId", ["idB"])
                    .with_attr("zimbraACE", ["idGone usr sendAs"]),
            ],
        )
    }

    fn source() -> MemorySource {
        let snapshot = sample_snapshot();
        MemorySource::new(snapshot.base_dn, snapshot.entries)
    }

    #[tokio::test]
    async fn test_execute_lists() {
        let out = execute(&text_ctx(), &source(), &Query::Lists).await.unwrap();
        assert_eq!(out, "sales ( dynamic )\nboard ( static )\n");
    }

    #[tokio::test]
    async fn test_execute_unknown_list_is_reported() {
        let out = execute(&text_ctx(), &source(), &Query::Senders("marketing".into()))
            .await
            .unwrap();
        assert_eq!(out, "\nSorry, list not found: marketing\n\n");
    }

    #[tokio::test]
    async fn test_execute_no_permissions_is_reported() {
        let out = execute(&text_ctx(), &source(), &Query::Senders("board".into()))
            .await
            .unwrap();
        assert!(out.contains("Sorry, no permissions were found in list: board!"));
    }

    #[tokio::test]
    async fn test_execute_query_error_as_json() {
        let out = execute(&json_ctx(), &source(), &Query::Senders("marketing".into()))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["error"], "ListNotFound");
        assert_eq!(value["base_dn"], "dc=example,dc=com");
    }

    #[test]
    fn test_render_dispatch() {
        let snapshot = sample_snapshot();
        let ctx = text_ctx();

        assert!(render(&ctx, &snapshot, &Query::Lists).is_ok());
        assert!(render(&ctx, &snapshot, &Query::SendAs).is_ok());
        assert!(matches!(
            render(&ctx, &snapshot, &Query::Senders("nope".into())),
            Err(zpi_core::Error::ListNotFound(_))
        ));
    }
}
