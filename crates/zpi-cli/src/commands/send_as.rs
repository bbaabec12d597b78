//! send-as query - delegations on accounts and lists

use super::{to_json, CommandContext};
use colored::Colorize;
use serde::Serialize;
use zpi_core::{PermissionInspector, ResolvedSendAs, Result, Snapshot};

#[derive(Serialize)]
struct SendAsView {
    send_as: Vec<ResolvedSendAs>,
}

pub fn render(ctx: &CommandContext, snapshot: &Snapshot, inspector: &PermissionInspector<'_>) -> Result<String> {
    let grants = inspector.resolved_send_as();

    if ctx.is_json() {
        return to_json(snapshot, SendAsView { send_as: grants });
    }

    let mut out = format!(
        "\n{}\n\n{}\n\n",
        "Zimbra 'Send as' permissions:".bold(),
        "PERMISSION OWNER\tTARGET".cyan()
    );
    for grant in &grants {
        out.push_str(&format!("{:<24}{:<20}\n", grant.owner_display(), grant.target));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{json_ctx, sample_snapshot, text_ctx};

    #[test]
    fn test_send_as_text() {
        let snapshot = sample_snapshot();
        let ctx = text_ctx();
        let inspector = PermissionInspector::from_snapshot(&snapshot, &ctx.schema);

        let out = render(&ctx, &snapshot, &inspector).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[1], "Zimbra 'Send as' permissions:");
        assert_eq!(lines[3], "PERMISSION OWNER\tTARGET");
        assert_eq!(lines[5], format!("{:<24}{:<20}", "bob", "sales"));
        assert_eq!(lines[6], format!("{:<24}{:<20}", "(not found)", "bob"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_send_as_json() {
        let snapshot = sample_snapshot();
        let ctx = json_ctx();
        let inspector = PermissionInspector::from_snapshot(&snapshot, &ctx.schema);

        let out = render(&ctx, &snapshot, &inspector).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["send_as"][0]["owner"], "bob");
        assert_eq!(value["send_as"][0]["target"], "sales");
        assert!(value["send_as"][1]["owner"].is_null());
        assert_eq!(value["send_as"][1]["grantee"], "idGone");
    }
}
