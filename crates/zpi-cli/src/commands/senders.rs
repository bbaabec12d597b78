//! senders query - accounts allowed to send mail to a list

use super::{to_json, CommandContext};
use colored::Colorize;
use serde::Serialize;
use zpi_core::{AuthorizedSender, PermissionInspector, Result, Snapshot};

#[derive(Serialize)]
struct SendersView<'a> {
    list: &'a str,
    senders: Vec<AuthorizedSender>,
}

pub fn render(
    ctx: &CommandContext,
    snapshot: &Snapshot,
    inspector: &PermissionInspector<'_>,
    list: &str,
) -> Result<String> {
    let senders = inspector.resolved_senders_for(list)?;

    if ctx.is_json() {
        return to_json(snapshot, SendersView { list, senders });
    }

    let mut out = format!(
        "\n{}\n\n",
        format!("Authorized accounts to send mails to {} :", list).bold()
    );
    for sender in &senders {
        match &sender.account {
            Some(account) => out.push_str(account),
            None => out.push_str(&format!("{} {}", sender.account_display(), sender.grantee)),
        }
        out.push('\n');
    }
    Ok(out)
}
