//! lists query - every mailing list and its kind

use super::{to_json, CommandContext};
use serde::Serialize;
use zpi_core::{ListEntry, PermissionInspector, Result, Snapshot};

#[derive(Serialize)]
struct ListsView {
    lists: Vec<ListEntry>,
}

pub fn render(ctx: &CommandContext, snapshot: &Snapshot, inspector: &PermissionInspector<'_>) -> Result<String> {
    let lists = inspector.list_catalog();

    if ctx.is_json() {
        return to_json(snapshot, ListsView { lists });
    }

    let mut out = String::new();
    for list in &lists {
        out.push_str(&list.to_string());
        out.push('\n');
    }
    Ok(out)
}
