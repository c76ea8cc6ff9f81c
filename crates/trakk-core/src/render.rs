//! Plain-text and JSON rendering of statuses and show reports

use std::fmt::Write as _;

use serde_json::{Value, json};

use crate::sync::{RefStatus, ShowDetail, ShowReport, StatusKind};

const RULE: &str = "=======================================================";

/// Statuses grouped under one heading per kind, in kind order.
///
/// The input is expected to be sorted by kind already.
pub fn render_status(statuses: &[RefStatus]) -> String {
    if statuses.is_empty() {
        return "All OK\n".to_string();
    }

    let mut out = String::from("Found broken or inconsistent refs:\n");
    let mut current: Option<StatusKind> = None;
    for status in statuses {
        let kind = status.kind();
        if current != Some(kind) {
            let _ = writeln!(out, "\n{} (type {})", kind.reason(), kind.letter());
            current = Some(kind);
        }
        let _ = writeln!(out, "{status}");
    }
    out
}

/// Machine-readable form of a status listing.
pub fn status_json(statuses: &[RefStatus]) -> Value {
    let entries: Vec<Value> = statuses
        .iter()
        .map(|s| {
            json!({
                "kind": s.kind().letter().to_string(),
                "ref": s.reference(),
                "reason": s.reason(),
                "mine": s.mine().map(|p| p.display().to_string()),
                "theirs": s.theirs().display().to_string(),
            })
        })
        .collect();

    json!({
        "consistent": statuses.is_empty(),
        "statuses": entries,
    })
}

/// Human-readable form of a show report.
pub fn render_show(report: &ShowReport) -> String {
    let mut out = String::new();
    let Some(status) = &report.status else {
        let _ = writeln!(out, "{} ... OK", report.reference);
        return out;
    };

    let _ = writeln!(
        out,
        "{} (type {}): {}",
        report.reference,
        status.kind().letter(),
        status.reason()
    );

    match &report.detail {
        ShowDetail::Consistent | ShowDetail::Reason => {}
        ShowDetail::Patch(patch) if patch.is_empty() => {
            let _ = writeln!(out, "<no textual changes>");
        }
        ShowDetail::Patch(patch) => out.push_str(patch),
        ShowDetail::Files { mine, theirs, diff } => {
            match mine {
                Some(dump) => {
                    let _ = writeln!(out, "Mine: {}\n{RULE}\n{}", dump.path.display(), dump.content);
                }
                None => {
                    let _ = writeln!(out, "{RULE}\n<ref not present in system>");
                }
            }
            match theirs {
                Some(dump) => {
                    let _ = writeln!(out, "Theirs: {}\n{RULE}\n{}", dump.path.display(), dump.content);
                }
                None => {
                    let _ = writeln!(out, "{RULE}\n<ref not present in repository>");
                }
            }
            if let Some(diff) = diff {
                let _ = writeln!(out, "Diff (theirs -> mine):\n{diff}");
            }
        }
    }
    out
}
