//! Status command implementation

use trakk_core::render::{render_status, status_json};

use crate::context::Context;
use crate::error::Result;

/// Run the status command
///
/// Inconsistent refs are reported, not treated as failure: the exit status
/// is zero either way.
pub fn run_status(context: &Context, json: bool) -> Result<()> {
    let workspace = context.workspace()?;
    let statuses = workspace.status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status_json(&statuses))?);
    } else {
        print!("{}", render_status(&statuses));
    }
    Ok(())
}
