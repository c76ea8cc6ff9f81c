//! Show command implementation

use std::path::Path;

use trakk_core::render::render_show;

use crate::context::Context;
use crate::error::Result;

/// Run the show command
pub fn run_show(context: &Context, path: &Path) -> Result<()> {
    let workspace = context.workspace()?;
    let report = workspace.show(path)?;
    print!("{}", render_show(&report));
    Ok(())
}
