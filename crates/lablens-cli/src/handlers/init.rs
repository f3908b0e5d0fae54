use crate::context::ExecutionContext;
use anyhow::Result;
use lablens_runtime::{InitOutcome, Workspace};
use serde_json::json;

pub fn handle(ctx: &ExecutionContext, force: bool) -> Result<()> {
    let data_path = ctx.data_file().map(|p| p.to_path_buf());
    let outcome = Workspace::init(ctx.data_dir(), data_path, force)?;

    let (created, path) = match &outcome {
        InitOutcome::Created(path) => (true, path),
        InitOutcome::AlreadyExists(path) => (false, path),
    };

    if ctx.json() {
        let result = json!({
            "config_path": path.display().to_string(),
            "created": created,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if created {
        println!("Wrote {}", path.display());
    } else {
        println!("{} already exists (use --force to overwrite)", path.display());
    }

    Ok(())
}
