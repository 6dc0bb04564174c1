//! Factory for "delete these files" command tasks.

use crate::workspace::Workspace;
use gantry_core::{Result, ResolvedName};
use std::path::PathBuf;
use tracing::info;

/// Register a command task under `name` whose action deletes each of
/// `files` through the workspace's filesystem. Missing files are
/// skipped silently; real I/O failures abort the action.
pub fn new_delete_files_task(
    ws: &mut Workspace,
    name: &str,
    files: Vec<PathBuf>,
) -> Result<ResolvedName> {
    let fs = ws.file_system();
    ws.new_command_task(
        name,
        &[],
        Some(Box::new(move || {
            for file in &files {
                info!(file = %file.display(), "deleting file");
                fs.remove_file(file)?;
            }
            Ok(())
        })),
    )
}
