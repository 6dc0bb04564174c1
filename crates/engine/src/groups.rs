//! Grouping of file tasks under umbrella command and cleanup tasks.
//!
//! A builder collects file tasks into named groups; `build` registers,
//! per non-empty group, one aggregator command task `<prefix>/<group>`
//! depending on the members and one `<prefix>/<group>_clean` task
//! deleting the members' files. A pure client of the `Workspace` API.

use crate::cleanup;
use crate::workspace::Workspace;
use gantry_core::{Result, ResolvedName};
use indexmap::IndexMap;

pub struct TaskGroupBuilder {
    resolved_prefix: ResolvedName,
    groups: IndexMap<String, Vec<ResolvedName>>,
}

impl TaskGroupBuilder {
    /// Start a builder whose group tasks are registered under `prefix`.
    pub fn new(ws: &Workspace, prefix: &str) -> Result<Self> {
        Ok(Self {
            resolved_prefix: ws.resolve_name(prefix)?,
            groups: IndexMap::new(),
        })
    }

    /// Record `file_task_name` as a member of each named group.
    pub fn add(&mut self, ws: &Workspace, file_task_name: &str, groups: &[&str]) -> Result<()> {
        let resolved = ws.resolve_name(file_task_name)?;
        for group in groups {
            self.groups
                .entry((*group).to_string())
                .or_default()
                .push(resolved.clone());
        }
        Ok(())
    }

    pub fn resolved_prefix(&self) -> &ResolvedName {
        &self.resolved_prefix
    }

    /// Register the umbrella and cleanup tasks for every non-empty
    /// group, in the order the groups were first added.
    pub fn build(self, ws: &mut Workspace) -> Result<()> {
        for (group, members) in &self.groups {
            if members.is_empty() {
                continue;
            }
            let member_names: Vec<&str> = members.iter().map(ResolvedName::as_str).collect();
            ws.new_command_task(
                &format!("{}/{group}", self.resolved_prefix),
                &member_names,
                None,
            )?;
            cleanup::new_delete_files_task(
                ws,
                &format!("{}/{group}_clean", self.resolved_prefix),
                members.iter().map(ResolvedName::to_path_buf).collect(),
            )?;
        }
        Ok(())
    }
}
