//! Families of file tasks indexed by integer coordinates.
//!
//! A family owns `count` file tasks (arity 1) or a single one (arity 0)
//! plus two commands registered under the family's prefix: a creation
//! command aggregating every member, and a `_clean` command deleting the
//! members' files. Construction is idempotent: when the first member
//! name is already registered, the family is re-described without
//! touching the registry.

use crate::cleanup;
use crate::workspace::Workspace;
use gantry_core::{Error, Result, ResolvedName};

pub struct FileTaskFamily {
    prefix: ResolvedName,
    creation_command: ResolvedName,
    cleaning_command: ResolvedName,
    shape: Vec<usize>,
    members: Vec<ResolvedName>,
}

impl FileTaskFamily {
    /// An arity-0 family: one file task, registered by `define` unless
    /// the name already exists.
    pub fn single(
        ws: &mut Workspace,
        prefix: &str,
        command: &str,
        file_task_name: &str,
        define: impl FnOnce(&mut Workspace, &ResolvedName) -> Result<()>,
    ) -> Result<Self> {
        let prefix = ws.resolve_name(prefix)?;
        let member = ws.resolve_name(file_task_name)?;
        let (creation_command, cleaning_command) = commands_for(&prefix, command)?;
        let family = Self {
            prefix,
            creation_command,
            cleaning_command,
            shape: Vec::new(),
            members: vec![member.clone()],
        };
        if !ws.task_exists(member.as_str())? {
            define(ws, &member)?;
            family.register_commands(ws)?;
        }
        Ok(family)
    }

    /// An arity-1 family of `count` file tasks named by `name_for`, each
    /// registered by `define` unless the first member already exists.
    pub fn indexed(
        ws: &mut Workspace,
        prefix: &str,
        command: &str,
        count: usize,
        name_for: impl Fn(usize) -> String,
        mut define: impl FnMut(&mut Workspace, usize, &ResolvedName) -> Result<()>,
    ) -> Result<Self> {
        let prefix = ws.resolve_name(prefix)?;
        let mut members = Vec::with_capacity(count);
        for index in 0..count {
            members.push(ws.resolve_name(&name_for(index))?);
        }
        let (creation_command, cleaning_command) = commands_for(&prefix, command)?;
        let family = Self {
            prefix,
            creation_command,
            cleaning_command,
            shape: vec![count],
            members,
        };
        if count == 0 {
            return Ok(family);
        }
        if !ws.task_exists(family.members[0].as_str())? {
            for (index, member) in family.members.iter().enumerate() {
                define(ws, index, member)?;
            }
            family.register_commands(ws)?;
        }
        Ok(family)
    }

    fn register_commands(&self, ws: &mut Workspace) -> Result<()> {
        let member_names: Vec<&str> = self.members.iter().map(ResolvedName::as_str).collect();
        ws.new_command_task(self.creation_command.as_str(), &member_names, None)?;
        cleanup::new_delete_files_task(
            ws,
            self.cleaning_command.as_str(),
            self.members.iter().map(ResolvedName::to_path_buf).collect(),
        )?;
        Ok(())
    }

    pub fn prefix(&self) -> &ResolvedName {
        &self.prefix
    }

    /// Name of the command that builds every member.
    pub fn creation_command_name(&self) -> &ResolvedName {
        &self.creation_command
    }

    /// Name of the command that deletes every member's file.
    pub fn cleaning_command_name(&self) -> &ResolvedName {
        &self.cleaning_command
    }

    /// Extent along each index dimension; empty for arity 0.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn arity(&self) -> usize {
        self.shape.len()
    }

    /// The member task addressed by `index`, which must have exactly
    /// `arity()` coordinates, each within the shape.
    pub fn file_task_name(&self, index: &[usize]) -> Result<&ResolvedName> {
        if index.len() != self.arity() {
            return Err(Error::invalid_name(
                format!("{:?}", index),
                format!("this family has arity {}", self.arity()),
            ));
        }
        let flat = match index {
            [] => 0,
            [i] => {
                if *i >= self.shape[0] {
                    return Err(Error::invalid_name(
                        format!("{:?}", index),
                        format!("index out of range for shape {:?}", self.shape),
                    ));
                }
                *i
            }
            _ => {
                return Err(Error::invalid_name(
                    format!("{:?}", index),
                    "unsupported arity",
                ))
            }
        };
        self.members
            .get(flat)
            .ok_or_else(|| Error::internal("family member list out of sync with shape"))
    }
}

// The prefix is resolved, so appending a segment keeps resolved form.
fn commands_for(prefix: &ResolvedName, command: &str) -> Result<(ResolvedName, ResolvedName)> {
    let creation = ResolvedName::parse(format!("{prefix}/{command}"))?;
    let cleaning = ResolvedName::parse(format!("{prefix}/{command}_clean"))?;
    Ok((creation, cleaning))
}
