//! Task variants and their execution contract.
//!
//! The variant set is closed (placeholder, command, file), so tasks are a
//! single struct over a tagged `TaskKind` rather than an open hierarchy.
//! Staleness for file tasks is computed by the [`Workspace`], which owns
//! the filesystem and the session memo; a task itself only knows its
//! name, its resolved dependencies, and its optional action.
//!
//! [`Workspace`]: crate::workspace::Workspace

use gantry_core::{Error, Result, ResolvedName};
use std::fmt;

/// A task's executable payload. `None` models a pure dependency
/// aggregator (or a file node nothing can produce yet).
pub type Action = Box<dyn FnMut() -> Result<()> + Send>;

pub enum TaskKind {
    /// Forward-reference stand-in created when a dependency is named
    /// before its real definition is registered. Replaceable by a
    /// command or file task under the same name.
    Placeholder,
    /// Always re-executes once reached; idempotence is the action's own
    /// responsibility.
    Command { action: Option<Action> },
    /// Expected to produce the file addressed by the task's resolved
    /// name; staleness is decided from modification times.
    File { action: Option<Action> },
}

impl TaskKind {
    /// Short label used in logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Placeholder => "placeholder",
            Self::Command { .. } => "command",
            Self::File { .. } => "file",
        }
    }
}

impl fmt::Debug for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => write!(f, "Placeholder"),
            Self::Command { action } => f
                .debug_struct("Command")
                .field("has_action", &action.is_some())
                .finish(),
            Self::File { action } => f
                .debug_struct("File")
                .field("has_action", &action.is_some())
                .finish(),
        }
    }
}

#[derive(Debug)]
pub struct Task {
    name: ResolvedName,
    dependencies: Vec<ResolvedName>,
    kind: TaskKind,
}

impl Task {
    pub fn placeholder(name: ResolvedName) -> Self {
        Self {
            name,
            dependencies: Vec::new(),
            kind: TaskKind::Placeholder,
        }
    }

    pub fn command(
        name: ResolvedName,
        dependencies: Vec<ResolvedName>,
        action: Option<Action>,
    ) -> Self {
        Self {
            name,
            dependencies,
            kind: TaskKind::Command { action },
        }
    }

    pub fn file(
        name: ResolvedName,
        dependencies: Vec<ResolvedName>,
        action: Option<Action>,
    ) -> Self {
        Self {
            name,
            dependencies,
            kind: TaskKind::File { action },
        }
    }

    pub fn name(&self) -> &ResolvedName {
        &self.name
    }

    /// Resolved dependency names in declared order.
    pub fn dependencies(&self) -> &[ResolvedName] {
        &self.dependencies
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, TaskKind::Placeholder)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, TaskKind::File { .. })
    }

    /// Whether this task has anything to execute.
    pub fn can_run(&self) -> bool {
        match &self.kind {
            TaskKind::Placeholder => false,
            TaskKind::Command { action } | TaskKind::File { action } => action.is_some(),
        }
    }

    /// Invoke the task's action, if any. Placeholders and action-less
    /// aggregators are no-ops. Failures are wrapped with the task name.
    pub fn execute(&mut self) -> Result<()> {
        let action = match &mut self.kind {
            TaskKind::Placeholder => None,
            TaskKind::Command { action } | TaskKind::File { action } => action.as_mut(),
        };
        if let Some(action) = action {
            action().map_err(|e| Error::action(self.name.as_str(), e))?;
        }
        Ok(())
    }
}
