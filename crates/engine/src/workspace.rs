//! The `Workspace` façade: task registry, root namespace, session state
//! machine, and the incremental run algorithm.
//!
//! A host registers roots and tasks while out of session; registration
//! resolves every name and auto-creates placeholder entries for
//! dependencies that do not exist yet, so the registry never holds a
//! dangling reference. `start_session` validates the whole graph for
//! cycles (when it changed), then `run` walks dependencies depth-first
//! in declared order, consulting the session-memoized staleness of each
//! task before executing it.

use crate::fs::{FileSystem, OsFileSystem};
use crate::graph;
use crate::session::Session;
use crate::task::{Action, Task, TaskKind};
use gantry_core::{Error, Result, ResolvedName, RootSet};
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct Workspace {
    roots: RootSet,
    tasks: IndexMap<ResolvedName, Task>,
    fs: Arc<dyn FileSystem>,
    session: Option<Session>,
    /// Set by every successful registration; cleared by a successful
    /// cycle check. Gates the full-registry scan in `start_session`.
    modified: bool,
}

impl Workspace {
    pub fn builder() -> WorkspaceBuilder {
        WorkspaceBuilder::new()
    }

    /// Canonicalize a task name against the root namespace.
    pub fn resolve_name(&self, name: &str) -> Result<ResolvedName> {
        self.roots.resolve(name)
    }

    pub fn task_exists(&self, name: &str) -> Result<bool> {
        let resolved = self.resolve_name(name)?;
        Ok(self.tasks.contains_key(&resolved))
    }

    /// Register a command task. Fails in-session and over an existing
    /// non-placeholder task; replaces a placeholder of the same name.
    pub fn new_command_task(
        &mut self,
        name: &str,
        dependencies: &[&str],
        action: Option<Action>,
    ) -> Result<ResolvedName> {
        self.register(name, dependencies, |name, deps| {
            Task::command(name, deps, action)
        })
    }

    /// Register a file task whose action is expected to produce the file
    /// addressed by the resolved name. Same preconditions as
    /// [`new_command_task`](Self::new_command_task).
    pub fn new_file_task(
        &mut self,
        name: &str,
        dependencies: &[&str],
        action: Option<Action>,
    ) -> Result<ResolvedName> {
        self.register(name, dependencies, |name, deps| Task::file(name, deps, action))
    }

    /// Register a placeholder under `name` unless any task already
    /// exists there. Returns the resolved name either way.
    pub fn new_placeholder_task(&mut self, name: &str) -> Result<ResolvedName> {
        self.ensure_out_of_session("new_placeholder_task")?;
        let resolved = self.resolve_name(name)?;
        if !self.tasks.contains_key(&resolved) {
            debug!(task = %resolved, "registered placeholder task");
            self.tasks
                .insert(resolved.clone(), Task::placeholder(resolved.clone()));
            self.modified = true;
        }
        Ok(resolved)
    }

    fn register(
        &mut self,
        name: &str,
        dependencies: &[&str],
        build: impl FnOnce(ResolvedName, Vec<ResolvedName>) -> Task,
    ) -> Result<ResolvedName> {
        self.ensure_out_of_session("task registration")?;
        let resolved = self.resolve_name(name)?;
        if let Some(existing) = self.tasks.get(&resolved) {
            if !existing.is_placeholder() {
                return Err(Error::task_exists(resolved.as_str()));
            }
        }
        let mut deps = Vec::with_capacity(dependencies.len());
        for dep in dependencies {
            deps.push(self.new_placeholder_task(dep)?);
        }
        let task = build(resolved.clone(), deps);
        debug!(
            task = %resolved,
            kind = task.kind().label(),
            deps = task.dependencies().len(),
            "registered task"
        );
        self.tasks.insert(resolved.clone(), task);
        self.modified = true;
        Ok(resolved)
    }

    /// Enter a session. When the registry changed since the last check,
    /// the whole graph is validated first; on a cycle the workspace
    /// stays out of session.
    pub fn start_session(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(Error::session_state(
                "start_session",
                "a session can only be started when the workspace is out of session",
            ));
        }
        if self.modified {
            debug!(tasks = self.tasks.len(), "registry changed, checking for cycles");
            graph::check_cycles(&self.tasks)?;
        }
        self.session = Some(Session::new());
        self.modified = false;
        debug!("session started");
        Ok(())
    }

    /// Leave the session, discarding the staleness memo.
    pub fn end_session(&mut self) -> Result<()> {
        if self.session.take().is_none() {
            return Err(Error::session_state(
                "end_session",
                "a session can only be ended when the workspace is in session",
            ));
        }
        debug!("session ended");
        Ok(())
    }

    pub fn is_in_session(&self) -> bool {
        self.session.is_some()
    }

    /// Run a task and, depth-first in declared order, every transitive
    /// dependency that is stale this session. Each task executes at most
    /// once per session; an action failure aborts the walk immediately,
    /// leaving earlier completions in place.
    pub fn run(&mut self, name: &str) -> Result<()> {
        self.ensure_in_session("run")?;
        let resolved = self.resolve_name(name)?;
        if !self.tasks.contains_key(&resolved) {
            return Err(Error::unknown_task(resolved.as_str()));
        }
        self.run_resolved(&resolved)
    }

    fn run_resolved(&mut self, name: &ResolvedName) -> Result<()> {
        let deps = self.task(name)?.dependencies().to_vec();
        for dep in &deps {
            if self.needs_to_run_resolved(dep)? {
                self.run_resolved(dep)?;
            }
        }
        if self.needs_to_run_resolved(name)? {
            debug!(task = %name, "executing task");
            let task = self
                .tasks
                .get_mut(name)
                .ok_or_else(|| Error::internal(format!("task '{name}' vanished mid-run")))?;
            task.execute()?;
            self.session_mut("run")?.mark_done(name.clone());
        }
        Ok(())
    }

    /// Whether a task is stale this session. The first query computes
    /// the task's staleness and memoizes the decision; later queries in
    /// the same session return the memo without recomputation.
    pub fn needs_to_run(&mut self, name: &str) -> Result<bool> {
        self.ensure_in_session("needs_to_run")?;
        let resolved = self.resolve_name(name)?;
        if !self.tasks.contains_key(&resolved) {
            return Err(Error::unknown_task(resolved.as_str()));
        }
        self.needs_to_run_resolved(&resolved)
    }

    fn needs_to_run_resolved(&mut self, name: &ResolvedName) -> Result<bool> {
        if let Some(done) = self.session("needs_to_run")?.considered_done(name) {
            return Ok(!done);
        }
        let needs = self.compute_needs_to_run(name)?;
        trace!(task = %name, stale = needs, "staleness computed");
        self.session_mut("needs_to_run")?.record(name.clone(), !needs);
        Ok(needs)
    }

    fn compute_needs_to_run(&mut self, name: &ResolvedName) -> Result<bool> {
        match self.task(name)?.kind() {
            TaskKind::Placeholder => Ok(false),
            TaskKind::Command { .. } => Ok(true),
            TaskKind::File { .. } => self.file_is_stale(name),
        }
    }

    /// Staleness of a file task: stale when the target file is missing,
    /// when any dependency is itself stale this session, or when any
    /// dependency's file is newer than the target. A dependency without
    /// a file (non-file task, or file not produced yet) counts as
    /// "always newer": unknown freshness means assume stale.
    fn file_is_stale(&mut self, name: &ResolvedName) -> Result<bool> {
        let fs = Arc::clone(&self.fs);
        let target_mtime = match fs.modified(&name.to_path_buf())? {
            None => return Ok(true),
            Some(mtime) => mtime,
        };
        let deps = self.task(name)?.dependencies().to_vec();
        for dep in &deps {
            if self.needs_to_run_resolved(dep)? {
                return Ok(true);
            }
            match fs.modified(&dep.to_path_buf())? {
                None => return Ok(true),
                Some(dep_mtime) if dep_mtime > target_mtime => return Ok(true),
                Some(_) => {}
            }
        }
        Ok(false)
    }

    /// Whether the named task has anything to execute.
    pub fn can_run(&self, name: &str) -> Result<bool> {
        Ok(self.task(&self.resolve_name(name)?)?.can_run())
    }

    /// The filesystem path addressed by a task name.
    pub fn file_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.resolve_name(name)?.to_path_buf())
    }

    pub fn file_system(&self) -> Arc<dyn FileSystem> {
        Arc::clone(&self.fs)
    }

    pub fn roots(&self) -> &RootSet {
        &self.roots
    }

    /// All registered resolved task names, in registration order.
    pub fn task_names(&self) -> impl Iterator<Item = &ResolvedName> {
        self.tasks.keys()
    }

    fn task(&self, name: &ResolvedName) -> Result<&Task> {
        self.tasks
            .get(name)
            .ok_or_else(|| Error::unknown_task(name.as_str()))
    }

    fn session(&self, operation: &str) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| Error::session_state(operation, "the workspace is out of session"))
    }

    fn session_mut(&mut self, operation: &str) -> Result<&mut Session> {
        self.session
            .as_mut()
            .ok_or_else(|| Error::session_state(operation, "the workspace is out of session"))
    }

    fn ensure_in_session(&self, operation: &str) -> Result<()> {
        self.session(operation).map(|_| ())
    }

    fn ensure_out_of_session(&self, operation: &str) -> Result<()> {
        if self.session.is_some() {
            return Err(Error::session_state(
                operation,
                "tasks can only be registered when the workspace is out of session",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("roots", &self.roots)
            .field("tasks", &self.tasks.len())
            .field("in_session", &self.session.is_some())
            .field("modified", &self.modified)
            .finish()
    }
}

/// Builds a [`Workspace`], pre-seeded with the default root
/// `ROOT0 -> "./"` and the host filesystem.
pub struct WorkspaceBuilder {
    roots: RootSet,
    fs: Arc<dyn FileSystem>,
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WorkspaceBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceBuilder")
            .field("roots", &self.roots)
            .finish()
    }
}

impl WorkspaceBuilder {
    pub fn new() -> Self {
        Self {
            roots: RootSet::default(),
            fs: Arc::new(OsFileSystem),
        }
    }

    /// Register a root. The prefix must end with `/`.
    pub fn root(mut self, id: impl Into<String>, prefix: impl Into<String>) -> Result<Self> {
        self.roots.insert(id, prefix)?;
        Ok(self)
    }

    pub fn file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn build(self) -> Workspace {
        Workspace {
            roots: self.roots,
            tasks: IndexMap::new(),
            fs: self.fs,
            session: None,
            modified: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_seeds_the_default_root() {
        let ws = Workspace::builder().build();
        assert_eq!(ws.roots().get("ROOT0"), Some("./"));
        assert!(!ws.is_in_session());
    }

    #[test]
    fn builder_can_override_the_default_root() {
        let ws = Workspace::builder().root("ROOT0", "cat/").unwrap().build();
        assert_eq!(ws.roots().get("ROOT0"), Some("cat/"));
        assert_eq!(ws.roots().len(), 1);
    }

    #[test]
    fn registration_creates_placeholders_for_unknown_dependencies() {
        let mut ws = Workspace::builder().build();
        ws.new_command_task("a", &["b", "c"], None).unwrap();

        assert!(ws.task_exists("b").unwrap());
        assert!(ws.task_exists("c").unwrap());
        let names: Vec<_> = ws.task_names().map(|n| n.as_str().to_string()).collect();
        assert_eq!(names, vec!["//./b", "//./c", "//./a"]);
    }

    #[test]
    fn replacing_a_placeholder_forces_a_recheck() {
        let mut ws = Workspace::builder().build();
        ws.new_command_task("a", &["b"], None).unwrap();
        ws.start_session().unwrap();
        ws.end_session().unwrap();
        assert!(!ws.modified);

        // The replacement marks the registry modified again.
        ws.new_command_task("b", &[], None).unwrap();
        assert!(ws.modified);
        ws.start_session().unwrap();
        ws.end_session().unwrap();
    }

    #[test]
    fn can_run_reports_unknown_tasks() {
        let ws = Workspace::builder().build();
        assert!(matches!(
            ws.can_run("ghost").unwrap_err(),
            Error::UnknownTask { .. }
        ));
    }
}
