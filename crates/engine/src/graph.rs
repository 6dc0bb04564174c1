//! Cycle detection over the task registry.
//!
//! A 3-color depth-first search: a node is `Visiting` while it is on the
//! DFS stack and `Visited` once fully explored; meeting a `Visiting`
//! node again means a cycle. The check walks *every* registry entry, not
//! just nodes reachable from some root, because any placeholder may
//! later be depended upon. It only runs when the registry changed since
//! the last successful check, so the full scan is cheap in practice.

use crate::task::Task;
use gantry_core::{Error, Result, ResolvedName};
use indexmap::IndexMap;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Visited,
}

/// Validate that the registry's dependency graph is acyclic.
pub fn check_cycles(tasks: &IndexMap<ResolvedName, Task>) -> Result<()> {
    let mut marks: HashMap<&ResolvedName, Mark> = HashMap::with_capacity(tasks.len());
    for node in tasks.keys() {
        if !marks.contains_key(node) {
            dfs(node, tasks, &mut marks)?;
        }
    }
    Ok(())
}

fn dfs<'a>(
    node: &'a ResolvedName,
    tasks: &'a IndexMap<ResolvedName, Task>,
    marks: &mut HashMap<&'a ResolvedName, Mark>,
) -> Result<()> {
    marks.insert(node, Mark::Visiting);
    let task = tasks
        .get(node)
        .ok_or_else(|| Error::internal(format!("dependency '{node}' missing from registry")))?;
    for dep in task.dependencies() {
        match marks.get(dep) {
            None => dfs(dep, tasks, marks)?,
            Some(Mark::Visiting) => return Err(Error::cyclic_dependency(dep.as_str())),
            Some(Mark::Visited) => {}
        }
    }
    marks.insert(node, Mark::Visited);
    Ok(())
}
