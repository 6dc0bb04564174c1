//! Per-session memoization of staleness decisions.

use gantry_core::ResolvedName;
use std::collections::HashMap;

/// Scratch state for one evaluation session, created by
/// `Workspace::start_session` and dropped by `end_session`.
///
/// The memo maps a resolved name to "considered done": `true` once a
/// task has run this session or was found not to need running, `false`
/// when it was found stale but has not run yet. A task's staleness is
/// therefore computed at most once per session, however many dependents
/// ask about it.
#[derive(Debug, Default)]
pub struct Session {
    considered_done: HashMap<ResolvedName, bool>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The memoized decision for `name`, if one was recorded.
    pub fn considered_done(&self, name: &ResolvedName) -> Option<bool> {
        self.considered_done.get(name).copied()
    }

    /// Record the outcome of a staleness computation.
    pub fn record(&mut self, name: ResolvedName, done: bool) {
        self.considered_done.insert(name, done);
    }

    /// Mark a task as executed this session.
    pub fn mark_done(&mut self, name: ResolvedName) {
        self.considered_done.insert(name, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ResolvedName {
        ResolvedName::parse(s).unwrap()
    }

    #[test]
    fn memo_starts_empty_and_remembers_decisions() {
        let mut session = Session::new();
        let a = name("//a");

        assert_eq!(session.considered_done(&a), None);

        session.record(a.clone(), false);
        assert_eq!(session.considered_done(&a), Some(false));

        session.mark_done(a.clone());
        assert_eq!(session.considered_done(&a), Some(true));
    }
}
