use std::path::PathBuf;

/// Result type alias for gantry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gantry operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A task name matches none of the accepted forms, or references an
    /// unregistered root
    #[error("invalid task name '{name}': {message}")]
    InvalidName { name: String, message: String },

    /// A root prefix that does not end with the name separator
    #[error("invalid root '{root}': prefix '{prefix}' must end with a '/'")]
    InvalidRoot { root: String, prefix: String },

    /// Registering a command or file task over an existing non-placeholder
    /// task
    #[error("task '{name}' already exists")]
    TaskExists { name: String },

    /// An operation attempted in the wrong session state
    #[error("session state violation during {operation}: {message}")]
    SessionState { operation: String, message: String },

    /// A run or staleness query against an unregistered task name
    #[error("task '{name}' does not exist")]
    UnknownTask { name: String },

    /// A dependency cycle discovered while validating the task registry
    #[error("cyclic dependency detected through task '{name}'")]
    CyclicDependency { name: String },

    /// A task action failed; the walk stops and the failure propagates
    #[error("action of task '{task}' failed: {source}")]
    Action {
        task: String,
        #[source]
        source: Box<Error>,
    },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal inconsistencies the registration invariants make
    /// unreachable, and host errors funneled through `anyhow`
    #[error("internal error: {message}")]
    Internal { message: String },
}

// Conversion implementations
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Error::Internal {
            message: format!("{error:#}"),
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create an invalid name error
    #[must_use]
    pub fn invalid_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid root error
    #[must_use]
    pub fn invalid_root(root: impl Into<String>, prefix: impl Into<String>) -> Self {
        Error::InvalidRoot {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a task-already-exists error
    #[must_use]
    pub fn task_exists(name: impl Into<String>) -> Self {
        Error::TaskExists { name: name.into() }
    }

    /// Create a session state violation error
    #[must_use]
    pub fn session_state(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SessionState {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an unknown task error
    #[must_use]
    pub fn unknown_task(name: impl Into<String>) -> Self {
        Error::UnknownTask { name: name.into() }
    }

    /// Create a cyclic dependency error naming a task on the cycle
    #[must_use]
    pub fn cyclic_dependency(name: impl Into<String>) -> Self {
        Error::CyclicDependency { name: name.into() }
    }

    /// Wrap a failed action's error with the owning task's name
    #[must_use]
    pub fn action(task: impl Into<String>, source: Error) -> Self {
        Error::Action {
            task: task.into(),
            source: Box::new(source),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = Error::invalid_root("ROOT1", "tiger");
        assert_eq!(
            err.to_string(),
            "invalid root 'ROOT1': prefix 'tiger' must end with a '/'"
        );

        let err = Error::session_state("run", "the workspace is out of session");
        assert_eq!(
            err.to_string(),
            "session state violation during run: the workspace is out of session"
        );
    }

    #[test]
    fn action_error_chains_its_source() {
        let inner = Error::file_system(
            "out/a.txt",
            "write",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let err = Error::action("//out/a.txt", inner);
        assert!(err.to_string().starts_with("action of task '//out/a.txt'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: Error = io.into();
        assert!(matches!(err, Error::FileSystem { .. }));
    }
}
