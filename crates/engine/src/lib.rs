//! The gantry task engine.
//!
//! An embeddable, synchronous build-task engine: a host declares named
//! tasks (commands, file-producing actions, and forward-reference
//! placeholders), wires dependencies between them, and executes only the
//! tasks that are stale within an explicit session.
//!
//! ```no_run
//! use gantry_engine::Workspace;
//!
//! # fn main() -> gantry_core::Result<()> {
//! let mut ws = Workspace::builder().root("OUT", "target/demo/")?.build();
//! ws.new_file_task("/OUT/hello.txt", &[], Some(Box::new(|| {
//!     std::fs::write("target/demo/hello.txt", "hello")?;
//!     Ok(())
//! })))?;
//!
//! ws.start_session()?;
//! ws.run("/OUT/hello.txt")?;
//! ws.end_session()?;
//! # Ok(())
//! # }
//! ```
//!
//! The `cleanup`, `groups`, and `indexed` modules are convenience layers
//! built purely on the public `Workspace` contract.

pub mod cleanup;
pub mod fs;
pub mod graph;
pub mod groups;
pub mod indexed;
pub mod session;
pub mod task;
pub mod workspace;

pub use self::{
    fs::{FileSystem, OsFileSystem},
    groups::TaskGroupBuilder,
    indexed::FileTaskFamily,
    task::{Action, Task, TaskKind},
    workspace::{Workspace, WorkspaceBuilder},
};
