//! Core domain types, errors, and constants for the `gantry` task engine.
//!
//! This crate holds the pure, I/O-free foundation of the engine:
//!
//! - **`errors`**: The primary `Error` enum and `Result` type alias,
//!   centralizing all failure modes of the engine.
//! - **`names`**: The root namespace (`RootSet`) and the canonical task
//!   identifier (`ResolvedName`), together with the name resolution
//!   algorithm that maps every accepted surface form onto resolved form.
//! - **`constants`**: Shared static constants such as the default root
//!   identifier and the resolved-name marker.

pub mod constants;
pub mod errors;
pub mod names;

pub use self::{
    constants::*,
    errors::{Error, Result},
    names::{ResolvedName, RootSet},
};
