//! branch-sync: merge a base branch into every remote branch
//!
//! Fetches a remote, merges `<remote>/<base>` into each of its other
//! branches, pushes the clean merges and leaves conflicts checked out for
//! manual resolution.

pub mod config;
pub mod error;
pub mod git;
pub mod sync;
pub mod types;

pub use error::{Error, Result};
