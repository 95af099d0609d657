//! Use cases tying forms, repository and read models together.
//!
//! Service functions take validated payloads, talk to the repository through
//! its reader/writer traits and return DTOs. Repository failures are logged
//! and surfaced as [`ServiceError::Internal`] for reads, or `Ok(false)` for
//! writes that simply did not go through.

pub mod categories;
pub mod errors;
pub mod period;
pub mod todos;

pub use errors::{ServiceError, ServiceResult};
