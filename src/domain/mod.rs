//! Entities and the pure rules operating on them.

pub mod category;
pub mod dates;
pub mod filter;
pub mod period;
pub mod rollover;
pub mod snapshot;
pub mod todo;
pub mod types;
