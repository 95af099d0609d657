//! Flat read models handed to the presentation layer.

pub mod categories;
pub mod period;
pub mod todos;
