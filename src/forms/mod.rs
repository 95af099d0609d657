//! Raw user input and its conversion into validated payloads.
//!
//! Forms mirror what a front-end submits: ids and dates arrive as strings and
//! selects may carry sentinel values. Conversions never panic; unparseable
//! optional values are treated as absent.

use crate::domain::types::CategoryId;

pub mod categories;
pub mod filters;
pub mod period;
pub mod todos;

/// Select value meaning "no restriction".
pub const ALL_SENTINEL: &str = "all";
/// Select value meaning "no category chosen".
pub const NO_CATEGORY_SENTINEL: &str = "none";

/// Parses a category select value; sentinels and garbage yield `None`.
pub(crate) fn parse_category_choice(value: &str) -> Option<CategoryId> {
    let value = value.trim();
    if value.is_empty() || value == ALL_SENTINEL || value == NO_CATEGORY_SENTINEL {
        return None;
    }
    value
        .parse::<i32>()
        .ok()
        .and_then(|id| CategoryId::new(id).ok())
}
