use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::filter::FilterOptions;
use crate::domain::todo::Todo;
use crate::domain::types::CategoryId;

/// Serializable image of the whole planner state.
///
/// Categories keep their display order. Instants serialize as ISO-8601.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub default_category_id: CategoryId,
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub filter_options: FilterOptions,
}
