use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    /// The default category cannot be deleted.
    pub is_default: bool,
}

impl CategoryDto {
    pub fn new(value: Category, default_category_id: CategoryId) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            is_default: value.id == default_category_id,
        }
    }
}
