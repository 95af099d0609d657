use std::collections::HashSet;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategoryName};
use crate::repository::{
    CategoryReader, CategoryWriter, InMemoryRepository, RepositoryError, RepositoryResult,
};

impl CategoryReader for InMemoryRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }

    fn default_category_id(&self) -> RepositoryResult<CategoryId> {
        Ok(self.default_category_id)
    }
}

impl CategoryWriter for InMemoryRepository {
    fn create_category(&mut self, category: &NewCategory) -> RepositoryResult<CategoryId> {
        let id = self.allocate_category_id()?;
        self.categories.push(Category {
            id,
            name: category.name.clone(),
            created_at: category.created_at,
        });
        Ok(id)
    }

    fn update_category(&mut self, id: CategoryId, name: &CategoryName) -> RepositoryResult<usize> {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(0);
        };
        category.name = name.clone();
        Ok(1)
    }

    fn delete_category(&mut self, id: CategoryId) -> RepositoryResult<usize> {
        if id == self.default_category_id {
            return Err(RepositoryError::ConstraintViolation(
                "the default category cannot be deleted".to_string(),
            ));
        }
        if !self.has_category(id) {
            return Ok(0);
        }
        if self.categories.len() <= 1 {
            return Err(RepositoryError::ConstraintViolation(
                "the last category cannot be deleted".to_string(),
            ));
        }

        self.categories.retain(|category| category.id != id);

        let default_category_id = self.default_category_id;
        for todo in self
            .todos
            .iter_mut()
            .filter(|todo| todo.category_id == Some(id))
        {
            todo.category_id = Some(default_category_id);
        }
        if self.filter_options.category_id == Some(id) {
            self.filter_options.category_id = None;
        }
        self.refresh_filtered();

        Ok(1)
    }

    fn reorder_categories(&mut self, categories: Vec<Category>) -> RepositoryResult<usize> {
        let current: HashSet<CategoryId> = self.categories.iter().map(|c| c.id).collect();
        let supplied: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();

        if categories.len() != self.categories.len() || supplied != current {
            return Err(RepositoryError::ValidationError(
                "reordered categories must be a permutation of the existing ones".to_string(),
            ));
        }

        let affected = categories.len();
        self.categories = categories;
        Ok(affected)
    }
}
