//! Category -> task set lookup.

use std::collections::{BTreeMap, HashSet};

use super::task::{Category, Task, TaskId};
use crate::error::{Result, RotaError};

/// Lookup table from category name to its tasks.
///
/// Lookups are validated: an unknown name is `UnknownCategory` and a category
/// without tasks is `EmptyTaskSet`, never a silent empty result.
///
/// # Example
///
/// ```
/// use rota_core::{Category, Task, TaskRegistry, RotaError};
///
/// let mut registry = TaskRegistry::new();
/// registry.insert(Category::new("cats", vec![Task::new("G1"), Task::new("G2")])).unwrap();
///
/// assert_eq!(registry.task_ids("cats").unwrap().len(), 2);
/// assert!(matches!(registry.task_ids("dogs"), Err(RotaError::UnknownCategory(_))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    categories: BTreeMap<String, Category>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category, rejecting duplicate category names and duplicate
    /// task ids within the category.
    pub fn insert(&mut self, category: Category) -> Result<()> {
        if self.categories.contains_key(&category.name) {
            return Err(RotaError::Config(format!(
                "duplicate category '{}'",
                category.name
            )));
        }
        let mut seen = HashSet::new();
        for task in &category.tasks {
            if !seen.insert(&task.id) {
                return Err(RotaError::Config(format!(
                    "duplicate task '{}' in category '{}'",
                    task.id, category.name
                )));
            }
        }
        self.categories.insert(category.name.clone(), category);
        Ok(())
    }

    pub fn with_category(mut self, category: Category) -> Result<Self> {
        self.insert(category)?;
        Ok(self)
    }

    /// Returns the category, failing on unknown names.
    pub fn category(&self, name: &str) -> Result<&Category> {
        self.categories
            .get(name)
            .ok_or_else(|| RotaError::UnknownCategory(name.to_string()))
    }

    /// Returns the non-empty task list of a category.
    pub fn tasks(&self, name: &str) -> Result<&[Task]> {
        let category = self.category(name)?;
        if category.tasks.is_empty() {
            return Err(RotaError::EmptyTaskSet(name.to_string()));
        }
        Ok(&category.tasks)
    }

    /// Returns the task ids of a category in declaration order.
    pub fn task_ids(&self, name: &str) -> Result<Vec<TaskId>> {
        Ok(self.tasks(name)?.iter().map(|t| t.id.clone()).collect())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
