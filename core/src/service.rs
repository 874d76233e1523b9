//! Todo workflows on top of a repository and a classifier.
//!
//! # Design
//! Creation resolves everything before writing: classifier, category, user,
//! then a single `create_todo`. Any failure returns early, so there is
//! nothing to roll back. The classifier is awaited before any repository
//! call, so a slow prediction never holds the store.

use std::sync::Arc;

use tracing::{info, warn};

use crate::classifier::Classifier;
use crate::error::TodoError;
use crate::repository::TodoRepository;
use crate::types::{NewTodo, Todo, TodoId, User};

#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
    classifier: Arc<dyn Classifier>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            repository,
            classifier,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, TodoError> {
        self.repository.list_users().await
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>, TodoError> {
        self.repository.list_todos().await
    }

    /// Classify `draft`, attach its category and owner, and store it.
    pub async fn create_todo(&self, draft: NewTodo) -> Result<Todo, TodoError> {
        let predicted = self
            .classifier
            .predict_category(&draft)
            .await
            .inspect_err(|e| warn!(error = %e, "category prediction failed"))?;
        let category = self
            .repository
            .category_by_name(&predicted)
            .await
            // The classifier vocabulary has drifted from the stored categories.
            .inspect_err(|e| warn!(category = %predicted, error = %e, "predicted category is not stored"))?;
        let user = self.repository.user_by_id(draft.user_id).await?;

        let todo = self.repository.create_todo(draft.resolve(category, user)).await?;
        info!(id = todo.id, user_id = todo.user_id, category = %predicted, "todo created");
        Ok(todo)
    }

    pub async fn delete_todo(&self, id: TodoId) -> Result<(), TodoError> {
        if self.repository.delete_todo(id).await? {
            info!(id, "todo deleted");
            Ok(())
        } else {
            Err(TodoError::TodoNotFound { id })
        }
    }
}
