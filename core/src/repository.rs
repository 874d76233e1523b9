//! Storage port for todos and the reference lists they point at.
//!
//! # Design
//! `TodoRepository` is async and object safe so a database-backed store can
//! replace `InMemoryTodoRepository` without the service noticing. The
//! in-memory store keeps every list and the id counter behind one `Mutex`;
//! no method awaits while holding it.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::TodoError;
use crate::seed;
use crate::types::{Category, Todo, TodoId, User, UserId};

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Exact, case-sensitive lookup.
    async fn category_by_name(&self, name: &str) -> Result<Category, TodoError>;

    async fn user_by_id(&self, id: UserId) -> Result<User, TodoError>;

    /// All users in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, TodoError>;

    /// All todos in insertion order.
    async fn list_todos(&self) -> Result<Vec<Todo>, TodoError>;

    /// Store `todo` under the next identifier and return the stored record.
    /// Any identifier already set on `todo` is overwritten.
    async fn create_todo(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Remove the todo with `id`. Returns whether one was removed.
    async fn delete_todo(&self, id: TodoId) -> Result<bool, TodoError>;
}

#[derive(Debug)]
struct Store {
    todos: Vec<Todo>,
    users: Vec<User>,
    categories: Vec<Category>,
    last_todo_id: TodoId,
}

/// Process-lifetime store. Identifiers start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryTodoRepository {
    store: Mutex<Store>,
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

impl InMemoryTodoRepository {
    /// A store holding the default users and categories.
    pub fn seeded() -> Self {
        Self::with_seed(seed::users(), seed::categories())
    }

    pub fn with_seed(users: Vec<User>, categories: Vec<Category>) -> Self {
        Self {
            store: Mutex::new(Store {
                todos: Vec::new(),
                users,
                categories,
                last_todo_id: 0,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, TodoError> {
        self.store
            .lock()
            .map_err(|_| TodoError::repository("store lock poisoned"))
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn category_by_name(&self, name: &str) -> Result<Category, TodoError> {
        let store = self.lock()?;
        store
            .categories
            .iter()
            .find(|category| category.name == name)
            .cloned()
            .ok_or_else(|| TodoError::CategoryNotFound {
                name: name.to_string(),
            })
    }

    async fn user_by_id(&self, id: UserId) -> Result<User, TodoError> {
        let store = self.lock()?;
        store
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(TodoError::UserNotFound { id })
    }

    async fn list_users(&self) -> Result<Vec<User>, TodoError> {
        Ok(self.lock()?.users.clone())
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.lock()?.todos.clone())
    }

    async fn create_todo(&self, mut todo: Todo) -> Result<Todo, TodoError> {
        let mut store = self.lock()?;
        if !store.categories.iter().any(|c| c.id == todo.category_id) {
            let name = todo
                .category
                .as_ref()
                .map_or_else(|| format!("#{}", todo.category_id), |c| c.name.clone());
            return Err(TodoError::CategoryNotFound { name });
        }
        if !store.users.iter().any(|u| u.id == todo.user_id) {
            return Err(TodoError::UserNotFound { id: todo.user_id });
        }
        store.last_todo_id += 1;
        todo.id = store.last_todo_id;
        store.todos.push(todo.clone());
        Ok(todo)
    }

    async fn delete_todo(&self, id: TodoId) -> Result<bool, TodoError> {
        let mut store = self.lock()?;
        match store.todos.iter().position(|todo| todo.id == id) {
            Some(index) => {
                store.todos.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
