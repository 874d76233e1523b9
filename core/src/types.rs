//! Domain records for the todo backend.
//!
//! # Design
//! `Todo` is both the stored record and the response body. The embedded
//! `category` and `user` are denormalized copies attached at creation time;
//! they are omitted from JSON when absent. `NewTodo` is the client draft and
//! carries only what a caller may choose.

use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type CategoryId = u64;
pub type TodoId = u64;

/// A seeded account. The password is kept exactly as seeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A stored todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub text: String,
    pub description: String,
    pub category_id: CategoryId,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Request payload for creating a todo. The category and identifier are
/// assigned server-side, so any such fields in the JSON are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub user_id: UserId,
    pub text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(user_id: UserId, text: &str, description: &str) -> Self {
        Self {
            user_id,
            text: text.to_string(),
            description: description.to_string(),
            completed: false,
        }
    }

    /// Compose the record to persist once the category and owner are known.
    /// The identifier is left at zero for the repository to assign.
    pub fn resolve(self, category: Category, user: User) -> Todo {
        Todo {
            id: 0,
            user_id: user.id,
            text: self.text,
            description: self.description,
            category_id: category.id,
            completed: self.completed,
            category: Some(category),
            user: Some(user),
        }
    }
}
