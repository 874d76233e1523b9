//! Reference data loaded into a fresh store.

use crate::types::{Category, User};

/// Category names in identifier order, starting at 1.
pub const CATEGORY_NAMES: [&str; 10] = [
    "Others",
    "Work",
    "Personal",
    "Shopping",
    "Health",
    "Finance",
    "Education",
    "Travel",
    "Fitness",
    "Hobby",
];

pub fn categories() -> Vec<Category> {
    CATEGORY_NAMES
        .iter()
        .zip(1..)
        .map(|(name, id)| Category {
            id,
            name: (*name).to_string(),
        })
        .collect()
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "John Doe".to_string(),
            email: "johndoe@mail.com".to_string(),
            password: "1234".to_string(),
        },
        User {
            id: 2,
            name: "Jane Doe".to_string(),
            email: "janedoe@mail.com".to_string(),
            password: "1234".to_string(),
        },
    ]
}
