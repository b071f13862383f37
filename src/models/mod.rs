pub mod filter;
pub mod todo;
pub mod user;

use serde::{Deserialize, Serialize};

pub use filter::{FilterPage, FilterTodo};
pub use todo::{Todo, TodoList, TodoPublic, TodoSchema, TodoState, TodoUpdate};
pub use user::{User, UserList, UserPublic, UserSchema};

/// Plain confirmation body, `{"message": "..."}`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
