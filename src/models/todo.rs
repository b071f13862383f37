use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle tag of a to-do item.
/// Corresponds to the `todo_state` SQL enum. Any value may follow any other.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "todo_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TodoState {
    Draft,
    Todo,
    Doing,
    Done,
}

/// A to-do row as stored in the `todos` table.
#[derive(Debug, Clone, FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Overwrites the fields present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: TodoUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
    }
}

/// Payload for creating a to-do item.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoSchema {
    pub title: String,
    pub description: String,
    pub state: TodoState,
}

/// Partial update payload. Omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.state.is_none()
    }
}

/// What callers see of a to-do item; the owner id stays internal.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPublic {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoPublic {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            state: todo.state,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<TodoPublic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_names() {
        let states = [
            (TodoState::Draft, "draft"),
            (TodoState::Todo, "todo"),
            (TodoState::Doing, "doing"),
            (TodoState::Done, "done"),
        ];
        for (state, name) in states {
            assert_eq!(serde_json::to_value(state).unwrap(), name);
        }
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let payload = serde_json::json!({
            "title": "t",
            "description": "d",
            "state": "test"
        });
        assert!(serde_json::from_value::<TodoSchema>(payload).is_err());
    }

    #[test]
    fn test_partial_update_accepts_any_subset() {
        let update: TodoUpdate =
            serde_json::from_value(serde_json::json!({ "title": "Updated Todo" })).unwrap();
        assert_eq!(update.title.as_deref(), Some("Updated Todo"));
        assert!(update.description.is_none());
        assert!(update.state.is_none());

        let empty: TodoUpdate = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_apply_changes_only_supplied_fields() {
        let now = Utc::now();
        let mut todo = Todo {
            id: 1,
            title: "old title".into(),
            description: "old description".into(),
            state: TodoState::Draft,
            user_id: 7,
            created_at: now,
            updated_at: now,
        };

        todo.apply(TodoUpdate {
            state: Some(TodoState::Done),
            ..TodoUpdate::default()
        });
        assert_eq!(todo.title, "old title");
        assert_eq!(todo.description, "old description");
        assert_eq!(todo.state, TodoState::Done);

        todo.apply(TodoUpdate {
            title: Some("new title".into()),
            ..TodoUpdate::default()
        });
        assert_eq!(todo.title, "new title");
        assert_eq!(todo.state, TodoState::Done);

        todo.apply(TodoUpdate {
            state: Some(TodoState::Draft),
            ..TodoUpdate::default()
        });
        assert_eq!(todo.state, TodoState::Draft);
    }

    #[test]
    fn test_public_projection_hides_owner() {
        let now = Utc::now();
        let todo = Todo {
            id: 3,
            title: "t".into(),
            description: "d".into(),
            state: TodoState::Doing,
            user_id: 42,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(TodoPublic::from(todo)).unwrap();
        assert!(json.get("user_id").is_none());
        assert_eq!(json["state"], "doing");
    }
}
