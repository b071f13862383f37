use serde::{Deserialize, Serialize};
use validator::Validate;

use super::todo::TodoState;

fn default_offset() -> i64 {
    0
}

fn default_limit() -> i64 {
    100
}

/// Offset/limit pagination shared by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FilterPage {
    #[serde(default = "default_offset")]
    #[validate(range(min = 0))]
    pub offset: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 0))]
    pub limit: i64,
}

impl Default for FilterPage {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            limit: default_limit(),
        }
    }
}

/// Query string accepted by `GET /todos/`. Given filters are combined with AND.
///
/// Pagination fields are repeated rather than flattened: `serde_urlencoded`
/// cannot parse numbers through `#[serde(flatten)]`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FilterTodo {
    #[serde(default = "default_offset")]
    #[validate(range(min = 0))]
    pub offset: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 0))]
    pub limit: i64,
    /// Substring of the title.
    pub title: Option<String>,
    /// Substring of the description.
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

impl Default for FilterTodo {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            limit: default_limit(),
            title: None,
            description: None,
            state: None,
        }
    }
}

impl FilterTodo {
    pub fn page(&self) -> FilterPage {
        FilterPage {
            offset: self.offset,
            limit: self.limit,
        }
    }
}
