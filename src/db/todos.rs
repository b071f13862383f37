use sqlx::PgConnection;

use crate::models::{FilterTodo, Todo, TodoSchema};

const TODO_COLUMNS: &str = "id, title, description, state, user_id, created_at, updated_at";

/// Builds the owner-scoped list query for `filter`.
///
/// Placeholders are numbered in the order the values must be bound:
/// owner id, title, description, state (each only when present), offset, limit.
pub fn list_sql(filter: &FilterTodo) -> String {
    let mut sql = format!("SELECT {} FROM todos WHERE user_id = $1", TODO_COLUMNS);
    let mut param_count = 2;

    if filter.title.is_some() {
        sql.push_str(&format!(" AND title LIKE ${}", param_count));
        param_count += 1;
    }
    if filter.description.is_some() {
        sql.push_str(&format!(" AND description LIKE ${}", param_count));
        param_count += 1;
    }
    if filter.state.is_some() {
        sql.push_str(&format!(" AND state = ${}", param_count));
        param_count += 1;
    }

    sql.push_str(&format!(
        " ORDER BY id OFFSET ${} LIMIT ${}",
        param_count,
        param_count + 1
    ));
    sql
}

fn contains_pattern(term: &str) -> String {
    format!("%{}%", term)
}

pub async fn list(
    conn: &mut PgConnection,
    user_id: i32,
    filter: &FilterTodo,
) -> Result<Vec<Todo>, sqlx::Error> {
    let sql = list_sql(filter);
    let mut query = sqlx::query_as::<_, Todo>(&sql).bind(user_id);

    if let Some(title) = &filter.title {
        query = query.bind(contains_pattern(title));
    }
    if let Some(description) = &filter.description {
        query = query.bind(contains_pattern(description));
    }
    if let Some(state) = filter.state {
        query = query.bind(state);
    }

    query
        .bind(filter.offset)
        .bind(filter.limit)
        .fetch_all(conn)
        .await
}

pub async fn insert(
    conn: &mut PgConnection,
    user_id: i32,
    todo: &TodoSchema,
) -> Result<Todo, sqlx::Error> {
    sqlx::query_as::<_, Todo>(&format!(
        "INSERT INTO todos (title, description, state, user_id) VALUES ($1, $2, $3, $4) \
         RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(&todo.title)
    .bind(&todo.description)
    .bind(todo.state)
    .bind(user_id)
    .fetch_one(conn)
    .await
}

/// The to-do `id`, only if it belongs to `user_id`.
pub async fn find_owned(
    conn: &mut PgConnection,
    id: i32,
    user_id: i32,
) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>(&format!(
        "SELECT {} FROM todos WHERE id = $1 AND user_id = $2",
        TODO_COLUMNS
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
}

/// Writes the mutable fields of `todo` back and refreshes `updated_at`.
pub async fn save(conn: &mut PgConnection, todo: &Todo) -> Result<Todo, sqlx::Error> {
    sqlx::query_as::<_, Todo>(&format!(
        "UPDATE todos SET title = $1, description = $2, state = $3, updated_at = NOW() \
         WHERE id = $4 AND user_id = $5 RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(&todo.title)
    .bind(&todo.description)
    .bind(todo.state)
    .bind(todo.id)
    .bind(todo.user_id)
    .fetch_one(conn)
    .await
}

pub async fn delete(conn: &mut PgConnection, id: i32, user_id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
