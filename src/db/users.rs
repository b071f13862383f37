use sqlx::PgConnection;

use crate::models::{FilterPage, User};

const USER_COLUMNS: &str = "id, username, email, password, created_at, updated_at";

pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn find_by_email(
    conn: &mut PgConnection,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
        .bind(email)
        .fetch_optional(conn)
        .await
}

/// Every account already holding `username` or `email` (at most two rows).
pub async fn find_conflicting(
    conn: &mut PgConnection,
    username: &str,
    email: &str,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = $1 OR email = $2 ORDER BY id LIMIT 2",
        USER_COLUMNS
    ))
    .bind(username)
    .bind(email)
    .fetch_all(conn)
    .await
}

pub async fn list(conn: &mut PgConnection, page: &FilterPage) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY id OFFSET $1 LIMIT $2",
        USER_COLUMNS
    ))
    .bind(page.offset)
    .bind(page.limit)
    .fetch_all(conn)
    .await
}

pub async fn insert(
    conn: &mut PgConnection,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING {}",
        USER_COLUMNS
    ))
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(conn)
    .await
}

pub async fn update(
    conn: &mut PgConnection,
    id: i32,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET username = $1, email = $2, password = $3, updated_at = NOW() \
         WHERE id = $4 RETURNING {}",
        USER_COLUMNS
    ))
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(id)
    .fetch_one(conn)
    .await
}

/// Removes the account; owned to-dos go with it through `ON DELETE CASCADE`.
pub async fn delete(conn: &mut PgConnection, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
