use crate::{
    auth::CurrentUser,
    db,
    error::AppError,
    models::{FilterTodo, Message, TodoList, TodoPublic, TodoSchema, TodoUpdate},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

pub const TASK_NOT_FOUND: &str = "Task not found.";

/// Creates a to-do owned by the caller.
///
/// ## Responses:
/// - `201 Created`: the full to-do, including its id and timestamps.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `422 Unprocessable Entity`: missing fields or a `state` outside the enumeration.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo: web::Json<TodoSchema>,
) -> Result<impl Responder, AppError> {
    let CurrentUser(user) = current_user;

    let mut tx = db::begin(&pool).await?;
    let created = db::todos::insert(&mut tx, user.id, &todo).await?;
    tx.commit().await?;

    Ok(HttpResponse::Created().json(TodoPublic::from(created)))
}

/// Lists the caller's to-dos.
///
/// ## Query Parameters:
/// - `title` (optional): substring of the title.
/// - `description` (optional): substring of the description.
/// - `state` (optional): exact state.
/// - `offset` / `limit` (optional): pagination, defaulting to 0 and 100.
///
/// Filters that are given must all match.
#[get("")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    filter: web::Query<FilterTodo>,
) -> Result<impl Responder, AppError> {
    filter.validate()?;
    let CurrentUser(user) = current_user;

    let mut tx = db::begin(&pool).await?;
    let todos = db::todos::list(&mut tx, user.id, &filter).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(TodoList {
        todos: todos.into_iter().map(TodoPublic::from).collect(),
    }))
}

/// Applies whichever of `title`, `description` and `state` the body carries.
///
/// A to-do that does not exist and one owned by somebody else both yield
/// `404 Not Found`. An empty body writes nothing, so `updated_at` is kept.
#[patch("/{todo_id}")]
pub async fn patch_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<i32>,
    current_user: CurrentUser,
    update: web::Json<TodoUpdate>,
) -> Result<impl Responder, AppError> {
    let CurrentUser(user) = current_user;

    let mut tx = db::begin(&pool).await?;
    let mut todo = db::todos::find_owned(&mut tx, todo_id.into_inner(), user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(TASK_NOT_FOUND.into()))?;

    let update = update.into_inner();
    if update.is_empty() {
        tx.commit().await?;
        return Ok(HttpResponse::Ok().json(TodoPublic::from(todo)));
    }

    todo.apply(update);
    let saved = db::todos::save(&mut tx, &todo).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(TodoPublic::from(saved)))
}

#[delete("/{todo_id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<i32>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let CurrentUser(user) = current_user;

    let mut tx = db::begin(&pool).await?;
    if db::todos::delete(&mut tx, todo_id.into_inner(), user.id).await? == 0 {
        return Err(AppError::NotFound(TASK_NOT_FOUND.into()));
    }
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(Message::new("Task has been deleted successfully.")))
}
