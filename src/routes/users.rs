use crate::{
    auth::{ensure_account_owner, hash_password, CurrentUser},
    db,
    error::AppError,
    models::{FilterPage, Message, User, UserList, UserPublic, UserSchema},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

pub const USER_NOT_FOUND: &str = "User not found";
pub const USERNAME_TAKEN: &str = "Username already exists";
pub const EMAIL_TAKEN: &str = "Email already exists";

/// Picks the conflict message for a new account. Username clashes win over
/// email clashes when both are present.
pub fn duplicate_detail(existing: &[User], username: &str, email: &str) -> Option<&'static str> {
    if existing.iter().any(|user| user.username == username) {
        Some(USERNAME_TAKEN)
    } else if existing.iter().any(|user| user.email == email) {
        Some(EMAIL_TAKEN)
    } else {
        None
    }
}

/// Creates an account.
///
/// ## Responses:
/// - `201 Created`: the public projection `{id, username, email}`.
/// - `409 Conflict`: "Username already exists" or "Email already exists".
/// - `422 Unprocessable Entity`: malformed payload or invalid email.
#[post("")]
pub async fn create_user(
    pool: web::Data<PgPool>,
    user: web::Json<UserSchema>,
) -> Result<impl Responder, AppError> {
    user.validate()?;

    let mut tx = db::begin(&pool).await?;

    let existing = db::users::find_conflicting(&mut tx, &user.username, &user.email).await?;
    if let Some(detail) = duplicate_detail(&existing, &user.username, &user.email) {
        return Err(AppError::Conflict(detail.into()));
    }

    let password_hash = hash_password(&user.password)?;
    let created = db::users::insert(&mut tx, &user.username, &user.email, &password_hash).await?;
    tx.commit().await?;

    log::info!("created user {}", created.id);
    Ok(HttpResponse::Created().json(UserPublic::from(created)))
}

/// Lists accounts in storage order, `offset`/`limit` paginated.
#[get("")]
pub async fn list_users(
    pool: web::Data<PgPool>,
    page: web::Query<FilterPage>,
) -> Result<impl Responder, AppError> {
    page.validate()?;

    let mut tx = db::begin(&pool).await?;
    let users = db::users::list(&mut tx, &page).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(UserList {
        users: users.into_iter().map(UserPublic::from).collect(),
    }))
}

#[get("/{user_id}")]
pub async fn get_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let mut tx = db::begin(&pool).await?;
    let user = db::users::find_by_id(&mut tx, user_id.into_inner()).await?;
    tx.commit().await?;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(UserPublic::from(user))),
        None => Err(AppError::NotFound(USER_NOT_FOUND.into())),
    }
}

/// Replaces the caller's username, email and password.
///
/// ## Responses:
/// - `200 OK`: the updated public projection.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `403 Forbidden`: `user_id` is not the caller's own id.
/// - `409 Conflict`: the new username or email belongs to another account.
#[put("/{user_id}")]
pub async fn update_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
    current_user: CurrentUser,
    user: web::Json<UserSchema>,
) -> Result<impl Responder, AppError> {
    let CurrentUser(current) = current_user;
    ensure_account_owner(&current, user_id.into_inner())?;
    user.validate()?;

    let password_hash = hash_password(&user.password)?;

    let mut tx = db::begin(&pool).await?;
    let updated = db::users::update(
        &mut tx,
        current.id,
        &user.username,
        &user.email,
        &password_hash,
    )
    .await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(UserPublic::from(updated)))
}

/// Deletes the caller's account together with all of its to-dos.
#[delete("/{user_id}")]
pub async fn delete_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let CurrentUser(current) = current_user;
    ensure_account_owner(&current, user_id.into_inner())?;

    let mut tx = db::begin(&pool).await?;
    if db::users::delete(&mut tx, current.id).await? == 0 {
        return Err(AppError::NotFound(USER_NOT_FOUND.into()));
    }
    tx.commit().await?;

    log::info!("deleted user {}", current.id);
    Ok(HttpResponse::Ok().json(Message::new("User deleted successfully")))
}
