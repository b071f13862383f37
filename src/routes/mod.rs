pub mod auth;
pub mod health;
pub mod todos;
pub mod users;

use actix_web::{error, web, HttpRequest};

use crate::error::AppError;

/// Registers every route. Paths are declared without trailing slashes; the app
/// is expected to be wrapped in `NormalizePath::trim()` so `/users/` and
/// `/users` reach the same handler.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(form_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(health::health)
        .service(auth::login)
        .service(
            web::scope("/users")
                .service(users::create_user)
                .service(users::list_users)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user),
        )
        .service(
            web::scope("/todos")
                .service(todos::create_todo)
                .service(todos::list_todos)
                .service(todos::patch_todo)
                .service(todos::delete_todo),
        );
}

fn unprocessable(message: String) -> error::Error {
    AppError::ValidationError(message).into()
}

// Payloads that fail to deserialize are reported as 422, like failed validation.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| unprocessable(err.to_string()))
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err: error::UrlencodedError, _req: &HttpRequest| unprocessable(err.to_string()))
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| unprocessable(err.to_string()))
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err: error::PathError, _req: &HttpRequest| unprocessable(err.to_string()))
}
