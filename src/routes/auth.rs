use crate::{
    auth::{generate_token, verify_password, LoginForm, Token, TokenSettings},
    db,
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;

pub const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// Exchanges an email and password for a bearer token.
///
/// Takes an OAuth2 password-flow form where `username` holds the email.
/// Unknown emails and wrong passwords are indistinguishable to the caller.
#[post("/token")]
pub async fn login(
    pool: web::Data<PgPool>,
    settings: web::Data<TokenSettings>,
    form: web::Form<LoginForm>,
) -> Result<impl Responder, AppError> {
    let mut tx = db::begin(&pool).await?;
    let user = db::users::find_by_email(&mut tx, &form.username).await?;
    tx.commit().await?;

    match user {
        Some(user) if verify_password(&form.password, &user.password)? => {
            let token = generate_token(&settings, &user.email)?;
            log::info!("issued access token for user {}", user.id);
            Ok(HttpResponse::Ok().json(Token::bearer(token)))
        }
        _ => {
            log::warn!("failed login attempt");
            Err(AppError::Unauthorized(BAD_CREDENTIALS.into()))
        }
    }
}
