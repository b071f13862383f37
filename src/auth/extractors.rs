use actix_web::dev::Payload;
use actix_web::{http::header, web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::token::{verify_token, TokenSettings};
use crate::db;
use crate::error::AppError;
use crate::models::User;

pub const CREDENTIALS_ERROR: &str = "Could not validate credentials";
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// The account that owns the request's bearer token.
///
/// Resolving it validates the token from the `Authorization` header, then loads
/// the account whose email matches the token subject. A missing header, a token
/// that fails validation, and a subject with no matching account all end in
/// `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Returns the credentials of an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

async fn resolve(
    token: Option<String>,
    settings: Option<web::Data<TokenSettings>>,
    pool: Option<web::Data<PgPool>>,
) -> Result<CurrentUser, AppError> {
    let token = token.ok_or_else(|| AppError::Unauthorized(NOT_AUTHENTICATED.into()))?;
    let (settings, pool) = match (settings, pool) {
        (Some(settings), Some(pool)) => (settings, pool),
        _ => {
            return Err(AppError::InternalServerError(
                "Token settings or database pool not registered".into(),
            ))
        }
    };

    let claims = verify_token(&settings, &token).map_err(|reason| {
        log::warn!("rejected bearer token: {}", reason);
        AppError::Unauthorized(CREDENTIALS_ERROR.into())
    })?;

    let mut conn = pool.acquire().await?;
    match db::users::find_by_email(&mut conn, &claims.sub).await? {
        Some(user) => Ok(CurrentUser(user)),
        None => {
            log::warn!("bearer token subject has no account");
            Err(AppError::Unauthorized(CREDENTIALS_ERROR.into()))
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req).map(str::to_owned);
        let settings = req.app_data::<web::Data<TokenSettings>>().cloned();
        let pool = req.app_data::<web::Data<PgPool>>().cloned();

        Box::pin(async move { resolve(token, settings, pool).await.map_err(ActixError::from) })
    }
}
