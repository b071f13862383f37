#![allow(dead_code)]

use actix_cors::Cors;
use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{http::header, test, web, App};
use dotenv::dotenv;
use jsonwebtoken::Algorithm;
use serde_json::json;
use sqlx::PgPool;
use todoforge::auth::TokenSettings;
use todoforge::models::UserPublic;
use todoforge::routes;

pub const TEST_SECRET: &str = "integration-test-secret";

/// A registered account and a token for it.
pub struct TestUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub async fn pool() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    todoforge::db::migrate(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub fn token_settings() -> TokenSettings {
    TokenSettings::new(TEST_SECRET, Algorithm::HS256, chrono::Duration::minutes(30))
}

pub async fn init_app(
    pool: PgPool,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(token_settings()))
            .wrap(NormalizePath::trim())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config),
    )
    .await
}

/// A name no other test run will produce.
pub fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

pub async fn register_and_login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
) -> TestUser {
    let username = unique("user");
    let email = format!("{}@example.com", username);
    let password = "secret".to_string();

    let req = test::TestRequest::post()
        .uri("/users/")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    let created: UserPublic = test::read_body_json(resp).await;

    let token = login(app, &email, &password)
        .await
        .expect("Freshly registered user could not log in");

    TestUser {
        id: created.id,
        username,
        email,
        password,
        token,
    }
}

pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> Result<String, String> {
    let req = test::TestRequest::post()
        .uri("/token")
        .set_form([("username", email), ("password", password)])
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if !status.is_success() {
        return Err(format!(
            "Login failed with {}: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    let token: todoforge::auth::Token =
        serde_json::from_slice(&body).map_err(|e| format!("Bad token body: {}", e))?;
    Ok(token.access_token)
}
