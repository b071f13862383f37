use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;

use crate::auth::token::TokenSettings;

pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
}

fn parse_var<T: FromStr>(name: &str, default: &str) -> Result<T, String> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| format!("{} must be a number", name))
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let algorithm = env::var("ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        let algorithm = match Algorithm::from_str(&algorithm) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(format!("ALGORITHM {} is not a supported HMAC algorithm", algorithm)),
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", "5")?,
            server_port: parse_var("SERVER_PORT", "8080")?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            secret_key: env::var("SECRET_KEY").map_err(|_| "SECRET_KEY must be set")?,
            algorithm,
            access_token_expire_minutes: parse_var("ACCESS_TOKEN_EXPIRE_MINUTES", "30")?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings::new(
            &self.secret_key,
            self.algorithm,
            chrono::Duration::minutes(self.access_token_expire_minutes),
        )
    }
}
