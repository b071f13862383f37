pub mod extractors;
pub mod password;
pub mod policy;
pub mod token;

use serde::{Deserialize, Serialize};

pub use extractors::CurrentUser;
pub use password::{hash_password, verify_password};
pub use policy::ensure_account_owner;
pub use token::{generate_token, verify_token, Claims, TokenError, TokenSettings};

/// Form body of `POST /token`, following the OAuth2 password flow.
/// The `username` field carries the account's email address.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
