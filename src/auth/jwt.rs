use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Claims, SessionScope};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use uuid::Uuid;

const DIRECTORY_SUBJECT: &str = "hr-directory";

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or_default()
}

/// Signs the token that carries an unlocked directory session.
pub fn generate_session_token(secret: &str, ttl: usize) -> Result<String, Error> {
    let claims = Claims {
        sub: DIRECTORY_SUBJECT.to_string(),
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        scope: SessionScope::Directory,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
