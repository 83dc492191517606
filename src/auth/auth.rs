use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::models::SessionScope;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};

/// An unlocked directory session, proven by a valid session token.
#[derive(Debug, Clone)]
pub struct DirectorySession {
    pub session_id: String,
}

impl FromRequest for DirectorySession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // already resolved by the middleware
        if let Some(session) = req.extensions().get::<DirectorySession>() {
            return ready(Ok(session.clone()));
        }

        let token = match bearer_token(req) {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(
                    actix_web::error::ErrorInternalServerError("Config missing"),
                ));
            }
        };

        let claims = match verify_token(token, &config.session_secret) {
            Ok(c) => c,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        if claims.scope != SessionScope::Directory {
            return ready(Err(ErrorUnauthorized("Invalid scope")));
        }

        ready(Ok(DirectorySession {
            session_id: claims.jti,
        }))
    }
}

pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}
