use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct UnlockReqDto {
    #[schema(example = "correct horse battery staple")]
    pub passphrase: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UnlockResponse {
    pub session_token: String,
    /// Seconds until the session token expires
    pub expires_in: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub jti: String,
    pub scope: SessionScope,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum SessionScope {
    /// Read access to the attendance directory
    Directory,
}
