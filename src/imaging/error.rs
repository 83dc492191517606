use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Marker the upstream uses when a selected key no longer resolves.
pub const ENTITY_NOT_FOUND_MARKER: &str = "Requested entity was not found";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Please describe the image.")]
    EmptyPrompt,

    #[error("Please upload an image to edit.")]
    MissingSourceImage,

    #[error("Source image must be a base64 data URL.")]
    InvalidSourceImage,

    #[error("API Key is required for this model.")]
    CredentialRequired,

    /// Usually a stale or revoked key; the caller should select one again.
    #[error("{0}")]
    EntityNotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl ImageError {
    pub fn kind(&self) -> &'static str {
        match self {
            ImageError::EmptyPrompt
            | ImageError::MissingSourceImage
            | ImageError::InvalidSourceImage => "validation",
            ImageError::CredentialRequired => "credential_required",
            ImageError::EntityNotFound(_) => "entity_not_found",
            ImageError::Upstream(_) => "upstream",
        }
    }

    /// Whether recovering needs a fresh credential selection.
    pub fn needs_reselection(&self) -> bool {
        matches!(
            self,
            ImageError::CredentialRequired | ImageError::EntityNotFound(_)
        )
    }
}

impl ResponseError for ImageError {
    fn status_code(&self) -> StatusCode {
        match self {
            ImageError::EmptyPrompt
            | ImageError::MissingSourceImage
            | ImageError::InvalidSourceImage => StatusCode::BAD_REQUEST,
            ImageError::CredentialRequired => StatusCode::UNAUTHORIZED,
            ImageError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            ImageError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }))
    }
}
