use crate::{
    auth::{gate::DirectoryGate, jwt::generate_session_token},
    config::Config,
    models::{UnlockReqDto, UnlockResponse},
};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::{error, info, instrument};

/// Unlock the HR directory
#[utoipa::path(
    post,
    path = "/hr/unlock",
    request_body = UnlockReqDto,
    responses(
        (status = 200, description = "Directory unlocked", body = UnlockResponse),
        (status = 401, description = "Wrong passphrase", body = Object, example = json!({
            "error": "Incorrect password. Please try again."
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Directory"
)]
#[instrument(name = "directory_unlock", skip_all)]
pub async fn unlock(
    payload: web::Json<UnlockReqDto>,
    config: web::Data<Config>,
) -> impl Responder {
    let mut gate = DirectoryGate::new();
    let mut input = payload.into_inner().passphrase;

    if !gate.attempt(&mut input, &config.hr_passphrase) {
        info!("Directory unlock rejected");
        return HttpResponse::Unauthorized().json(json!({
            "error": "Incorrect password. Please try again."
        }));
    }

    match generate_session_token(&config.session_secret, config.session_ttl) {
        Ok(session_token) => {
            info!("Directory unlocked");
            HttpResponse::Ok().json(UnlockResponse {
                session_token,
                expires_in: config.session_ttl,
            })
        }
        Err(e) => {
            error!(error = %e, "Failed to sign session token");
            HttpResponse::InternalServerError().finish()
        }
    }
}
