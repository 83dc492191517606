use crate::{
    attendance::capture::{CaptureError, CheckInDraft},
    model::department::DEPARTMENTS,
    state::{AppState, lock},
};
use actix_web::{HttpResponse, Responder, ResponseError, http::StatusCode, web};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};

impl ResponseError for CaptureError {
    fn status_code(&self) -> StatusCode {
        match self {
            CaptureError::MissingField(_) => StatusCode::BAD_REQUEST,
            CaptureError::ConfirmationPending => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}

/// Current state of the check-in form
#[utoipa::path(
    get,
    path = "/check-in",
    responses(
        (status = 200, description = "Form state", body = Object, example = json!({
            "state": "editing",
            "draft": {
                "name": "",
                "employeeNumber": "",
                "department": "",
                "date": "2024-05-01",
                "arrivalTime": "07:58"
            }
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-in"
)]
pub async fn form_state(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let mut form = lock(&state.check_in, "check_in")?;
    form.tick(Utc::now());
    Ok(HttpResponse::Ok().json(form.state()))
}

/// Submit a check-in
#[utoipa::path(
    post,
    path = "/check-in",
    request_body = CheckInDraft,
    responses(
        (status = 201, description = "Checked in", body = Object, example = json!({
            "message": "Check-in Successful",
            "greeting": "Thank you, Juan Dela Cruz. Have a productive day!",
            "record": {
                "id": "7f3c0a52-6a5e-4c1e-9d0b-2f6f9f0d1c11",
                "name": "Juan Dela Cruz",
                "employeeNumber": "2024-001",
                "department": "Engineering",
                "date": "2024-05-01",
                "arrivalTime": "08:00",
                "timestamp": 1714550400000_i64
            }
        })),
        (status = 400, description = "Required field missing", body = Object, example = json!({
            "error": "name is required"
        })),
        (status = 409, description = "Previous check-in still on screen", body = Object, example = json!({
            "error": "previous check-in is still being confirmed"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-in"
)]
#[instrument(name = "check_in_submit", skip_all)]
pub async fn submit(
    state: web::Data<AppState>,
    payload: web::Json<CheckInDraft>,
) -> actix_web::Result<impl Responder> {
    let mut form = lock(&state.check_in, "check_in")?;
    let mut records = lock(&state.records, "records")?;

    let record = form.submit(payload.into_inner(), &mut records, Utc::now())?;
    info!(
        record_id = %record.id,
        department = %record.department,
        total = records.len(),
        "Check-in recorded"
    );

    Ok(HttpResponse::Created().json(json!({
        "message": "Check-in Successful",
        "greeting": format!("Thank you, {}. Have a productive day!", record.name),
        "record": record
    })))
}

/// Dismiss the confirmation and start a new check-in
#[utoipa::path(
    post,
    path = "/check-in/reset",
    responses(
        (status = 200, description = "Form ready for the next entry", body = Object),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-in"
)]
pub async fn reset(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let mut form = lock(&state.check_in, "check_in")?;
    form.acknowledge();
    Ok(HttpResponse::Ok().json(form.state()))
}

/// Departments offered on the form
#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "Department list", body = [String])
    ),
    tag = "Check-in"
)]
pub async fn departments() -> impl Responder {
    HttpResponse::Ok().json(DEPARTMENTS)
}
