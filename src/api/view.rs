use crate::{
    model::view::AppView,
    state::{AppState, lock},
};
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct ViewDto {
    pub view: AppView,
    #[serde(default, skip_deserializing)]
    #[schema(example = "Check In")]
    pub label: String,
}

impl From<AppView> for ViewDto {
    fn from(view: AppView) -> Self {
        Self {
            label: view.label().to_string(),
            view,
        }
    }
}

/// Current screen
#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Current screen", body = ViewDto)
    ),
    tag = "View"
)]
pub async fn current_view(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let router = lock(&state.view, "view")?;
    Ok(HttpResponse::Ok().json(ViewDto::from(router.current())))
}

/// Switch screen. Showing the check-in screen opens a fresh form.
#[utoipa::path(
    put,
    path = "/view",
    request_body = ViewDto,
    responses(
        (status = 200, description = "Screen switched", body = ViewDto),
        (status = 400, description = "Unknown screen")
    ),
    tag = "View"
)]
pub async fn select_view(
    state: web::Data<AppState>,
    payload: web::Json<ViewDto>,
) -> actix_web::Result<impl Responder> {
    let mut router = lock(&state.view, "view")?;
    let view = router.select(payload.view);
    if view == AppView::CheckIn {
        lock(&state.check_in, "check_in")?.reopen(Local::now());
    }
    Ok(HttpResponse::Ok().json(ViewDto::from(view)))
}
