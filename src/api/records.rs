use crate::{
    attendance::filter::filter,
    auth::auth::DirectorySession,
    model::attendance::AttendanceRecord,
    state::{AppState, lock},
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecordQuery {
    /// Matches name, department or employee number, ignoring case
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RecordListResponse {
    pub data: Vec<AttendanceRecord>,
    /// Records in the store
    #[schema(example = 12)]
    pub total: usize,
    /// Records matching the query
    #[schema(example = 3)]
    pub shown: usize,
    #[schema(example = "eng")]
    pub query: String,
}

/// Attendance log, newest first
#[utoipa::path(
    get,
    path = "/api/records",
    params(RecordQuery),
    responses(
        (status = 200, description = "Filtered attendance log", body = RecordListResponse),
        (status = 401, description = "Directory locked"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("session_token" = [])
    ),
    tag = "Directory"
)]
pub async fn list_records(
    session: DirectorySession,
    state: web::Data<AppState>,
    query: web::Query<RecordQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner().search.unwrap_or_default();
    let records = lock(&state.records, "records")?;

    let data = filter(records.records(), &query);
    debug!(
        session = %session.session_id,
        query = %query,
        shown = data.len(),
        "Listing attendance records"
    );

    Ok(HttpResponse::Ok().json(RecordListResponse {
        total: records.len(),
        shown: data.len(),
        data,
        query,
    }))
}
