use crate::api::image::{EditImageReq, GenerateImageReq};
use crate::api::records::RecordListResponse;
use crate::api::view::ViewDto;
use crate::attendance::capture::CheckInDraft;
use crate::model::attendance::AttendanceRecord;
use crate::model::image::{GeneratedImage, ImageResolution};
use crate::model::view::AppView;
use crate::models::{UnlockReqDto, UnlockResponse};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ArriveCheck API",
        version = "0.1.0",
        description = r#"
## ArriveCheck

Internal backup tool for recording employee arrivals.

### Screens
- **Check In**: kiosk form that appends one attendance record per submission
- **HR Dashboard**: searchable attendance log behind a shared passphrase
- **AI Playground**: image generation and editing through an external image model

### Access
`POST /hr/unlock` exchanges the HR passphrase for a session token. Send it as
`Authorization: Bearer <token>` to read `/api/records`. The passphrase is a
soft lock, not a security boundary.
"#,
    ),
    paths(
        crate::api::attendance::form_state,
        crate::api::attendance::submit,
        crate::api::attendance::reset,
        crate::api::attendance::departments,

        crate::auth::handlers::unlock,
        crate::api::records::list_records,

        crate::api::image::generate,
        crate::api::image::edit,

        crate::api::view::current_view,
        crate::api::view::select_view
    ),
    components(
        schemas(
            AttendanceRecord,
            CheckInDraft,
            RecordListResponse,
            UnlockReqDto,
            UnlockResponse,
            GenerateImageReq,
            EditImageReq,
            GeneratedImage,
            ImageResolution,
            AppView,
            ViewDto
        )
    ),
    modifiers(&SessionTokenAddon),
    tags(
        (name = "Check-in", description = "Employee check-in kiosk"),
        (name = "Directory", description = "Passphrase-gated attendance log"),
        (name = "Playground", description = "AI image generation and editing"),
        (name = "View", description = "Top-level screen selection"),
    )
)]
pub struct ApiDoc;

struct SessionTokenAddon;

impl Modify for SessionTokenAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
