use crate::{imaging::error::ImageError, model::image::ImageResolution, state::AppState};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct GenerateImageReq {
    #[schema(example = "A futuristic neon city with flying cars")]
    pub prompt: String,
    #[serde(default)]
    pub resolution: ImageResolution,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditImageReq {
    #[schema(example = "Change the sky to purple and add a moon")]
    pub prompt: String,
    /// The image to edit, as a `data:<mime>;base64,<data>` URL
    pub source_image: Option<String>,
}

/// Generate an image from a prompt
#[utoipa::path(
    post,
    path = "/playground/generate",
    request_body = GenerateImageReq,
    responses(
        (status = 200, description = "Generated image", body = crate::model::image::GeneratedImage),
        (status = 400, description = "Empty prompt"),
        (status = 401, description = "API key required", body = Object, example = json!({
            "error": "API Key is required for this model.",
            "kind": "credential_required"
        })),
        (status = 404, description = "Stale API key, select another", body = Object, example = json!({
            "error": "Requested entity was not found.",
            "kind": "entity_not_found"
        })),
        (status = 502, description = "Image model failure")
    ),
    tag = "Playground"
)]
#[instrument(name = "playground_generate", skip_all, fields(resolution = %payload.resolution))]
pub async fn generate(
    state: web::Data<AppState>,
    payload: web::Json<GenerateImageReq>,
) -> Result<HttpResponse, ImageError> {
    let image = state
        .images
        .generate(&payload.prompt, payload.resolution)
        .await?;

    info!(download_name = %image.download_name, "Image generated");
    Ok(HttpResponse::Ok().json(image))
}

/// Edit an uploaded image
#[utoipa::path(
    post,
    path = "/playground/edit",
    request_body = EditImageReq,
    responses(
        (status = 200, description = "Edited image", body = crate::model::image::GeneratedImage),
        (status = 400, description = "Empty prompt or missing source image", body = Object, example = json!({
            "error": "Please upload an image to edit.",
            "kind": "validation"
        })),
        (status = 401, description = "API key required"),
        (status = 404, description = "Stale API key, select another"),
        (status = 502, description = "Image model failure")
    ),
    tag = "Playground"
)]
#[instrument(name = "playground_edit", skip_all)]
pub async fn edit(
    state: web::Data<AppState>,
    payload: web::Json<EditImageReq>,
) -> Result<HttpResponse, ImageError> {
    let image = state
        .images
        .edit(payload.source_image.as_deref(), &payload.prompt)
        .await?;

    info!(download_name = %image.download_name, "Image edited");
    Ok(HttpResponse::Ok().json(image))
}
