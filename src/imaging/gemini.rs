use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::imaging::client::{ImageModel, SourceImage};
use crate::imaging::credentials::ApiKeySlot;
use crate::imaging::error::{ENTITY_NOT_FOUND_MARKER, ImageError};
use crate::model::image::ImageResolution;

const API_KEY_HEADER: &str = "x-goog-api-key";

// ---------- wire types ----------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Part<'a> {
    Text(&'a str),
    InlineData(InlineData<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    image_config: ImageConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
    image_size: ImageResolution,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

// ---------- client ----------

/// Gemini image models over the `generateContent` REST endpoint.
pub struct GeminiModel {
    http: Client,
    base_url: String,
    generate_model: String,
    edit_model: String,
    key: Arc<ApiKeySlot>,
}

impl GeminiModel {
    pub fn new(
        base_url: String,
        generate_model: String,
        edit_model: String,
        timeout: Duration,
        key: Arc<ApiKeySlot>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            generate_model,
            edit_model,
            key,
        })
    }

    fn url_for(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn call(
        &self,
        model: &str,
        body: &GenerateContentRequest<'_>,
    ) -> Result<String, ImageError> {
        let key = self.key.get().ok_or(ImageError::CredentialRequired)?;
        let url = self.url_for(model);
        debug!(%url, "Calling image model");

        let resp = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, model, "Image model request failed");
                ImageError::Upstream(e.to_string())
            })?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ImageError::Upstream(e.to_string()))?;

        if !status.is_success() {
            error!(status = status.as_u16(), model, "Image model returned an error");
            return Err(classify_failure(status, &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, model, "Unreadable image model response");
            ImageError::Upstream(format!("Unreadable response from image model: {e}"))
        })?;

        first_image(parsed)
    }
}

impl ImageModel for GeminiModel {
    fn create_from_text<'a>(
        &'a self,
        prompt: &'a str,
        resolution: ImageResolution,
    ) -> BoxFuture<'a, Result<String, ImageError>> {
        async move {
            let body = generate_request(prompt, resolution);
            self.call(&self.generate_model, &body).await
        }
        .boxed()
    }

    fn create_from_image<'a>(
        &'a self,
        source: &'a SourceImage,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, ImageError>> {
        async move {
            let body = edit_request(source, prompt);
            self.call(&self.edit_model, &body).await
        }
        .boxed()
    }
}

fn generate_request(prompt: &str, resolution: ImageResolution) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part::Text(prompt)],
        }],
        generation_config: Some(GenerationConfig {
            image_config: ImageConfig {
                aspect_ratio: "1:1",
                image_size: resolution,
            },
        }),
    }
}

fn edit_request<'a>(source: &'a SourceImage, prompt: &'a str) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData(InlineData {
                    mime_type: &source.mime_type,
                    data: &source.data,
                }),
                Part::Text(prompt),
            ],
        }],
        generation_config: None,
    }
}

/// First inline image of the first candidate, as a `data:` URL.
fn first_image(resp: GenerateContentResponse) -> Result<String, ImageError> {
    resp.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.inline_data))
        .map(|img| format!("data:{};base64,{}", img.mime_type, img.data))
        .ok_or_else(|| ImageError::Upstream("No image was returned by the model.".to_string()))
}

fn classify_failure(status: StatusCode, body: &str) -> ImageError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            }
        });

    if status == StatusCode::NOT_FOUND || message.contains(ENTITY_NOT_FOUND_MARKER) {
        ImageError::EntityNotFound(message)
    } else {
        ImageError::Upstream(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
    use serde_json::{Value, json};

    #[test]
    fn generate_request_shape() {
        let body = serde_json::to_value(generate_request("a cat", ImageResolution::TwoK)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "parts": [{ "text": "a cat" }] }],
                "generationConfig": {
                    "imageConfig": { "aspectRatio": "1:1", "imageSize": "2K" }
                }
            })
        );
    }

    #[test]
    fn edit_request_puts_image_before_instruction() {
        let src = SourceImage {
            mime_type: "image/png".into(),
            data: "AAAA".into(),
        };
        let body = serde_json::to_value(edit_request(&src, "add a moon")).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                    { "text": "add a moon" }
                ] }]
            })
        );
    }

    #[test]
    fn picks_first_inline_image() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Here you go" },
                { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
            ] } }]
        }))
        .unwrap();

        assert_eq!(first_image(resp).unwrap(), "data:image/png;base64,QUJD");
    }

    #[test]
    fn text_only_answer_is_an_upstream_failure() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I can't draw that" }] } }]
        }))
        .unwrap();
        assert!(matches!(first_image(resp), Err(ImageError::Upstream(_))));

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(first_image(empty).is_err());
    }

    #[test]
    fn classifies_stale_credentials() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        assert_eq!(
            classify_failure(StatusCode::NOT_FOUND, body),
            ImageError::EntityNotFound("Requested entity was not found.".into())
        );

        let marker_only = r#"{"error":{"message":"Requested entity was not found: key"}}"#;
        assert!(matches!(
            classify_failure(StatusCode::BAD_REQUEST, marker_only),
            ImageError::EntityNotFound(_)
        ));
    }

    #[test]
    fn other_failures_keep_upstream_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#;
        assert_eq!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, body),
            ImageError::Upstream("Resource has been exhausted".into())
        );
        assert_eq!(
            classify_failure(StatusCode::BAD_GATEWAY, "upstream down"),
            ImageError::Upstream("upstream down".into())
        );
        assert!(matches!(
            classify_failure(StatusCode::SERVICE_UNAVAILABLE, ""),
            ImageError::Upstream(m) if m.contains("503")
        ));
    }

    async fn fake_upstream(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
        if req.headers().get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some("test-key") {
            return HttpResponse::BadRequest().json(json!({"error": {"message": "API key not valid"}}));
        }

        let path = req.path();
        if path.contains("stale-model") {
            return HttpResponse::NotFound().json(json!({
                "error": {"code": 404, "message": "Requested entity was not found."}
            }));
        }

        let parts = &body["contents"][0]["parts"];
        let echoed = if path.contains("edit-model") {
            parts[0]["inlineData"]["data"].clone()
        } else {
            body["generationConfig"]["imageConfig"]["imageSize"].clone()
        };

        HttpResponse::Ok().json(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": echoed } }
            ] } }]
        }))
    }

    async fn spawn_upstream() -> String {
        let server = HttpServer::new(|| App::new().default_service(web::to(fake_upstream)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}")
    }

    fn model(base: String, generate_model: &str, key: Option<&str>) -> GeminiModel {
        GeminiModel::new(
            base,
            generate_model.to_string(),
            "edit-model".to_string(),
            Duration::from_secs(5),
            ApiKeySlot::new(key.map(str::to_string)),
        )
        .unwrap()
    }

    #[test]
    fn client_carries_configured_timeout() {
        let built = GeminiModel::new(
            "http://127.0.0.1:1".to_string(),
            "gen-model".to_string(),
            "edit-model".to_string(),
            Duration::from_millis(250),
            ApiKeySlot::new(None),
        );
        assert!(built.is_ok());
    }

    #[actix_web::test]
    async fn round_trip_against_local_upstream() {
        let base = spawn_upstream().await;
        let gemini = model(base, "gen-model", Some("test-key"));

        let url = gemini
            .create_from_text("a cat", ImageResolution::FourK)
            .await
            .unwrap();
        assert_eq!(url, "data:image/png;base64,4K");

        let src = SourceImage {
            mime_type: "image/jpeg".into(),
            data: "SRC".into(),
        };
        let url = gemini.create_from_image(&src, "add a moon").await.unwrap();
        assert_eq!(url, "data:image/png;base64,SRC");
    }

    #[actix_web::test]
    async fn upstream_404_is_entity_not_found() {
        let base = spawn_upstream().await;
        let gemini = model(base, "stale-model", Some("test-key"));

        let err = gemini
            .create_from_text("a cat", ImageResolution::OneK)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ImageError::EntityNotFound("Requested entity was not found.".into())
        );
    }

    #[actix_web::test]
    async fn missing_key_never_calls_upstream() {
        let gemini = model("http://127.0.0.1:9".into(), "gen-model", None);
        let err = gemini
            .create_from_text("a cat", ImageResolution::OneK)
            .await
            .unwrap_err();
        assert_eq!(err, ImageError::CredentialRequired);
    }
}
