use std::sync::Arc;

use chrono::Utc;
use futures::future::BoxFuture;
use tracing::{debug, info, warn};

use crate::imaging::error::ImageError;
use crate::model::image::{GeneratedImage, ImageMode, ImageResolution};

/// Decides whether an image-model key is available and can ask for one.
pub trait CredentialSelector: Send + Sync {
    fn has_selected_key(&self) -> BoxFuture<'_, bool>;
    fn open_select_key(&self) -> BoxFuture<'_, Result<(), ImageError>>;
}

/// The external image model. Both calls return a displayable reference
/// (a `data:` URL) to the produced image.
pub trait ImageModel: Send + Sync {
    fn create_from_text<'a>(
        &'a self,
        prompt: &'a str,
        resolution: ImageResolution,
    ) -> BoxFuture<'a, Result<String, ImageError>>;

    fn create_from_image<'a>(
        &'a self,
        source: &'a SourceImage,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, ImageError>>;
}

/// An inline-encoded image, split out of a `data:<mime>;base64,<data>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub mime_type: String,
    pub data: String,
}

impl SourceImage {
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or(ImageError::InvalidSourceImage)?;
        let (meta, data) = rest.split_once(',').ok_or(ImageError::InvalidSourceImage)?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or(ImageError::InvalidSourceImage)?;

        if mime_type.is_empty() || data.is_empty() {
            return Err(ImageError::InvalidSourceImage);
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

/// Pass-through client for the playground: one credential check, one
/// upstream call, no retries and no caching.
#[derive(Clone)]
pub struct ImageClient {
    model: Arc<dyn ImageModel>,
    credentials: Arc<dyn CredentialSelector>,
}

impl ImageClient {
    pub fn new(model: Arc<dyn ImageModel>, credentials: Arc<dyn CredentialSelector>) -> Self {
        Self { model, credentials }
    }

    pub async fn generate(
        &self,
        prompt: &str,
        resolution: ImageResolution,
    ) -> Result<GeneratedImage, ImageError> {
        require_prompt(prompt)?;
        self.ensure_credential().await?;

        debug!(%resolution, "Requesting image generation");
        let outcome = self.model.create_from_text(prompt, resolution).await;
        let url = self.settle(outcome).await?;

        Ok(GeneratedImage::new(
            ImageMode::Generate,
            url,
            prompt.to_string(),
            Utc::now().timestamp_millis(),
        ))
    }

    pub async fn edit(
        &self,
        source_image: Option<&str>,
        prompt: &str,
    ) -> Result<GeneratedImage, ImageError> {
        require_prompt(prompt)?;
        self.ensure_credential().await?;

        let source = match source_image.filter(|s| !s.is_empty()) {
            Some(url) => SourceImage::from_data_url(url)?,
            None => return Err(ImageError::MissingSourceImage),
        };

        debug!(mime_type = %source.mime_type, "Requesting image edit");
        let outcome = self.model.create_from_image(&source, prompt).await;
        let url = self.settle(outcome).await?;

        Ok(GeneratedImage::new(
            ImageMode::Edit,
            url,
            prompt.to_string(),
            Utc::now().timestamp_millis(),
        ))
    }

    async fn ensure_credential(&self) -> Result<(), ImageError> {
        if self.credentials.has_selected_key().await {
            return Ok(());
        }

        info!("No image API key selected, prompting for one");
        self.credentials.open_select_key().await.map_err(|e| {
            warn!(error = %e, "API key selection failed");
            ImageError::CredentialRequired
        })
    }

    /// A stale credential triggers one re-selection; the request itself is
    /// not retried.
    async fn settle(&self, outcome: Result<String, ImageError>) -> Result<String, ImageError> {
        match outcome {
            Err(e) if e.needs_reselection() => {
                warn!(error = %e, kind = e.kind(), "Image model rejected the key, reselecting");
                if let Err(sel) = self.credentials.open_select_key().await {
                    warn!(error = %sel, "API key reselection failed");
                }
                Err(e)
            }
            other => other,
        }
    }
}

fn require_prompt(prompt: &str) -> Result<(), ImageError> {
    if prompt.trim().is_empty() {
        Err(ImageError::EmptyPrompt)
    } else {
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::mocks::{RecordingModel, ScriptedSelector};
    use super::*;

    const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn client(model: &Arc<RecordingModel>, selector: &Arc<ScriptedSelector>) -> ImageClient {
        ImageClient::new(model.clone(), selector.clone())
    }

    #[actix_web::test]
    async fn prompts_once_then_generates_once() {
        let model = Arc::new(RecordingModel::returning(Ok(PNG.to_string())));
        let selector = Arc::new(ScriptedSelector::unselected(true));

        let image = client(&model, &selector)
            .generate("a cat", ImageResolution::OneK)
            .await
            .unwrap();

        assert_eq!(selector.prompts(), 1);
        assert_eq!(model.calls(), ["generate:1K:a cat"]);
        assert_eq!(image.url, PNG);
        assert_eq!(image.prompt, "a cat");
        assert!(image.download_name.starts_with("ai-generate-"));
    }

    #[actix_web::test]
    async fn selected_key_skips_prompt() {
        let model = Arc::new(RecordingModel::returning(Ok(PNG.to_string())));
        let selector = Arc::new(ScriptedSelector::selected());

        client(&model, &selector)
            .generate("a cat", ImageResolution::FourK)
            .await
            .unwrap();

        assert_eq!(selector.prompts(), 0);
        assert_eq!(model.calls(), ["generate:4K:a cat"]);
    }

    #[actix_web::test]
    async fn failed_selection_is_credential_required() {
        let model = Arc::new(RecordingModel::returning(Ok(PNG.to_string())));
        let selector = Arc::new(ScriptedSelector::unselected(false));

        let err = client(&model, &selector)
            .generate("a cat", ImageResolution::OneK)
            .await
            .unwrap_err();

        assert_eq!(err, ImageError::CredentialRequired);
        assert!(model.calls().is_empty());
    }

    #[actix_web::test]
    async fn blank_prompt_never_reaches_upstream() {
        let model = Arc::new(RecordingModel::returning(Ok(PNG.to_string())));
        let selector = Arc::new(ScriptedSelector::unselected(true));
        let client = client(&model, &selector);

        assert_eq!(
            client.generate("   ", ImageResolution::TwoK).await.unwrap_err(),
            ImageError::EmptyPrompt
        );
        assert_eq!(
            client.edit(Some(PNG), "").await.unwrap_err(),
            ImageError::EmptyPrompt
        );
        assert_eq!(selector.prompts(), 0);
        assert!(model.calls().is_empty());
    }

    #[actix_web::test]
    async fn stale_credential_reselects_without_retry() {
        let stale = ImageError::EntityNotFound("Requested entity was not found.".into());
        let model = Arc::new(RecordingModel::returning(Err(stale.clone())));
        let selector = Arc::new(ScriptedSelector::selected());

        let err = client(&model, &selector)
            .generate("a cat", ImageResolution::OneK)
            .await
            .unwrap_err();

        assert_eq!(err, stale);
        assert_eq!(selector.prompts(), 1);
        assert_eq!(model.calls().len(), 1);
    }

    #[actix_web::test]
    async fn upstream_failure_is_surfaced_verbatim() {
        let model = Arc::new(RecordingModel::returning(Err(ImageError::Upstream(
            "The model is overloaded".into(),
        ))));
        let selector = Arc::new(ScriptedSelector::selected());

        let err = client(&model, &selector)
            .edit(Some(PNG), "make it purple")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "The model is overloaded");
        assert_eq!(selector.prompts(), 0);
    }

    #[actix_web::test]
    async fn edit_requires_source_image() {
        let model = Arc::new(RecordingModel::returning(Ok(PNG.to_string())));
        let selector = Arc::new(ScriptedSelector::selected());
        let client = client(&model, &selector);

        assert_eq!(
            client.edit(None, "add a moon").await.unwrap_err(),
            ImageError::MissingSourceImage
        );
        assert_eq!(
            client.edit(Some("not a data url"), "add a moon").await.unwrap_err(),
            ImageError::InvalidSourceImage
        );
        assert!(model.calls().is_empty());
    }

    #[actix_web::test]
    async fn edit_passes_decoded_source() {
        let model = Arc::new(RecordingModel::returning(Ok(PNG.to_string())));
        let selector = Arc::new(ScriptedSelector::selected());

        let image = client(&model, &selector)
            .edit(Some("data:image/jpeg;base64,/9j/4AAQ"), "add a moon")
            .await
            .unwrap();

        assert_eq!(model.calls(), ["edit:image/jpeg:add a moon"]);
        assert!(image.download_name.starts_with("ai-edit-"));
    }

    #[test]
    fn data_url_parsing() {
        let src = SourceImage::from_data_url(PNG).unwrap();
        assert_eq!(src.mime_type, "image/png");
        assert_eq!(src.data, "iVBORw0KGgo=");

        assert!(SourceImage::from_data_url("data:image/png,raw").is_err());
        assert!(SourceImage::from_data_url("data:;base64,abc").is_err());
        assert!(SourceImage::from_data_url("data:image/png;base64,").is_err());
    }
}
