pub mod client;
pub mod credentials;
pub mod error;
pub mod gemini;

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use client::ImageClient;
use credentials::{ApiKeySlot, EnvCredentialSelector};
use gemini::GeminiModel;

/// Playground client wired to the Gemini models and the environment key.
pub fn init_image_client(config: &Config) -> ImageClient {
    let slot = ApiKeySlot::new(config.image_api_key.clone());

    let model = GeminiModel::new(
        config.image_api_base.clone(),
        config.image_generate_model.clone(),
        config.image_edit_model.clone(),
        Duration::from_secs(config.image_timeout_secs),
        slot.clone(),
    )
    .expect("Failed to build image model HTTP client");

    ImageClient::new(Arc::new(model), Arc::new(EnvCredentialSelector::new(slot)))
}
