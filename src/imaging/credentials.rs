use std::env;
use std::sync::{Arc, RwLock};

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{info, warn};

use crate::imaging::client::CredentialSelector;
use crate::imaging::error::ImageError;

pub const API_KEY_VAR: &str = "IMAGE_API_KEY";

/// The currently selected image-model key, shared between the selector
/// that fills it and the model client that reads it.
#[derive(Debug, Default)]
pub struct ApiKeySlot {
    key: RwLock<Option<String>>,
}

impl ApiKeySlot {
    pub fn new(key: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            key: RwLock::new(key.filter(|k| !k.is_empty())),
        })
    }

    pub fn get(&self) -> Option<String> {
        self.key
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set(&self, key: String) {
        *self
            .key
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(key);
    }
}

/// Selects the key from the process environment (and `.env`). "Prompting"
/// re-reads the environment, so a key added after startup is picked up.
pub struct EnvCredentialSelector {
    slot: Arc<ApiKeySlot>,
    var: &'static str,
}

impl EnvCredentialSelector {
    pub fn new(slot: Arc<ApiKeySlot>) -> Self {
        Self::with_var(slot, API_KEY_VAR)
    }

    pub fn with_var(slot: Arc<ApiKeySlot>, var: &'static str) -> Self {
        Self { slot, var }
    }
}

impl CredentialSelector for EnvCredentialSelector {
    fn has_selected_key(&self) -> BoxFuture<'_, bool> {
        let selected = self.slot.get().is_some();
        async move { selected }.boxed()
    }

    fn open_select_key(&self) -> BoxFuture<'_, Result<(), ImageError>> {
        async move {
            dotenvy::dotenv().ok();
            match env::var(self.var).ok().filter(|k| !k.is_empty()) {
                Some(key) => {
                    self.slot.set(key);
                    info!(var = self.var, "Image API key selected");
                    Ok(())
                }
                None => {
                    warn!(var = self.var, "No image API key available");
                    Err(ImageError::CredentialRequired)
                }
            }
        }
        .boxed()
    }
}
