use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    ToSchema,
)]
pub enum ImageResolution {
    #[default]
    #[serde(rename = "1K")]
    #[strum(serialize = "1K")]
    OneK,
    #[serde(rename = "2K")]
    #[strum(serialize = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    #[strum(serialize = "4K")]
    FourK,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageMode {
    Generate,
    Edit,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    /// Displayable reference, usually a `data:` URL
    pub url: String,
    pub prompt: String,
    pub timestamp: i64,
    #[schema(example = "ai-generate-1714550400000.png")]
    pub download_name: String,
}

impl GeneratedImage {
    pub fn new(mode: ImageMode, url: String, prompt: String, timestamp: i64) -> Self {
        Self {
            download_name: format!("ai-{mode}-{timestamp}.png"),
            url,
            prompt,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn resolution_tiers_use_upstream_names() {
        assert_eq!(ImageResolution::from_str("2K").unwrap(), ImageResolution::TwoK);
        assert_eq!(ImageResolution::FourK.as_ref(), "4K");
        assert_eq!(
            serde_json::to_string(&ImageResolution::OneK).unwrap(),
            "\"1K\""
        );
        assert!(ImageResolution::from_str("8K").is_err());
    }

    #[test]
    fn download_name_carries_mode_and_instant() {
        let img = GeneratedImage::new(ImageMode::Edit, "data:x".into(), "p".into(), 42);
        assert_eq!(img.download_name, "ai-edit-42.png");
    }
}
