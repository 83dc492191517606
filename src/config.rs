use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub data_dir: PathBuf,

    // Directory gate
    pub hr_passphrase: String,
    pub session_secret: String,
    pub session_ttl: usize,

    // Image model
    pub image_api_key: Option<String>,
    pub image_api_base: String,
    pub image_generate_model: String,
    pub image_edit_model: String,
    pub image_timeout_secs: u64,

    // Rate limiting
    pub rate_image_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),

            hr_passphrase: env::var("HR_PASSPHRASE").expect("HR_PASSPHRASE must be set"),
            session_secret: env::var("SESSION_SECRET").expect("SESSION_SECRET must be set"),
            session_ttl: env::var("SESSION_TTL")
                .unwrap_or_else(|_| "28800".to_string()) // default 8 hours
                .parse()
                .expect("SESSION_TTL must be a number of seconds"),

            image_api_key: env::var("IMAGE_API_KEY").ok().filter(|k| !k.is_empty()),
            image_api_base: env::var("IMAGE_API_BASE")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            image_generate_model: env::var("IMAGE_GENERATE_MODEL")
                .unwrap_or_else(|_| "gemini-3-pro-image-preview".to_string()),
            image_edit_model: env::var("IMAGE_EDIT_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-image".to_string()),
            image_timeout_secs: env::var("IMAGE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .expect("IMAGE_TIMEOUT_SECS must be a number"),

            rate_image_per_min: env::var("RATE_IMAGE_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("RATE_IMAGE_PER_MIN must be a number"),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for tests; never touches the environment.
    pub fn for_tests(data_dir: PathBuf) -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            data_dir,
            hr_passphrase: "@Door-Key-2024".to_string(),
            session_secret: "test-session-secret".to_string(),
            session_ttl: 60,
            image_api_key: None,
            image_api_base: "http://127.0.0.1:9".to_string(),
            image_generate_model: "gen-model".to_string(),
            image_edit_model: "edit-model".to_string(),
            image_timeout_secs: 5,
            rate_image_per_min: 1000,
            api_prefix: "/api".to_string(),
        }
    }
}
