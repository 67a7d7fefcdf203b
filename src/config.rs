//! Process configuration loaded from environment variables at startup.
//!
//! Provider credentials are optional: a missing key removes that tier from
//! the fallback chain instead of failing startup. The resolved `Config` is
//! immutable and passed explicitly into the resolver and the HTTP layer.

use std::time::Duration;

/// Default watsonx text-generation endpoint (us-south region).
pub const DEFAULT_WATSONX_ENDPOINT: &str =
    "https://us-south.ml.cloud.ibm.com/ml/v1/text/generation";

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub host: String,
    pub port: u16,

    /// IBM watsonx credentials. Both are required for the tier to be active.
    pub watsonx_api_key: Option<String>,
    pub watsonx_project_id: Option<String>,
    pub watsonx_endpoint: String,

    /// Hugging Face inference API key.
    pub hf_api_key: Option<String>,

    /// Replicate API token plus an explicit opt-in flag.
    pub replicate_api_token: Option<String>,
    pub use_replicate: bool,

    /// Per-provider-call timeout.
    pub provider_timeout: Duration,

    /// JWT signing secret and token lifetime.
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,

    /// Built-in demo account.
    pub demo_email: String,
    pub demo_password: String,

    /// Maximum accepted upload size for vision requests, in bytes.
    pub max_image_size: usize,

    /// Image MIME types accepted for vision uploads.
    pub allowed_image_types: Vec<String>,

    /// Allowed CORS origins; a `*` entry allows any origin.
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones, so an empty
    /// `HF_API_KEY=` in a `.env` file does not activate the tier.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = get("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);
        let timeout_secs = get("PROVIDER_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let expire_minutes = get("ACCESS_TOKEN_EXPIRE_MINUTES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let max_image_size = get("MAX_IMAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .unwrap_or(5 * 1024 * 1024);
        let use_replicate = get("USE_REPLICATE")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let split_list = |value: String| -> Vec<String> {
            value
                .split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        };
        let allowed_image_types = get("ALLOWED_IMAGE_TYPES").map(&split_list).unwrap_or_else(|| {
            ["image/jpeg", "image/jpg", "image/png", "image/webp"]
                .iter()
                .map(|t| t.to_string())
                .collect()
        });
        let cors_origins = get("CORS_ORIGINS").map(&split_list).unwrap_or_else(|| {
            vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ]
        });

        Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            watsonx_api_key: get("WATSONX_API_KEY"),
            watsonx_project_id: get("WATSONX_PROJECT_ID"),
            watsonx_endpoint: get("WATSONX_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_WATSONX_ENDPOINT.to_string()),
            hf_api_key: get("HF_API_KEY"),
            replicate_api_token: get("REPLICATE_API_TOKEN"),
            use_replicate,
            provider_timeout: Duration::from_secs(timeout_secs),
            jwt_secret: get("JWT_SECRET")
                .unwrap_or_else(|| "change-me-in-production".to_string()),
            access_token_expire_minutes: expire_minutes,
            demo_email: get("DEMO_EMAIL").unwrap_or_else(|| "demo@travelguide.id".to_string()),
            demo_password: get("DEMO_PASSWORD").unwrap_or_else(|| "demo123456".to_string()),
            max_image_size,
            allowed_image_types,
            cors_origins,
        }
    }

    /// Whether an upload content type is an accepted image format.
    pub fn image_type_allowed(&self, content_type: &str) -> bool {
        self.allowed_image_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(content_type))
    }

    /// Whether the watsonx tier has complete credentials.
    pub fn watsonx_configured(&self) -> bool {
        self.watsonx_api_key.is_some() && self.watsonx_project_id.is_some()
    }

    /// Whether the Hugging Face tier is configured.
    pub fn huggingface_configured(&self) -> bool {
        self.hf_api_key.is_some()
    }

    /// Whether the Replicate tier is both enabled and configured.
    pub fn replicate_configured(&self) -> bool {
        self.use_replicate && self.replicate_api_token.is_some()
    }

    /// Names of the active provider tiers, in plan/chat priority order.
    pub fn configured_tiers(&self) -> Vec<&'static str> {
        let mut tiers = Vec::new();
        if self.watsonx_configured() {
            tiers.push("watsonx");
        }
        if self.huggingface_configured() {
            tiers.push("huggingface");
        }
        if self.replicate_configured() {
            tiers.push("replicate");
        }
        tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_image_size, 5 * 1024 * 1024);
        assert_eq!(config.provider_timeout, Duration::from_secs(30));
        assert!(config.configured_tiers().is_empty());
    }

    #[test]
    fn test_empty_key_does_not_activate_tier() {
        let config = config_from(&[("HF_API_KEY", "  ")]);
        assert!(!config.huggingface_configured());
    }

    #[test]
    fn test_watsonx_requires_key_and_project() {
        let config = config_from(&[("WATSONX_API_KEY", "key")]);
        assert!(!config.watsonx_configured());

        let config = config_from(&[
            ("WATSONX_API_KEY", "key"),
            ("WATSONX_PROJECT_ID", "project"),
        ]);
        assert!(config.watsonx_configured());
        assert_eq!(config.configured_tiers(), vec!["watsonx"]);
    }

    #[test]
    fn test_replicate_requires_opt_in() {
        let config = config_from(&[("REPLICATE_API_TOKEN", "token")]);
        assert!(!config.replicate_configured());

        let config = config_from(&[
            ("REPLICATE_API_TOKEN", "token"),
            ("USE_REPLICATE", "true"),
        ]);
        assert!(config.replicate_configured());
    }

    #[test]
    fn test_image_types_default_and_override() {
        let config = config_from(&[]);
        assert!(config.image_type_allowed("image/jpeg"));
        assert!(config.image_type_allowed("IMAGE/PNG"));
        assert!(!config.image_type_allowed("application/pdf"));

        let config = config_from(&[("ALLOWED_IMAGE_TYPES", "image/png, image/webp")]);
        assert!(config.image_type_allowed("image/webp"));
        assert!(!config.image_type_allowed("image/jpeg"));
    }

    #[test]
    fn test_cors_origins_parse_as_list() {
        let config = config_from(&[]);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );

        let config = config_from(&[("CORS_ORIGINS", "https://travel.example.com, *")]);
        assert_eq!(config.cors_origins, vec!["https://travel.example.com", "*"]);
    }

    #[test]
    fn test_tier_priority_order() {
        let config = config_from(&[
            ("WATSONX_API_KEY", "key"),
            ("WATSONX_PROJECT_ID", "project"),
            ("HF_API_KEY", "hf"),
            ("REPLICATE_API_TOKEN", "token"),
            ("USE_REPLICATE", "1"),
        ]);
        assert_eq!(
            config.configured_tiers(),
            vec!["watsonx", "huggingface", "replicate"]
        );
    }
}
