use shuttle_runtime::SecretStore;
use tracing::warn;

pub const DEFAULT_LLM_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Without a key the service still runs; every generation falls back.
    pub llm_api_key: Option<String>,
    pub llm_api_base: String,
    pub llm_model: String,
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            llm_api_key: None,
            llm_api_base: DEFAULT_LLM_API_BASE.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

impl AppConfig {
    pub fn new(secret_store: &SecretStore) -> Self {
        let defaults = AppConfig::default();

        let llm_api_key = secret_store
            .get("GEMINI_API_KEY")
            .filter(|key| !key.is_empty());
        if llm_api_key.is_none() {
            warn!("GEMINI_API_KEY not found, coach replies will use fallbacks");
        }

        AppConfig {
            llm_api_key,
            llm_api_base: secret_store
                .get("LLM_API_BASE")
                .unwrap_or(defaults.llm_api_base),
            llm_model: secret_store.get("LLM_MODEL").unwrap_or(defaults.llm_model),
            data_dir: secret_store.get("DATA_DIR").unwrap_or(defaults.data_dir),
        }
    }
}
