use confique::Config as _;
use std::sync::OnceLock;

#[derive(confique::Config)]
pub struct Config {
    /// Base URL of the QueryMind backend API.
    #[config(env = "QMIND_API_URL", default = "http://localhost:8000/api/v1")]
    pub api_url: String,
    /// Optional static bearer token for the backend.
    #[config(env = "QMIND_API_TOKEN")]
    pub api_token: Option<String>,
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::builder()
            .env()
            .load()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}
