use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};
use url::Url;

pub const CONFIG_FILE: &str = "novella.toml";

/// Global configuration, loaded once on first access.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::figment()
        .extract()
        .expect("FATAL: invalid novella configuration")
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub basic: BasicConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Defaults, then `novella.toml`, then `NOVELLA_*` env vars (`__` separates sections).
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("NOVELLA_").split("__"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub loglevel: String,
    /// Secret for the private session cookies; at least 64 bytes.
    pub cookie_secret: Option<String>,
    pub insecure_cookie: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
            insecure_cookie: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Supabase,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub supabase_url: Option<Url>,
    pub supabase_anon_key: Option<String>,
    pub database_url: String,
    pub seed_path: Option<PathBuf>,
    /// Local backend only: sign in by bare `Users.id`, no password. Never enable in production.
    pub dev_sign_in: bool,
    pub proxy: Option<Url>,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            supabase_url: None,
            supabase_anon_key: None,
            database_url: "sqlite:novella.sqlite".to_string(),
            seed_path: None,
            dev_sign_in: false,
            proxy: None,
            connect_timeout_secs: 5,
            timeout_secs: 15,
        }
    }
}
