use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use url::Url;

const SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub help_center_url: String,
    pub currency_symbol: String,
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080/api".into(),
            help_center_url: "https://example.com/help-center".into(),
            currency_symbol: "$".into(),
            snapshot_path: None,
        }
    }
}

impl Settings {
    pub fn api_url(&self) -> anyhow::Result<Url> {
        parse_http_url(&self.api_base_url)
            .with_context(|| format!("invalid api_base_url '{}'", self.api_base_url))
    }

    pub fn help_center(&self) -> anyhow::Result<Url> {
        parse_http_url(&self.help_center_url)
            .with_context(|| format!("invalid help_center_url '{}'", self.help_center_url))
    }
}

fn parse_http_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())?;
    anyhow::ensure!(
        matches!(url.scheme(), "http" | "https"),
        "unsupported scheme '{}'",
        url.scheme()
    );
    Ok(url)
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment variables. The plain
/// variable is read first so its `APP__` twin wins when both are set.
fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("help_center_url") {
                settings.help_center_url = v.clone();
            }
            if let Some(v) = file_cfg.get("currency_symbol") {
                settings.currency_symbol = v.clone();
            }
            if let Some(v) = file_cfg.get("snapshot_path") {
                settings.snapshot_path = Some(PathBuf::from(v));
            }
        }
    }

    if let Some(v) = env("DASHBOARD_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("DASHBOARD_HELP_CENTER_URL") {
        settings.help_center_url = v;
    }
    if let Some(v) = env("APP__HELP_CENTER_URL") {
        settings.help_center_url = v;
    }

    if let Some(v) = env("APP__CURRENCY_SYMBOL") {
        settings.currency_symbol = v;
    }

    if let Some(v) = env("DASHBOARD_SNAPSHOT") {
        settings.snapshot_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("APP__SNAPSHOT_PATH") {
        settings.snapshot_path = Some(PathBuf::from(v));
    }

    settings
}
