use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "item_list.toml";
pub const STORE_FILE_NAME: &str = "store.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage_key: String,
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            storage_key: "items".into(),
            data_dir: base.join("item_list"),
        }
    }
}

impl Settings {
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    storage_key: Option<String>,
    data_dir: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_with(Path::new(CONFIG_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the optional TOML file, then environment overrides.
/// Blank values never override.
pub fn load_settings_with(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<FileConfig>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = non_blank(file_cfg.storage_key) {
                    settings.storage_key = v;
                }
                if let Some(v) = non_blank(file_cfg.data_dir) {
                    settings.data_dir = PathBuf::from(v);
                }
            }
            Err(err) => {
                tracing::warn!(path = %config_path.display(), %err, "ignoring malformed config file");
            }
        }
    }

    if let Some(v) = non_blank(env("ITEM_LIST_DATA_DIR")) {
        settings.data_dir = PathBuf::from(v);
    }
    if let Some(v) = non_blank(env("APP__DATA_DIR")) {
        settings.data_dir = PathBuf::from(v);
    }

    if let Some(v) = non_blank(env("APP__STORAGE_KEY")) {
        settings.storage_key = v;
    }

    settings
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
