use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub data: Option<DataConfig>,
    pub server: Option<ServerConfig>,
    pub assistant: Option<AssistantConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Where the extracted syllabus JSON lives.
    pub json_path: Option<String>,
    /// Source PDF used by `extract` when no path is given.
    pub pdf_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

pub const DEFAULT_JSON_PATH: &str = "syllabus_final_structure.json";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_JSON_PATH: &str = "SYLLABUS_JSON";
pub const ENV_MODEL: &str = "SYLLABUS_MODEL";

impl ConfigFile {
    pub fn json_path(&self) -> PathBuf {
        self.data
            .as_ref()
            .and_then(|d| d.json_path.as_deref())
            .unwrap_or(DEFAULT_JSON_PATH)
            .into()
    }

    pub fn pdf_path(&self) -> Option<PathBuf> {
        self.data
            .as_ref()
            .and_then(|d| d.pdf_path.as_ref())
            .map(PathBuf::from)
    }

    pub fn host(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn assistant(&self) -> AssistantConfig {
        self.assistant.clone().unwrap_or_default()
    }

    /// Apply `GEMINI_API_KEY`, `SYLLABUS_JSON` and `SYLLABUS_MODEL` from the
    /// process environment over file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Like [`with_env_overrides`](Self::with_env_overrides) with an explicit
    /// lookup. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(json_path) = get(ENV_JSON_PATH) {
            self.data.get_or_insert_with(Default::default).json_path = Some(json_path);
        }
        if let Some(api_key) = get(ENV_API_KEY) {
            self.assistant.get_or_insert_with(Default::default).api_key = Some(api_key);
        }
        if let Some(model) = get(ENV_MODEL) {
            self.assistant.get_or_insert_with(Default::default).model = Some(model);
        }
        self
    }
}

/// Platform config directory path: `<config_dir>/syllabus/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("syllabus").join("config.toml"))
}

/// Load config by cascading CWD `.syllabus.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".syllabus.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_data = base.data.unwrap_or_default();
    let overlay_data = overlay.data.unwrap_or_default();
    let base_server = base.server.unwrap_or_default();
    let overlay_server = overlay.server.unwrap_or_default();
    let base_assistant = base.assistant.unwrap_or_default();
    let overlay_assistant = overlay.assistant.unwrap_or_default();

    ConfigFile {
        data: Some(DataConfig {
            json_path: overlay_data.json_path.or(base_data.json_path),
            pdf_path: overlay_data.pdf_path.or(base_data.pdf_path),
        }),
        server: Some(ServerConfig {
            host: overlay_server.host.or(base_server.host),
            port: overlay_server.port.or(base_server.port),
        }),
        assistant: Some(AssistantConfig {
            api_key: overlay_assistant.api_key.or(base_assistant.api_key),
            model: overlay_assistant.model.or(base_assistant.model),
            base_url: overlay_assistant.base_url.or(base_assistant.base_url),
            timeout_secs: overlay_assistant.timeout_secs.or(base_assistant.timeout_secs),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.json_path(), PathBuf::from(DEFAULT_JSON_PATH));
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 5000);
        assert!(config.pdf_path().is_none());
    }

    #[test]
    fn partial_toml_parses() {
        let toml_str = "[server]\nport = 8080\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.port(), 8080);
        assert_eq!(parsed.host(), DEFAULT_HOST);
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            data: Some(DataConfig {
                json_path: Some("/base/syllabus.json".into()),
                pdf_path: Some("/base/syllabus.pdf".into()),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            data: Some(DataConfig {
                json_path: Some("/overlay/syllabus.json".into()),
                pdf_path: None,
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        assert_eq!(merged.json_path(), PathBuf::from("/overlay/syllabus.json"));
        assert_eq!(merged.pdf_path(), Some(PathBuf::from("/base/syllabus.pdf")));
    }

    #[test]
    fn merge_keeps_base_assistant_when_overlay_absent() {
        let base = ConfigFile {
            assistant: Some(AssistantConfig {
                model: Some("gemini-2.5-pro".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.assistant().model.as_deref(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn env_overrides_file_values() {
        let config = ConfigFile {
            data: Some(DataConfig {
                json_path: Some("from-file.json".into()),
                pdf_path: None,
            }),
            assistant: Some(AssistantConfig {
                api_key: Some("file-key".into()),
                model: Some("file-model".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = config.with_overrides(|key| match key {
            ENV_JSON_PATH => Some("from-env.json".into()),
            ENV_API_KEY => Some("env-key".into()),
            ENV_MODEL => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.json_path(), PathBuf::from("from-env.json"));
        assert_eq!(config.assistant().api_key.as_deref(), Some("env-key"));
        assert_eq!(config.assistant().model.as_deref(), Some("file-model"));
    }

    #[test]
    fn load_from_missing_path_is_none() {
        assert!(load_from_path(Path::new("/definitely/not/here.toml")).is_none());
    }
}
