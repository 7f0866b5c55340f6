use crate::{
    chat::Mode,
    error::{AResult, ChatError},
    theme::Theme,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_PATH: &str = ".config/jobchat/config.toml";
pub const LOG_PATH: &str = ".cache/jobchat/jobchat.log";

/// How chat requests are put on the wire.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// `POST <base_url>/chat` with a JSON body.
    #[default]
    Json,
    /// `GET <base_url>/chat-response/?query=..&job_title=..`
    Query,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub transport: TransportKind,
    pub default_mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    pub start_open: bool,
    pub log_filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            transport: TransportKind::Json,
            default_mode: Mode::ResumeJob,
            request_timeout_secs: Some(60),
            start_open: false,
            log_filter: "info".into(),
            log_file: None,
            theme: Theme::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> AResult<PathBuf> {
        home::home_dir()
            .map(|p| p.join(CONFIG_PATH))
            .ok_or(ChatError::NoHome)
    }

    pub fn log_path(&self) -> AResult<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => home::home_dir()
                .map(|p| p.join(LOG_PATH))
                .ok_or(ChatError::NoHome),
        }
    }

    /// Reads the config at `path`, falling back to defaults when the file is missing.
    pub async fn load(path: &Path) -> AResult<Self> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(Config::default());
        }

        let raw = tokio::fs::read_to_string(path).await?;
        Ok(toml::de::from_str(&raw)?)
    }

    pub async fn save(&self, path: &Path) -> AResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let raw = toml::ser::to_string(self)?;
        tokio::fs::write(path, raw).await?;
        Ok(())
    }

    /// Writes the defaults to `path` unless a file already exists there.
    /// Returns true when a new file was written.
    pub async fn init(path: &Path) -> AResult<bool> {
        if tokio::fs::try_exists(path).await? {
            return Ok(false);
        }

        Config::default().save(path).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let raw = r#"
base_url = "https://chat.example.com/"
transport = "query"
default_mode = "job-match"
"#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.base_url, "https://chat.example.com/");
        assert_eq!(config.transport, TransportKind::Query);
        assert_eq!(config.default_mode, Mode::JobMatch);
        assert_eq!(config.request_timeout_secs, Some(60));
        assert!(!config.start_open);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(toml::from_str::<Config>("default_mode = \"chitchat\"").is_err());
    }

    #[tokio::test]
    async fn init_writes_once_and_load_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        assert!(Config::init(&path).await.unwrap());
        assert!(!Config::init(&path).await.unwrap());

        let loaded = Config::load(&path).await.unwrap();
        assert_eq!(loaded.base_url, Config::default().base_url);
        assert_eq!(loaded.transport, TransportKind::Json);
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load(&dir.path().join("absent.toml")).await.unwrap();
        assert_eq!(loaded, Config::default());
    }
}
