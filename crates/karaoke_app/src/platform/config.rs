//! `karaoke.ron` configuration.
//!
//! Every field is optional in the file; anything left out keeps its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use karaoke_engine::{
    DownloadSettings, EngineSettings, SubmitSettings, DEFAULT_SERVER_ORIGIN, PROCESS_PATH,
    UPLOAD_FIELD,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::logging::LogDestination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_origin: String,
    pub process_path: String,
    pub upload_field: String,
    /// Result view that successful jobs navigate to.
    pub result_page: String,
    pub download_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub max_download_bytes: u64,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_origin: DEFAULT_SERVER_ORIGIN.to_string(),
            process_path: PROCESS_PATH.to_string(),
            upload_field: UPLOAD_FIELD.to_string(),
            result_page: "http://localhost/result.html".to_string(),
            download_dir: PathBuf::from("downloads"),
            connect_timeout_secs: 10,
            max_download_bytes: DownloadSettings::default().max_bytes,
            log: LogDestination::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl AppConfig {
    pub fn origin(&self) -> anyhow::Result<Url> {
        Url::parse(&self.server_origin)
            .with_context(|| format!("invalid server origin {:?}", self.server_origin))
    }

    pub fn result_page_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.result_page)
            .with_context(|| format!("invalid result page {:?}", self.result_page))
    }

    pub fn engine_settings(&self) -> anyhow::Result<EngineSettings> {
        let connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        let mut submit = SubmitSettings::for_origin(&self.origin()?, &self.process_path)
            .with_context(|| format!("invalid process path {:?}", self.process_path))?;
        submit.field_name = self.upload_field.clone();
        submit.connect_timeout = connect_timeout;

        let download = DownloadSettings {
            connect_timeout,
            max_bytes: self.max_download_bytes,
            ..DownloadSettings::default()
        };

        Ok(EngineSettings {
            submit,
            download,
            download_dir: self.download_dir.clone(),
        })
    }
}

/// Loads the config file; a file that does not exist yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
