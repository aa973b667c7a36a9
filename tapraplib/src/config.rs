//! Конфигурация: каталог выгрузки, коды своей сети, FTP-настройки хабов.

use crate::error::{Result, TapRapError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output_directory: Option<PathBuf>,
    /// TAP-коды сетей, для которых этот узел — законный получатель.
    /// Пустой список отключает фильтр адресата.
    #[serde(default)]
    pub local_tap_codes: Vec<String>,
    /// FTP-настройки по имени роумингового хаба.
    #[serde(default)]
    pub ftp: BTreeMap<String, FtpSetting>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FtpSetting {
    pub server: String,
    #[serde(default = "default_ftp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub directory: String,
}

fn default_ftp_port() -> u16 {
    21
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| TapRapError::Config(e.to_string()))
    }

    pub fn output_directory(&self) -> &Path {
        self.output_directory.as_deref().unwrap_or(Path::new("."))
    }

    pub fn ftp_setting(&self, roaming_hub_name: &str) -> Option<&FtpSetting> {
        self.ftp.get(roaming_hub_name)
    }

    pub fn is_local_recipient(&self, recipient: &str) -> bool {
        self.local_tap_codes.is_empty() || self.local_tap_codes.iter().any(|c| c == recipient)
    }
}
