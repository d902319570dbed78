use crate::error::{CredentialError, Result};
use qr_credentials_common::store::{dataset_location, DEFAULT_DATASET_FILE};
use qr_credentials_common::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 静的データセットの配置先（環境変数が設定ファイルより優先）
const BASE_PATH_ENV: &str = "QR_CREDENTIALS_BASE_PATH";
/// スナップショット保存ディレクトリ（環境変数が設定ファイルより優先）
const DATA_DIR_ENV: &str = "QR_CREDENTIALS_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// デプロイ先のベースパス（http(s)のURLまたはディレクトリ）
    pub base_path: Option<String>,
    /// 静的データセットのファイル名
    pub dataset_file: String,
    /// スナップショットのキー
    pub storage_key: String,
    /// スナップショット保存ディレクトリ（省略時は設定ディレクトリ）
    pub data_dir: Option<PathBuf>,
    /// エクスポートの既定ファイル名
    pub export_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: None,
            dataset_file: DEFAULT_DATASET_FILE.into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            data_dir: None,
            export_file: "backup_qr_data.json".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            CredentialError::Config("No se encontró el directorio personal".into())
        })?;
        Ok(home.join(".config").join("qr-credentials"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 静的データセットのベースパス
    pub fn base_path(&self) -> Option<String> {
        // 環境変数を優先
        if let Ok(path) = std::env::var(BASE_PATH_ENV) {
            if !path.trim().is_empty() {
                return Some(path);
            }
        }

        self.base_path.clone()
    }

    /// スナップショット保存ディレクトリ
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::config_dir(),
        }
    }

    /// 静的データセットの場所（ベースパス + ファイル名）
    pub fn dataset_location(&self) -> Option<String> {
        self.base_path()
            .map(|base| dataset_location(&base, &self.dataset_file))
    }

    pub fn set_base_path(&mut self, path: String) -> Result<()> {
        self.base_path = Some(path);
        self.save()
    }
}
