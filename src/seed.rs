//! 静的データセット（data.json）の取得
//!
//! ベースパスがhttp(s)のURLならGET、それ以外はローカルファイルとして読む。
//! 取得は1回のみ（リトライなし）。

use qr_credentials_common::{EmployeeRecord, Error, Result};
use std::path::Path;
use tracing::debug;

/// 静的データセットを取得
pub async fn fetch_static_dataset(location: Option<&str>) -> Result<Vec<EmployeeRecord>> {
    let location = location.ok_or_else(|| Error::Seed("base path is not configured".into()))?;
    debug!("静的データセットを取得: {}", location);

    if is_remote(location) {
        fetch_remote(location).await
    } else {
        read_local(Path::new(location))
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

async fn fetch_remote(url: &str) -> Result<Vec<EmployeeRecord>> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| Error::Seed(format!("{}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::Seed(format!("{}: HTTP {}", url, response.status())));
    }

    response
        .json::<Vec<EmployeeRecord>>()
        .await
        .map_err(|e| Error::Seed(format!("{}: {}", url, e)))
}

fn read_local(path: &Path) -> Result<Vec<EmployeeRecord>> {
    if !path.exists() {
        return Err(Error::Seed(format!("{} not found", path.display())));
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::Seed(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_base_path() {
        let result = fetch_static_dataset(None).await;
        assert!(matches!(result, Err(Error::Seed(_))));
    }

    #[tokio::test]
    async fn test_local_dataset() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"[{"id": "1", "cedula": 1, "nombre": "Ana"}]"#).unwrap();

        let records = fetch_static_dataset(path.to_str()).await.expect("読み込み失敗");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cedula, "1");
    }

    #[tokio::test]
    async fn test_local_dataset_missing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("data.json");

        let result = fetch_static_dataset(path.to_str()).await;
        assert!(matches!(result, Err(Error::Seed(_))));
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.org/app/data.json"));
        assert!(is_remote("HTTP://example.org/data.json"));
        assert!(!is_remote("/srv/site/data.json"));
        assert!(!is_remote("data.json"));
    }
}
