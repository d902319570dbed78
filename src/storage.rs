//! ファイルベースのスナップショット保存
//!
//! データディレクトリ内の `<キー>.json` を1キー1ファイルで扱う。

use qr_credentials_common::{Error, Result, SnapshotStorage};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// キーに対応するファイルパス
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Storage(format!("{}: {}", path.display(), e)))?;
        Ok(Some(content))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::Storage(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| Error::Storage(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempdir().expect("Failed to create temp dir");
        let storage = FileStorage::new(dir.path());
        assert!(storage.read("qr_app_data").unwrap().is_none());
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut storage = FileStorage::new(dir.path().join("nested").join("data"));

        storage.write("qr_app_data", "[]").expect("書き込み失敗");
        assert_eq!(storage.read("qr_app_data").unwrap().as_deref(), Some("[]"));
        assert!(storage.path_for("qr_app_data").ends_with("qr_app_data.json"));
    }
}
