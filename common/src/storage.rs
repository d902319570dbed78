//! スナップショット保存先の抽象化
//!
//! ブラウザでは localStorage、CLIではデータディレクトリ内のファイルが
//! キー・値ストアとして振る舞う。

use crate::error::Result;
use std::collections::HashMap;

/// スナップショットを保持するキー・値ストア
pub trait SnapshotStorage {
    /// キーの値を読む（未保存ならNone）
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// キーに値を書く（上書き）
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: SnapshotStorage + ?Sized> SnapshotStorage for &mut S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// メモリ上のストア（テスト・一時利用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値入りで作成
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read("k").unwrap(), None);

        storage.write("k", "[]").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("[]"));

        storage.write("k", "[1]").unwrap();
        assert_eq!(storage.get("k"), Some("[1]"));
    }

    /// 所有権ごと受け取る側（`&mut S` の実装経由で呼ばれる）
    fn write_through<S: SnapshotStorage>(mut storage: S, key: &str, value: &str) -> Option<String> {
        storage.write(key, value).unwrap();
        storage.read(key).unwrap()
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut storage = MemoryStorage::new();
        let read_back = write_through(&mut storage, "k", "v");

        assert_eq!(read_back.as_deref(), Some("v"));
        assert_eq!(storage.get("k"), Some("v"));
    }
}
