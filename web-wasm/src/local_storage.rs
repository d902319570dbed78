//! ブラウザのlocalStorageによるスナップショット保存

use gloo::storage::{LocalStorage, Storage};
use qr_credentials_common::{Error, Result, SnapshotStorage};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSnapshot;

impl SnapshotStorage for LocalSnapshot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        // 容量超過（QuotaExceededError）もここで返る
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_local_snapshot_roundtrip() {
        let key = "qr_test_snapshot";
        LocalStorage::delete(key);

        let mut storage = LocalSnapshot;
        assert_eq!(storage.read(key).unwrap(), None);

        storage.write(key, "[]").expect("書き込み失敗");
        assert_eq!(storage.read(key).unwrap().as_deref(), Some("[]"));

        let snapshot = r#"[{"id":"1"}]"#;
        storage.write(key, snapshot).unwrap();
        let raw = LocalStorage::raw().get_item(key).unwrap();
        assert_eq!(raw.as_deref(), Some(snapshot));
        LocalStorage::delete(key);
    }
}
