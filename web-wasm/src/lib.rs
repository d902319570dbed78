//! QR Credentials Web App (WASM)
//!
//! 共通ストアをlocalStorageに載せ、ページ側（JS）へ公開する。

mod dataset;
mod download;
mod local_storage;

use local_storage::LocalSnapshot;
use qr_credentials_common::{
    dataset_location, public_lookup, read_first_sheet, verify_scan, EmployeeRecord, InitOutcome,
    LookupOutcome, QrPayload, RecordStore, ScanOutcome, SheetRow, DEFAULT_DATASET_FILE,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

const BACKUP_FILE: &str = "backup_qr_data.json";
const CLEAR_PROMPT: &str = "¿Estás seguro de borrar todos los datos?";

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}

fn to_js(e: qr_credentials_common::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// 照合・照会の結果（ページ表示用）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchView<'a> {
    found: bool,
    notice: Option<&'static str>,
    record: Option<&'a EmployeeRecord>,
}

impl<'a> From<ScanOutcome<'a>> for MatchView<'a> {
    fn from(outcome: ScanOutcome<'a>) -> Self {
        let notice = Some(outcome.notice());
        match outcome {
            ScanOutcome::Verified(record) => Self { found: true, notice, record: Some(record) },
            ScanOutcome::NotFound(_) => Self { found: false, notice, record: None },
        }
    }
}

impl<'a> From<LookupOutcome<'a>> for MatchView<'a> {
    fn from(outcome: LookupOutcome<'a>) -> Self {
        let notice = outcome.notice();
        match outcome {
            LookupOutcome::Found(record) => Self { found: true, notice, record: Some(record) },
            _ => Self { found: false, notice, record: None },
        }
    }
}

/// ページから使うレコードストア
#[wasm_bindgen]
pub struct CredentialStore {
    store: RecordStore<LocalSnapshot>,
    outcome: InitOutcome,
}

/// ストアを開き、スナップショットまたは `<base_path>/data.json` から読み込む
#[wasm_bindgen(js_name = openStore)]
pub async fn open_store(base_path: String) -> Result<CredentialStore, JsValue> {
    let url = dataset_location(&base_path, DEFAULT_DATASET_FILE);
    let mut store = RecordStore::new(LocalSnapshot);
    let outcome = store
        .initialize(|| dataset::fetch_static_dataset(url))
        .await;

    if let Some(notice) = outcome.notice() {
        gloo::console::warn!(notice);
    }

    Ok(CredentialStore { store, outcome })
}

impl CredentialStore {
    fn import_rows(&mut self, rows: &[SheetRow]) -> Result<usize, JsValue> {
        let report = self.store.import_records(rows).map_err(to_js)?;
        if !report.duplicate_ids.is_empty() {
            let ids = report.duplicate_ids.join(", ");
            gloo::console::warn!(format!("IDが重複しています: {}", ids));
        }
        gloo::console::log!(report.notice());
        Ok(report.count)
    }

    fn clear_with(&mut self, confirm: impl FnOnce() -> bool) -> Result<bool, JsValue> {
        let cleared = self.store.clear_all(confirm).map_err(to_js)?;
        if cleared {
            gloo::console::log!("Datos eliminados");
        }
        Ok(cleared)
    }
}

#[wasm_bindgen]
impl CredentialStore {
    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.store.is_ready()
    }

    /// 初期読み込みで表示すべき通知
    #[wasm_bindgen(js_name = initNotice)]
    pub fn init_notice(&self) -> Option<String> {
        self.outcome.notice().map(str::to_string)
    }

    /// 読み込んだExcelで全件置き換え、件数を返す
    #[wasm_bindgen(js_name = importExcel)]
    pub fn import_excel(&mut self, bytes: &[u8]) -> Result<usize, JsValue> {
        let rows = read_first_sheet(bytes).map_err(to_js)?;
        self.import_rows(&rows)
    }

    /// 撮影・選択した写真（data URI）を添付
    #[wasm_bindgen(js_name = updatePhoto)]
    pub fn update_photo(&mut self, id: &str, data_uri: String) -> Result<bool, JsValue> {
        let attached = self.store.attach_photo(id, data_uri).map_err(to_js)?;
        if attached {
            gloo::console::log!("Foto actualizada");
        }
        Ok(attached)
    }

    #[wasm_bindgen(js_name = getEmployeeById)]
    pub fn get_employee_by_id(&self, id: &str) -> Result<JsValue, JsValue> {
        to_value(&self.store.find_by_id(id))
    }

    #[wasm_bindgen(js_name = findByCedulaOrId)]
    pub fn find_by_cedula_or_id(&self, query: &str) -> Result<JsValue, JsValue> {
        to_value(&self.store.find_by_cedula_or_id(query))
    }

    /// 全項目の部分一致で絞り込み
    pub fn search(&self, term: &str) -> Result<JsValue, JsValue> {
        to_value(&self.store.filter(term))
    }

    pub fn employees(&self) -> Result<JsValue, JsValue> {
        to_value(self.store.records())
    }

    /// QR描画用ペイロード（該当なしはundefined）
    #[wasm_bindgen(js_name = qrPayload)]
    pub fn qr_payload(&self, id: &str) -> Result<JsValue, JsValue> {
        to_value(&self.store.find_by_id(id).map(QrPayload::for_record))
    }

    /// カメラで読み取ったQRテキストを照合
    pub fn verify(&self, payload: &str) -> Result<JsValue, JsValue> {
        to_value(&MatchView::from(verify_scan(&self.store, payload)))
    }

    /// 公開照会
    pub fn lookup(&self, query: &str) -> Result<JsValue, JsValue> {
        to_value(&MatchView::from(public_lookup(&self.store, query)))
    }

    /// 確認ダイアログの上で全件削除
    #[wasm_bindgen(js_name = clearData)]
    pub fn clear_data(&mut self) -> Result<bool, JsValue> {
        self.clear_with(|| gloo::dialogs::confirm(CLEAR_PROMPT))
    }

    /// 全件をJSONバックアップとしてダウンロード
    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<(), JsValue> {
        let bytes = self.store.export_snapshot().map_err(to_js)?;
        let json = String::from_utf8(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        download::download_json(&json, BACKUP_FILE)?;
        gloo::console::log!("Copia de seguridad descargada");
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_view_from_lookup() {
        let record = EmployeeRecord {
            id: "1".into(),
            nombre: "Ana".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(MatchView::from(LookupOutcome::Found(&record))).unwrap();
        assert_eq!(json["found"], true);
        assert_eq!(json["notice"], "Registro encontrado");
        assert_eq!(json["record"]["nombre"], "Ana");

        let json = serde_json::to_value(MatchView::from(LookupOutcome::NotSearched)).unwrap();
        assert_eq!(json["found"], false);
        assert!(json["notice"].is_null());
    }

    #[test]
    fn test_match_view_from_scan() {
        let view = MatchView::from(ScanOutcome::NotFound("X".into()));
        assert!(!view.found);
        assert_eq!(view.notice, Some("Personal no encontrado"));
        assert!(view.record.is_none());
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use gloo::storage::{LocalStorage, Storage};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn empty_seed() -> qr_credentials_common::Result<Vec<EmployeeRecord>> {
        Ok(Vec::new())
    }

    async fn reopen(key: &str) -> (RecordStore<LocalSnapshot>, InitOutcome) {
        let mut store = RecordStore::with_key(LocalSnapshot, key);
        let outcome = store.initialize(empty_seed).await;
        (store, outcome)
    }

    async fn fresh_store(key: &str) -> CredentialStore {
        LocalStorage::delete(key);
        let (store, outcome) = reopen(key).await;
        CredentialStore { store, outcome }
    }

    fn rows() -> Vec<SheetRow> {
        vec![
            SheetRow::from_pairs([("Nombre", "Ana Lopez"), ("Cedula", "12345")]),
            SheetRow::from_pairs([("Nombre", "Luis Ruiz"), ("Cedula", "67890")]),
        ]
    }

    #[wasm_bindgen_test]
    async fn wasm_import_persists_to_local_storage() {
        let key = "qr_test_import";
        let mut credentials = fresh_store(key).await;
        assert_eq!(credentials.outcome, InitOutcome::EmptySeed);

        assert_eq!(credentials.import_rows(&rows()).expect("取り込み失敗"), 2);

        let (reloaded, outcome) = reopen(key).await;
        assert_eq!(outcome, InitOutcome::Snapshot { count: 2 });
        assert_eq!(reloaded.find_by_id("67890").unwrap().nombre, "Luis Ruiz");
        LocalStorage::delete(key);
    }

    #[wasm_bindgen_test]
    async fn wasm_clear_persists_empty_snapshot() {
        let key = "qr_test_clear";
        let mut credentials = fresh_store(key).await;
        credentials.import_rows(&rows()).unwrap();

        // 取り消した場合は何も変わらない
        assert!(!credentials.clear_with(|| false).unwrap());
        assert_eq!(credentials.length(), 2);

        assert!(credentials.clear_with(|| true).unwrap());
        assert_eq!(credentials.length(), 0);

        let (reloaded, outcome) = reopen(key).await;
        assert_eq!(outcome, InitOutcome::Snapshot { count: 0 });
        assert!(reloaded.is_empty());
        LocalStorage::delete(key);
    }

    #[wasm_bindgen_test]
    async fn wasm_missing_dataset_reports_notice() {
        let result = dataset::fetch_static_dataset("/__missing__/data.json".into()).await;
        assert!(matches!(result, Err(qr_credentials_common::Error::Seed(_))));
    }
}
