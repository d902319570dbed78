//! サブコマンドの処理本体
//!
//! main.rs は表示のみを担当し、ストアの操作はここに集める。

use crate::config::Config;
use crate::error::{CredentialError, Result};
use crate::photo;
use crate::seed;
use crate::storage::FileStorage;
use dialoguer::Confirm;
use qr_credentials_common::{EmployeeRecord, ImportReport, InitOutcome, RecordStore};
use std::path::{Path, PathBuf};
use tracing::info;

pub type Store = RecordStore<FileStorage>;

/// ストアを開き、初期読み込みを行う
pub async fn open_store(config: &Config, data_dir: PathBuf) -> (Store, InitOutcome) {
    let mut store = RecordStore::with_key(FileStorage::new(data_dir), config.storage_key.clone());
    let location = config.dataset_location();
    let outcome = store
        .initialize(|| seed::fetch_static_dataset(location.as_deref()))
        .await;
    (store, outcome)
}

/// Excelファイルを取り込む
pub fn import_file(store: &mut Store, path: &Path) -> Result<ImportReport> {
    if !path.exists() {
        return Err(CredentialError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    store.import_workbook(&bytes).map_err(|e| match e {
        qr_credentials_common::Error::Parse(msg) => CredentialError::Spreadsheet(msg),
        other => other.into(),
    })
}

/// JSONバックアップを書き出す
pub fn export_to(store: &Store, path: &Path) -> Result<usize> {
    let bytes = store.export_snapshot()?;
    std::fs::write(path, bytes)?;
    Ok(store.len())
}

/// JSONバックアップから復元（全件置き換え）
pub fn restore_from(store: &mut Store, path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(CredentialError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let records: Vec<EmployeeRecord> = serde_json::from_str(&content)?;
    Ok(store.replace_records(records)?)
}

/// 画像ファイルを写真として添付（該当IDがなければfalse）
pub fn attach_photo_file(store: &mut Store, id: &str, image: &Path) -> Result<bool> {
    let data_uri = photo::photo_data_uri(image)?;
    let attached = store.attach_photo(id, data_uri)?;
    if !attached {
        info!("IDに一致する登録がありません: {}", id);
    }
    Ok(attached)
}

/// 確認の上で全件削除
pub fn clear_with_prompt(store: &mut Store, skip_prompt: bool) -> Result<bool> {
    let confirmed = skip_prompt
        || Confirm::new()
            .with_prompt("¿Estás seguro de borrar todos los datos?")
            .default(false)
            .interact()?;

    Ok(store.clear_all(|| confirmed)?)
}

/// 一覧表示用の1行
pub fn format_record_line(record: &EmployeeRecord) -> String {
    format!(
        "{:<12} {:<12} {:<28} {:<18} {:<10} {}",
        record.id,
        record.cedula,
        record.nombre,
        record.cargo,
        record.brigada,
        if record.has_photo() { "✔" } else { "-" }
    )
}

/// 照会結果のカード表示
pub fn format_record_card(record: &EmployeeRecord) -> String {
    let rows = [
        ("Nombre", record.nombre.as_str()),
        ("Cédula", record.cedula.as_str()),
        ("ID", record.id.as_str()),
        ("Cargo", record.cargo.as_str()),
        ("Brigada", record.brigada.as_str()),
        ("Coordinador", record.coordinador.as_str()),
        ("Departamento", record.departamento.as_str()),
        ("Municipio", record.municipio.as_str()),
        ("Localidad", record.localidad.as_str()),
    ];

    let mut card = String::new();
    for (label, value) in rows {
        card.push_str(&format!("  {:<13} {}\n", format!("{}:", label), value));
    }
    card.push_str(&format!(
        "  {:<13} {}\n",
        "Foto:",
        if record.has_photo() { "sí" } else { "no" }
    ));
    card
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record_card() {
        let record = EmployeeRecord {
            id: "12345".into(),
            cedula: "12345".into(),
            nombre: "Ana Lopez".into(),
            ..Default::default()
        };

        let card = format_record_card(&record);
        assert!(card.contains("Nombre:       Ana Lopez"));
        assert!(card.contains("Foto:         no"));
    }

    #[test]
    fn test_format_record_line_marks_photo() {
        let record = EmployeeRecord {
            id: "1".into(),
            photo: Some("data:image/png;base64,AAAA".into()),
            ..Default::default()
        };
        assert!(format_record_line(&record).ends_with('✔'));
    }
}
