//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use qr_credentials::commands;
use qr_credentials::error::CredentialError;
use qr_credentials::storage::FileStorage;
use qr_credentials_common::RecordStore;
use std::path::Path;
use tempfile::tempdir;

fn empty_store(dir: &Path) -> commands::Store {
    RecordStore::new(FileStorage::new(dir))
}

/// 存在しないExcelを取り込んだ場合
#[test]
fn test_import_nonexistent_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = empty_store(dir.path());

    let result = commands::import_file(&mut store, Path::new("/nonexistent/personal.xlsx"));
    assert!(matches!(result, Err(CredentialError::FileNotFound(_))));
}

/// Excelでないファイルを取り込んだ場合
#[test]
fn test_import_not_a_spreadsheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("personal.xlsx");
    std::fs::write(&path, "nombre,cedula\nAna,1\n").unwrap();

    let mut store = empty_store(dir.path());
    let result = commands::import_file(&mut store, &path);
    assert!(matches!(result, Err(CredentialError::Spreadsheet(_))));
    assert!(store.is_empty());
}

/// 不正なJSONから復元した場合
#[test]
fn test_restore_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("backup.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    let mut store = empty_store(dir.path());
    let result = commands::restore_from(&mut store, &path);
    assert!(matches!(result, Err(CredentialError::JsonParse(_))));
}

/// 画像でないファイルを写真として添付した場合
#[test]
fn test_photo_not_an_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("foto.jpg");
    std::fs::write(&path, "not an image").unwrap();

    let mut store = empty_store(dir.path());
    let result = commands::attach_photo_file(&mut store, "1", &path);
    assert!(matches!(result, Err(CredentialError::InvalidPhoto(_))));
}

/// CredentialErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        CredentialError::Config("prueba".to_string()),
        CredentialError::FileNotFound("personal.xlsx".to_string()),
        CredentialError::Spreadsheet("zip error".to_string()),
        CredentialError::InvalidPhoto("formato".to_string()),
        CredentialError::RecordNotFound("123".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: CredentialError = io_err.into();

    assert!(matches!(err, CredentialError::Io(_)));
    assert!(format!("{}", err).contains("file not found"));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_transparent() {
    let common_err = qr_credentials_common::Error::Storage("quota exceeded".to_string());
    let err: CredentialError = common_err.into();

    assert!(matches!(err, CredentialError::Common(_)));
    assert_eq!(format!("{}", err), "Storage error: quota exceeded");
}
