//! QR照合・公開照会
//!
//! QRコードに載せるのはレコードの `id` のみ（誤り訂正レベルH）。
//! 読み取り側はデコードされた文字列をそのままIDとして照合する。

use crate::storage::SnapshotStorage;
use crate::store::RecordStore;
use crate::types::EmployeeRecord;
use serde::Serialize;

/// QR誤り訂正レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

impl ErrorCorrection {
    pub fn letter(&self) -> char {
        match self {
            ErrorCorrection::Low => 'L',
            ErrorCorrection::Medium => 'M',
            ErrorCorrection::Quartile => 'Q',
            ErrorCorrection::High => 'H',
        }
    }
}

/// QRコード描画ウィジェットに渡す内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub text: String,
    pub error_correction: ErrorCorrection,
}

impl QrPayload {
    pub fn for_record(record: &EmployeeRecord) -> Self {
        Self {
            text: record.id.clone(),
            error_correction: ErrorCorrection::High,
        }
    }
}

/// スキャン照合の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome<'a> {
    Verified(&'a EmployeeRecord),
    NotFound(String),
}

impl ScanOutcome<'_> {
    pub fn notice(&self) -> &'static str {
        match self {
            ScanOutcome::Verified(_) => "Personal verificado correctamente",
            ScanOutcome::NotFound(_) => "Personal no encontrado",
        }
    }
}

/// 公開照会の結果（未検索と該当なしを区別する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<'a> {
    NotSearched,
    Found(&'a EmployeeRecord),
    NotFound,
}

impl LookupOutcome<'_> {
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            LookupOutcome::NotSearched => None,
            LookupOutcome::Found(_) => Some("Registro encontrado"),
            LookupOutcome::NotFound => Some("No se encontró ningún registro"),
        }
    }
}

/// デコード済みQRペイロードをIDとして照合
pub fn verify_scan<'a, S: SnapshotStorage>(
    store: &'a RecordStore<S>,
    payload: &str,
) -> ScanOutcome<'a> {
    match store.find_by_id(payload) {
        Some(record) => ScanOutcome::Verified(record),
        None => ScanOutcome::NotFound(payload.to_string()),
    }
}

/// 身分証番号（またはID）による公開照会
pub fn public_lookup<'a, S: SnapshotStorage>(
    store: &'a RecordStore<S>,
    query: &str,
) -> LookupOutcome<'a> {
    if query.trim().is_empty() {
        return LookupOutcome::NotSearched;
    }

    match store.find_by_cedula_or_id(query) {
        Some(record) => LookupOutcome::Found(record),
        None => LookupOutcome::NotFound,
    }
}
