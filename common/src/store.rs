//! 職員レコードストア
//!
//! レコード列を単独で所有し、起動時の読み込み（ローカルスナップショット優先、
//! なければ静的データセット）と、変更ごとのスナップショット書き込みを行う。
//!
//! 取り込みは常に全件置き換え。ID・身分証番号の一意性は強制しない
//! （重複は警告として報告するのみ）。

use crate::error::Result;
use crate::importer::{self, SheetRow};
use crate::storage::SnapshotStorage;
use crate::types::EmployeeRecord;
use std::future::Future;
use tracing::{debug, info, warn};

/// スナップショットの既定キー
pub const DEFAULT_STORAGE_KEY: &str = "qr_app_data";

/// 静的データセットの既定ファイル名
pub const DEFAULT_DATASET_FILE: &str = "data.json";

/// デプロイ先のベースパスとファイル名を連結（URL・パスの両方に対応）
pub fn dataset_location(base_path: &str, file: &str) -> String {
    if base_path.is_empty() {
        return file.to_string();
    }
    if base_path.ends_with('/') || base_path.ends_with('\\') {
        format!("{}{}", base_path, file)
    } else {
        format!("{}/{}", base_path, file)
    }
}

/// 初期読み込みの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// ローカルスナップショットを採用（空でも採用）
    Snapshot { count: usize },
    /// 静的データセットで初期化
    Seeded { count: usize },
    /// 静的データセットは取得できたが空
    EmptySeed,
    /// スナップショットなし、静的データセットも取得不可
    SeedUnavailable { reason: String },
}

impl InitOutcome {
    /// ユーザーに通知すべきメッセージ（失敗時のみ）
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            InitOutcome::SeedUnavailable { .. } => {
                Some("No se pudieron cargar los datos iniciales")
            }
            _ => None,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            InitOutcome::Snapshot { count } | InitOutcome::Seeded { count } => *count,
            _ => 0,
        }
    }
}

/// 取り込み結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// 取り込んだ行数
    pub count: usize,
    /// 重複しているID（警告用）
    pub duplicate_ids: Vec<String>,
}

impl ImportReport {
    pub fn notice(&self) -> String {
        format!("Se importaron {} registros", self.count)
    }
}

/// レコードストア
pub struct RecordStore<S> {
    storage: S,
    key: String,
    records: Vec<EmployeeRecord>,
    ready: bool,
}

impl<S: SnapshotStorage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            records: Vec::new(),
            ready: false,
        }
    }

    /// 起動時の読み込み（1回だけ呼ぶ）
    ///
    /// 1. ローカルスナップショットがあれば採用
    /// 2. なければ `fetch_seed` で静的データセットを取得し、空でなければ採用・保存
    /// 3. 結果に関わらず ready にする
    pub async fn initialize<F, Fut>(&mut self, fetch_seed: F) -> InitOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<EmployeeRecord>>>,
    {
        if let Some(records) = self.read_snapshot() {
            let count = records.len();
            self.records = records;
            self.ready = true;
            info!("スナップショットから{}件を読み込み", count);
            return InitOutcome::Snapshot { count };
        }

        let outcome = match fetch_seed().await {
            Ok(records) if !records.is_empty() => {
                let count = records.len();
                self.records = records;
                self.ready = true;
                if let Err(e) = self.persist() {
                    warn!("静的データの保存に失敗: {}", e);
                }
                info!("静的データセットから{}件を読み込み", count);
                InitOutcome::Seeded { count }
            }
            Ok(_) => {
                debug!("静的データセットは空");
                InitOutcome::EmptySeed
            }
            Err(e) => {
                warn!("静的データセットを取得できません: {}", e);
                InitOutcome::SeedUnavailable {
                    reason: e.to_string(),
                }
            }
        };

        self.ready = true;
        outcome
    }

    /// スナップショットを読む（なし・読込失敗・破損はNone）
    fn read_snapshot(&self) -> Option<Vec<EmployeeRecord>> {
        let text = match self.storage.read(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!("スナップショットを読めません: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!("スナップショットが破損しています: {}", e);
                None
            }
        }
    }

    /// 全レコードをスナップショットに書き込む（ready前は何もしない）
    pub fn persist(&mut self) -> Result<()> {
        if !self.ready {
            debug!("初期読み込み前のため保存をスキップ");
            return Ok(());
        }

        let json = serde_json::to_string(&self.records)?;
        self.storage.write(&self.key, &json)
    }

    /// ワークブックを取り込み、レコードを全件置き換え
    ///
    /// 読み込みに失敗した場合は既存のレコードに触れない。
    pub fn import_workbook(&mut self, bytes: &[u8]) -> Result<ImportReport> {
        let records = importer::parse_workbook(bytes)?;
        self.replace_imported(records)
    }

    /// 読み込み済みの行を取り込み、レコードを全件置き換え
    pub fn import_records(&mut self, rows: &[SheetRow]) -> Result<ImportReport> {
        let records = rows.iter().map(importer::normalize_row).collect();
        self.replace_imported(records)
    }

    fn replace_imported(&mut self, records: Vec<EmployeeRecord>) -> Result<ImportReport> {
        let duplicate_ids = importer::duplicate_ids(&records);
        if !duplicate_ids.is_empty() {
            warn!("重複したIDがあります: {}", duplicate_ids.join(", "));
        }

        let report = ImportReport {
            count: records.len(),
            duplicate_ids,
        };
        self.records = records;
        info!("{}件を取り込み", report.count);

        self.persist()?;
        Ok(report)
    }

    /// レコードを全件置き換え（バックアップからの復元）
    pub fn replace_records(&mut self, records: Vec<EmployeeRecord>) -> Result<usize> {
        self.records = records;
        self.persist()?;
        Ok(self.records.len())
    }

    /// IDが一致するすべてのレコードに写真を設定
    ///
    /// IDが重複していれば全件に同じ写真が付く。一致しなければ何もしない（Ok(false)）。
    pub fn attach_photo(&mut self, id: &str, photo_data_uri: impl Into<String>) -> Result<bool> {
        let photo = photo_data_uri.into();
        let mut matched = 0;
        for record in self.records.iter_mut().filter(|r| r.id == id) {
            record.photo = Some(photo.clone());
            matched += 1;
        }

        if matched == 0 {
            debug!("写真の添付先が見つかりません: {}", id);
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// IDの完全一致で検索（QRスキャン照合用）
    pub fn find_by_id(&self, id: &str) -> Option<&EmployeeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// 身分証番号またはIDで検索（公開照会用）
    ///
    /// 前後の空白を除き、大文字小文字を区別しない。先に登録された方が優先。
    pub fn find_by_cedula_or_id(&self, query: &str) -> Option<&EmployeeRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.records
            .iter()
            .find(|r| r.cedula.to_lowercase() == query || r.id.to_lowercase() == query)
    }

    /// 部分一致の絞り込み（写真以外の全項目、大文字小文字無視）
    pub fn filter(&self, term: &str) -> Vec<&EmployeeRecord> {
        let term = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                term.is_empty()
                    || r.search_text()
                        .iter()
                        .any(|text| text.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// 全件削除（`confirm` が true を返した場合のみ、元に戻せない）
    pub fn clear_all(&mut self, confirm: impl FnOnce() -> bool) -> Result<bool> {
        if !confirm() {
            return Ok(false);
        }

        let removed = self.records.len();
        self.records.clear();
        info!("{}件を削除", removed);
        self.persist()?;
        Ok(true)
    }

    /// ダウンロード用スナップショット（インデント付きJSON）
    pub fn export_snapshot(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.records)?)
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
