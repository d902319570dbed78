//! スプレッドシート取り込みモジュール
//!
//! アップロードされたワークブックの先頭シートを読み、
//! 1行目を見出しとして各行を `EmployeeRecord` に正規化する。
//! 列名は大文字小文字を区別せず、「cédula」のアクセント付き表記も受け付ける。

use crate::error::{Error, Result};
use crate::types::{format_number, EmployeeRecord};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;

/// 見出しが空の列に付ける名前
const EMPTY_HEADER: &str = "__EMPTY";

/// フォールバックIDの長さ
const FALLBACK_ID_LEN: usize = 9;

/// シートの1データ行（列名 → セル値、列順を保持）
///
/// 空セルは含まない。同じ列名の候補が複数ある場合、
/// 値の入っている最初の列が選ばれる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    cells: Vec<(String, String)>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// (列名, 値) の組から作成（空値は落とす）
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (k, v) in pairs {
            row.push(k, v);
        }
        row
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.cells.push((column.into(), value));
        }
    }

    /// 列名を大文字小文字無視で探し、最初に一致した列の値を返す
    pub fn get(&self, key: &str) -> &str {
        let key = key.to_lowercase();
        self.cells
            .iter()
            .find(|(column, _)| column.to_lowercase() == key)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// 1行を職員レコードに正規化
///
/// - `id`: "id" → "cedula" → "cédula" → ランダムなフォールバック
/// - `cedula`: "cedula" → "cédula"
/// - その他: 同名の列
/// - `photo`: 常に None
pub fn normalize_row(row: &SheetRow) -> EmployeeRecord {
    let cedula = first_non_empty(&[row.get("cedula"), row.get("cédula")]);
    let id = first_non_empty(&[row.get("id"), cedula.as_str()]);
    let id = if id.is_empty() { generate_fallback_id() } else { id };

    EmployeeRecord {
        id,
        cargo: row.get("cargo").to_string(),
        brigada: row.get("brigada").to_string(),
        nombre: row.get("nombre").to_string(),
        cedula,
        departamento: row.get("departamento").to_string(),
        municipio: row.get("municipio").to_string(),
        localidad: row.get("localidad").to_string(),
        coordinador: row.get("coordinador").to_string(),
        photo: None,
    }
}

fn first_non_empty(candidates: &[&str]) -> String {
    candidates
        .iter()
        .find(|c| !c.is_empty())
        .map(|c| c.to_string())
        .unwrap_or_default()
}

/// 短いランダム英数字トークン
pub fn generate_fallback_id() -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    token[..FALLBACK_ID_LEN].to_string()
}

/// ワークブックの先頭シートを行データとして読み込み
///
/// 読めない場合（破損ファイル・非対応形式）は `Error::Parse`。
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<SheetRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Parse("workbook has no worksheets".into()))??;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_names(header_row),
        None => return Ok(Vec::new()),
    };

    let sheet_rows = rows
        .map(|cells| {
            let mut row = SheetRow::new();
            for (header, cell) in headers.iter().zip(cells) {
                row.push(header.clone(), cell_text(cell));
            }
            row
        })
        // 空行は読み飛ばす
        .filter(|row| !row.is_empty())
        .collect();

    Ok(sheet_rows)
}

/// ワークブックを読み込み、全行を正規化
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<EmployeeRecord>> {
    let rows = read_first_sheet(bytes)?;
    Ok(rows.iter().map(normalize_row).collect())
}

/// 見出し行から列名を作る（空は `__EMPTY`、重複は `_1`, `_2` …）
fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .iter()
        .map(|cell| {
            let text = cell_text(cell);
            let base = match text.trim() {
                "" => EMPTY_HEADER.to_string(),
                t => t.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// セル値をテキスト化
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        // 日付はシリアル値のまま
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// 2件以上出現するIDを列挙（初出順）
///
/// 一意性は強制しない。取り込み時の警告にのみ使う。
pub fn duplicate_ids(records: &[EmployeeRecord]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.id.as_str()).or_insert(0) += 1;
    }

    let mut reported = HashSet::new();
    records
        .iter()
        .map(|r| r.id.as_str())
        .filter(|id| counts.get(id).copied().unwrap_or(0) > 1)
        .filter(|id| reported.insert(*id))
        .map(str::to_string)
        .collect()
}

/// 見出しのみの取り込みテンプレート（.xlsx）を生成
#[cfg(feature = "excel")]
pub fn write_template() -> Result<Vec<u8>> {
    use rust_xlsxwriter::Workbook;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, name) in EmployeeRecord::COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .map_err(|e| Error::Workbook(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Workbook(e.to_string()))
}
