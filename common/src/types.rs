//! 職員レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - EmployeeRecord: 職員1名分の資格情報（写真は後から添付）

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 職員レコード
///
/// JSONのキー順は既存のバックアップ（`backup_qr_data.json`）と同じ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// QRペイロード兼スキャン照合キー
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub cargo: String,            // 役職

    #[serde(default, deserialize_with = "lenient_string")]
    pub brigada: String,          // 班

    #[serde(default, deserialize_with = "lenient_string")]
    pub nombre: String,           // 氏名

    /// 身分証番号（公開照会の主キー）
    #[serde(default, deserialize_with = "lenient_string")]
    pub cedula: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub departamento: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub municipio: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub localidad: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub coordinador: String,      // 監督者

    /// data URI形式の顔写真（取り込み直後はNone）
    #[serde(default)]
    pub photo: Option<String>,
}

impl EmployeeRecord {
    /// 取り込みシートで認識する列名（テンプレート出力の見出し順）
    pub const COLUMNS: [&'static str; 9] = [
        "ID",
        "Cédula",
        "Nombre",
        "Cargo",
        "Brigada",
        "Coordinador",
        "Departamento",
        "Municipio",
        "Localidad",
    ];

    /// 写真を除いたテキスト項目（検索用）
    pub fn search_text(&self) -> [&str; 9] {
        [
            self.id.as_str(),
            self.cargo.as_str(),
            self.brigada.as_str(),
            self.nombre.as_str(),
            self.cedula.as_str(),
            self.departamento.as_str(),
            self.municipio.as_str(),
            self.localidad.as_str(),
            self.coordinador.as_str(),
        ]
    }

    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// 数値をテキスト化（整数値は小数点なし）
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// 文字列・数値・真偽値・nullのいずれも文字列として受け取る
///
/// 旧バージョンのスナップショットではセル値がそのまま数値で保存されている。
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => format_number(f),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    })
}
