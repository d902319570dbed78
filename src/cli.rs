use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qr-credentials")]
#[command(
    about = "Credenciales QR del personal: importación, verificación y consulta",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// スナップショット保存ディレクトリ（設定より優先）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Excelを取り込み、登録データを全件置き換え
    Import {
        /// 取り込むファイル (.xlsx/.xls)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 登録データを一覧表示
    List {
        /// 絞り込み文字列（全項目の部分一致）
        #[arg(short, long)]
        search: Option<String>,
    },

    /// 身分証番号またはIDで照会
    Lookup {
        #[arg(required = true)]
        query: String,
    },

    /// 読み取ったQRの内容を照合
    Verify {
        /// デコード済みのQRテキスト
        #[arg(required = true)]
        payload: String,
    },

    /// レコードのQRペイロードを表示
    Qr {
        #[arg(required = true)]
        id: String,
    },

    /// 写真を添付
    Photo {
        #[arg(required = true)]
        id: String,

        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,
    },

    /// 登録データをJSONでバックアップ
    Export {
        /// 出力ファイル（デフォルト: backup_qr_data.json）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// JSONバックアップから登録データを復元（全件置き換え）
    Restore {
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 登録データを全件削除
    Clear {
        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// 取り込み用の空テンプレートを出力
    Template {
        /// 出力ファイル
        #[arg(short, long, default_value = "plantilla_personal.xlsx")]
        output: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 静的データセットのベースパス（URLまたはディレクトリ）
        #[arg(long)]
        set_base_path: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import() {
        let cli = Cli::try_parse_from(["qr-credentials", "import", "personal.xlsx"]).unwrap();
        match cli.command {
            Commands::Import { file } => assert_eq!(file, PathBuf::from("personal.xlsx")),
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "qr-credentials",
            "list",
            "-v",
            "--data-dir",
            "/tmp/qr",
            "-s",
            "guard",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/qr")));
        assert!(matches!(cli.command, Commands::List { search: Some(ref s) } if s == "guard"));
    }

    #[test]
    fn test_parse_clear_yes() {
        let cli = Cli::try_parse_from(["qr-credentials", "clear", "--yes"]).unwrap();
        assert!(matches!(cli.command, Commands::Clear { yes: true }));
    }

    #[test]
    fn test_photo_requires_image() {
        assert!(Cli::try_parse_from(["qr-credentials", "photo", "123"]).is_err());
    }
}
