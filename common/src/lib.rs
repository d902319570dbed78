//! QR Credentials Common Library
//!
//! CLIとWeb(WASM)で共有される職員レコードストアとスプレッドシート取り込み

pub mod error;
pub mod importer;
pub mod storage;
pub mod store;
pub mod types;
pub mod verify;

pub use error::{Error, Result};
pub use importer::{normalize_row, parse_workbook, read_first_sheet, SheetRow};
pub use storage::{MemoryStorage, SnapshotStorage};
pub use store::{
    dataset_location, ImportReport, InitOutcome, RecordStore, DEFAULT_DATASET_FILE,
    DEFAULT_STORAGE_KEY,
};
pub use types::EmployeeRecord;
pub use verify::{
    public_lookup, verify_scan, ErrorCorrection, LookupOutcome, QrPayload, ScanOutcome,
};
