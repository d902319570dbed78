//! QR Credentials CLI
//!
//! 職員名簿の取り込み、QRペイロードの照合、身分証番号による照会

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod photo;
pub mod seed;
pub mod storage;
