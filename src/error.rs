use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("Archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("Error al leer el archivo Excel: {0}")]
    Spreadsheet(String),

    #[error("Imagen no válida: {0}")]
    InvalidPhoto(String),

    #[error("No se encontró el registro: {0}")]
    RecordNotFound(String),

    #[error(transparent)]
    Common(#[from] qr_credentials_common::Error),

    #[error("Error de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error de diálogo: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, CredentialError>;
