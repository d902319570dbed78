//! 写真ファイルをdata URIに変換

use crate::error::{CredentialError, Result};
use base64::Engine;
use std::path::Path;

/// 画像ファイルを `data:<mime>;base64,...` 形式に変換
///
/// 形式は拡張子ではなく内容から判定する。
pub fn photo_data_uri(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CredentialError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    encode_data_uri(&bytes)
}

pub fn encode_data_uri(bytes: &[u8]) -> Result<String> {
    let format = image::guess_format(bytes)
        .map_err(|e| CredentialError::InvalidPhoto(e.to_string()))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", format.to_mime_type(), encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::new(1, 1);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_png_data_uri() {
        let uri = encode_data_uri(&tiny_png()).expect("変換失敗");
        assert!(uri.starts_with("data:image/png;base64,iVBOR"));
    }

    #[test]
    fn test_not_an_image() {
        let result = encode_data_uri(b"hello");
        assert!(matches!(result, Err(CredentialError::InvalidPhoto(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = photo_data_uri(Path::new("/nonexistent/foto.png"));
        assert!(matches!(result, Err(CredentialError::FileNotFound(_))));
    }
}
