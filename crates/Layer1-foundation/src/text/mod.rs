//! Text - 파일 바이트를 텍스트로 디코딩
//!
//! 토큰화 전에 파일 내용을 문자열로 변환합니다.
//! - BOM 스니핑 → UTF-8 빠른 경로 → chardetng 감지 순서
//! - 디코딩 불가능하면 감지된 바이트 인코딩 이름을 담아 실패
//!
//! 여기서의 "인코딩"은 바이트 수준 텍스트 인코딩(UTF-8 등)으로,
//! 토크나이저의 BPE 인코딩(cl100k_base 등)과는 무관한 개념입니다.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// NUL 바이트 검사 범위 (바이너리 판별용)
const BINARY_SNIFF_LEN: usize = 8192;

/// 파일을 읽어 텍스트로 디코딩
///
/// 파일이 없으면 `FileNotFound`, 텍스트로 디코딩할 수 없으면
/// 감지된 인코딩 이름을 담은 `UnsupportedEncoding`으로 실패합니다.
pub fn read_text_file(path: &Path) -> Result<String> {
    let raw = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    decode_bytes(&raw, path)
}

/// 바이트 열을 텍스트로 디코딩
fn decode_bytes(raw: &[u8], path: &Path) -> Result<String> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    // BOM이 있으면 해당 인코딩으로 확정
    if let Some((encoding, _bom_len)) = Encoding::for_bom(raw) {
        let (text, had_errors) = encoding.decode_with_bom_removal(raw);
        if had_errors {
            return Err(Error::unsupported_encoding(encoding.name(), path));
        }
        debug!(encoding = encoding.name(), file = %path.display(), "decoded via BOM");
        return Ok(text.into_owned());
    }

    // UTF-8 빠른 경로
    if let Ok(text) = std::str::from_utf8(raw) {
        return Ok(text.to_owned());
    }

    // NUL 바이트가 섞인 비 UTF-8 데이터는 바이너리로 취급
    // (단일 바이트 인코딩은 디코딩이 실패하지 않으므로 감지만으로는 걸러지지 않음)
    let sniff = &raw[..raw.len().min(BINARY_SNIFF_LEN)];
    if sniff.contains(&0) {
        return Err(Error::unsupported_encoding("binary", path));
    }

    // 레거시 인코딩 감지
    let mut detector = EncodingDetector::new();
    detector.feed(raw, true);
    let encoding = detector.guess(None, false);
    let (text, had_errors) = encoding.decode_without_bom_handling(raw);
    if had_errors {
        return Err(Error::unsupported_encoding(encoding.name(), path));
    }

    debug!(encoding = encoding.name(), file = %path.display(), "decoded via detection");
    Ok(text.into_owned())
}
