//! Error types for TokMeter
//!
//! 모든 에러를 중앙에서 관리

use std::path::PathBuf;
use thiserror::Error;

use crate::registry::{valid_encodings_str, valid_models_str};

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// TokMeter 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 모델/인코딩 이름 검증
    // ========================================================================
    #[error("Invalid model: {0}\n\nValid models:\n{models}", models = valid_models_str())]
    InvalidModel(String),

    #[error(
        "Invalid encoding name: {0}\n\nValid encoding names:\n{encodings}",
        encodings = valid_encodings_str()
    )]
    InvalidEncodingName(String),

    // ========================================================================
    // 인자 간 불일치
    // ========================================================================
    #[error("Model {model} does not have encoding name {encoding_name}\n\nValid encoding names for model {model}: \"{expected}\"")]
    ModelEncodingMismatch {
        model: String,
        encoding_name: String,
        expected: &'static str,
    },

    /// 모델 + 인코딩 이름이 함께 주어졌는데 핸들이 다른 경우
    #[error("Model {model} does not have encoding {handle}.\n\nValid encoding name for model {model}: \n{expected}\n")]
    EncodingConflict {
        model: String,
        handle: String,
        expected: String,
    },

    /// 인코딩 이름만 주어졌는데 핸들이 다른 경우
    #[error("Encoding name {encoding_name} does not match provided encoding \"{handle}\"")]
    HandleNameMismatch {
        encoding_name: String,
        handle: String,
    },

    /// 모델만 주어졌는데 핸들이 다른 경우
    #[error("Model {model} does not have provided encoding \"{handle}\".\n\nValid encoding name for model {model}: \n{expected}\n")]
    HandleModelMismatch {
        model: String,
        handle: String,
        expected: String,
    },

    #[error(
        "Either model or encoding must be provided. Valid models:\n{models}\n\nValid encodings:\n{encodings}",
        models = valid_models_str(),
        encodings = valid_encodings_str()
    )]
    MissingEncoding,

    // ========================================================================
    // 파일/경로 관련
    // ========================================================================
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Given directory path \"{}\" is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error("Given list contains non-file entries: {entries}", entries = format_paths(.0))]
    NotAFile(Vec<PathBuf>),

    #[error("Unsupported encoding \"{encoding}\" for file: {file}", file = .path.display())]
    UnsupportedEncoding { encoding: String, path: PathBuf },

    // ========================================================================
    // 외부 인코더 관련
    // ========================================================================
    #[error("Encoder error: {0}")]
    Encoder(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Unexpected error. {0}\nPlease report this error.")]
    Internal(String),
}

impl Error {
    /// 순회 중 건너뛸 수 있는 에러인지 확인 (디렉터리/목록 스캔의 부분 실패 정책)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::UnsupportedEncoding { .. })
    }

    /// UnsupportedEncoding 생성 헬퍼
    pub fn unsupported_encoding(encoding: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::UnsupportedEncoding {
            encoding: encoding.into(),
            path: path.into(),
        }
    }
}

/// 경로 목록을 에러 메시지용으로 포맷
fn format_paths(paths: &[PathBuf]) -> String {
    let joined = paths
        .iter()
        .map(|p| format!("\"{}\"", p.display()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
