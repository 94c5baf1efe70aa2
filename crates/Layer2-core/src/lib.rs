//! # tokmeter-core
//!
//! Core layer for TokMeter:
//! - Encoding: 모델/인코딩 이름/핸들 조합 해석 (`EncodingQuery`)
//! - Tokenize: 문자열/파일 토큰화 및 토큰 수 계산
//! - Walk: 디렉터리 순회 (중첩 트리 / 합산, 부분 실패 건너뛰기)
//! - Collection: 파일·디렉터리·목록 통합 진입점
//!
//! 실제 BPE 토큰화는 tiktoken-rs에 위임하고, 이 크레이트는 인자 해석과
//! 순회/집계만 담당합니다.
//!
//! ## 사용 예
//!
//! ```no_run
//! use tokmeter_core::{tokenize_str, num_tokens_dir, TokenizeOptions};
//!
//! let opts = TokenizeOptions::new().model("gpt-4o").quiet(true);
//! let tokens = tokenize_str("Hail to the Victors!", &opts)?;
//! let total = num_tokens_dir("./docs", &opts)?;
//! # Ok::<(), tokmeter_core::Error>(())
//! ```

pub mod collection;
pub mod encoding;
pub mod options;
pub mod tokenize;
pub mod walk;

// ============================================================================
// Foundation 재수출 (에러/레지스트리/진행/텍스트)
// ============================================================================
pub use tokmeter_foundation::{
    encoding_for_model,
    model_mappings,
    models_for_encoding,
    read_text_file,
    valid_encodings,
    valid_models,
    Error,
    ModelMatch,
    Result,
};

// ============================================================================
// Encoding (해석)
// ============================================================================
pub use encoding::{encoding_for_name, get_encoding, EncodingHandle, EncodingQuery};

// ============================================================================
// Options
// ============================================================================
pub use options::TokenizeOptions;

// ============================================================================
// Tokenize (문자열/파일)
// ============================================================================
pub use tokenize::{num_tokens_file, num_tokens_str, tokenize_file, tokenize_str};

// ============================================================================
// Walk (디렉터리)
// ============================================================================
pub use walk::{num_tokens_dir, to_json, tokenize_dir, TokenNode, TokenizedDir};

// ============================================================================
// Collection (통합 진입점)
// ============================================================================
pub use collection::{num_tokens_files, tokenize_files, FileInput, TokenizedInput};
