//! # tokmeter-foundation
//!
//! Foundation layer for TokMeter:
//! - Error: 중앙 에러 타입 (검증/불일치/경로/디코딩 실패)
//! - Registry: 모델 ↔ 인코딩 고정 매핑
//! - Progress: 주입형 진행 보고 (indicatif)
//! - Text: 파일 바이트 → 텍스트 디코딩 (BOM/UTF-8/chardetng)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  tokmeter-core (resolve / tokenize / walk)   │
//! │                     │                        │
//! │                     ▼                        │
//! │  Registry ── Error ── Progress ── Text       │
//! │  (매핑)     (타입)    (진행바)    (디코딩)    │
//! └──────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod progress;
pub mod registry;
pub mod strings;
pub mod text;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Registry (모델/인코딩 매핑)
// ============================================================================
pub use registry::{
    encoding_for_model,
    model_mappings,
    models_for_encoding,
    valid_encodings,
    valid_encodings_str,
    valid_models,
    valid_models_str,
    ModelMatch,
    MODEL_MAPPINGS,
    VALID_ENCODINGS,
    VALID_MODELS,
};

// ============================================================================
// Progress (진행 보고)
// ============================================================================
pub use progress::{start_task, TaskReporter};

// ============================================================================
// Text (텍스트 디코딩)
// ============================================================================
pub use text::read_text_file;

// ============================================================================
// Strings (표시 유틸리티)
// ============================================================================
pub use strings::file_name;
