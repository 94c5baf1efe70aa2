//! Model Registry - 모델/인코딩 매핑 관리
//!
//! 지원하는 모델과 BPE 인코딩 간의 고정 매핑을 중앙에서 관리합니다.
//! - 모델 → 인코딩 (다대일)
//! - 인코딩 → 모델 (역방향, 단일/복수 구분)
//! - 검증 헬퍼 및 에러 메시지용 목록

use crate::error::{Error, Result};
use serde::Serialize;

/// 모델 → 인코딩 고정 매핑 (선언 순서 유지)
///
/// "Codex models" / "GPT-3 models like davinci"는 단일 모델이 아니라
/// 모델 계열을 가리키는 레지스트리 키입니다.
pub const MODEL_MAPPINGS: [(&str, &str); 12] = [
    ("gpt-4o", "o200k_base"),
    ("gpt-4o-mini", "o200k_base"),
    ("gpt-4-turbo", "cl100k_base"),
    ("gpt-4", "cl100k_base"),
    ("gpt-3.5-turbo", "cl100k_base"),
    ("text-embedding-ada-002", "cl100k_base"),
    ("text-embedding-3-small", "cl100k_base"),
    ("text-embedding-3-large", "cl100k_base"),
    ("Codex models", "p50k_base"),
    ("text-davinci-002", "p50k_base"),
    ("text-davinci-003", "p50k_base"),
    ("GPT-3 models like davinci", "r50k_base"),
];

/// 유효한 모델 이름 (고정 12개)
pub const VALID_MODELS: [&str; 12] = [
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-4-turbo",
    "gpt-4",
    "gpt-3.5-turbo",
    "text-embedding-ada-002",
    "text-embedding-3-small",
    "text-embedding-3-large",
    "Codex models",
    "text-davinci-002",
    "text-davinci-003",
    "GPT-3 models like davinci",
];

/// 유효한 인코딩 이름 (고정 4개)
pub const VALID_ENCODINGS: [&str; 4] = ["o200k_base", "cl100k_base", "p50k_base", "r50k_base"];

/// 모델 → 인코딩 매핑 조회
pub fn model_mappings() -> &'static [(&'static str, &'static str)] {
    &MODEL_MAPPINGS
}

/// 유효한 모델 목록
pub fn valid_models() -> &'static [&'static str] {
    &VALID_MODELS
}

/// 유효한 인코딩 목록
pub fn valid_encodings() -> &'static [&'static str] {
    &VALID_ENCODINGS
}

/// 에러 메시지용 모델 목록 (줄바꿈 구분)
pub fn valid_models_str() -> String {
    VALID_MODELS.join("\n")
}

/// 에러 메시지용 인코딩 목록 (줄바꿈 구분)
pub fn valid_encodings_str() -> String {
    VALID_ENCODINGS.join("\n")
}

/// 모델에 대응하는 인코딩 이름 조회
pub fn encoding_for_model(model: &str) -> Result<&'static str> {
    MODEL_MAPPINGS
        .iter()
        .find(|(m, _)| *m == model)
        .map(|(_, e)| *e)
        .ok_or_else(|| Error::InvalidModel(model.to_owned()))
}

/// 인코딩에 대응하는 모델 조회 결과
///
/// 원래 API는 단일 매칭이면 스칼라, 복수 매칭이면 정렬된 목록을 반환하는
/// 비대칭 형태입니다. 호환성을 위해 그 구분을 variant로 유지합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModelMatch {
    /// 정확히 하나의 모델이 매칭
    One(&'static str),
    /// 복수 매칭 (사전순 정렬)
    Many(Vec<&'static str>),
}

impl ModelMatch {
    /// 매칭된 모델 이름들 (단일 매칭도 슬라이스로)
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            ModelMatch::One(name) => vec![name],
            ModelMatch::Many(names) => names.clone(),
        }
    }

    /// 특정 모델이 포함되어 있는지 확인
    pub fn contains(&self, model: &str) -> bool {
        match self {
            ModelMatch::One(name) => *name == model,
            ModelMatch::Many(names) => names.iter().any(|n| *n == model),
        }
    }
}

/// 인코딩에 대응하는 모델(들) 조회
pub fn models_for_encoding(encoding_name: &str) -> Result<ModelMatch> {
    if !VALID_ENCODINGS.contains(&encoding_name) {
        return Err(Error::InvalidEncodingName(encoding_name.to_owned()));
    }

    let mut matches: Vec<&'static str> = MODEL_MAPPINGS
        .iter()
        .filter(|(_, e)| *e == encoding_name)
        .map(|(m, _)| *m)
        .collect();
    matches.sort_unstable();

    if matches.len() == 1 {
        Ok(ModelMatch::One(matches[0]))
    } else {
        Ok(ModelMatch::Many(matches))
    }
}
