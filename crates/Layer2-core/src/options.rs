//! Options - 토큰화 호출 옵션
//!
//! 모든 공개 연산이 공유하는 옵션 묶음입니다. 모델/인코딩 선택은
//! `EncodingQuery`로 변환되어 진입 경계에서 한 번만 해석됩니다.

use crate::encoding::{EncodingHandle, EncodingQuery};

/// 토큰화 옵션
#[derive(Debug, Clone)]
pub struct TokenizeOptions {
    /// 모델 이름 (인코딩 유도용)
    pub model: Option<String>,

    /// 인코딩 이름 (모델과 함께 주어지면 일치해야 함)
    pub encoding_name: Option<String>,

    /// 기존 인코딩 핸들
    pub encoding: Option<EncodingHandle>,

    /// 디렉터리 순회 시 하위 디렉터리 포함 여부
    pub recursive: bool,

    /// 진행 표시 억제
    pub quiet: bool,

    /// 목록 처리 중 실패 시 즉시 중단 여부 (false면 건너뛰고 계속)
    pub exit_on_list_error: bool,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self {
            model: None,
            encoding_name: None,
            encoding: None,
            recursive: true,
            quiet: false,
            exit_on_list_error: true,
        }
    }
}

impl TokenizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 모델 이름 지정
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// 인코딩 이름 지정
    pub fn encoding_name(mut self, name: impl Into<String>) -> Self {
        self.encoding_name = Some(name.into());
        self
    }

    /// 기존 핸들 지정
    pub fn encoding(mut self, handle: EncodingHandle) -> Self {
        self.encoding = Some(handle);
        self
    }

    /// 하위 디렉터리 포함 여부
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 진행 표시 억제
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// 목록 실패 시 중단 여부
    pub fn exit_on_list_error(mut self, exit: bool) -> Self {
        self.exit_on_list_error = exit;
        self
    }

    /// 인코딩 선택 부분을 해석용 쿼리로 변환
    pub(crate) fn query(&self) -> EncodingQuery {
        let mut query = EncodingQuery::new();
        if let Some(model) = &self.model {
            query = query.model(model.clone());
        }
        if let Some(name) = &self.encoding_name {
            query = query.encoding_name(name.clone());
        }
        if let Some(handle) = &self.encoding {
            query = query.encoding(handle.clone());
        }
        query
    }
}
