//! Encoding - BPE 인코딩 핸들과 해석
//!
//! 모델 이름 / 인코딩 이름 / 핸들 조합을 하나의 인코딩 핸들로 해석합니다.
//! - `EncodingHandle`: 이름 + 공유 CoreBPE (이름 기준 동등성)
//! - `encoding_for_name`: 프로세스 전역 캐시를 거치는 핸들 생성
//! - `EncodingQuery`: 진입 경계에서 한 번만 수행하는 일관성 검증 + 해석

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use tiktoken_rs::{cl100k_base, o200k_base, p50k_base, r50k_base, CoreBPE};
use tokmeter_foundation::{registry, Error, Result};
use tracing::debug;

/// 전역 인코딩 캐시 (CoreBPE 생성은 비싸므로 이름별로 공유)
static ENCODING_CACHE: OnceLock<RwLock<HashMap<&'static str, EncodingHandle>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<&'static str, EncodingHandle>> {
    ENCODING_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// BPE 인코딩 핸들
///
/// 외부 인코더에서 얻은 불투명 객체입니다. 복제는 저렴하고
/// 동등성은 기반 인코딩 이름으로만 판단합니다.
#[derive(Clone)]
pub struct EncodingHandle {
    name: &'static str,
    bpe: Arc<CoreBPE>,
}

impl EncodingHandle {
    /// 기반 인코딩 이름
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 텍스트를 토큰 ID 열로 인코딩
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|id| id as u32)
            .collect()
    }
}

impl PartialEq for EncodingHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EncodingHandle {}

impl fmt::Debug for EncodingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodingHandle").field(&self.name).finish()
    }
}

impl fmt::Display for EncodingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 인코딩 이름으로 핸들 획득 (캐시 우선)
pub fn encoding_for_name(encoding_name: &str) -> Result<EncodingHandle> {
    let canonical = registry::valid_encodings()
        .iter()
        .copied()
        .find(|e| *e == encoding_name)
        .ok_or_else(|| Error::InvalidEncodingName(encoding_name.to_owned()))?;

    if let Some(handle) = cache().read().unwrap().get(canonical) {
        return Ok(handle.clone());
    }

    debug!(encoding = canonical, "loading BPE tables");
    let bpe = match canonical {
        "o200k_base" => o200k_base(),
        "cl100k_base" => cl100k_base(),
        "p50k_base" => p50k_base(),
        "r50k_base" => r50k_base(),
        other => {
            return Err(Error::Internal(format!(
                "Encoding \"{other}\" is registered but has no loader."
            )))
        }
    }
    .map_err(|e| Error::Encoder(e.to_string()))?;

    let handle = EncodingHandle {
        name: canonical,
        bpe: Arc::new(bpe),
    };
    cache()
        .write()
        .unwrap()
        .insert(canonical, handle.clone());
    Ok(handle)
}

/// 요청된 인코딩 사양
///
/// 모델 이름, 인코딩 이름, 기존 핸들의 임의 조합을 담고,
/// `resolve`에서 상호 일관성을 검증한 뒤 구체 핸들 하나로 해석합니다.
/// 모든 호출 지점에서 개별 검증하는 대신 진입 경계에서 한 번만 해석합니다.
#[derive(Debug, Default, Clone)]
pub struct EncodingQuery {
    model: Option<String>,
    encoding_name: Option<String>,
    encoding: Option<EncodingHandle>,
}

impl EncodingQuery {
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

    /// 사양을 구체 핸들로 해석
    ///
    /// 1. 모델이 있으면 검증 후 인코딩 이름 유도
    /// 2. 인코딩 이름이 있으면 검증, 유도된 이름과 불일치 시 실패
    /// 3. 핸들이 있으면 해석된 이름과 비교, 불일치 시 원인 인자를 밝혀 실패
    /// 4. 핸들만 주어지면 그대로 채택, 아무 것도 없으면 실패
    pub fn resolve(&self) -> Result<EncodingHandle> {
        let mut resolved: Option<&'static str> = None;

        if let Some(model) = self.model.as_deref() {
            resolved = Some(registry::encoding_for_model(model)?);
        }

        if let Some(name) = self.encoding_name.as_deref() {
            let canonical = registry::valid_encodings()
                .iter()
                .copied()
                .find(|e| *e == name)
                .ok_or_else(|| Error::InvalidEncodingName(name.to_owned()))?;

            if let (Some(model), Some(derived)) = (self.model.as_deref(), resolved) {
                if derived != canonical {
                    return Err(Error::ModelEncodingMismatch {
                        model: model.to_owned(),
                        encoding_name: name.to_owned(),
                        expected: derived,
                    });
                }
            }
            resolved = Some(canonical);
        }

        if let Some(handle) = &self.encoding {
            if let Some(expected) = resolved {
                if handle.name() != expected {
                    return Err(self.handle_mismatch(handle, expected));
                }
            }
            // 이름과 일치하거나, 핸들만 주어진 경우: 제공된 핸들 채택
            return Ok(handle.clone());
        }

        match resolved {
            Some(name) => encoding_for_name(name),
            None => Err(Error::MissingEncoding),
        }
    }

    /// 핸들 불일치 에러 구성 (어느 인자가 어긋났는지에 따라 구분)
    fn handle_mismatch(&self, handle: &EncodingHandle, expected: &'static str) -> Error {
        match (self.model.as_deref(), self.encoding_name.as_deref()) {
            (Some(model), Some(_)) => Error::EncodingConflict {
                model: model.to_owned(),
                handle: handle.name().to_owned(),
                expected: expected.to_owned(),
            },
            (None, Some(encoding_name)) => Error::HandleNameMismatch {
                encoding_name: encoding_name.to_owned(),
                handle: handle.name().to_owned(),
            },
            (Some(model), None) => Error::HandleModelMismatch {
                model: model.to_owned(),
                handle: handle.name().to_owned(),
                expected: expected.to_owned(),
            },
            (None, None) => Error::Internal(format!(
                "Encoding resolved to \"{expected}\" without a model or encoding name, \
                 yet it does not match the given encoding \"{}\".",
                handle.name()
            )),
        }
    }
}

/// 모델 또는 인코딩 이름으로 핸들 획득
pub fn get_encoding(model: Option<&str>, encoding_name: Option<&str>) -> Result<EncodingHandle> {
    let mut query = EncodingQuery::new();
    if let Some(model) = model {
        query = query.model(model);
    }
    if let Some(name) = encoding_name {
        query = query.encoding_name(name);
    }
    query.resolve()
}
