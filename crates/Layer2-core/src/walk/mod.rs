//! Walk - 디렉터리 순회 토큰화
//!
//! 디렉터리를 순회하며 파일별 토큰 열을 중첩 트리로 모으거나 합산합니다.
//! - 즉시 항목의 파일 먼저, 하위 디렉터리는 큐에 쌓았다가 이후 재귀
//! - 디코딩 불가 파일은 건너뛰고 계속 (부분 실패 정책)
//! - 비어 있는 하위 디렉터리 결과는 트리에서 생략

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokmeter_foundation::{
    file_name, progress, progress::TaskReporter, read_text_file, Error, Result,
};
use tracing::warn;

use crate::encoding::EncodingHandle;
use crate::options::TokenizeOptions;

/// 디렉터리 토큰화 결과 (이름 → 노드, 키 정렬)
pub type TokenizedDir = BTreeMap<String, TokenNode>;

/// 디렉터리 결과 트리의 노드
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenNode {
    /// 파일: 토큰 ID 열
    Tokens(Vec<u32>),
    /// 하위 디렉터리
    Dir(TokenizedDir),
}

impl TokenNode {
    /// 파일 노드의 토큰 열
    pub fn tokens(&self) -> Option<&[u32]> {
        match self {
            TokenNode::Tokens(tokens) => Some(tokens),
            TokenNode::Dir(_) => None,
        }
    }

    /// 디렉터리 노드의 하위 트리
    pub fn dir(&self) -> Option<&TokenizedDir> {
        match self {
            TokenNode::Tokens(_) => None,
            TokenNode::Dir(dir) => Some(dir),
        }
    }

    /// 트리 전체의 토큰 수 합계
    pub fn num_tokens(&self) -> usize {
        match self {
            TokenNode::Tokens(tokens) => tokens.len(),
            TokenNode::Dir(dir) => dir.values().map(TokenNode::num_tokens).sum(),
        }
    }
}

/// 결과 트리를 JSON 문자열로 직렬화
pub fn to_json(result: &TokenizedDir) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// 디렉터리 경로 검증 및 절대 경로화
fn resolve_dir(path: &Path) -> Result<PathBuf> {
    let dir = match path.canonicalize() {
        Ok(resolved) => resolved,
        Err(_) => path.to_path_buf(),
    };
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir));
    }
    Ok(dir)
}

/// 디렉터리의 파일 수 집계 (진행 총량 산정용)
fn count_dir_files(dir: &Path, recursive: bool) -> Result<u64> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut num_files = 0u64;
    if recursive {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                num_files += count_dir_files(&path, recursive)?;
            } else {
                num_files += 1;
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            if entry?.path().is_file() {
                num_files += 1;
            }
        }
    }

    Ok(num_files)
}

/// 디렉터리의 모든 파일을 토큰화해 중첩 트리로 반환
///
/// 디코딩 불가 파일은 건너뛰며, 결과가 비어 있는 하위 디렉터리는
/// 트리에 키로 나타나지 않습니다.
pub fn tokenize_dir(path: impl AsRef<Path>, opts: &TokenizeOptions) -> Result<TokenizedDir> {
    let dir = resolve_dir(path.as_ref())?;
    let handle = opts.query().resolve()?;

    let total = count_dir_files(&dir, opts.recursive)?;
    let task = progress::start_task("Tokenizing Directory", total, opts.quiet);
    let result = walk_tokenize(&dir, &handle, task.as_ref(), opts.recursive)?;
    task.finish("Done Tokenizing Directory");

    Ok(result)
}

fn walk_tokenize(
    dir: &Path,
    handle: &EncodingHandle,
    task: &dyn TaskReporter,
    recursive: bool,
) -> Result<TokenizedDir> {
    let mut result = TokenizedDir::new();
    let mut subdirs: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            subdirs.push(path);
            continue;
        }

        let name = file_name(&path);
        task.describe(&format!("Tokenizing {name}"));
        match read_text_file(&path) {
            Ok(contents) => {
                result.insert(name.clone(), TokenNode::Tokens(handle.encode(&contents)));
                task.advance(1);
                task.describe(&format!("Done Tokenizing {name}"));
            }
            Err(err) if err.is_recoverable() => {
                warn!("Skipping {}: {err}", path.display());
                task.advance(1);
                task.describe(&format!("Skipping {name}"));
            }
            Err(err) => return Err(err),
        }
    }

    if recursive {
        for subdir in subdirs {
            let nested = walk_tokenize(&subdir, handle, task, recursive)?;
            if !nested.is_empty() {
                result.insert(file_name(&subdir), TokenNode::Dir(nested));
            }
        }
    }

    Ok(result)
}

/// 디렉터리의 모든 파일 토큰 수 합계
///
/// `tokenize_dir`와 같은 순회/건너뛰기 정책으로 합계만 누적합니다.
pub fn num_tokens_dir(path: impl AsRef<Path>, opts: &TokenizeOptions) -> Result<usize> {
    let dir = resolve_dir(path.as_ref())?;
    let handle = opts.query().resolve()?;

    let total = count_dir_files(&dir, opts.recursive)?;
    let task = progress::start_task("Counting Tokens in Directory", total, opts.quiet);
    let count = walk_count(&dir, &handle, task.as_ref(), opts.recursive)?;
    task.finish("Done Counting Tokens in Directory");

    Ok(count)
}

fn walk_count(
    dir: &Path,
    handle: &EncodingHandle,
    task: &dyn TaskReporter,
    recursive: bool,
) -> Result<usize> {
    let mut running_total = 0usize;
    let mut subdirs: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            subdirs.push(path);
            continue;
        }

        let name = file_name(&path);
        task.describe(&format!("Counting Tokens in {name}"));
        match read_text_file(&path) {
            Ok(contents) => {
                running_total += handle.encode(&contents).len();
                task.advance(1);
                task.describe(&format!("Done Counting Tokens in {name}"));
            }
            Err(err) if err.is_recoverable() => {
                warn!("Skipping {}: {err}", path.display());
                task.advance(1);
                task.describe(&format!("Skipping {name}"));
            }
            Err(err) => return Err(err),
        }
    }

    if recursive {
        for subdir in subdirs {
            running_total += walk_count(&subdir, handle, task, recursive)?;
        }
    }

    Ok(running_total)
}
