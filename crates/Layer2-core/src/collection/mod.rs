//! Collection - 파일/디렉터리/목록 통합 처리
//!
//! 단일 파일, 디렉터리, 명시적 파일 목록을 하나의 진입점으로 받아
//! 알맞은 토큰화 경로로 분배합니다.
//! - 목록은 모든 항목이 기존 파일인지 먼저 검증 (위반 항목 전체 보고)
//! - `exit_on_list_error`로 목록 실패 시 중단/건너뛰기 선택

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokmeter_foundation::{
    file_name, progress, progress::TaskReporter, read_text_file, Error, Result,
};
use tracing::warn;

use crate::options::TokenizeOptions;
use crate::tokenize::{num_tokens_file, tokenize_file};
use crate::walk::{num_tokens_dir, tokenize_dir, TokenNode, TokenizedDir};

/// 통합 토큰화 입력
#[derive(Debug, Clone)]
pub enum FileInput {
    /// 단일 경로 (파일 또는 디렉터리)
    Path(PathBuf),
    /// 명시적 파일 목록
    List(Vec<PathBuf>),
}

impl From<&str> for FileInput {
    fn from(path: &str) -> Self {
        FileInput::Path(PathBuf::from(path))
    }
}

impl From<String> for FileInput {
    fn from(path: String) -> Self {
        FileInput::Path(PathBuf::from(path))
    }
}

impl From<&Path> for FileInput {
    fn from(path: &Path) -> Self {
        FileInput::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for FileInput {
    fn from(path: PathBuf) -> Self {
        FileInput::Path(path)
    }
}

impl From<Vec<PathBuf>> for FileInput {
    fn from(paths: Vec<PathBuf>) -> Self {
        FileInput::List(paths)
    }
}

impl From<Vec<&str>> for FileInput {
    fn from(paths: Vec<&str>) -> Self {
        FileInput::List(paths.into_iter().map(PathBuf::from).collect())
    }
}

impl From<&[PathBuf]> for FileInput {
    fn from(paths: &[PathBuf]) -> Self {
        FileInput::List(paths.to_vec())
    }
}

/// 통합 토큰화 결과
///
/// 단일 파일이면 토큰 열, 디렉터리/목록이면 이름 기준 매핑입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenizedInput {
    /// 단일 파일의 토큰 열
    Tokens(Vec<u32>),
    /// 디렉터리 트리 또는 파일 목록 매핑
    Map(TokenizedDir),
}

impl TokenizedInput {
    /// 단일 파일 결과
    pub fn tokens(&self) -> Option<&[u32]> {
        match self {
            TokenizedInput::Tokens(tokens) => Some(tokens),
            TokenizedInput::Map(_) => None,
        }
    }

    /// 매핑 결과
    pub fn map(&self) -> Option<&TokenizedDir> {
        match self {
            TokenizedInput::Tokens(_) => None,
            TokenizedInput::Map(map) => Some(map),
        }
    }
}

/// 목록 항목이 모두 기존 파일인지 검증
///
/// 위반 항목을 하나만 보고하지 않고 전부 모아 한 번에 실패합니다.
fn validate_list(paths: &[PathBuf]) -> Result<()> {
    let non_files: Vec<PathBuf> = paths.iter().filter(|p| !p.is_file()).cloned().collect();
    if non_files.is_empty() {
        Ok(())
    } else {
        Err(Error::NotAFile(non_files))
    }
}

/// 파일, 디렉터리, 또는 파일 목록을 토큰화
pub fn tokenize_files(
    input: impl Into<FileInput>,
    opts: &TokenizeOptions,
) -> Result<TokenizedInput> {
    match input.into() {
        FileInput::List(paths) => tokenize_list(&paths, opts).map(TokenizedInput::Map),
        FileInput::Path(path) => {
            if path.is_file() {
                tokenize_file(&path, opts).map(TokenizedInput::Tokens)
            } else if path.is_dir() {
                tokenize_dir(&path, opts).map(TokenizedInput::Map)
            } else {
                Err(unexpected_input(&path))
            }
        }
    }
}

fn tokenize_list(paths: &[PathBuf], opts: &TokenizeOptions) -> Result<TokenizedDir> {
    validate_list(paths)?;
    let handle = opts.query().resolve()?;

    let task = progress::start_task("Tokenizing File List", paths.len() as u64, opts.quiet);
    let mut result = TokenizedDir::new();

    for path in paths {
        let name = file_name(path);
        task.describe(&format!("Tokenizing {name}"));
        match read_text_file(path) {
            Ok(contents) => {
                result.insert(name.clone(), TokenNode::Tokens(handle.encode(&contents)));
                task.advance(1);
                task.describe(&format!("Done Tokenizing {name}"));
            }
            Err(err) if !opts.exit_on_list_error && err.is_recoverable() => {
                warn!("Skipping {}: {err}", path.display());
                task.advance(1);
                task.describe(&format!("Skipping {name}"));
            }
            Err(err) => return Err(err),
        }
    }
    task.finish("Done Tokenizing File List");

    Ok(result)
}

/// 파일, 디렉터리, 또는 파일 목록의 토큰 수 합계
pub fn num_tokens_files(input: impl Into<FileInput>, opts: &TokenizeOptions) -> Result<usize> {
    match input.into() {
        FileInput::List(paths) => count_list(&paths, opts),
        FileInput::Path(path) => {
            if path.is_file() {
                num_tokens_file(&path, opts)
            } else if path.is_dir() {
                num_tokens_dir(&path, opts)
            } else {
                Err(unexpected_input(&path))
            }
        }
    }
}

fn count_list(paths: &[PathBuf], opts: &TokenizeOptions) -> Result<usize> {
    validate_list(paths)?;
    let handle = opts.query().resolve()?;

    let task = progress::start_task(
        "Counting Tokens in File List",
        paths.len() as u64,
        opts.quiet,
    );
    let mut running_total = 0usize;

    for path in paths {
        let name = file_name(path);
        task.describe(&format!("Counting Tokens in {name}"));
        match read_text_file(path) {
            Ok(contents) => {
                running_total += handle.encode(&contents).len();
                task.advance(1);
                task.describe(&format!("Done Counting Tokens in {name}"));
            }
            Err(err) if !opts.exit_on_list_error && err.is_recoverable() => {
                warn!("Skipping {}: {err}", path.display());
                task.advance(1);
                task.describe(&format!("Skipping {name}"));
            }
            Err(err) => return Err(err),
        }
    }
    task.finish("Done Counting Tokens in File List");

    Ok(running_total)
}

/// 호출 계약 위반 (파일/디렉터리/목록 어느 것도 아님)
fn unexpected_input(path: &Path) -> Error {
    Error::Internal(format!(
        "Given input path \"{}\" is neither a file, a directory, nor a list.",
        path.display()
    ))
}
