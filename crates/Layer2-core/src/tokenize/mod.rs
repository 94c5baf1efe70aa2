//! Tokenize - 문자열/파일 토큰화
//!
//! 해석된 인코딩으로 텍스트를 토큰 ID 열로 변환합니다.
//! 파일 경로를 받는 연산은 읽기/디코딩 실패를 해석 실패와 구분해 보고합니다.

use std::path::Path;

use tokmeter_foundation::{file_name, progress, progress::TaskReporter, read_text_file, Result};

use crate::options::TokenizeOptions;

/// 진행 표시용 문자열 축약
///
/// `max`자를 넘으면 앞 `keep`자만 남기고 "..."를 붙입니다.
fn display_excerpt(text: &str, max: usize, keep: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(keep).collect();
        format!("{head}...")
    } else {
        text.to_owned()
    }
}

/// 문자열을 토큰 ID 열로 변환
pub fn tokenize_str(text: &str, opts: &TokenizeOptions) -> Result<Vec<u32>> {
    let handle = opts.query().resolve()?;

    let display = display_excerpt(text, 33, 30);
    let task = progress::start_task(&format!("Tokenizing \"{display}\""), 1, opts.quiet);
    let tokens = handle.encode(text);
    task.finish(&format!("Done Tokenizing \"{display}\""));

    Ok(tokens)
}

/// 문자열의 토큰 수 계산
pub fn num_tokens_str(text: &str, opts: &TokenizeOptions) -> Result<usize> {
    let handle = opts.query().resolve()?;

    let display = display_excerpt(text, 25, 22);
    let task = progress::start_task(&format!("Counting Tokens in \"{display}\""), 1, opts.quiet);
    let count = handle.encode(text).len();
    task.finish(&format!("Done Counting Tokens in \"{display}\""));

    Ok(count)
}

/// 파일 내용을 토큰 ID 열로 변환
///
/// 파일이 없으면 `FileNotFound`, 텍스트로 디코딩할 수 없으면
/// `UnsupportedEncoding`으로 실패합니다.
pub fn tokenize_file(path: impl AsRef<Path>, opts: &TokenizeOptions) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let contents = read_text_file(path)?;
    let handle = opts.query().resolve()?;

    let name = file_name(path);
    let task = progress::start_task(&format!("Tokenizing {name}"), 1, opts.quiet);
    let tokens = handle.encode(&contents);
    task.finish(&format!("Done Tokenizing {name}"));

    Ok(tokens)
}

/// 파일의 토큰 수 계산
pub fn num_tokens_file(path: impl AsRef<Path>, opts: &TokenizeOptions) -> Result<usize> {
    let path = path.as_ref();
    let contents = read_text_file(path)?;
    let handle = opts.query().resolve()?;

    let name = file_name(path);
    let task = progress::start_task(&format!("Counting Tokens in {name}"), 1, opts.quiet);
    let count = handle.encode(&contents).len();
    task.finish(&format!("Done Counting Tokens in {name}"));

    Ok(count)
}
