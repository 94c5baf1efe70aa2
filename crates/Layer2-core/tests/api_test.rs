//! 공개 API 통합 테스트 - 디렉터리/목록 순회 동작 검증
//!
//! `cargo test -p tokmeter-core --test api_test`

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{tempdir, TempDir};
use tokmeter_core::{
    get_encoding, num_tokens_dir, num_tokens_files, num_tokens_str, tokenize_dir, tokenize_files,
    tokenize_str, Error, TokenNode, TokenizeOptions, TokenizedInput,
};

fn quiet_opts() -> TokenizeOptions {
    TokenizeOptions::new().model("gpt-4o").quiet(true)
}

/// 테스트용 디렉터리 구성:
///
/// ```text
/// root/
/// ├── alpha.txt       "Hail to the Victors!"  (7 tokens)
/// ├── beta.txt        "2024 National Champions"  (4 tokens)
/// ├── binary.jpg      (디코딩 불가)
/// ├── nested/
/// │   └── gamma.txt   "Hail to the Victors!"  (7 tokens)
/// └── empty_sub/
///     └── junk.jpg    (디코딩 불가 파일만 있는 하위 디렉터리)
/// ```
fn build_tree() -> TempDir {
    let root = tempdir().expect("tempdir failed");

    fs::write(root.path().join("alpha.txt"), "Hail to the Victors!").unwrap();
    fs::write(root.path().join("beta.txt"), "2024 National Champions").unwrap();
    fs::write(root.path().join("binary.jpg"), [0xFF, 0xD8, 0xFF, 0x00, 0x10, 0x4A]).unwrap();

    let nested = root.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("gamma.txt"), "Hail to the Victors!").unwrap();

    let empty_sub = root.path().join("empty_sub");
    fs::create_dir(&empty_sub).unwrap();
    fs::write(empty_sub.join("junk.jpg"), [0x00, 0x01, 0x02, 0xFF]).unwrap();

    root
}

#[test]
fn test_known_string_tokens() {
    let tokens = tokenize_str("Hail to the Victors!", &quiet_opts()).unwrap();
    assert_eq!(tokens, vec![39, 663, 316, 290, 16566, 914, 0]);
    assert_eq!(num_tokens_str("Hail to the Victors!", &quiet_opts()).unwrap(), 7);

    let tokens = tokenize_str("2024 National Champions", &quiet_opts()).unwrap();
    assert_eq!(tokens, vec![1323, 19, 6743, 40544]);
}

#[test]
fn test_get_encoding_consistency() {
    // 모델 경유와 이름 경유가 같은 인코딩에 도달
    let by_model = get_encoding(Some("gpt-3.5-turbo"), None).unwrap();
    let by_name = get_encoding(None, Some("cl100k_base")).unwrap();
    assert_eq!(by_model.name(), by_name.name());

    // 어긋난 조합은 실패
    assert!(get_encoding(Some("gpt-3.5-turbo"), Some("p50k_base")).is_err());

    // 아무 것도 주지 않으면 실패
    assert!(matches!(get_encoding(None, None).unwrap_err(), Error::MissingEncoding));
}

#[test]
fn test_tokenize_dir_skips_binary_and_recurses() {
    let root = build_tree();
    let result = tokenize_dir(root.path(), &quiet_opts()).unwrap();

    // binary.jpg는 건너뛰고, empty_sub는 결과가 비어 생략됨
    assert_eq!(result.len(), 3, "unexpected keys: {:?}", result.keys().collect::<Vec<_>>());
    assert_eq!(
        result["alpha.txt"].tokens(),
        Some(&[39, 663, 316, 290, 16566, 914, 0][..])
    );
    assert_eq!(result["beta.txt"].tokens(), Some(&[1323, 19, 6743, 40544][..]));

    let nested = result["nested"].dir().expect("nested should be a directory node");
    assert_eq!(
        nested["gamma.txt"].tokens(),
        Some(&[39, 663, 316, 290, 16566, 914, 0][..])
    );

    assert!(!result.contains_key("binary.jpg"));
    assert!(!result.contains_key("empty_sub"));
}

#[test]
fn test_tokenize_dir_non_recursive_ignores_subdirs() {
    let root = build_tree();
    let opts = quiet_opts().recursive(false);
    let result = tokenize_dir(root.path(), &opts).unwrap();

    assert_eq!(result.len(), 2);
    assert!(result.contains_key("alpha.txt"));
    assert!(result.contains_key("beta.txt"));
    assert!(!result.contains_key("nested"));
}

#[test]
fn test_tokenize_dir_is_idempotent() {
    // 호출 간 숨은 상태가 없어야 함
    let root = build_tree();
    let first = tokenize_dir(root.path(), &quiet_opts()).unwrap();
    let second = tokenize_dir(root.path(), &quiet_opts()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_num_tokens_dir_matches_tree_sum() {
    let root = build_tree();
    let tree = tokenize_dir(root.path(), &quiet_opts()).unwrap();
    let tree_sum = TokenNode::Dir(tree).num_tokens();

    let total = num_tokens_dir(root.path(), &quiet_opts()).unwrap();
    assert_eq!(total, tree_sum);
    assert_eq!(total, 7 + 4 + 7);
}

#[test]
fn test_num_tokens_dir_non_recursive() {
    let root = build_tree();
    let opts = quiet_opts().recursive(false);
    assert_eq!(num_tokens_dir(root.path(), &opts).unwrap(), 7 + 4);
}

#[test]
fn test_tokenize_dir_rejects_file_path() {
    let root = build_tree();
    let err = tokenize_dir(root.path().join("alpha.txt"), &quiet_opts()).unwrap_err();
    assert!(matches!(err, Error::NotADirectory(_)));
}

#[test]
fn test_tokenize_files_dispatches_on_input() {
    let root = build_tree();

    // 단일 파일 → 토큰 열
    let single = tokenize_files(root.path().join("alpha.txt"), &quiet_opts()).unwrap();
    assert!(matches!(single, TokenizedInput::Tokens(_)));

    // 디렉터리 → 중첩 매핑
    let mapped = tokenize_files(root.path().to_path_buf(), &quiet_opts()).unwrap();
    let map = mapped.map().expect("directory input should yield a map");
    assert!(map.contains_key("alpha.txt"));

    // 목록 → 이름 기준 매핑
    let list: Vec<PathBuf> = vec![
        root.path().join("alpha.txt"),
        root.path().join("beta.txt"),
    ];
    let listed = tokenize_files(list, &quiet_opts()).unwrap();
    let map = listed.map().expect("list input should yield a map");
    assert_eq!(map.len(), 2);
    assert_eq!(map["beta.txt"].tokens(), Some(&[1323, 19, 6743, 40544][..]));
}

#[test]
fn test_list_exit_on_error_true_propagates() {
    let root = build_tree();
    let list: Vec<PathBuf> = vec![
        root.path().join("alpha.txt"),
        root.path().join("binary.jpg"),
        root.path().join("beta.txt"),
    ];

    let err = tokenize_files(list, &quiet_opts()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedEncoding { .. }));
}

#[test]
fn test_list_exit_on_error_false_skips() {
    let root = build_tree();
    let list: Vec<PathBuf> = vec![
        root.path().join("alpha.txt"),
        root.path().join("binary.jpg"),
        root.path().join("beta.txt"),
    ];

    let opts = quiet_opts().exit_on_list_error(false);
    let result = tokenize_files(list.clone(), &opts).unwrap();
    let map = result.map().expect("list input should yield a map");
    assert_eq!(map.len(), 2);
    assert!(!map.contains_key("binary.jpg"));

    let total = num_tokens_files(list, &opts).unwrap();
    assert_eq!(total, 7 + 4);
}

#[test]
fn test_list_rejects_directories_and_missing_files() {
    let root = build_tree();
    let list: Vec<PathBuf> = vec![
        root.path().join("alpha.txt"),
        root.path().join("nested"),
        root.path().join("no_such.txt"),
    ];

    let err = num_tokens_files(list, &quiet_opts()).unwrap_err();
    let Error::NotAFile(offenders) = err else {
        panic!("expected NotAFile");
    };
    // 목록 검증은 위반 항목을 전부 모아서 보고
    assert_eq!(offenders.len(), 2);
}

#[test]
fn test_round_trip_all_models() {
    for model in tokmeter_core::valid_models() {
        let opts = TokenizeOptions::new().model(*model).quiet(true);
        let tokens = tokenize_str("Sample text for tokenization.", &opts).unwrap();
        let count = num_tokens_str("Sample text for tokenization.", &opts).unwrap();
        assert_eq!(tokens.len(), count, "mismatch for model {model}");
    }
}

#[test]
fn test_empty_directory_yields_empty_map() {
    let root = tempdir().unwrap();
    let result = tokenize_dir(root.path(), &quiet_opts()).unwrap();
    assert!(result.is_empty());
    assert_eq!(num_tokens_dir(root.path(), &quiet_opts()).unwrap(), 0);
}

#[test]
fn test_unsupported_only_directory_yields_empty_map() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("junk.bin"), [0x00, 0xFF, 0x00, 0x10]).unwrap();

    let result = tokenize_dir(root.path(), &quiet_opts()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_serialized_tree_shape() {
    let root = build_tree();
    let tree = tokenize_dir(root.path(), &quiet_opts()).unwrap();
    let json = tokmeter_core::to_json(&tree).unwrap();

    // 파일은 배열, 하위 디렉터리는 객체로 직렬화
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed["alpha.txt"].is_array());
    assert!(parsed["nested"].is_object());
    assert!(parsed["nested"]["gamma.txt"].is_array());
}

#[test]
fn test_progress_enabled_path_still_works() {
    // quiet=false 경로도 동일한 결과를 내야 함 (터미널 없이도 동작)
    let root = build_tree();
    let opts = TokenizeOptions::new().model("gpt-4o");
    let loud = tokenize_dir(root.path(), &opts).unwrap();
    let silent = tokenize_dir(root.path(), &quiet_opts()).unwrap();
    assert_eq!(loud, silent);
}

#[test]
fn test_handle_reuse_across_calls() {
    // 미리 얻은 핸들을 옵션으로 넘겨도 같은 결과
    let handle = get_encoding(Some("gpt-4o"), None).unwrap();
    let opts = TokenizeOptions::new().encoding(handle).quiet(true);
    let tokens = tokenize_str("Hail to the Victors!", &opts).unwrap();
    assert_eq!(tokens, vec![39, 663, 316, 290, 16566, 914, 0]);
}

#[test]
fn test_relative_path_input() {
    // 상대 경로도 절대 경로로 해석되어 처리됨
    let root = build_tree();
    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(root.path()).unwrap();
    let result = tokenize_dir(Path::new("."), &quiet_opts());
    std::env::set_current_dir(original).unwrap();

    let result = result.unwrap();
    assert!(result.contains_key("alpha.txt"));
}
