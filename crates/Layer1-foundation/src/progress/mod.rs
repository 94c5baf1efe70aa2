//! Progress - 진행 상황 보고
//!
//! 순회/토큰화 작업의 진행률을 표시합니다.
//! - `TaskReporter`: 호출 경계에서 주입되는 보고 인터페이스
//! - indicatif 기반 구현 + quiet용 무동작 구현
//! - 공유 MultiProgress로 한 프로세스에 하나의 표시 영역 유지
//!
//! 바깥 호출이 작업을 하나 열고 안쪽 호출에 reporter를 넘기는 구조라
//! 중첩 호출이 중복 진행바를 만들지 않습니다.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::OnceLock;
use std::time::Duration;

/// 전역 표시 영역 (진행바 렌더링 공유)
static MULTI: OnceLock<MultiProgress> = OnceLock::new();

fn multi() -> &'static MultiProgress {
    MULTI.get_or_init(MultiProgress::new)
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg:<50} {percent:>3}% [{bar:40.cyan/blue}] {pos}/{len} • {elapsed_precise} • {eta}")
        .unwrap()
        .progress_chars("#>-")
}

/// 작업 진행 보고 인터페이스
///
/// 공개 API 진입점이 작업을 시작하고, 내부 헬퍼는 이미 열린 reporter를
/// 전달받아 사용합니다.
pub trait TaskReporter {
    /// 진행량 추가
    fn advance(&self, amount: u64);

    /// 현재 설명 갱신 (진행량 변화 없음)
    fn describe(&self, description: &str);

    /// 작업 완료 처리
    fn finish(&self, description: &str);
}

/// indicatif 진행바 기반 reporter
struct BarTask {
    bar: ProgressBar,
}

impl TaskReporter for BarTask {
    fn advance(&self, amount: u64) {
        self.bar.inc(amount);
    }

    fn describe(&self, description: &str) {
        self.bar.set_message(description.to_owned());
    }

    fn finish(&self, description: &str) {
        self.bar.finish_with_message(description.to_owned());
    }
}

impl Drop for BarTask {
    fn drop(&mut self) {
        // 완료된 바는 공유 표시 영역에서 제거
        if self.bar.is_finished() {
            multi().remove(&self.bar);
        }
    }
}

/// quiet 모드용 무동작 reporter
struct SilentTask;

impl TaskReporter for SilentTask {
    fn advance(&self, _amount: u64) {}
    fn describe(&self, _description: &str) {}
    fn finish(&self, _description: &str) {}
}

/// 새 작업 시작
///
/// `quiet`이면 아무 것도 표시하지 않는 reporter를 반환합니다.
pub fn start_task(name: &str, total: u64, quiet: bool) -> Box<dyn TaskReporter> {
    if quiet {
        return Box::new(SilentTask);
    }

    let bar = multi().add(ProgressBar::new(total));
    bar.set_style(bar_style());
    bar.set_message(name.to_owned());
    bar.enable_steady_tick(Duration::from_millis(100));
    Box::new(BarTask { bar })
}
