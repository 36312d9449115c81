//! # Animator 模块
//!
//! 计时与曲线引擎：记录一次运行的起始时刻与时长，
//! 计算线性时间进度并通过 [`SpeedCurve`] 缓动。
//!
//! 一次 `start()` 开始一轮新的运行，立即取代正在进行的运行（不排队）。

use std::time::{Duration, Instant};

use tracing::trace;

use crate::clock::{Clock, SystemClock};
use crate::curve::SpeedCurve;
use crate::error::{AnimResult, check_duration};

/// 计时与曲线引擎
#[derive(Debug, Clone)]
pub struct Animator<C: Clock = SystemClock> {
    clock: C,
    /// 本轮运行的起始时刻（`None` 表示尚未开始）
    started_at: Option<Instant>,
    /// 本轮运行的时长
    duration: Duration,
}

impl Animator<SystemClock> {
    /// 使用系统时钟创建
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Animator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Animator<C> {
    /// 使用指定时钟创建
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            started_at: None,
            duration: Duration::ZERO,
        }
    }

    /// 以 `duration_ms` 毫秒开始一轮新的运行
    ///
    /// 时长为负时返回错误，且不修改任何状态。
    pub fn start(&mut self, duration_ms: i64) -> AnimResult<()> {
        check_duration(duration_ms)?;

        self.started_at = Some(self.clock.now());
        self.duration = Duration::from_millis(duration_ms.unsigned_abs());
        trace!(duration_ms, "animator started");
        Ok(())
    }

    /// 是否已经开始过
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// 本轮运行的时长（毫秒）
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    /// 本轮运行已经过的整毫秒数
    fn elapsed_ms(&self, started_at: Instant) -> u128 {
        self.clock
            .now()
            .saturating_duration_since(started_at)
            .as_millis()
    }

    /// 本轮运行是否已结束
    ///
    /// 未开始的引擎视为已结束；时长为 0 时立即结束。
    pub fn is_done(&self) -> bool {
        match self.started_at {
            Some(started_at) => self.elapsed_ms(started_at) >= self.duration.as_millis(),
            None => true,
        }
    }

    /// 线性进度（0.0 - 1.0，结束后固定为 1.0）
    pub fn linear_progress(&self) -> f64 {
        match self.started_at {
            Some(started_at) if !self.is_done() => {
                self.elapsed_ms(started_at) as f64 / self.duration.as_millis() as f64
            }
            _ => 1.0,
        }
    }

    /// 缓动后的进度（0.0 - 1.0）
    ///
    /// 结束后精确返回 1.0，避免曲线或轮询间隔造成的越界。
    pub fn progress(&self, curve: SpeedCurve) -> f32 {
        if self.is_done() {
            return 1.0;
        }
        curve.apply(self.linear_progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn create_test_animator() -> (Animator<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Animator::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_not_started() {
        let (animator, _clock) = create_test_animator();
        assert!(!animator.is_started());
        assert!(animator.is_done());
        assert_eq!(animator.progress(SpeedCurve::EaseIn), 1.0);
    }

    #[test]
    fn test_linear_run() {
        let (mut animator, clock) = create_test_animator();
        animator.start(1000).unwrap();
        assert!(animator.is_started());
        assert!(!animator.is_done());
        assert_eq!(animator.progress(SpeedCurve::Linear), 0.0);

        clock.advance(250);
        assert_eq!(animator.progress(SpeedCurve::Linear), 0.25);

        clock.advance(749);
        assert!(!animator.is_done());

        clock.advance(1);
        assert!(animator.is_done());
        assert_eq!(animator.progress(SpeedCurve::Linear), 1.0);
    }

    #[test]
    fn test_clamped_after_done() {
        for curve in SpeedCurve::ALL {
            let (mut animator, clock) = create_test_animator();
            animator.start(300).unwrap();
            clock.advance(5000);
            assert_eq!(animator.progress(curve), 1.0);
            assert_eq!(animator.linear_progress(), 1.0);
        }
    }

    #[test]
    fn test_zero_duration() {
        let (mut animator, _clock) = create_test_animator();
        animator.start(0).unwrap();
        assert!(animator.is_done());
        assert_eq!(animator.progress(SpeedCurve::EaseOut), 1.0);
    }

    #[test]
    fn test_restart_supersedes() {
        let (mut animator, clock) = create_test_animator();
        animator.start(1000).unwrap();
        clock.advance(800);

        animator.start(400).unwrap();
        assert_eq!(animator.duration_ms(), 400);
        assert_eq!(animator.progress(SpeedCurve::Linear), 0.0);

        clock.advance(200);
        assert_eq!(animator.progress(SpeedCurve::Linear), 0.5);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let (mut animator, clock) = create_test_animator();
        animator.start(1000).unwrap();
        clock.advance(500);

        let err = animator.start(-1).unwrap_err();
        assert!(err.is_invalid_argument());

        // 状态未被修改
        assert_eq!(animator.duration_ms(), 1000);
        assert_eq!(animator.progress(SpeedCurve::Linear), 0.5);
    }

    #[test]
    fn test_progress_monotonic() {
        for curve in SpeedCurve::ALL {
            let (mut animator, clock) = create_test_animator();
            animator.start(1000).unwrap();
            let mut prev = animator.progress(curve);
            for _ in 0..60 {
                clock.advance(17);
                let p = animator.progress(curve);
                assert!(p >= prev, "{curve} went backwards");
                prev = p;
            }
        }
    }
}
