//! # Clock 模块
//!
//! 时间源抽象。动画只在需要"当前时间"时读取时钟，
//! 测试与预览工具可以用 [`ManualClock`] 手动推进时间，无需真实等待。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 时间源
pub trait Clock {
    /// 当前时间
    fn now(&self) -> Instant;
}

/// 系统单调时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// 偏移量上限：100 年（毫秒）
pub const MAX_OFFSET_MS: u64 = 100 * 365 * 24 * 60 * 60 * 1000;

/// 手动推进的时钟
///
/// 克隆出的句柄共享同一个偏移量：把一个句柄交给动画，
/// 保留另一个句柄用于推进时间。
///
/// 偏移量饱和在 [`MAX_OFFSET_MS`]，`now()` 不会溢出 `Instant`。
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// 创建时钟，当前时间为创建时刻
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 向前推进 `ms` 毫秒
    pub fn advance(&self, ms: u64) {
        // 闭包总是返回 Some，fetch_update 不会失败
        let _ = self
            .offset_ms
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| {
                Some(cur.saturating_add(ms).min(MAX_OFFSET_MS))
            });
    }

    /// 设置为创建时刻之后的第 `ms` 毫秒
    pub fn set(&self, ms: u64) {
        self.offset_ms.store(ms.min(MAX_OFFSET_MS), Ordering::Relaxed);
    }

    /// 自创建以来经过的毫秒数
    pub fn elapsed_ms(&self) -> u64 {
        self.offset_ms.load(Ordering::Relaxed)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_millis(self.elapsed_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_offset() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let t0 = clock.now();

        handle.advance(250);
        assert_eq!(clock.now() - t0, Duration::from_millis(250));

        handle.advance(250);
        assert_eq!(clock.elapsed_ms(), 500);

        clock.set(100);
        assert_eq!(handle.now() - t0, Duration::from_millis(100));
    }

    #[test]
    fn test_manual_clock_saturates() {
        let clock = ManualClock::new();
        let t0 = clock.now();

        clock.set(u64::MAX);
        assert_eq!(clock.elapsed_ms(), MAX_OFFSET_MS);
        assert_eq!(clock.now() - t0, Duration::from_millis(MAX_OFFSET_MS));

        clock.set(10);
        clock.advance(u64::MAX);
        assert_eq!(clock.elapsed_ms(), MAX_OFFSET_MS);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
