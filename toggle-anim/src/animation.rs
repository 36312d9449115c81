//! # Animation 模块
//!
//! 可双向切换的数值动画。
//!
//! 调用方每帧传入起止值、时长、触发开关和速度曲线，得到当前的动画值：
//! - 触发开关为 `true` 时从起始值向结束值推进（forth）
//! - 为 `false` 时回落到起始值（back）
//! - 开关翻转时重新计时，并从上一方向最后计算出的值继续，
//!   中途反向不会产生跳变
//!
//! 开关是边沿触发的：开关不变时重复调用不会重新计时，
//! 即使传入了不同的时长，新时长也要到下一次翻转才生效。

use std::marker::PhantomData;

use tracing::debug;

use crate::animator::Animator;
use crate::clock::{Clock, SystemClock};
use crate::curve::SpeedCurve;
use crate::error::{AnimResult, ArgumentError, check_duration};
use crate::number::{AnimNumber, NumericValue};

/// 双向进度累积
///
/// 两个字段都是相对起始值的偏移量。每次计算恰好读取其中一个、写入另一个：
/// - forth 方向读 `forth`，写 `back`
/// - back 方向读 `back`，写 `forth`
///
/// 反向时新方向从另一方向最后写入的偏移量继续。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulators {
    /// 推进方向的基准偏移
    pub forth: f64,
    /// 回落方向的基准偏移
    pub back: f64,
}

impl Accumulators {
    /// 计算当前偏移，并写入另一方向的累积值
    fn advance(&mut self, span: f64, progress: f64, triggered: bool) -> f64 {
        if triggered {
            let offset = self.forth + (span - self.forth) * progress;
            self.back = offset;
            offset
        } else {
            let offset = self.back - self.back * progress;
            self.forth = offset;
            offset
        }
    }
}

/// 与数值类型无关的状态机
#[derive(Debug, Clone)]
struct ToggleState<C: Clock> {
    animator: Animator<C>,
    is_turned: bool,
    accumulators: Accumulators,
}

impl<C: Clock> ToggleState<C> {
    fn new(clock: C) -> Self {
        Self {
            animator: Animator::with_clock(clock),
            is_turned: false,
            accumulators: Accumulators::default(),
        }
    }

    /// 开关翻转时重新计时
    fn toggle(&mut self, triggered: bool, duration_ms: i64) -> AnimResult<()> {
        if triggered != self.is_turned {
            self.animator.start(duration_ms)?;
            self.is_turned = triggered;
            debug!(triggered, duration_ms, "animation toggled");
        }
        Ok(())
    }

    fn step(
        &mut self,
        start: f64,
        end: f64,
        duration_ms: i64,
        triggered: bool,
        curve: SpeedCurve,
    ) -> AnimResult<f64> {
        check_duration(duration_ms)?;
        self.toggle(triggered, duration_ms)?;

        let progress = self.animator.progress(curve) as f64;
        let offset = self
            .accumulators
            .advance(end - start, progress, triggered);
        Ok(start + offset)
    }
}

/// 可双向切换的数值动画
///
/// `T` 为输出数值类型，见 [`AnimNumber`]。
///
/// # 示例
///
/// ```ignore
/// let mut width = ToggleAnimation::<i32>::new();
///
/// // 每帧调用
/// let w = width.value(0, 100, 250, hovered, SpeedCurve::EaseOut)?;
/// ```
#[derive(Debug, Clone)]
pub struct ToggleAnimation<T: AnimNumber, C: Clock = SystemClock> {
    state: ToggleState<C>,
    _number: PhantomData<fn() -> T>,
}

impl<T: AnimNumber> ToggleAnimation<T, SystemClock> {
    /// 使用系统时钟创建
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T: AnimNumber> Default for ToggleAnimation<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: AnimNumber, C: Clock> ToggleAnimation<T, C> {
    /// 使用指定时钟创建
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: ToggleState::new(clock),
            _number: PhantomData,
        }
    }

    /// 切换动画并返回当前值
    ///
    /// # 参数
    /// - `start`: 起始值
    /// - `end`: 结束值
    /// - `duration_ms`: 时长（毫秒），为负时返回错误且不修改状态
    /// - `triggered`: 是否触发（`true` 推进到 `end`，`false` 回落到 `start`）
    /// - `curve`: 速度曲线
    pub fn value(
        &mut self,
        start: T,
        end: T,
        duration_ms: i64,
        triggered: bool,
        curve: SpeedCurve,
    ) -> AnimResult<T> {
        let value = self.state.step(
            start.to_f64(),
            end.to_f64(),
            duration_ms,
            triggered,
            curve,
        )?;
        Ok(T::from_f64(value))
    }

    /// 触发状态下的线性动画
    pub fn value_forth(&mut self, start: T, end: T, duration_ms: i64) -> AnimResult<T> {
        self.value(start, end, duration_ms, true, SpeedCurve::Linear)
    }

    /// 最近一次看到的触发状态
    pub fn is_turned(&self) -> bool {
        self.state.is_turned
    }

    /// 当前方向的运行是否已结束
    pub fn is_done(&self) -> bool {
        self.state.animator.is_done()
    }

    /// 当前的双向累积值
    pub fn accumulators(&self) -> Accumulators {
        self.state.accumulators
    }

    /// 内部计时引擎
    pub fn animator(&self) -> &Animator<C> {
        &self.state.animator
    }
}

/// 动态数值类型的双向动画
///
/// 输出类型跟随 `start` 的类型标签，`end` 按 f64 参与计算。
#[derive(Debug, Clone)]
pub struct DynAnimation<C: Clock = SystemClock> {
    state: ToggleState<C>,
}

impl DynAnimation<SystemClock> {
    /// 使用系统时钟创建
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DynAnimation<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DynAnimation<C> {
    /// 使用指定时钟创建
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: ToggleState::new(clock),
        }
    }

    /// 切换动画并返回当前值，语义同 [`ToggleAnimation::value`]
    ///
    /// 输出为整数类型时，`end` 必须是有限数（NaN 与无穷都无法取整），
    /// 否则在修改状态之前返回 `InvalidArgument`。
    pub fn value(
        &mut self,
        start: NumericValue,
        end: NumericValue,
        duration_ms: i64,
        triggered: bool,
        curve: SpeedCurve,
    ) -> AnimResult<NumericValue> {
        let kind = start.kind();
        let end_f64 = end.to_f64();
        if kind.is_integer() && !end_f64.is_finite() {
            return Err(ArgumentError::NonFiniteEnd {
                kind: kind.name().to_string(),
                value: end_f64,
            }
            .into());
        }

        let value = self.state.step(
            start.to_f64(),
            end_f64,
            duration_ms,
            triggered,
            curve,
        )?;
        Ok(kind.from_f64(value))
    }

    /// 最近一次看到的触发状态
    pub fn is_turned(&self) -> bool {
        self.state.is_turned
    }

    /// 当前方向的运行是否已结束
    pub fn is_done(&self) -> bool {
        self.state.animator.is_done()
    }

    /// 当前的双向累积值
    pub fn accumulators(&self) -> Accumulators {
        self.state.accumulators
    }
}
