//! # Toggle Anim
//!
//! 可随时反向切换的数值动画库。
//!
//! ## 架构概述
//!
//! `toggle-anim` 是纯逻辑库，不依赖渲染、调度或持久化。
//! 宿主每帧轮询一次，传入全部参数，库返回当前动画值：
//!
//! ```text
//! Host                                   toggle-anim
//!   │                                        │
//!   │── (start, end, duration, triggered) ──►│ value()
//!   │                                        │  ├─ 开关翻转？重新计时
//!   │                                        │  ├─ 计算缓动进度
//!   │◄──────────── 当前值 (T) ───────────────│  └─ 更新另一方向的累积值
//!   │                                        │
//! ```
//!
//! ## 核心类型
//!
//! - [`Animator`]：计时与曲线引擎
//! - [`ToggleAnimation`]：双向数值动画（静态数值类型）
//! - [`DynAnimation`]：双向数值动画（动态数值类型）
//! - [`SpeedCurve`]：速度曲线
//! - [`Clock`]：时间源抽象
//!
//! ## 使用示例
//!
//! ```ignore
//! use toggle_anim::{SpeedCurve, ToggleAnimation};
//!
//! let mut offset = ToggleAnimation::<f32>::new();
//!
//! // 主循环
//! loop {
//!     let x = offset.value(0.0, 240.0, 300, menu_open, SpeedCurve::EaseInOut)?;
//!     draw_menu_at(x);
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`animator`]：计时与曲线引擎
//! - [`animation`]：双向动画状态机
//! - [`curve`]：速度曲线
//! - [`number`]：支持的数值类型
//! - [`clock`]：时间源
//! - [`preset`]：JSON 动画预设
//! - [`error`]：错误类型定义

pub mod animation;
pub mod animator;
pub mod clock;
pub mod curve;
pub mod error;
pub mod number;
pub mod preset;

// 重导出核心类型
pub use animation::{Accumulators, DynAnimation, ToggleAnimation};
pub use animator::Animator;
pub use clock::{Clock, ManualClock, SystemClock};
pub use curve::SpeedCurve;
pub use error::{AnimError, AnimResult, ArgumentError};
pub use number::{AnimNumber, NumberKind, NumericValue};
pub use preset::{AnimationPreset, PresetFile};
