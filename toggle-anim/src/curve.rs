//! # Curve 模块
//!
//! 速度曲线，把线性时间进度映射为缓动后的进度。

use serde::{Deserialize, Serialize};

/// 速度曲线
///
/// 输入与输出都在 0.0 - 1.0 之间，且两端固定为 0 和 1。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedCurve {
    /// 线性（匀速）
    #[default]
    Linear,
    /// 缓入（起点斜率为 0，逐渐加速）
    EaseIn,
    /// 缓出（起点全速，逐渐减速）
    EaseOut,
    /// 缓入缓出（两端斜率为 0 的 S 形曲线）
    EaseInOut,
}

impl SpeedCurve {
    /// 全部曲线，按声明顺序
    pub const ALL: [SpeedCurve; 4] = [
        SpeedCurve::Linear,
        SpeedCurve::EaseIn,
        SpeedCurve::EaseOut,
        SpeedCurve::EaseInOut,
    ];

    /// 曲线名称（与序列化名称一致）
    pub fn name(&self) -> &'static str {
        match self {
            SpeedCurve::Linear => "linear",
            SpeedCurve::EaseIn => "ease_in",
            SpeedCurve::EaseOut => "ease_out",
            SpeedCurve::EaseInOut => "ease_in_out",
        }
    }

    /// 计算缓动值
    ///
    /// # 参数
    /// - `linear`: 线性时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, linear: f64) -> f32 {
        let t = linear.clamp(0.0, 1.0);

        let eased = match self {
            SpeedCurve::Linear => t,
            SpeedCurve::EaseIn => 1.0 + (-90.0 + t * 90.0_f64).to_radians().sin(),
            SpeedCurve::EaseOut => (t * 90.0_f64).to_radians().sin(),
            SpeedCurve::EaseInOut => (1.0 + (-90.0 + t * 180.0_f64).to_radians().sin()) * 0.5,
        };
        eased as f32
    }

    /// 生成所有曲线的采样表，`steps` 为区间划分数
    pub fn sample_table(steps: usize) -> String {
        let steps = steps.max(1);
        let mut rows = vec!["t    | linear | ease_in | ease_out | ease_in_out".to_string()];

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let [linear, ease_in, ease_out, ease_in_out] = Self::ALL.map(|c| c.apply(t));
            rows.push(format!(
                "{t:.2} | {linear:>6.4} | {ease_in:>7.4} | {ease_out:>8.4} | {ease_in_out:>11.4}"
            ));
        }

        rows.join("\n")
    }
}

impl std::fmt::Display for SpeedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
