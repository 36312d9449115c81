//! # Preset 模块
//!
//! 动画预设：用 JSON 描述一个动画的起止值、时长、曲线和数值类型。
//!
//! ```json
//! {
//!   "presets": [
//!     { "name": "button_width", "kind": "i32", "start": 80, "end": 120,
//!       "duration_ms": 200, "curve": "ease_out" }
//!   ]
//! }
//! ```
//!
//! 未填写的字段使用默认值：`kind = "f64"`，`duration_ms = 300`，`curve = "linear"`。

use serde::{Deserialize, Serialize};

use crate::animation::DynAnimation;
use crate::clock::Clock;
use crate::curve::SpeedCurve;
use crate::error::{AnimResult, check_duration};
use crate::number::{NumberKind, NumericValue};

/// 单个动画预设
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationPreset {
    /// 预设名称
    pub name: String,

    /// 输出数值类型名（i8/i16/i32/i64/f32/f64）
    #[serde(default = "default_kind")]
    pub kind: String,

    /// 起始值
    pub start: f64,

    /// 结束值
    pub end: f64,

    /// 时长（毫秒）
    #[serde(default = "default_duration_ms")]
    pub duration_ms: i64,

    /// 速度曲线
    #[serde(default)]
    pub curve: SpeedCurve,
}

impl AnimationPreset {
    /// 解析输出数值类型
    pub fn number_kind(&self) -> AnimResult<NumberKind> {
        self.kind.parse()
    }

    /// 校验预设
    ///
    /// 时长为负或数值类型不受支持时返回 `InvalidArgument`。
    pub fn validate(&self) -> AnimResult<()> {
        check_duration(self.duration_ms)?;
        self.number_kind()?;
        Ok(())
    }

    /// 起始值（按预设类型转换）
    pub fn start_value(&self) -> AnimResult<NumericValue> {
        Ok(self.number_kind()?.from_f64(self.start))
    }

    /// 结束值（按预设类型转换）
    pub fn end_value(&self) -> AnimResult<NumericValue> {
        Ok(self.number_kind()?.from_f64(self.end))
    }

    /// 用该预设驱动一次动画取值
    pub fn sample<C: Clock>(
        &self,
        animation: &mut DynAnimation<C>,
        triggered: bool,
    ) -> AnimResult<NumericValue> {
        let start = self.start_value()?;
        let end = self.end_value()?;
        animation.value(start, end, self.duration_ms, triggered, self.curve)
    }
}

/// 预设文件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetFile {
    /// 预设列表
    #[serde(default)]
    pub presets: Vec<AnimationPreset>,
}

impl PresetFile {
    /// 从 JSON 文本解析并校验
    pub fn from_json(text: &str) -> AnimResult<Self> {
        let file: PresetFile = serde_json::from_str(text)?;
        for preset in &file.presets {
            preset.validate()?;
        }
        Ok(file)
    }

    /// 按名称查找预设
    pub fn get(&self, name: &str) -> Option<&AnimationPreset> {
        self.presets.iter().find(|p| p.name == name)
    }
}

// 默认值函数
fn default_kind() -> String {
    "f64".to_string()
}

fn default_duration_ms() -> i64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::{AnimError, ArgumentError};

    #[test]
    fn test_defaults() {
        let file = PresetFile::from_json(
            r#"{ "presets": [ { "name": "fade", "start": 0, "end": 1 } ] }"#,
        )
        .unwrap();

        let preset = file.get("fade").unwrap();
        assert_eq!(preset.kind, "f64");
        assert_eq!(preset.duration_ms, 300);
        assert_eq!(preset.curve, SpeedCurve::Linear);
        assert_eq!(preset.number_kind().unwrap(), NumberKind::F64);
        assert!(file.get("missing").is_none());
    }

    #[test]
    fn test_full_preset() {
        let file = PresetFile::from_json(
            r#"{
                "presets": [
                    { "name": "width", "kind": "i32", "start": 80, "end": 120,
                      "duration_ms": 200, "curve": "ease_out" }
                ]
            }"#,
        )
        .unwrap();

        let preset = &file.presets[0];
        assert_eq!(preset.curve, SpeedCurve::EaseOut);
        assert_eq!(preset.start_value().unwrap(), NumericValue::I32(80));
        assert_eq!(preset.end_value().unwrap(), NumericValue::I32(120));
    }

    #[test]
    fn test_rejects_unsupported_kind() {
        let err = PresetFile::from_json(
            r#"{ "presets": [ { "name": "x", "kind": "u64", "start": 0, "end": 1 } ] }"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            AnimError::InvalidArgument(ArgumentError::UnsupportedNumberType {
                name: "u64".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_negative_duration() {
        let err = PresetFile::from_json(
            r#"{ "presets": [ { "name": "x", "start": 0, "end": 1, "duration_ms": -10 } ] }"#,
        )
        .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_malformed_json() {
        let err = PresetFile::from_json("{ presets: ").unwrap_err();
        assert!(matches!(err, AnimError::Preset { .. }));

        let err = PresetFile::from_json(r#"{ "presets": [ { "name": "x", "curve": "bounce", "start": 0, "end": 1 } ] }"#)
            .unwrap_err();
        assert!(matches!(err, AnimError::Preset { .. }));
    }

    #[test]
    fn test_sample() {
        let preset = AnimationPreset {
            name: "slide".to_string(),
            kind: "i64".to_string(),
            start: -50.0,
            end: 50.0,
            duration_ms: 100,
            curve: SpeedCurve::Linear,
        };

        let clock = ManualClock::new();
        let mut anim = DynAnimation::with_clock(clock.clone());
        assert_eq!(preset.sample(&mut anim, true).unwrap(), NumericValue::I64(-50));

        clock.advance(100);
        assert_eq!(preset.sample(&mut anim, true).unwrap(), NumericValue::I64(50));

        assert_eq!(preset.sample(&mut anim, false).unwrap(), NumericValue::I64(50));
        clock.advance(100);
        assert_eq!(preset.sample(&mut anim, false).unwrap(), NumericValue::I64(-50));
    }
}
