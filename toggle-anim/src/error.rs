//! # Error 模块
//!
//! 定义 toggle-anim 中使用的错误类型。
//!
//! 所有错误都是调用方的用法错误：在修改任何状态之前同步返回，
//! 库内部不重试、不记录日志、不提供回退值。

use thiserror::Error;

/// 参数错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    /// 动画时长为负
    #[error("时长不能为负：{duration_ms} ms")]
    NegativeDuration { duration_ms: i64 },

    /// 不支持的数值类型
    #[error("不支持的数值类型 '{name}'，可用类型为 i8/i16/i32/i64/f32/f64")]
    UnsupportedNumberType { name: String },

    /// 整数动画的结束值不是有限数
    #[error("{kind} 动画的结束值必须是有限数，实际为 {value}")]
    NonFiniteEnd { kind: String, value: f64 },
}

/// toggle-anim 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimError {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(#[from] ArgumentError),

    /// 预设解析失败
    #[error("预设解析失败: {message}")]
    Preset { message: String },
}

impl AnimError {
    /// 是否为无效参数错误
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for AnimError {
    fn from(e: serde_json::Error) -> Self {
        Self::Preset {
            message: e.to_string(),
        }
    }
}

/// Result 类型别名
pub type AnimResult<T> = Result<T, AnimError>;

/// 校验时长非负
pub(crate) fn check_duration(duration_ms: i64) -> AnimResult<()> {
    if duration_ms < 0 {
        return Err(ArgumentError::NegativeDuration { duration_ms }.into());
    }
    Ok(())
}
