//! # Number 模块
//!
//! 动画支持的数值类型（封闭集合）：i8 / i16 / i32 / i64 / f32 / f64。
//!
//! - 静态路径：[`AnimNumber`] trait，只为上述 6 种类型实现，外部无法扩展
//! - 动态路径：[`NumericValue`] 标签联合 + [`NumberKind`]，类型名来自配置时
//!   在解析阶段拒绝不支持的类型
//!
//! 所有插值运算都在 f64 中进行，最后再转换回目标类型：
//! 整数四舍五入（恰好 .5 时向正无穷取整），f32 直接收窄，f64 原样返回。

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{AnimError, ArgumentError};

mod sealed {
    pub trait Sealed {}
}

/// 可动画的数值类型
pub trait AnimNumber: Copy + fmt::Debug + sealed::Sealed + 'static {
    /// 对应的动态类型标签
    const KIND: NumberKind;

    /// 转换为 f64
    fn to_f64(self) -> f64;

    /// 从 f64 转换回来
    fn from_f64(value: f64) -> Self;
}

/// 四舍五入，恰好 .5 时向正无穷取整
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

macro_rules! impl_anim_number {
    ($($ty:ty => $kind:ident, |$v:ident| $from:expr;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl AnimNumber for $ty {
                const KIND: NumberKind = NumberKind::$kind;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64($v: f64) -> Self {
                    $from
                }
            }

            impl From<$ty> for NumericValue {
                fn from(value: $ty) -> Self {
                    NumericValue::$kind(value)
                }
            }
        )*
    };
}

// 窄整数先饱和到 32 位再截断，与 i32 的溢出行为保持一致
impl_anim_number! {
    i8 => I8, |v| round_half_up(v) as i32 as i8;
    i16 => I16, |v| round_half_up(v) as i32 as i16;
    i32 => I32, |v| round_half_up(v) as i32;
    i64 => I64, |v| round_half_up(v) as i64;
    f32 => F32, |v| v as f32;
    f64 => F64, |v| v;
}

/// 数值类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl NumberKind {
    /// 全部类型
    pub const ALL: [NumberKind; 6] = [
        NumberKind::I8,
        NumberKind::I16,
        NumberKind::I32,
        NumberKind::I64,
        NumberKind::F32,
        NumberKind::F64,
    ];

    /// 类型名
    pub fn name(&self) -> &'static str {
        match self {
            NumberKind::I8 => "i8",
            NumberKind::I16 => "i16",
            NumberKind::I32 => "i32",
            NumberKind::I64 => "i64",
            NumberKind::F32 => "f32",
            NumberKind::F64 => "f64",
        }
    }

    /// 是否为整数类型
    pub fn is_integer(&self) -> bool {
        !matches!(self, NumberKind::F32 | NumberKind::F64)
    }

    /// 把 f64 转换为该类型的值
    pub fn from_f64(&self, value: f64) -> NumericValue {
        match self {
            NumberKind::I8 => NumericValue::I8(i8::from_f64(value)),
            NumberKind::I16 => NumericValue::I16(i16::from_f64(value)),
            NumberKind::I32 => NumericValue::I32(i32::from_f64(value)),
            NumberKind::I64 => NumericValue::I64(i64::from_f64(value)),
            NumberKind::F32 => NumericValue::F32(f32::from_f64(value)),
            NumberKind::F64 => NumericValue::F64(value),
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumberKind {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                ArgumentError::UnsupportedNumberType {
                    name: s.to_string(),
                }
                .into()
            })
    }
}

/// 带类型标签的数值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NumericValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl NumericValue {
    /// 类型标签
    pub fn kind(&self) -> NumberKind {
        match self {
            NumericValue::I8(_) => NumberKind::I8,
            NumericValue::I16(_) => NumberKind::I16,
            NumericValue::I32(_) => NumberKind::I32,
            NumericValue::I64(_) => NumberKind::I64,
            NumericValue::F32(_) => NumberKind::F32,
            NumericValue::F64(_) => NumberKind::F64,
        }
    }

    /// 转换为 f64
    pub fn to_f64(&self) -> f64 {
        match *self {
            NumericValue::I8(v) => v.to_f64(),
            NumericValue::I16(v) => v.to_f64(),
            NumericValue::I32(v) => v.to_f64(),
            NumericValue::I64(v) => v.to_f64(),
            NumericValue::F32(v) => v.to_f64(),
            NumericValue::F64(v) => v,
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::I8(v) => write!(f, "{v}"),
            NumericValue::I16(v) => write!(f, "{v}"),
            NumericValue::I32(v) => write!(f, "{v}"),
            NumericValue::I64(v) => write!(f, "{v}"),
            NumericValue::F32(v) => write!(f, "{v}"),
            NumericValue::F64(v) => write!(f, "{v}"),
        }
    }
}
