//! 运行时错误.

use crate::Idx3d;
use thiserror::Error;

/// 输入形状错误.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// 概率体数据必须恰好为 4 维 `(C, Z, Y, X)`. 参数为实际维数.
    #[error("expected a 4-dimensional (C, Z, Y, X) volume, got {0} dimension(s)")]
    WrongNdim(usize),

    /// 概率体数据某一维长度为 0 (包括不存在语义通道的情况). 参数为实际形状.
    #[error("volume of shape {0:?} is empty")]
    EmptyVolume(Vec<usize>),

    /// 两个需要逐体素对应的体数据形状不一致.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    Mismatch {
        /// 期望形状.
        expected: Idx3d,

        /// 实际形状.
        actual: Idx3d,
    },
}

/// 输入参数错误.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// 概率阈值为 NaN, 或无法以输入元素类型表示.
    #[error("threshold `{name}` is invalid: {value}")]
    Threshold {
        /// 参数名.
        name: &'static str,

        /// 参数值.
        value: f64,
    },

    /// 缩放因子必须为正有限数. 参数为 `(z, y, x)` 顺序的实际值.
    #[error("scale factors must be positive and finite, got {0:?}")]
    ScaleFactors([f64; 3]),

    /// 缩放后的目标形状存在长度为 0 的维度.
    #[error("scaling {shape:?} by {factors:?} yields an empty target shape")]
    EmptyTargetShape {
        /// 缩放前的空间形状.
        shape: Idx3d,

        /// 缩放因子.
        factors: [f64; 3],
    },
}

/// 实例提取错误. 所有错误均在任何计算开始之前产生.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegError {
    /// 输入形状错误.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// 输入参数错误.
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// 实例提取运行时结果.
pub type SegResult<T> = Result<T, SegError>;
