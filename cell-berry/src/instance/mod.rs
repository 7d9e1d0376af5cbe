//! 实例提取: 将 `(C, Z, Y, X)` 前景概率体数据转换为 `(Z, Y, X)` 实例标签.
//!
//! 提供两种算法:
//!
//! - [`connected_component_instances`]: 阈值化后标记连通域. 速度快, 但无法分开相互接触的目标.
//! - [`watershed_instances`]: 以高置信区域为种子, 在前景内进行分水岭泛洪.
//!
//! 两者都会去除小目标, 并可选地以最近邻插值重采样输出.

mod connected;
mod params;
mod watershed;

pub use connected::connected_component_instances;
pub use params::{ConnectedParams, WatershedParams};
pub use watershed::watershed_instances;

use crate::{LabelVolume, SegResult};
use ndarray::{ArrayBase, Data, Dimension};
use num::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 实例提取方法及其参数.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "method", rename_all = "snake_case"))]
pub enum InstanceMethod {
    /// 连通域.
    Connected(ConnectedParams),

    /// 种子分水岭.
    Watershed(WatershedParams),
}

impl Default for InstanceMethod {
    #[inline]
    fn default() -> Self {
        Self::Watershed(WatershedParams::default())
    }
}

impl From<ConnectedParams> for InstanceMethod {
    #[inline]
    fn from(p: ConnectedParams) -> Self {
        Self::Connected(p)
    }
}

impl From<WatershedParams> for InstanceMethod {
    #[inline]
    fn from(p: WatershedParams) -> Self {
        Self::Watershed(p)
    }
}

impl InstanceMethod {
    /// 方法名称.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::Watershed(_) => "watershed",
        }
    }

    /// 对 `volume` 执行实例提取.
    pub fn segment<S, D, F>(&self, volume: &ArrayBase<S, D>) -> SegResult<LabelVolume>
    where
        S: Data<Elem = F>,
        D: Dimension,
        F: Float + Send + Sync,
    {
        match self {
            Self::Connected(p) => connected_component_instances(volume, p),
            Self::Watershed(p) => watershed_instances(volume, p),
        }
    }
}
