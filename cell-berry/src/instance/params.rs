//! 实例提取参数.

use crate::consts::defaults::*;
use crate::ScaleFactors;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 连通域实例提取参数.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConnectedParams {
    /// 前景阈值. 概率严格大于该值的体素为前景.
    pub thres: f64,

    /// 小目标阈值. 体素个数严格小于该值的实例被去除.
    pub thres_small: usize,

    /// 输出缩放因子, `(z, y, x)` 顺序.
    pub scale_factors: ScaleFactors,
}

impl Default for ConnectedParams {
    fn default() -> Self {
        Self {
            thres: CONNECTED_THRES,
            thres_small: CONNECTED_THRES_SMALL,
            scale_factors: ScaleFactors::IDENTITY,
        }
    }
}

impl ConnectedParams {
    /// 设置前景阈值.
    #[inline]
    pub fn with_thres(mut self, thres: f64) -> Self {
        self.thres = thres;
        self
    }

    /// 设置小目标阈值.
    #[inline]
    pub fn with_thres_small(mut self, thres_small: usize) -> Self {
        self.thres_small = thres_small;
        self
    }

    /// 设置输出缩放因子.
    #[inline]
    pub fn with_scale_factors(mut self, scale_factors: ScaleFactors) -> Self {
        self.scale_factors = scale_factors;
        self
    }
}

/// 种子分水岭实例提取参数.
///
/// 调用方应保证 `thres_objects <= thres_seeding`. 该条件不会被拒绝,
/// 但违反时位于前景掩膜以外的种子会被丢弃.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WatershedParams {
    /// 种子阈值. 概率严格大于该值的体素为种子区域.
    pub thres_seeding: f64,

    /// 小目标阈值. 泛洪后体素个数严格小于该值的实例被去除.
    pub thres_small: usize,

    /// 前景阈值. 泛洪只能到达概率严格大于该值的体素.
    pub thres_objects: f64,

    /// 输出缩放因子, `(z, y, x)` 顺序.
    pub scale_factors: ScaleFactors,

    /// 小种子阈值. 体素个数严格小于该值的种子在泛洪前被去除.
    pub rem_seed_thres: usize,
}

impl Default for WatershedParams {
    fn default() -> Self {
        Self {
            thres_seeding: WATERSHED_THRES_SEEDING,
            thres_small: WATERSHED_THRES_SMALL,
            thres_objects: WATERSHED_THRES_OBJECTS,
            scale_factors: ScaleFactors::IDENTITY,
            rem_seed_thres: WATERSHED_REM_SEED_THRES,
        }
    }
}

impl WatershedParams {
    /// 设置种子阈值.
    #[inline]
    pub fn with_thres_seeding(mut self, thres_seeding: f64) -> Self {
        self.thres_seeding = thres_seeding;
        self
    }

    /// 设置小目标阈值.
    #[inline]
    pub fn with_thres_small(mut self, thres_small: usize) -> Self {
        self.thres_small = thres_small;
        self
    }

    /// 设置前景阈值.
    #[inline]
    pub fn with_thres_objects(mut self, thres_objects: f64) -> Self {
        self.thres_objects = thres_objects;
        self
    }

    /// 设置输出缩放因子.
    #[inline]
    pub fn with_scale_factors(mut self, scale_factors: ScaleFactors) -> Self {
        self.scale_factors = scale_factors;
        self
    }

    /// 设置小种子阈值.
    #[inline]
    pub fn with_rem_seed_thres(mut self, rem_seed_thres: usize) -> Self {
        self.rem_seed_thres = rem_seed_thres;
        self
    }
}
