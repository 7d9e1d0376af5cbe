//! 通用常量.

use crate::LabelId;

/// 标签体数据中, 背景的体素值.
pub const BACKGROUND: LabelId = 0;

/// 概率体数据中, 被使用的语义通道索引.
pub const SEMANTIC_CHANNEL: usize = 0;

/// 各实例提取算法的默认参数.
pub mod defaults {
    /// 连通域算法: 前景阈值.
    pub const CONNECTED_THRES: f64 = 0.5;

    /// 连通域算法: 小目标体素个数阈值.
    pub const CONNECTED_THRES_SMALL: usize = 3;

    /// 分水岭算法: 种子阈值.
    pub const WATERSHED_THRES_SEEDING: f64 = 0.9;

    /// 分水岭算法: 小目标体素个数阈值.
    pub const WATERSHED_THRES_SMALL: usize = 10;

    /// 分水岭算法: 前景 (可泛洪区域) 阈值.
    pub const WATERSHED_THRES_OBJECTS: f64 = 0.3;

    /// 分水岭算法: 小种子体素个数阈值.
    pub const WATERSHED_REM_SEED_THRES: usize = 3;
}

/// 背景判断.
#[inline]
pub const fn is_background(id: LabelId) -> bool {
    id == BACKGROUND
}

/// 实例 (前景) 判断.
#[inline]
pub const fn is_instance(id: LabelId) -> bool {
    !is_background(id)
}
