#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 将语义分割模型输出的逐体素前景概率体数据转换为 3D 实例分割标签,
//! 供下游标注/可视化工具使用.
//!
//! 该 crate 目前仅提供 `safe` 接口, 且所有算法均为无状态的纯函数:
//! 相同输入的多次调用 (包括跨线程的并发调用) 结果完全一致.
//!
//! # 注意
//!
//! 1. 输入概率体数据以 `(C, Z, Y, X)` 组织, 仅使用第 0 个 (语义) 通道.
//! 2. 输出标签中 `0` 代表背景, 每个正整数代表一个实例. 实例编号只保证不同实例互不相同,
//!   不保证连续, 因此比较结果时应比较 "哪些体素共享同一编号", 而不是编号本身.
//! 3. 输入参数不合法时, 入口函数在执行任何阶段之前返回 `Err`, 不会产生部分结果.
//!
//! # 功能
//!
//! ### 连通域实例提取 ✅
//!
//! 阈值化 -> 26-连通域标记 -> 去除小目标 -> (可选) 最近邻重采样.
//!
//! 实现位于 `cell-berry/src/instance/connected.rs`.
//!
//! ### 种子分水岭实例提取 ✅
//!
//! 双阈值 (种子阈值, 前景阈值) -> 种子连通域标记 -> 去除小种子 ->
//! 以负概率为高程、在前景掩膜内泛洪 -> 去除小目标 -> (可选) 最近邻重采样.
//!
//! 实现位于 `cell-berry/src/instance/watershed.rs`.
//!
//! ### 形态学基础算子 ✅
//!
//! 连通域标记, 小目标去除, 带标记的分水岭泛洪, 标签最近邻重采样.
//!
//! 实现位于 `cell-berry/src/morph`.
//!
//! ### 数据集读写 ✅
//!
//! `.npy` 概率体数据/标签读写, 以及多通道并发读取的 `.npz` 预测归档.
//!
//! 实现位于 `cell-berry/src/dataset`.
//!
//! # 内存占用
//!
//! 除输入外, 一次调用大约需要: 布尔掩膜 1 字节/体素 (分水岭为 2 个),
//! 标签 4 字节/体素, 分水岭高程 8 字节/体素 (`f64`), 以及泛洪优先队列
//! 在最坏情况下的约 40 字节/体素. 处理大体积数据时请预留足够内存.

/// 三维索引 `(z, y, x)`, 同时也可一定程度上用作非负整数向量.
pub type Idx3d = (usize, usize, usize);

/// 实例标签类型. `0` 为背景.
pub type LabelId = u32;

pub mod consts;

mod error;

pub mod dataset;

pub mod instance;

pub mod morph;

pub mod prelude;

/// 概率体数据, 标签体数据与缩放因子.
mod volume;

pub use error::{ParameterError, SegError, SegResult, ShapeError};

pub use instance::{
    connected_component_instances, watershed_instances, ConnectedParams, InstanceMethod,
    WatershedParams,
};

pub use volume::{LabelVolume, ProbVolume, ScaleFactors};
