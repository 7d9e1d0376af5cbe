//! 数据集读写.
//!
//! 概率体数据与实例标签均以 numpy `.npy` 格式存储; 一批预测结果可以打包为 `.npz` 归档.

use crate::SegError;
use ndarray_npy::{ReadNpyError, ReadNpzError, WriteNpyError};
use std::path::{Path, PathBuf};

mod npy;
mod npz_archive;

pub use npy::read_probability_npy;
pub use npz_archive::PredictionArchive;

/// 数据集读写错误.
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// 底层 I/O 错误.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 读取 npy 文件错误.
    #[error("failed to read npy: {0}")]
    ReadNpy(#[from] ReadNpyError),

    /// 写入 npy 文件错误.
    #[error("failed to write npy: {0}")]
    WriteNpy(#[from] WriteNpyError),

    /// 读取 npz 归档错误.
    #[error("failed to read npz: {0}")]
    ReadNpz(#[from] ReadNpzError),

    /// workers 太大. 最多支持 [`PredictionArchive::MAX_WORKERS`].
    #[error("too many workers: {0} (at most {max})", max = PredictionArchive::MAX_WORKERS)]
    TooManyWorkers(usize),

    /// 读取的数据不满足实例提取的输入约束.
    #[error(transparent)]
    Seg(#[from] SegError),
}

/// 数据集读写结果.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}
