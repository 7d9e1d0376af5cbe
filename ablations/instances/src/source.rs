//! 实验数据来源.

use cell_berry::dataset::{DatasetResult, PredictionArchive};
use ndarray::Array4;
use utils::{loader, phantom};

/// 一批 `(C, Z, Y, X)` 概率体数据.
pub enum Source {
    /// 硬盘上的预测归档.
    Archive(PredictionArchive),

    /// 合成数据.
    Phantom(Vec<Array4<f32>>),
}

impl Source {
    /// 优先打开预测归档, 不存在时生成合成数据.
    pub fn from_env_or_phantom() -> DatasetResult<Self> {
        match loader::archive_from_env_or_home() {
            Some(archive) => Ok(Self::Archive(archive?)),
            None => {
                log::info!("未找到预测归档, 使用合成数据.");
                Ok(Self::Phantom(
                    (1..=8).map(|n| phantom::touching_row(n, 6.0)).collect(),
                ))
            }
        }
    }

    /// 数据个数.
    pub fn len(&self) -> usize {
        match self {
            Self::Archive(a) => a.len(),
            Self::Phantom(v) => v.len(),
        }
    }

    /// 获取第 `index` 个概率体数据.
    pub fn get(&self, index: usize) -> DatasetResult<Array4<f32>> {
        match self {
            Self::Archive(a) => a.volume_by_index(index),
            Self::Phantom(v) => Ok(v[index].clone()),
        }
    }
}
