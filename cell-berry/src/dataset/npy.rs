use super::DatasetResult;
use crate::{LabelId, LabelVolume, ProbVolume, ShapeError};
use ndarray::{Array4, ArrayD, Ix4};
use ndarray_npy::{read_npy, write_npy, ReadableElement};
use num::Float;
use std::path::Path;

/// 从 `.npy` 文件读取 `(C, Z, Y, X)` 概率体数据.
///
/// 维数不为 4, 或任一维长度为 0 时, 返回 [`crate::SegError::Shape`] 错误.
pub fn read_probability_npy<F, P>(path: P) -> DatasetResult<Array4<F>>
where
    F: Float + ReadableElement,
    P: AsRef<Path>,
{
    let data: ArrayD<F> = read_npy(path.as_ref())?;
    let ndim = data.ndim();
    let data = data
        .into_dimensionality::<Ix4>()
        .map_err(|_| ShapeError::WrongNdim(ndim))
        .map_err(crate::SegError::from)?;
    ProbVolume::new(&data)?;
    log::debug!("读取概率体数据 {:?}: {:?}", path.as_ref(), data.dim());
    Ok(data)
}

impl LabelVolume {
    /// 从 `.npy` 文件读取 `(Z, Y, X)` 实例标签. 元素类型必须为 `u32`.
    pub fn read_npy<P: AsRef<Path>>(path: P) -> DatasetResult<Self> {
        let data: ndarray::Array3<LabelId> = read_npy(path)?;
        Ok(Self::from_raw(data))
    }

    /// 将实例标签以 `u32` 元素类型写入 `.npy` 文件.
    pub fn write_npy<P: AsRef<Path>>(&self, path: P) -> DatasetResult<()> {
        write_npy(path, &self.data())?;
        Ok(())
    }
}
