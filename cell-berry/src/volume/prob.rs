use crate::consts::SEMANTIC_CHANNEL;
use crate::{Idx3d, ParameterError, SegResult, ShapeError};
use ndarray::{Array3, ArrayBase, ArrayView3, ArrayView4, Axis, Data, Dimension, Ix4};
use num::Float;

/// 不可变、借用的 4D 前景概率体数据, 按 `(C, Z, Y, X)` 组织.
///
/// 只能通过 [`ProbVolume::new`] 构建, 因此其形状总是合法的:
/// 恰好 4 维, 且每一维长度都不为 0.
#[derive(Debug, Clone)]
pub struct ProbVolume<'a, F> {
    data: ArrayView4<'a, F>,
}

impl<'a, F: Float> ProbVolume<'a, F> {
    /// 从任意维度的 `ndarray` 数组构建概率体数据视图.
    ///
    /// 如果 `volume` 不是 4 维, 或任一维长度为 0, 则返回 [`ShapeError`].
    /// 概率值本身不做检查, 超出 `[0, 1]` 的值照常参与阈值化.
    pub fn new<S, D>(volume: &'a ArrayBase<S, D>) -> SegResult<Self>
    where
        S: Data<Elem = F>,
        D: Dimension,
    {
        let ndim = volume.ndim();
        let data = volume
            .view()
            .into_dyn()
            .into_dimensionality::<Ix4>()
            .map_err(|_| ShapeError::WrongNdim(ndim))?;
        if data.is_empty() {
            return Err(ShapeError::EmptyVolume(data.shape().to_vec()).into());
        }
        Ok(Self { data })
    }

    /// 通道个数.
    #[inline]
    pub fn channels(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// 空间形状 `(z, y, x)`.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        let (_, z, y, x) = self.data.dim();
        (z, y, x)
    }

    /// 获取语义通道 (第 0 个通道) 的 3D 视图.
    #[inline]
    pub fn semantic(&self) -> ArrayView3<'a, F> {
        self.data.clone().index_axis_move(Axis(0), SEMANTIC_CHANNEL)
    }

    /// 获得底层 4D 数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView4<'a, F> {
        self.data.clone()
    }

    /// 以 `thres` 阈值化语义通道, 严格大于阈值的体素为前景.
    /// 恰好等于阈值的体素, 以及 NaN, 均为背景.
    pub fn foreground(&self, thres: F) -> Array3<bool>
    where
        F: Send + Sync,
    {
        let semantic = self.semantic();

        #[cfg(feature = "rayon")]
        let mask = ndarray::Zip::from(&semantic).par_map_collect(|&p| p > thres);

        #[cfg(not(feature = "rayon"))]
        let mask = semantic.mapv(|p| p > thres);

        mask
    }
}

/// 将 `f64` 概率阈值转换为输入元素类型 `F`.
///
/// 比较在元素类型下进行, 因此对于 `f32` 输入, `0.3` 会先被舍入到最近的 `f32`.
/// NaN 或无法表示的阈值返回 [`ParameterError::Threshold`].
pub(crate) fn cast_threshold<F: Float>(name: &'static str, value: f64) -> SegResult<F> {
    match F::from(value) {
        Some(t) if !value.is_nan() => Ok(t),
        _ => Err(ParameterError::Threshold { name, value }.into()),
    }
}
