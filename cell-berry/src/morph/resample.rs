use crate::{Idx3d, LabelId, LabelVolume, ScaleFactors, SegResult, ShapeError};
use ndarray::{Array3, ArrayView3, ArrayViewMut2, Axis};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
    }
}

/// 按 `factors` 以最近邻插值 (0 阶) 重采样标签.
///
/// 目标形状由 [`ScaleFactors::target_shape`] 计算 (向零截断). 标签是类别编号,
/// 因此输出中的每个值都原样取自输入的某个体素, 不做任何混合或归一化.
///
/// 恒等缩放时直接返回副本. 但实例提取流程在恒等缩放时根本不会调用本函数.
pub fn resample(labels: &LabelVolume, factors: ScaleFactors) -> SegResult<LabelVolume> {
    if factors.is_identity() {
        return Ok(labels.clone());
    }
    let target = factors.target_shape(labels.shape())?;
    log::debug!("重采样: {:?} -> {target:?}", labels.shape());
    resize_nearest(labels.data(), target)
}

/// 将 `src` 以最近邻插值缩放到 `target` 形状. 三个方向相互独立.
///
/// 输出坐标 `o` 对应输入坐标 `floor((o + 0.5) * in / out)` (截断到合法范围内),
/// 即以体素中心对齐.
///
/// `src` 或 `target` 的任一维长度为 0 时, 返回 [`ShapeError::EmptyVolume`].
pub fn resize_nearest(src: ArrayView3<'_, LabelId>, target: Idx3d) -> SegResult<LabelVolume> {
    let (sz, sy, sx) = src.dim();
    let (tz, ty, tx) = target;
    for (z, y, x) in [(sz, sy, sx), target] {
        if z * y * x == 0 {
            return Err(ShapeError::EmptyVolume(vec![z, y, x]).into());
        }
    }

    let (mz, my, mx) = (
        nearest_indices(sz, tz),
        nearest_indices(sy, ty),
        nearest_indices(sx, tx),
    );
    let mut out = Array3::<LabelId>::zeros((tz, ty, tx));

    let fill = |(z, mut plane): (usize, ArrayViewMut2<'_, LabelId>)| {
        let src_plane = src.index_axis(Axis(0), mz[z]);
        for ((y, x), v) in plane.indexed_iter_mut() {
            *v = src_plane[(my[y], mx[x])];
        }
    };

    #[cfg(feature = "rayon")]
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(fill);

    #[cfg(not(feature = "rayon"))]
    out.axis_iter_mut(Axis(0)).enumerate().for_each(fill);

    Ok(LabelVolume::from_raw(out))
}

/// 计算长度为 `out_len` 的输出轴上每个位置对应的输入轴索引.
fn nearest_indices(in_len: usize, out_len: usize) -> Vec<usize> {
    let ratio = in_len as f64 / out_len as f64;
    (0..out_len)
        .map(|o| (((o as f64 + 0.5) * ratio).floor() as usize).min(in_len - 1))
        .collect()
}
