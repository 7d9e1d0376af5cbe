//! 种子分水岭实例提取.

use super::WatershedParams;
use crate::morph::{self, Connectivity};
use crate::volume::prob::cast_threshold;
use crate::{LabelVolume, ProbVolume, SegResult};
use ndarray::{ArrayBase, Data, Dimension};
use num::Float;

/// 通过种子分水岭, 将前景概率体数据转换为实例标签. 适用于相互接触的目标.
///
/// 算法流程依次为:
///
/// 1. 取第 0 个 (语义) 通道. 概率严格大于 `thres_seeding` 的体素构成种子区域,
///   以 26-邻接规则标记为种子, 并去除体素个数小于 `rem_seed_thres` 的种子.
/// 2. 概率严格大于 `thres_objects` 的体素构成前景掩膜.
/// 3. 以负概率为高程, 从种子出发在掩膜内以 6-邻接规则泛洪. 每个种子的编号
///   沿其流域扩张, 高概率区域先被淹没.
/// 4. 去除体素个数严格小于 `thres_small` 的实例.
/// 5. 若 `scale_factors` 不是恒等缩放, 则以最近邻插值重采样.
///
/// 与任何种子都不连通的前景体素保持为背景. 实例编号取自其种子编号,
/// 去除小目标后不会重新编号.
///
/// 若 `thres_objects > thres_seeding` 则记录警告, 但不会报错.
pub fn watershed_instances<S, D, F>(
    volume: &ArrayBase<S, D>,
    params: &WatershedParams,
) -> SegResult<LabelVolume>
where
    S: Data<Elem = F>,
    D: Dimension,
    F: Float + Send + Sync,
{
    let volume = ProbVolume::new(volume)?;
    let thres_seeding: F = cast_threshold("thres_seeding", params.thres_seeding)?;
    let thres_objects: F = cast_threshold("thres_objects", params.thres_objects)?;
    let target = (!params.scale_factors.is_identity())
        .then(|| params.scale_factors.target_shape(volume.shape()))
        .transpose()?;
    if params.thres_objects > params.thres_seeding {
        log::warn!(
            "前景阈值 {} 大于种子阈值 {}, 掩膜外的种子将被丢弃.",
            params.thres_objects,
            params.thres_seeding
        );
    }

    let seed_mask = volume.foreground(thres_seeding);
    let mut seeds = morph::label_components(seed_mask.view(), Connectivity::Full);
    let removed = seeds.remove_small(params.rem_seed_thres);
    log::debug!("分水岭: 去除 {removed} 个小种子.");
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("分水岭: 保留 {} 个种子.", seeds.instance_count());
    }

    let foreground = volume.foreground(thres_objects);
    let elevation = volume
        .semantic()
        .mapv(|p| p.to_f64().map_or(f64::NAN, |p| -p));
    let mut segm = morph::watershed(
        elevation.view(),
        &seeds,
        foreground.view(),
        Connectivity::Face,
    )?;
    let removed = segm.remove_small(params.thres_small);
    log::debug!(
        "分水岭: 去除 {removed} 个小于 {} 体素的实例.",
        params.thres_small
    );
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("分水岭: 保留 {} 个实例.", segm.instance_count());
    }

    match target {
        Some(target) => morph::resize_nearest(segm.data(), target),
        None => Ok(segm),
    }
}
