//! 连通域实例提取.

use super::ConnectedParams;
use crate::morph::{self, Connectivity};
use crate::volume::prob::cast_threshold;
use crate::{LabelVolume, ProbVolume, SegResult};
use ndarray::{ArrayBase, Data, Dimension};
use num::Float;

/// 通过连通域标记, 将前景概率体数据转换为实例标签.
///
/// 算法流程依次为:
///
/// 1. 取第 0 个 (语义) 通道, 概率严格大于 `params.thres` 的体素为前景.
/// 2. 以 26-邻接规则标记前景连通域.
/// 3. 去除体素个数严格小于 `params.thres_small` 的实例.
/// 4. 若 `params.scale_factors` 不是恒等缩放, 则以最近邻插值重采样.
///
/// 输入 `volume` 必须为 `(C, Z, Y, X)` 四维数组. 所有检查在计算开始前完成,
/// 失败时返回 [`crate::SegError`].
///
/// # 返回值
///
/// 与语义通道形状相同 (或重采样后形状) 的实例标签. 若没有前景则为全背景.
pub fn connected_component_instances<S, D, F>(
    volume: &ArrayBase<S, D>,
    params: &ConnectedParams,
) -> SegResult<LabelVolume>
where
    S: Data<Elem = F>,
    D: Dimension,
    F: Float + Send + Sync,
{
    let volume = ProbVolume::new(volume)?;
    let thres: F = cast_threshold("thres", params.thres)?;
    let target = (!params.scale_factors.is_identity())
        .then(|| params.scale_factors.target_shape(volume.shape()))
        .transpose()?;

    let foreground = volume.foreground(thres);
    let mut segm = morph::label_components(foreground.view(), Connectivity::Full);
    let removed = segm.remove_small(params.thres_small);
    log::debug!(
        "连通域: 去除 {removed} 个小于 {} 体素的实例.",
        params.thres_small
    );
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("连通域: 保留 {} 个实例.", segm.instance_count());
    }

    match target {
        Some(target) => morph::resize_nearest(segm.data(), target),
        None => Ok(segm),
    }
}

#[cfg(test)]
mod tests {
    use super::connected_component_instances;
    use crate::instance::tests::{assert_partition_eq, cube, init_logger};
    use crate::{ConnectedParams, ParameterError, ScaleFactors, SegError, ShapeError};
    use ndarray::{Array3, Array4};

    #[test]
    fn test_single_cube() {
        init_logger();
        let mut v = Array4::<f32>::zeros((1, 5, 5, 5));
        cube(&mut v, (1, 1, 1), 3, 0.95);

        let params = ConnectedParams::default().with_thres(0.5).with_thres_small(1);
        let l = connected_component_instances(&v, &params).unwrap();

        assert_eq!(l.shape(), (5, 5, 5));
        let ids = l.instance_ids();
        assert_eq!(ids.len(), 1);
        assert_eq!(l.count(ids[0]), 27);
        for (pos, &id) in l.data().indexed_iter() {
            let (z, y, x) = pos;
            let inside = (1..4).contains(&z) && (1..4).contains(&y) && (1..4).contains(&x);
            assert_eq!(id != 0, inside, "{pos:?}");
        }
    }

    #[test]
    fn test_two_opposite_cubes() {
        let mut v = Array4::<f64>::zeros((1, 5, 5, 5));
        cube(&mut v, (0, 0, 0), 2, 0.95);
        cube(&mut v, (3, 3, 3), 2, 0.95);

        let params = ConnectedParams::default().with_thres_small(0);
        let l = connected_component_instances(&v, &params).unwrap();

        assert_eq!(l.instance_count(), 2);
        let a = l[(0, 0, 0)];
        let b = l[(4, 4, 4)];
        assert!(a != 0 && b != 0 && a != b);
        assert_eq!(l.count(a), 8);
        assert_eq!(l.count(b), 8);
    }

    #[test]
    fn test_diagonal_voxels_are_connected() {
        let mut v = Array4::<f32>::zeros((1, 3, 3, 3));
        for i in 0..3 {
            v[(0, i, i, i)] = 0.9;
        }
        let params = ConnectedParams::default().with_thres_small(0);
        let l = connected_component_instances(&v, &params).unwrap();
        assert_eq!(l.instance_count(), 1);
        assert_eq!(l.count(l[(0, 0, 0)]), 3);
    }

    #[test]
    fn test_threshold_is_strict_and_small_removed() {
        let mut v = Array4::<f32>::zeros((1, 1, 3, 7));
        // 两个体素恰好等于阈值, 不属于前景.
        v[(0, 0, 0, 0)] = 0.5;
        v[(0, 0, 0, 1)] = 0.5;
        // 3 体素实例: 保留.
        v[(0, 0, 2, 0)] = 0.6;
        v[(0, 0, 2, 1)] = 0.6;
        v[(0, 0, 2, 2)] = 0.6;
        // 2 体素实例: 去除.
        v[(0, 0, 0, 5)] = 0.7;
        v[(0, 0, 0, 6)] = 0.7;

        let l = connected_component_instances(&v, &ConnectedParams::default()).unwrap();
        assert_eq!(l.instance_count(), 1);
        assert_eq!(l.count(l[(0, 2, 1)]), 3);
        assert_eq!(l[(0, 0, 0)], 0);
        assert_eq!(l[(0, 0, 6)], 0);
    }

    #[test]
    fn test_empty_foreground() {
        let v = Array4::<f32>::from_elem((1, 4, 4, 4), 0.2);
        let l = connected_component_instances(&v, &ConnectedParams::default()).unwrap();
        assert!(l.is_background());
        assert_eq!(l.shape(), (4, 4, 4));
    }

    #[test]
    fn test_matches_expected_partition() {
        let mut v = Array4::<f32>::zeros((1, 1, 4, 4));
        let expected = Array3::from_shape_vec(
            (1, 4, 4),
            vec![
                5, 5, 0, 8, //
                0, 5, 0, 8, //
                0, 0, 0, 0, //
                2, 2, 2, 0, //
            ],
        )
        .unwrap();
        for (pos, &e) in expected.indexed_iter() {
            if e != 0 {
                v[(0, pos.0, pos.1, pos.2)] = 0.99;
            }
        }
        let params = ConnectedParams::default().with_thres_small(2);
        let l = connected_component_instances(&v, &params).unwrap();
        assert_partition_eq(l.data(), expected.view());
    }

    #[test]
    fn test_deterministic() {
        let v = Array4::from_shape_fn((1, 6, 7, 8), |(_, z, y, x)| {
            ((z * 31 + y * 17 + x * 7) % 10) as f32 / 10.0
        });
        let params = ConnectedParams::default().with_thres(0.6).with_thres_small(2);
        let a = connected_component_instances(&v, &params).unwrap();
        let b = connected_component_instances(&v, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rescaled_output() {
        let mut v = Array4::<f32>::zeros((1, 4, 4, 4));
        cube(&mut v, (0, 0, 0), 2, 0.9);
        let params = ConnectedParams::default()
            .with_thres_small(0)
            .with_scale_factors(ScaleFactors::new(0.5, 1.0, 1.5).unwrap());
        let l = connected_component_instances(&v, &params).unwrap();
        assert_eq!(l.shape(), (2, 4, 6));
        assert_eq!(l.instance_count(), 1);
        // z: [1, 3] -> 只有 z = 0 采到实例; y: 2 行; x: 6 中的 3 列.
        assert_eq!(l.count(l[(0, 0, 0)]), 2 * 3);
    }

    #[test]
    fn test_result_independent_of_log_level() {
        init_logger();
        let v = Array4::from_shape_fn((1, 5, 6, 7), |(_, z, y, x)| {
            ((z * 7 + y * 11 + x * 3) % 9) as f64 / 8.0
        });
        let params = ConnectedParams::default().with_thres(0.4);

        let prev = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        let quiet = connected_component_instances(&v, &params).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
        let verbose = connected_component_instances(&v, &params).unwrap();
        log::set_max_level(prev);

        assert_eq!(quiet, verbose);
    }

    #[test]
    fn test_input_errors() {
        let v = Array3::<f32>::zeros((4, 4, 4));
        let e = connected_component_instances(&v, &ConnectedParams::default()).unwrap_err();
        assert_eq!(e, SegError::Shape(ShapeError::WrongNdim(3)));

        let v = Array4::<f32>::zeros((1, 4, 4, 4));
        let params = ConnectedParams::default().with_thres(f64::NAN);
        let e = connected_component_instances(&v, &params).unwrap_err();
        assert!(matches!(
            e,
            SegError::Parameter(ParameterError::Threshold { name: "thres", .. })
        ));

        let params =
            ConnectedParams::default().with_scale_factors(ScaleFactors::new(0.1, 1.0, 1.0).unwrap());
        let e = connected_component_instances(&v, &params).unwrap_err();
        assert!(matches!(
            e,
            SegError::Parameter(ParameterError::EmptyTargetShape { .. })
        ));
    }
}
