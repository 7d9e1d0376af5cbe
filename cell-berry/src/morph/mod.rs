//! 3D 形态学基础算子: 连通域标记, 小目标去除, 带标记的分水岭泛洪, 标签重采样.

mod components;
mod resample;
mod watershed;

use crate::{Idx3d, LabelVolume};
use itertools::iproduct;
use once_cell::sync::Lazy;

pub use components::label_components;
pub use resample::{resample, resize_nearest};
pub use watershed::watershed;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 三维有符号偏移.
type Offset3d = (isize, isize, isize);

/// 前后上下左右六个方向的偏移.
const FACE_OFFSETS: [Offset3d; 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// 3x3x3 邻域中除中心外的全部 26 个偏移, 按行优先排列.
static FULL_OFFSETS: Lazy<Vec<Offset3d>> = Lazy::new(|| {
    iproduct!(-1isize..=1, -1isize..=1, -1isize..=1)
        .filter(|&o| o != (0, 0, 0))
        .collect()
});

/// 体素邻接规则.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Connectivity {
    /// 共面相邻 (6-邻域).
    Face,

    /// 共面、共棱或共顶点相邻 (26-邻域).
    Full,
}

impl Connectivity {
    /// 该规则下的邻域偏移集合.
    #[inline]
    fn offsets(&self) -> &'static [Offset3d] {
        match self {
            Connectivity::Face => &FACE_OFFSETS,
            Connectivity::Full => FULL_OFFSETS.as_slice(),
        }
    }

    /// 邻居个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets().len()
    }

    /// 邻域是否为空. 两种规则的邻域都不为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets().is_empty()
    }

    /// 获得 `pos` 在形状为 `shape` 的体数据中的所有邻居.
    /// 保证返回的索引都不越界.
    pub fn neighbours(&self, pos: Idx3d, shape: Idx3d) -> impl Iterator<Item = Idx3d> {
        self.offsets()
            .iter()
            .filter_map(move |&off| shift_within(pos, off, shape))
    }
}

/// 计算 `pos + off`. 若结果越界则返回 `None`.
#[inline]
fn shift_within((z, y, x): Idx3d, (dz, dy, dx): Offset3d, (lz, ly, lx): Idx3d) -> Option<Idx3d> {
    let z = z.checked_add_signed(dz).filter(|&v| v < lz)?;
    let y = y.checked_add_signed(dy).filter(|&v| v < ly)?;
    let x = x.checked_add_signed(dx).filter(|&v| v < lx)?;
    Some((z, y, x))
}

/// 去除体素个数严格小于 `min_size` 的实例, 返回处理后的标签.
///
/// 背景不参与计数也不会被修改; `min_size` 为 0 时为恒等变换.
/// 参见 [`LabelVolume::remove_small`].
#[inline]
pub fn remove_small(mut labels: LabelVolume, min_size: usize) -> LabelVolume {
    labels.remove_small(min_size);
    labels
}

#[cfg(test)]
mod tests {
    use super::{remove_small, Connectivity};
    use crate::LabelVolume;
    use ndarray::Array3;

    #[test]
    fn test_neighbour_counts() {
        assert_eq!(Connectivity::Face.len(), 6);
        assert_eq!(Connectivity::Full.len(), 26);
        assert!(!Connectivity::Face.is_empty());
        assert!(!Connectivity::Full.is_empty());

        let shape = (3, 3, 3);
        assert_eq!(Connectivity::Full.neighbours((1, 1, 1), shape).count(), 26);
        assert_eq!(Connectivity::Face.neighbours((1, 1, 1), shape).count(), 6);

        // 角点
        assert_eq!(Connectivity::Full.neighbours((0, 0, 0), shape).count(), 7);
        assert_eq!(Connectivity::Face.neighbours((2, 2, 2), shape).count(), 3);

        // 退化形状
        assert_eq!(Connectivity::Full.neighbours((0, 0, 0), (1, 1, 1)).count(), 0);
    }

    #[test]
    fn test_neighbours_unique_and_adjacent() {
        let shape = (4, 4, 4);
        let mut ns: Vec<_> = Connectivity::Full.neighbours((2, 1, 3), shape).collect();
        let len = ns.len();
        ns.sort_unstable();
        ns.dedup();
        assert_eq!(ns.len(), len);
        for (z, y, x) in ns {
            assert!(z.abs_diff(2) <= 1 && y.abs_diff(1) <= 1 && x.abs_diff(3) <= 1);
            assert_ne!((z, y, x), (2, 1, 3));
        }
    }

    #[test]
    fn test_remove_small_identity_at_zero() {
        let mut data = Array3::zeros((2, 2, 2));
        data[(0, 0, 0)] = 4;
        data[(1, 1, 1)] = 5;
        data[(1, 1, 0)] = 5;
        let l = LabelVolume::from_raw(data);
        assert_eq!(remove_small(l.clone(), 0), l);

        let r = remove_small(l.clone(), 2);
        assert_eq!(r.instance_ids(), vec![5]);
        assert_eq!(r.count(5), 2);
    }
}
