use crate::consts::{is_instance, BACKGROUND};
use crate::{Idx3d, LabelId, ScaleFactors, SegResult};
use ndarray::{Array3, ArrayView2, ArrayView3, ArrayViewMut3, Axis};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 3D 实例分割标签, 按 `(z, y, x)` 组织. 标签值以 [`LabelId`] 保存.
///
/// `0` 为背景, 每个正整数代表一个实例. 编号不保证连续.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelVolume {
    data: Array3<LabelId>,
}

impl Index<Idx3d> for LabelVolume {
    type Output = LabelId;

    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx3d> for LabelVolume {
    #[inline]
    fn index_mut(&mut self, index: Idx3d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl From<Array3<LabelId>> for LabelVolume {
    #[inline]
    fn from(data: Array3<LabelId>) -> Self {
        Self { data }
    }
}

impl LabelVolume {
    /// 直接由裸标签数据创建.
    #[inline]
    pub fn from_raw(data: Array3<LabelId>) -> Self {
        Self { data }
    }

    /// 创建形状为 `shape` 的全背景标签.
    #[inline]
    pub fn background(shape: Idx3d) -> Self {
        Self {
            data: Array3::from_elem(shape, BACKGROUND),
        }
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_raw(self) -> Array3<LabelId> {
        self.data
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView3<'_, LabelId> {
        self.data.view()
    }

    /// 获得数据的一份可变 shallow copy.
    #[inline]
    pub fn data_mut(&mut self) -> ArrayViewMut3<'_, LabelId> {
        self.data.view_mut()
    }

    /// 获取数据形状大小 `(z, y, x)`.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.data.dim()
    }

    /// 获取数据体素个数.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 获取 z 空间的第 `z_index` 层切片视图.
    ///
    /// 当 `z_index` 越界时 panic.
    #[inline]
    pub fn slice_at(&self, z_index: usize) -> ArrayView2<'_, LabelId> {
        self.data.index_axis(Axis(0), z_index)
    }

    /// 获取值为 `id` 的体素个数.
    #[inline]
    pub fn count(&self, id: LabelId) -> usize {
        self.data.iter().filter(|p| **p == id).count()
    }

    /// 是否为全背景?
    #[inline]
    pub fn is_background(&self) -> bool {
        self.data.iter().all(|p| *p == BACKGROUND)
    }

    /// 单次遍历统计每个实例的体素个数. 背景不计入.
    pub fn voxel_counts(&self) -> BTreeMap<LabelId, usize> {
        let mut ans = BTreeMap::new();
        for &id in self.data.iter().filter(|p| is_instance(**p)) {
            *ans.entry(id).or_insert(0) += 1;
        }
        ans
    }

    /// 所有实例编号, 升序排列.
    #[inline]
    pub fn instance_ids(&self) -> Vec<LabelId> {
        self.voxel_counts().into_keys().collect()
    }

    /// 实例个数.
    #[inline]
    pub fn instance_count(&self) -> usize {
        self.data
            .iter()
            .filter(|p| is_instance(**p))
            .collect::<HashSet<_>>()
            .len()
    }

    /// 收集值为 `id` 的所有体素对应的下标, 结果按行优先存储.
    pub fn positions(&self, id: LabelId) -> Vec<Idx3d> {
        self.data
            .indexed_iter()
            .filter_map(|(pos, p)| (*p == id).then_some(pos))
            .collect()
    }

    /// 去除体素个数严格小于 `min_size` 的实例 (将其改写为背景).
    /// 体素个数恰好等于 `min_size` 的实例被保留. 其余实例编号不变.
    ///
    /// 一次遍历计数, 一次遍历改写. 返回被去除的实例个数.
    pub fn remove_small(&mut self, min_size: usize) -> usize {
        if min_size <= 1 {
            // 任何现存实例的体素个数都至少为 1.
            return 0;
        }
        let mut counts = HashMap::<LabelId, usize>::with_capacity(64);
        for &id in self.data.iter().filter(|p| is_instance(**p)) {
            *counts.entry(id).or_insert(0) += 1;
        }
        let small: HashSet<LabelId> = counts
            .into_iter()
            .filter_map(|(id, cnt)| (cnt < min_size).then_some(id))
            .collect();
        if small.is_empty() {
            return 0;
        }

        let erase = |p: &mut LabelId| {
            if small.contains(p) {
                *p = BACKGROUND;
            }
        };

        #[cfg(feature = "rayon")]
        self.data.par_map_inplace(erase);

        #[cfg(not(feature = "rayon"))]
        self.data.map_inplace(erase);

        small.len()
    }

    /// 按 `factors` 以最近邻插值重采样. 参见 [`crate::morph::resample`].
    #[inline]
    pub fn resample(&self, factors: ScaleFactors) -> SegResult<Self> {
        crate::morph::resample(self, factors)
    }

    /// 将实例编号重映射为 `1..=N`. 编号按各实例首个体素的行优先顺序分配.
    ///
    /// 返回实例个数 `N`.
    pub fn relabel_sequential(&mut self) -> usize {
        let mut table = HashMap::<LabelId, LabelId>::with_capacity(64);
        let mut next: LabelId = 0;
        for p in self.data.iter_mut().filter(|p| is_instance(**p)) {
            *p = *table.entry(*p).or_insert_with(|| {
                next += 1;
                next
            });
        }
        table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::LabelVolume;
    use ndarray::Array3;

    fn sample() -> LabelVolume {
        // z = 0: 7 7 0 | z = 1: 0 3 3 | z = 2: 0 0 9
        let mut data = Array3::zeros((3, 1, 3));
        data[(0, 0, 0)] = 7;
        data[(0, 0, 1)] = 7;
        data[(1, 0, 1)] = 3;
        data[(1, 0, 2)] = 3;
        data[(2, 0, 2)] = 9;
        LabelVolume::from_raw(data)
    }

    #[test]
    fn test_label_statistics() {
        let l = sample();
        assert_eq!(l.shape(), (3, 1, 3));
        assert_eq!(l.size(), 9);
        assert_eq!(l.count(0), 4);
        assert_eq!(l.instance_ids(), vec![3, 7, 9]);
        assert_eq!(l.instance_count(), 3);
        assert_eq!(l.voxel_counts().get(&7), Some(&2));
        assert_eq!(l.positions(3), vec![(1, 0, 1), (1, 0, 2)]);
        assert!(!l.is_background());
        assert!(LabelVolume::background((2, 2, 2)).is_background());
    }

    #[test]
    fn test_remove_small_boundary() {
        let mut l = sample();
        // 恰好等于阈值的实例保留.
        assert_eq!(l.remove_small(2), 1);
        assert_eq!(l.instance_ids(), vec![3, 7]);
        assert_eq!(l[(2, 0, 2)], 0);

        let mut l = sample();
        assert_eq!(l.remove_small(3), 3);
        assert!(l.is_background());
    }

    #[test]
    fn test_remove_small_trivial() {
        let mut l = sample();
        assert_eq!(l.remove_small(0), 0);
        assert_eq!(l.remove_small(1), 0);
        assert_eq!(l, sample());
    }

    #[test]
    fn test_relabel_sequential() {
        let mut l = sample();
        assert_eq!(l.relabel_sequential(), 3);
        assert_eq!(l.instance_ids(), vec![1, 2, 3]);
        assert_eq!(l[(0, 0, 0)], 1);
        assert_eq!(l[(1, 0, 2)], 2);
        assert_eq!(l[(2, 0, 2)], 3);
    }
}
