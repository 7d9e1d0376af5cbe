use super::Connectivity;
use crate::consts::{is_instance, BACKGROUND};
use crate::{Idx3d, LabelId, LabelVolume, SegResult, ShapeError};
use binary_heap_plus::BinaryHeap;
use ndarray::{Array3, ArrayView3};
use ordered_float::OrderedFloat;

/// 泛洪队列元素.
///
/// 按 `(高程, 入队序号, 位置)` 字典序比较: 高程低者先出队;
/// 高程相同时先入队者先出队. 初始标记的入队序号都为 0, 以位置决出先后.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
struct FloodElem {
    height: OrderedFloat<f64>,
    age: u64,
    pos: Idx3d,
}

/// 以 `markers` 为种子, 在 `elevation` 高程面上进行带掩膜的分水岭泛洪.
///
/// 算法流程依次为:
///
/// 1. 丢弃掩膜以外的标记, 其余标记体素保持原编号并全部入队.
/// 2. 每次弹出高程最低 (同高程时最早入队) 的体素, 将其 `conn` 邻域内尚未被标记、
///   且位于掩膜内的体素标记为同一编号并入队.
/// 3. 队列为空时结束.
///
/// 掩膜以外的体素永远为背景; 掩膜内但与所有标记都不连通的体素同样保持为背景.
///
/// # 注意
///
/// `elevation`, `markers` 和 `mask` 形状必须一致, 否则返回 [`ShapeError::Mismatch`].
pub fn watershed(
    elevation: ArrayView3<'_, f64>,
    markers: &LabelVolume,
    mask: ArrayView3<'_, bool>,
    conn: Connectivity,
) -> SegResult<LabelVolume> {
    let shape = markers.shape();
    for actual in [elevation.dim(), mask.dim()] {
        if actual != shape {
            return Err(ShapeError::Mismatch {
                expected: shape,
                actual,
            }
            .into());
        }
    }

    let mut out = Array3::<LabelId>::from_elem(shape, BACKGROUND);
    let mut heap = BinaryHeap::<FloodElem, _>::new_min();

    for (pos, &id) in markers.data().indexed_iter() {
        if is_instance(id) && mask[pos] {
            out[pos] = id;
            heap.push(FloodElem {
                height: OrderedFloat(elevation[pos]),
                age: 0,
                pos,
            });
        }
    }
    log::trace!("分水岭: {} 个标记体素入队.", heap.len());

    let mut age = 0u64;
    while let Some(FloodElem { pos, .. }) = heap.pop() {
        let id = out[pos];
        debug_assert!(is_instance(id));
        for neigh in conn.neighbours(pos, shape) {
            if !mask[neigh] || out[neigh] != BACKGROUND {
                continue;
            }
            age += 1;
            out[neigh] = id;
            heap.push(FloodElem {
                height: OrderedFloat(elevation[neigh]),
                age,
                pos: neigh,
            });
        }
    }

    Ok(LabelVolume::from_raw(out))
}
