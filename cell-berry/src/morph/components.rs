use super::Connectivity;
use crate::consts::BACKGROUND;
use crate::{LabelId, LabelVolume};
use ndarray::{Array3, ArrayView3};
use std::collections::VecDeque;

/// 按照 `conn` 邻接规则标记 `mask` 中所有前景连通域.
///
/// 两个前景体素 `p1` 和 `p2` 属于同一个实例, 当且仅当存在一条从 `p1` 到 `p2`
/// 的相邻路径, 且路径上的所有体素都是前景. 背景保持为 0.
///
/// # 返回值
///
/// 编号为 `1..=N`, 按各连通域首个体素的行优先顺序分配 (即扫描序中先出现的连通域
/// 编号更小). 对同一输入, 结果总是相同的.
pub fn label_components(mask: ArrayView3<'_, bool>, conn: Connectivity) -> LabelVolume {
    let shape = mask.dim();
    let mut labels = Array3::<LabelId>::from_elem(shape, BACKGROUND);
    let mut next: LabelId = 0;
    let mut bfs_q = VecDeque::with_capacity(64);

    for (pos, &fg) in mask.indexed_iter() {
        if !fg || labels[pos] != BACKGROUND {
            continue;
        }
        next += 1;
        labels[pos] = next;
        bfs_q.push_back(pos);

        // bfs. 入队即标记, 避免重复入队.
        while let Some(cur) = bfs_q.pop_front() {
            for neigh in conn.neighbours(cur, shape) {
                if mask[neigh] && labels[neigh] == BACKGROUND {
                    labels[neigh] = next;
                    bfs_q.push_back(neigh);
                }
            }
        }
    }

    log::trace!("标记连通域 {next} 个 ({conn:?}).");
    LabelVolume::from_raw(labels)
}
