use super::{DatasetError, DatasetResult};
use crate::ProbVolume;
use ndarray::{Array4, Ix4, OwnedRepr};
use ndarray_npy::NpzReader;
use std::fs::{File, OpenOptions};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 预测结果 npz 归档.
///
/// 该结构可用于建模硬盘上已存储的多个 `(C, Z, Y, X)` 概率体数据 (`f32`) 的压缩文件.
/// 可在多个线程间共享.
pub struct PredictionArchive {
    entries: Vec<Mutex<NpzReader<File>>>,
    turn: AtomicUsize,
}

impl PredictionArchive {
    /// 最大工作通道个数.
    pub const MAX_WORKERS: usize = 64;

    /// 初始化.
    ///
    /// `workers` 指定了底层工作通道的个数, 最大为 [`Self::MAX_WORKERS`]. 系统会从路径 `p`
    /// 打开文件 `workers` 次, 并为每个打开通道指定一个排他入口点 (以期获得更高的并行度).
    pub fn new<P: AsRef<Path>>(workers: NonZeroUsize, p: P) -> DatasetResult<Self> {
        let workers = workers.get();
        if workers > Self::MAX_WORKERS {
            return Err(DatasetError::TooManyWorkers(workers));
        }
        let mut v = Vec::with_capacity(workers);
        for _ in 0..workers {
            let file = OpenOptions::new().read(true).open(p.as_ref())?;
            v.push(Mutex::new(NpzReader::new(file)?));
        }
        log::debug!("打开预测归档 {:?}, {workers} 个工作通道.", p.as_ref());
        Ok(Self {
            entries: v,
            turn: AtomicUsize::new(0),
        })
    }

    /// 通过 npz 索引文件名 `name` 获取概率体数据.
    pub fn volume_by_name(&self, name: &str) -> DatasetResult<Array4<f32>> {
        let data = self.next_entry().by_name::<OwnedRepr<f32>, Ix4>(name)?;
        ProbVolume::new(&data)?;
        Ok(data)
    }

    /// 通过 npz 数值索引获取概率体数据.
    pub fn volume_by_index(&self, index: usize) -> DatasetResult<Array4<f32>> {
        let data = self.next_entry().by_index::<OwnedRepr<f32>, Ix4>(index)?;
        ProbVolume::new(&data)?;
        Ok(data)
    }

    /// 获取底层 npz 文件包含的所有文件名.
    pub fn names(&self) -> DatasetResult<Vec<String>> {
        Ok(self.next_entry().names()?)
    }

    /// 获取底层 npz 文件包含的概率体数据个数.
    pub fn len(&self) -> usize {
        self.next_entry().len()
    }

    /// 归档是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 工作通道个数.
    #[inline]
    pub fn worker_len(&self) -> usize {
        self.entries.len()
    }

    fn next_entry(&self) -> MutexGuard<'_, NpzReader<File>> {
        let slot = self.turn.fetch_add(1, Ordering::Relaxed) % self.worker_len();
        self.entries[slot]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::PredictionArchive;
    use crate::dataset::DatasetError;
    use ndarray::Array4;
    use ndarray_npy::NpzWriter;
    use std::fs::File;
    use std::num::NonZeroUsize;
    use std::path::PathBuf;

    fn write_archive(name: &str) -> (PathBuf, Array4<f32>, Array4<f32>) {
        let mut path = std::env::temp_dir();
        path.push(format!("cell-berry-{}-{name}", std::process::id()));
        let a = Array4::from_shape_fn((1, 2, 3, 4), |(_, z, y, x)| (z * y * x) as f32 / 6.0);
        let b = Array4::from_elem((2, 2, 2, 2), 0.25f32);

        let mut npz = NpzWriter::new(File::create(&path).unwrap());
        npz.add_array("a", &a).unwrap();
        npz.add_array("b", &b).unwrap();
        npz.finish().unwrap();
        (path, a, b)
    }

    #[test]
    fn test_prediction_archive() {
        let (path, a, b) = write_archive("pred.npz");
        let archive = PredictionArchive::new(NonZeroUsize::new(3).unwrap(), &path).unwrap();
        assert_eq!(archive.worker_len(), 3);
        assert_eq!(archive.len(), 2);
        assert!(!archive.is_empty());

        let mut names = archive.names().unwrap();
        names.sort();
        let stems: Vec<&str> = names.iter().map(|n| n.trim_end_matches(".npy")).collect();
        assert_eq!(stems, vec!["a", "b"]);
        assert_eq!(archive.volume_by_name(&names[0]).unwrap(), a);
        assert_eq!(archive.volume_by_name(&names[1]).unwrap(), b);

        let first = archive.volume_by_index(0).unwrap();
        assert!(first == a || first == b);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_prediction_archive_too_many_workers() {
        let e = PredictionArchive::new(NonZeroUsize::new(65).unwrap(), "unused.npz");
        assert!(matches!(e, Err(DatasetError::TooManyWorkers(65))));
    }
}
