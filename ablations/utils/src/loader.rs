//! 对 `cell-berry::dataset` 的更一层封装. 提供更直接的预测归档加载器.

use cell_berry::dataset::{self, DatasetResult, PredictionArchive};
use std::env;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// 获取预测归档路径.
///
/// 1. 若环境变量 `$CELLSEG_PRED_NPZ` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/cellseg/predictions.npz`.
///
/// 两者都不可用时返回 `None`.
pub fn archive_path_from_env_or_home() -> Option<PathBuf> {
    match env::var("CELLSEG_PRED_NPZ") {
        Ok(d) if !d.is_empty() => Some(PathBuf::from(d)),
        _ => dataset::home_dataset_dir_with(["cellseg", "predictions.npz"]),
    }
}

/// 以 `crate::cpus()` 个工作通道 (最多 64 个) 打开预测归档.
pub fn archive<P: AsRef<Path>>(path: P) -> DatasetResult<PredictionArchive> {
    let workers = crate::cpus().clamp(1, PredictionArchive::MAX_WORKERS);
    let workers = NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN);
    PredictionArchive::new(workers, path)
}

/// 从 `$CELLSEG_PRED_NPZ` 或者 `$HOME/dataset/cellseg/predictions.npz` 打开预测归档.
///
/// 路径不存在时返回 `None`.
pub fn archive_from_env_or_home() -> Option<DatasetResult<PredictionArchive>> {
    let path = archive_path_from_env_or_home()?;
    path.is_file().then(|| archive(path))
}
