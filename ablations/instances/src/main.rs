//! 实例提取消融实验: 在同一批预测上对比连通域与种子分水岭两种方法.
//!
//! 数据来源于 `$CELLSEG_PRED_NPZ` 或 `$HOME/dataset/cellseg/predictions.npz`;
//! 两者都不存在时使用合成数据.

mod profile;
mod result;
mod runner;
mod source;

use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .expect("Logger initialization error");

    utils::sep();
    runner::run().analyze();
}
