//! 程序运行函数.

use crate::profile::Profile;
use crate::result::AblationResult;
use crate::source::Source;
use cell_berry::prelude::*;
use std::thread;

/// 以 `method` 处理 `source` 中的全部数据.
fn profile_method(name: &str, method: InstanceMethod, source: &Source) -> Profile {
    let mut profile = Profile::new();
    for index in 0..source.len() {
        let volume = match source.get(index) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("{name}: 读取第 {index} 个数据失败: {e}");
                profile.count_failed();
                continue;
            }
        };
        log::info!("{name}: volume {index} {:?}...", volume.dim());

        profile.target_start();
        let labels = method.segment(&volume);
        profile.target_elapsed();

        match labels {
            Ok(l) => profile.count_instances(l.instance_count()),
            Err(e) => {
                log::warn!("{name}: 第 {index} 个数据提取失败: {e}");
                profile.count_failed();
            }
        }
    }
    profile.finish()
}

/// 实际运行.
pub fn run() -> AblationResult {
    let source = Source::from_env_or_phantom().expect("Loading dataset config error");
    log::info!("共 {} 个概率体数据, {} 个可用核心.", source.len(), utils::cpus());

    println!("Running ablation studies...");
    let methods = [
        InstanceMethod::from(ConnectedParams::default()),
        InstanceMethod::from(WatershedParams::default()),
    ];
    let source = &source;
    thread::scope(|s| {
        let handles = methods.map(|m| (m.name(), s.spawn(move || profile_method(m.name(), m, source))));

        handles
            .into_iter()
            .map(|(name, th)| (name, th.join().expect("Thread joining error")))
            .collect()
    })
}
