//! 算法运行统计.

use std::time::{Duration, Instant};

/// ablation/benchmark 计时器.
///
/// 该计时器支持 "中途中断" 与 "结束中断, 继续开始计时".
#[derive(Clone, Debug)]
struct AccTimer {
    consumed: Duration,
    since: Instant,
}

impl AccTimer {
    /// 初始化计时器. 初始化时会视为已经开始计时 (`self.start()`).
    #[inline]
    fn new() -> Self {
        Self {
            consumed: Duration::ZERO,
            since: Instant::now(),
        }
    }

    /// 开始计时.
    #[inline]
    fn start(&mut self) {
        self.since = Instant::now();
    }

    /// 结束计时, 并将这一区间的时间累加. 返回本轮计时时长.
    ///
    /// # 注意
    ///
    /// 上一次调用必须是 `self.start()`, 否则计算时间值无意义.
    #[inline]
    fn elapsed(&mut self) -> Duration {
        let d = self.since.elapsed();
        self.consumed += d;
        d
    }

    /// 获得总共累计下来的时间综合 (以微秒为单位).
    #[inline]
    fn get_total_us(&self) -> u64 {
        self.consumed.as_micros() as u64
    }
}

/// 一种实例提取方法在整批数据上的统计.
#[derive(Clone, Debug)]
pub struct Profile {
    /// 结果为全背景的概率体数据个数.
    trivial: u64,

    /// 结果中至少含有一个实例的概率体数据个数.
    target: u64,

    /// 读取或提取失败的概率体数据个数.
    failed: u64,

    /// 提取得到的实例总个数.
    instances: u64,

    /// 实例提取花费的总时间 (不含读取).
    target_time: AccTimer,

    /// 整个任务花费的总时间 (包括读取).
    real_time: AccTimer,

    /// 最耗时的一次提取所消耗的时间.
    most: Option<Duration>,
}

impl Profile {
    /// 初始化.
    #[inline]
    pub fn new() -> Self {
        Self {
            trivial: 0,
            target: 0,
            failed: 0,
            instances: 0,
            target_time: AccTimer::new(),
            real_time: AccTimer::new(),
            most: None,
        }
    }

    /// 开始一次提取计时.
    #[inline]
    pub fn target_start(&mut self) {
        self.target_time.start();
    }

    /// 结束一次提取计时.
    #[inline]
    pub fn target_elapsed(&mut self) {
        let d = self.target_time.elapsed();
        self.most = Some(self.most.map_or(d, |m| m.max(d)));
    }

    /// 记录一次提取结果中的实例个数.
    #[inline]
    pub fn count_instances(&mut self, n: usize) {
        match n {
            0 => self.trivial += 1,
            n => {
                self.target += 1;
                self.instances += n as u64;
            }
        }
    }

    /// 记录一次失败.
    #[inline]
    pub fn count_failed(&mut self) {
        self.failed += 1;
    }

    /// 结束全部计时.
    #[inline]
    pub fn finish(mut self) -> Self {
        self.real_time.elapsed();
        self
    }

    /// 获得全背景结果个数.
    #[inline]
    pub fn get_trivial(&self) -> u64 {
        self.trivial
    }

    /// 获得含实例结果个数.
    #[inline]
    pub fn get_target(&self) -> u64 {
        self.target
    }

    /// 获得失败个数.
    #[inline]
    pub fn get_failed(&self) -> u64 {
        self.failed
    }

    /// 获得实例总个数.
    #[inline]
    pub fn get_instances(&self) -> u64 {
        self.instances
    }

    /// 以微秒为单位获得提取的总花费时间.
    #[inline]
    pub fn get_target_time_us(&self) -> u64 {
        self.target_time.get_total_us()
    }

    /// 以微秒为单位获得任务的总自然时间.
    #[inline]
    pub fn get_real_time_us(&self) -> u64 {
        self.real_time.get_total_us()
    }

    /// 以微秒为单位获得每次提取的平均时间.
    pub fn get_avg_target_time_us(&self) -> Option<f64> {
        match self.trivial + self.target {
            0 => None,
            n => Some(self.get_target_time_us() as f64 / n as f64),
        }
    }

    /// 获得含实例结果的平均实例个数.
    pub fn get_avg_instances(&self) -> Option<f64> {
        match self.target {
            0 => None,
            n => Some(self.instances as f64 / n as f64),
        }
    }

    /// 获取最耗时的一次提取所消耗的时间.
    #[inline]
    pub fn get_most_time_consuming(&self) -> Option<Duration> {
        self.most
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}
