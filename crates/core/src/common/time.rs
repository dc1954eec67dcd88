use chrono::{DateTime, TimeDelta, Utc};
use std::sync::RwLock;

/// # Summary
/// 时间供给器接口，用于隔离物理系统时钟。
/// 告警时间戳与通知过期判断都必须通过此接口获取当前时间。
pub trait TimeProvider: Send + Sync {
    /// 获取当前时间
    fn now(&self) -> DateTime<Utc>;

    /// 当前时间的毫秒级 Unix 时间戳
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// # Summary
/// 真实时钟，直接返回操作系统当前时间。
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// # Summary
/// 测试专用虚拟时钟，允许主动拨快或回退时间。
///
/// # Invariants
/// - 内部利用 `RwLock` 保证跨线程读写安全；锁中毒时仍读取内部值，不会 panic。
pub struct FakeClockProvider {
    current_time: RwLock<DateTime<Utc>>,
}

impl FakeClockProvider {
    /// 使用指定的初始时间创建虚拟时钟
    pub fn new(initial_time: DateTime<Utc>) -> Self {
        Self {
            current_time: RwLock::new(initial_time),
        }
    }

    /// 使用毫秒时间戳创建虚拟时钟，非法时间戳回落到 Unix 纪元
    pub fn from_millis(ms: i64) -> Self {
        Self::new(DateTime::from_timestamp_millis(ms).unwrap_or_default())
    }

    /// 强制修改时钟的当前时间
    pub fn set_time(&self, new_time: DateTime<Utc>) {
        let mut time = self
            .current_time
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *time = new_time;
    }

    /// 将时钟向前（或向后，delta 为负时）拨动
    pub fn advance(&self, delta: TimeDelta) {
        let mut time = self
            .current_time
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *time += delta;
    }
}

impl TimeProvider for FakeClockProvider {
    fn now(&self) -> DateTime<Utc> {
        *self
            .current_time
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_clock_advance() {
        let clock = FakeClockProvider::from_millis(1_713_746_400_000);
        assert_eq!(clock.now_ms(), 1_713_746_400_000);

        clock.advance(TimeDelta::milliseconds(1500));
        assert_eq!(clock.now_ms(), 1_713_746_401_500);

        clock.advance(TimeDelta::milliseconds(-500));
        assert_eq!(clock.now_ms(), 1_713_746_401_000);
    }
}
