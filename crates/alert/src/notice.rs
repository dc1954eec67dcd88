use chrono::{DateTime, TimeDelta, Utc};
use viewzenix_core::notify::entity::Notification;

/// # Summary
/// 页面上的短暂提示。同一时刻最多一条，到期或手动关闭后消失。
///
/// # Invariants
/// - 到期只是一个与当前时间比较的标记，不存在后台定时任务。
/// - 新通知整体替换旧通知。
pub struct NotificationCenter {
    ttl: TimeDelta,
    active: Option<ActiveNotification>,
}

struct ActiveNotification {
    notification: Notification,
    // None 表示到期时间超出可表示范围，即永不过期
    expires_at: Option<DateTime<Utc>>,
}

impl NotificationCenter {
    /// # Arguments
    /// * `dismiss_after_ms` - 自动消失前的显示时长。
    pub fn new(dismiss_after_ms: u64) -> Self {
        let ttl = i64::try_from(dismiss_after_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX);
        Self { ttl, active: None }
    }

    pub fn show(&mut self, notification: Notification, now: DateTime<Utc>) {
        self.active = Some(ActiveNotification {
            notification,
            expires_at: now.checked_add_signed(self.ttl),
        });
    }

    /// 当前仍在显示期内的通知
    pub fn current(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.active
            .as_ref()
            .filter(|a| a.expires_at.is_none_or(|at| now < at))
            .map(|a| &a.notification)
    }

    pub fn dismiss(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewzenix_core::common::{FakeClockProvider, TimeProvider};

    #[test]
    fn test_notification_expires_after_delay() {
        let clock = FakeClockProvider::from_millis(1_000_000);
        let mut center = NotificationCenter::new(3000);

        center.show(Notification::success("copied"), clock.now());
        assert!(center.current(clock.now()).is_some());

        clock.advance(TimeDelta::milliseconds(2999));
        assert!(center.current(clock.now()).is_some());

        clock.advance(TimeDelta::milliseconds(1));
        assert!(center.current(clock.now()).is_none());
    }

    #[test]
    fn test_new_notification_replaces_old() {
        let clock = FakeClockProvider::from_millis(0);
        let mut center = NotificationCenter::new(3000);

        center.show(Notification::success("first"), clock.now());
        clock.advance(TimeDelta::milliseconds(2000));
        center.show(Notification::error("second"), clock.now());
        clock.advance(TimeDelta::milliseconds(2000));

        let current = center.current(clock.now()).unwrap();
        assert_eq!(current.message, "second");
        assert!(!current.is_success());
    }

    #[test]
    fn test_dismiss_and_huge_delay() {
        let clock = FakeClockProvider::from_millis(0);
        let mut center = NotificationCenter::new(u64::MAX);

        center.show(Notification::success("sticky"), clock.now());
        clock.advance(TimeDelta::days(365));
        assert!(center.current(clock.now()).is_some());

        center.dismiss();
        assert!(center.current(clock.now()).is_none());
    }
}
