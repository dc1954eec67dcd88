pub mod time;

pub use time::{FakeClockProvider, RealTimeProvider, TimeProvider};
