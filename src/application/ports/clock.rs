use chrono::{DateTime, FixedOffset};

/// Source of the timestamps stamped onto job records and log lines.
///
/// Injected so the lifecycle components stay testable without wall-clock
/// dependence.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}
