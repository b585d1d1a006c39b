use chrono::{DateTime, FixedOffset, Utc};

use crate::application::ports::Clock;

/// Wall clock pinned to a fixed UTC offset.
///
/// Job timestamps are for audit display against the cluster's own logs, so
/// they are rendered in the deployment timezone rather than the host's.
pub struct FixedOffsetClock {
    offset: FixedOffset,
}

impl FixedOffsetClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for FixedOffsetClock {
    fn default() -> Self {
        // UTC+8, the timezone of the clusters this console fronts.
        let offset = FixedOffset::east_opt(8 * 3600).expect("valid fixed offset");
        Self { offset }
    }
}

impl Clock for FixedOffsetClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}
