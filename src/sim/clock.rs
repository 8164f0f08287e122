//! Wall-clock interval tracking on injected timestamps

/// Converts a stream of timestamps into whole elapsed periods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    period_ms: u64,
    anchor: Option<u64>,
}

impl IntervalTimer {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            anchor: None,
        }
    }

    /// Number of periods completed since the last poll.
    ///
    /// The first poll only anchors the timer. A timestamp earlier than the
    /// anchor re-anchors without firing.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        let Some(anchor) = self.anchor else {
            self.anchor = Some(now_ms);
            return 0;
        };
        if now_ms < anchor {
            self.anchor = Some(now_ms);
            return 0;
        }
        let periods = (now_ms - anchor) / self.period_ms;
        self.anchor = Some(anchor + periods * self.period_ms);
        u32::try_from(periods).unwrap_or(u32::MAX)
    }
}
