use std::time::{Duration, Instant};

/// Tracks the pacing of one domain during crawling
///
/// The gap before the next request is drawn when a request completes, so a
/// single jitter sample applies to each interval between two requests.
#[derive(Debug, Clone)]
pub struct DomainState {
    /// Number of requests completed against this domain
    pub request_count: u32,

    /// When the last request to this domain completed
    pub last_completed: Option<Instant>,

    /// Required spacing after `last_completed`
    pub next_gap: Duration,
}

impl DomainState {
    /// Creates a new DomainState with default values
    pub fn new() -> Self {
        Self {
            request_count: 0,
            last_completed: None,
            next_gap: Duration::ZERO,
        }
    }

    /// Checks if a request can be made to this domain at `now`
    pub fn can_request(&self, now: Instant) -> bool {
        self.time_until_next_request(now).is_none()
    }

    /// Records a finished request (successful or not) and the gap to keep
    /// before the next one
    pub fn record_completion(&mut self, now: Instant, gap: Duration) {
        self.request_count += 1;
        self.last_completed = Some(now);
        self.next_gap = gap;
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_completed?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.next_gap {
            Some(self.next_gap - elapsed)
        } else {
            None
        }
    }
}

impl Default for DomainState {
    fn default() -> Self {
        Self::new()
    }
}
