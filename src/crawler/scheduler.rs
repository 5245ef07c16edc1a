//! Scheduler for per-domain request pacing
//!
//! This module handles:
//! - Drawing the delay between two requests to the same domain
//!   (a fixed base plus a random jitter)
//! - Holding each domain's pacing state behind a lock so concurrent fetch
//!   lanes can share it
//! - Sleeping until a domain may receive its next request

use crate::config::CrawlerConfig;
use crate::state::DomainState;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Spacing between two requests to the same domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Always waited
    pub base_delay: Duration,

    /// Upper bound of the uniformly drawn extra delay
    pub max_jitter: Duration,
}

impl PacingPolicy {
    pub fn new(base_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            base_delay,
            max_jitter,
        }
    }

    /// No spacing at all
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Reads the pacing from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.base_delay(), config.max_jitter())
    }

    /// Draws one gap: the base delay plus a fresh jitter sample
    pub fn draw_gap(&self) -> Duration {
        let max_jitter_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if max_jitter_ms == 0 {
            return self.base_delay;
        }

        let jitter_ms = rand::thread_rng().gen_range(0..=max_jitter_ms);
        self.base_delay + Duration::from_millis(jitter_ms)
    }
}

/// Scheduler manages per-domain pacing
///
/// The scheduler coordinates:
/// - Minimum spacing between a completed request and the next dispatch
/// - Per-domain request counts
///
/// Serializing requests within a domain is the caller's job; the scheduler
/// only decides how long to wait.
#[derive(Debug)]
pub struct Scheduler {
    /// Pacing applied to every domain
    policy: PacingPolicy,

    /// Per-domain state tracking
    domain_states: Mutex<HashMap<String, DomainState>>,
}

impl Scheduler {
    /// Creates a new scheduler
    pub fn new(policy: PacingPolicy) -> Self {
        Self {
            policy,
            domain_states: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the pacing policy
    pub fn policy(&self) -> PacingPolicy {
        self.policy
    }

    /// Waits until `domain` may receive its next request
    ///
    /// Returns immediately for a domain that has not been requested yet.
    pub async fn wait_turn(&self, domain: &str) {
        let wait = {
            let states = self
                .domain_states
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            states
                .get(domain)
                .and_then(|state| state.time_until_next_request(Instant::now()))
        };

        if let Some(wait) = wait {
            tracing::trace!("Waiting {:?} before next request to {}", wait, domain);
            tokio::time::sleep(wait).await;
        }
    }

    /// Records that a request to `domain` finished and draws the next gap
    pub fn record_completion(&self, domain: &str) {
        let gap = self.policy.draw_gap();
        let mut states = self
            .domain_states
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        states
            .entry(domain.to_string())
            .or_insert_with(DomainState::new)
            .record_completion(Instant::now(), gap);
    }

    /// Returns the number of completed requests to a domain
    pub fn request_count(&self, domain: &str) -> u32 {
        let states = self
            .domain_states
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        states.get(domain).map_or(0, |state| state.request_count)
    }

    /// Returns a copy of a domain's state
    pub fn domain_state(&self, domain: &str) -> Option<DomainState> {
        let states = self
            .domain_states
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        states.get(domain).cloned()
    }
}
