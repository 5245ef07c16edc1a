//! Rate-limited detail page dispatch
//!
//! Every quest gets a [`RequestId`] equal to its discovery position. The
//! dispatcher keeps the `RequestId -> QuestRef` table; fetch lanes only carry
//! the id and the URL, and each completion is matched back through the table
//! before it reaches the result handler.

use crate::crawler::fetcher::{FetchError, FetchedPage, PageFetcher};
use crate::crawler::scheduler::{PacingPolicy, Scheduler};
use crate::quest::QuestRef;
use crate::url::{extract_domain, is_allowed_domain};
use futures::future::join_all;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use url::Url;

/// Correlation token of one dispatched fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(usize);

impl RequestId {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    /// Discovery position of the quest this request was made for
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

type Completion = (RequestId, Result<FetchedPage, FetchError>);

/// Requests queued for one domain, in discovery order
struct Lane {
    domain: String,
    requests: Vec<(RequestId, Url)>,
}

/// Issues one fetch per quest under per-domain pacing
pub struct Dispatcher<'a, F> {
    fetcher: &'a F,
    scheduler: Scheduler,
    allowed_domains: Vec<String>,
}

impl<'a, F: PageFetcher> Dispatcher<'a, F> {
    /// Creates a dispatcher that allows every domain
    pub fn new(fetcher: &'a F, policy: PacingPolicy) -> Self {
        Self {
            fetcher,
            scheduler: Scheduler::new(policy),
            allowed_domains: Vec::new(),
        }
    }

    /// Restricts fetching to the given hosts
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = domains;
        self
    }

    /// Returns the scheduler holding the pacing state
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Fetches every quest's detail page and reports each outcome
    ///
    /// Requests to one domain run one at a time, spaced by the pacing policy
    /// whether or not the previous request succeeded. Domains are independent
    /// lanes, so `on_result` may see completions out of discovery order; the
    /// `RequestId` it receives is the quest's discovery position. Quests on a
    /// domain outside the allowed list are reported as
    /// [`FetchError::DomainNotAllowed`] without a request.
    ///
    /// Returns once every quest has been reported.
    pub async fn dispatch<H>(&self, quests: Vec<QuestRef>, mut on_result: H)
    where
        H: FnMut(RequestId, QuestRef, Result<FetchedPage, FetchError>),
    {
        let mut pending: HashMap<RequestId, QuestRef> = HashMap::with_capacity(quests.len());
        let mut lanes: Vec<Lane> = Vec::new();
        let mut lane_index: HashMap<String, usize> = HashMap::new();
        let mut rejected = Vec::new();

        for (position, quest) in quests.into_iter().enumerate() {
            let id = RequestId::new(position);

            let domain = match extract_domain(&quest.link) {
                Some(domain) if is_allowed_domain(&quest.link, &self.allowed_domains) => domain,
                _ => {
                    rejected.push((id, quest));
                    continue;
                }
            };

            let slot = *lane_index.entry(domain.clone()).or_insert_with(|| {
                lanes.push(Lane {
                    domain,
                    requests: Vec::new(),
                });
                lanes.len() - 1
            });
            lanes[slot].requests.push((id, quest.link.clone()));
            pending.insert(id, quest);
        }

        for (id, quest) in rejected {
            tracing::warn!(request = %id, url = %quest.link, "Quest link is outside the allowed domains");
            let error = FetchError::DomainNotAllowed {
                url: quest.link.to_string(),
            };
            on_result(id, quest, Err(error));
        }

        tracing::info!(
            requests = pending.len(),
            domains = lanes.len(),
            "Dispatching detail page requests"
        );

        let (tx, mut rx) = unbounded_channel::<Completion>();
        let lanes_done = join_all(lanes.into_iter().map(|lane| self.run_lane(lane, tx.clone())));
        drop(tx);

        let deliver = async {
            while let Some((id, result)) = rx.recv().await {
                match pending.remove(&id) {
                    Some(quest) => on_result(id, quest, result),
                    None => tracing::warn!(request = %id, "Completion for an unknown request"),
                }
            }
        };

        tokio::join!(lanes_done, deliver);

        if !pending.is_empty() {
            tracing::warn!(
                unanswered = pending.len(),
                "Some requests never reported a completion"
            );
        }
    }

    /// Fetches one domain's requests sequentially
    async fn run_lane(&self, lane: Lane, results: UnboundedSender<Completion>) {
        for (id, url) in lane.requests {
            self.scheduler.wait_turn(&lane.domain).await;

            tracing::debug!(request = %id, url = %url, "Fetching detail page");
            let result = self.fetcher.fetch(&url).await;
            self.scheduler.record_completion(&lane.domain);

            if results.send((id, result)).is_err() {
                break;
            }
        }
    }
}
