//! Ordered collection of harvest results
//!
//! Completions arrive in whatever order the fetch lanes finish. The
//! aggregator keeps one slot per dispatched quest, indexed by the request id,
//! so the final list follows discovery order.

use crate::crawler::{FetchError, RequestId};
use crate::quest::{QuestDetail, QuestRef};

/// A quest whose detail page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedQuest {
    pub id: RequestId,
    pub quest: QuestRef,
    pub error: FetchError,
}

#[derive(Debug)]
enum Slot {
    Detail(QuestDetail),
    Failed(FailedQuest),
}

/// Collects per-quest outcomes and restores discovery order
#[derive(Debug, Default)]
pub struct ResultAggregator {
    slots: Vec<Option<Slot>>,
}

impl ResultAggregator {
    /// Creates an aggregator sized for `expected` dispatched quests
    pub fn new(expected: usize) -> Self {
        let mut slots = Vec::with_capacity(expected);
        slots.resize_with(expected, || None);
        Self { slots }
    }

    /// Stores the extracted record of request `id`
    pub fn record(&mut self, id: RequestId, detail: QuestDetail) {
        self.store(id, Slot::Detail(detail));
    }

    /// Stores the failure of request `id`
    pub fn record_failure(&mut self, id: RequestId, quest: QuestRef, error: FetchError) {
        self.store(id, Slot::Failed(FailedQuest { id, quest, error }));
    }

    /// Number of requests that have reported
    pub fn completed(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the records in discovery order, skipping failures
    pub fn finalize(self) -> Vec<QuestDetail> {
        self.into_parts().0
    }

    /// Splits into ordered records and ordered failures
    pub fn into_parts(self) -> (Vec<QuestDetail>, Vec<FailedQuest>) {
        let mut details = Vec::new();
        let mut failures = Vec::new();

        for slot in self.slots.into_iter().flatten() {
            match slot {
                Slot::Detail(detail) => details.push(detail),
                Slot::Failed(failure) => failures.push(failure),
            }
        }

        (details, failures)
    }

    fn store(&mut self, id: RequestId, slot: Slot) {
        let index = id.index();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }

        if self.slots[index].replace(slot).is_some() {
            tracing::warn!(request = %id, "Request reported more than once, keeping the latest");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::Category;
    use url::Url;

    fn quest(name: &str) -> QuestRef {
        QuestRef {
            name: name.to_string(),
            link: Url::parse(&format!("https://gamewith.net/q/{}", name)).unwrap(),
            region: "Liyue".to_string(),
            category: Category::NonReputation,
        }
    }

    fn detail(name: &str) -> QuestDetail {
        QuestDetail::new(&quest(name), Some(2), vec!["Primogem x30".to_string()])
    }

    #[test]
    fn test_finalize_restores_discovery_order() {
        let mut aggregator = ResultAggregator::new(3);
        aggregator.record(RequestId::new(2), detail("c"));
        aggregator.record(RequestId::new(0), detail("a"));
        aggregator.record(RequestId::new(1), detail("b"));

        let names: Vec<String> = aggregator.finalize().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failures_are_kept_apart() {
        let mut aggregator = ResultAggregator::new(3);
        aggregator.record(RequestId::new(2), detail("c"));
        aggregator.record_failure(
            RequestId::new(1),
            quest("b"),
            FetchError::Timeout {
                url: "https://gamewith.net/q/b".to_string(),
            },
        );
        aggregator.record(RequestId::new(0), detail("a"));
        assert_eq!(aggregator.completed(), 3);

        let (details, failures) = aggregator.into_parts();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].name, "a");
        assert_eq!(details[1].name, "c");

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, RequestId::new(1));
        assert_eq!(failures[0].quest.name, "b");
    }

    #[test]
    fn test_unfilled_slots_are_skipped() {
        let mut aggregator = ResultAggregator::new(4);
        aggregator.record(RequestId::new(3), detail("d"));
        assert_eq!(aggregator.completed(), 1);
        assert_eq!(aggregator.finalize().len(), 1);
    }

    #[test]
    fn test_record_beyond_expected_grows() {
        let mut aggregator = ResultAggregator::default();
        aggregator.record(RequestId::new(1), detail("b"));
        aggregator.record(RequestId::new(0), detail("a"));

        let names: Vec<String> = aggregator.finalize().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
