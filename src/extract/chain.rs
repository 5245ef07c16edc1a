//! Ordered strategy chains
//!
//! A chain holds strategies sharing one signature and returns the value of the
//! first strategy that yields one. Later strategies are never consulted once a
//! strategy has produced a value, and values are never merged.

use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Signature shared by every extraction strategy
///
/// A strategy returns `None` when its layout is absent or produced nothing;
/// it never returns `Some` of an empty value.
pub type StrategyFn<T> = fn(&Html) -> Option<T>;

/// A named extraction rule
pub struct Strategy<T> {
    /// Stable identifier reported with the value it produced
    pub id: &'static str,
    run: StrategyFn<T>,
}

impl<T> Strategy<T> {
    pub const fn new(id: &'static str, run: StrategyFn<T>) -> Self {
        Self { id, run }
    }

    /// Runs this strategy alone
    pub fn apply(&self, document: &Html) -> Option<T> {
        (self.run)(document)
    }
}

impl<T> fmt::Debug for Strategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").field("id", &self.id).finish()
    }
}

/// A value together with the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainHit<T> {
    pub strategy_id: &'static str,
    pub value: T,
}

/// Strategies tried in priority order, highest first
#[derive(Debug)]
pub struct StrategyChain<T> {
    strategies: Vec<Strategy<T>>,
}

impl<T> StrategyChain<T> {
    /// Creates a chain; the order of `strategies` is the priority order
    pub fn new(strategies: Vec<Strategy<T>>) -> Self {
        Self { strategies }
    }

    /// Returns the number of strategies in the chain
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if the chain has no strategies
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Returns the strategy ids in priority order
    pub fn ids(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.id).collect()
    }

    /// Runs strategies in order and stops at the first one yielding a value
    pub fn run(&self, document: &Html) -> Option<ChainHit<T>> {
        for strategy in &self.strategies {
            if let Some(value) = strategy.apply(document) {
                tracing::trace!(strategy = strategy.id, "Strategy matched");
                return Some(ChainHit {
                    strategy_id: strategy.id,
                    value,
                });
            }
            tracing::trace!(strategy = strategy.id, "Strategy yielded nothing");
        }
        None
    }
}

/// Parses a CSS selector, returning None for an invalid one
pub(crate) fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Concatenated, trimmed text content of an element
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The next sibling that is an element, skipping text and comments
pub(crate) fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Wraps a collected list so an empty one reads as "nothing found"
pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
