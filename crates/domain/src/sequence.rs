//! Business-facing sequence numbers.

use std::cmp::Ordering;
use std::sync::Arc;

use record_store::{CounterStore, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fault::FaultReporter;

/// A formatted, business-facing record number (e.g. "1001" or "Q-001001").
///
/// Numbers of the same format order numerically: shorter strings sort first,
/// equal lengths compare lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceNumber(String);

impl SequenceNumber {
    /// Wraps an already formatted number.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for SequenceNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for SequenceNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SequenceNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How sequence numbers are issued and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceConfig {
    /// First value issued for a kind, and the fallback when the counter fails.
    pub start: u64,

    /// Text placed before the digits.
    pub prefix: String,

    /// Minimum number of digits; shorter values are zero-padded.
    pub width: Option<usize>,
}

impl SequenceConfig {
    /// Renders a counter value.
    pub fn format(&self, value: u64) -> SequenceNumber {
        let digits = match self.width {
            Some(width) => format!("{value:0width$}"),
            None => value.to_string(),
        };
        SequenceNumber(format!("{}{digits}", self.prefix))
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            start: 1001,
            prefix: String::new(),
            width: None,
        }
    }
}

/// The counter could not issue a number and the configured start was used
/// instead. The fallback may collide with a number already issued.
#[derive(Debug, Error)]
#[error("Sequence generation failed for {kind}, fell back to {fallback}: {source}")]
pub struct GenerationFault {
    pub kind: String,
    pub fallback: SequenceNumber,
    #[source]
    pub source: StoreError,
}

/// Issues unique, increasing sequence numbers per entity kind.
#[derive(Clone)]
pub struct SequenceNumberGenerator {
    counter: Arc<dyn CounterStore>,
    reporter: Arc<dyn FaultReporter>,
    config: SequenceConfig,
}

impl SequenceNumberGenerator {
    /// Creates a generator over a counter collaborator.
    pub fn new(
        counter: Arc<dyn CounterStore>,
        reporter: Arc<dyn FaultReporter>,
        config: SequenceConfig,
    ) -> Self {
        Self {
            counter,
            reporter,
            config,
        }
    }

    /// Returns the generator's configuration.
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Issues the next number for `kind`.
    ///
    /// Never fails: a counter fault is reported as a [`GenerationFault`] and
    /// the configured start value is returned.
    #[tracing::instrument(skip(self))]
    pub async fn next(&self, kind: &str) -> SequenceNumber {
        match self.counter.next_value(kind, self.config.start).await {
            Ok(value) => self.config.format(value),
            Err(source) => {
                let fallback = self.config.format(self.config.start);
                tracing::warn!(kind, %fallback, "sequence counter failed, using fallback");
                metrics::counter!("sequence_fallbacks").increment(1);
                let fault = GenerationFault {
                    kind: kind.to_string(),
                    fallback: fallback.clone(),
                    source,
                };
                self.reporter.report(&fault, "SequenceNumberGenerator.next");
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::RecordingFaultReporter;
    use async_trait::async_trait;
    use record_store::InMemoryRecordStore;

    struct BrokenCounter;

    #[async_trait]
    impl CounterStore for BrokenCounter {
        async fn next_value(&self, kind: &str, _start: u64) -> record_store::Result<u64> {
            Err(StoreError::CounterOutOfRange {
                kind: kind.to_string(),
            })
        }
    }

    fn generator(counter: Arc<dyn CounterStore>) -> (Arc<RecordingFaultReporter>, SequenceNumberGenerator) {
        let reporter = Arc::new(RecordingFaultReporter::new());
        let generator =
            SequenceNumberGenerator::new(counter, reporter.clone(), SequenceConfig::default());
        (reporter, generator)
    }

    #[test]
    fn format_plain() {
        assert_eq!(SequenceConfig::default().format(1001).as_str(), "1001");
    }

    #[test]
    fn format_with_prefix_and_width() {
        let config = SequenceConfig {
            start: 1,
            prefix: "Q-".to_string(),
            width: Some(6),
        };
        assert_eq!(config.format(42).as_str(), "Q-000042");
        assert_eq!(config.format(1234567).as_str(), "Q-1234567");
    }

    #[test]
    fn sequence_numbers_order_numerically() {
        let a = SequenceNumber::from("999");
        let b = SequenceNumber::from("1000");
        let c = SequenceNumber::from("1001");
        assert!(a < b);
        assert!(b < c);
        assert!(SequenceNumber::from("Q-9") < SequenceNumber::from("Q-10"));
    }

    #[tokio::test]
    async fn issues_start_then_increments() {
        let (reporter, generator) = generator(Arc::new(InMemoryRecordStore::new()));

        assert_eq!(generator.next("quotation").await.as_str(), "1001");
        assert_eq!(generator.next("quotation").await.as_str(), "1002");
        assert_eq!(generator.next("project").await.as_str(), "1001");
        assert!(reporter.is_empty());
    }

    #[tokio::test]
    async fn counter_failure_falls_back_and_reports() {
        let (reporter, generator) = generator(Arc::new(BrokenCounter));

        let number = generator.next("quotation").await;

        assert_eq!(number.as_str(), "1001");
        let faults = reporter.faults();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].context, "SequenceNumberGenerator.next");
        assert!(faults[0].message.contains("fell back to 1001"));
    }

    #[tokio::test]
    async fn interleaved_calls_never_repeat() {
        let (_reporter, generator) = generator(Arc::new(InMemoryRecordStore::new()));

        let calls = (0..25).map(|_| generator.next("quotation"));
        let mut numbers = futures_util::future::join_all(calls).await;
        numbers.sort();
        numbers.dedup();

        assert_eq!(numbers.len(), 25);
        assert_eq!(numbers.first().map(SequenceNumber::as_str), Some("1001"));
        assert_eq!(numbers.last().map(SequenceNumber::as_str), Some("1025"));
    }
}
