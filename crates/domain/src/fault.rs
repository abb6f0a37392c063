//! Fault reporting.

use std::error::Error;
use std::sync::Mutex;

/// Receives every fault the service observes, before it is recovered from or
/// propagated. Implementations must not fail.
pub trait FaultReporter: Send + Sync {
    /// Reports `error` observed while running the operation named `context`.
    fn report(&self, error: &(dyn Error + 'static), context: &str);
}

/// Reports faults as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFaultReporter;

impl FaultReporter for TracingFaultReporter {
    fn report(&self, error: &(dyn Error + 'static), context: &str) {
        metrics::counter!("faults_reported").increment(1);
        match error.source() {
            Some(source) => {
                tracing::error!(context, error = %error, source = %source, "fault reported")
            }
            None => tracing::error!(context, error = %error, "fault reported"),
        }
    }
}

/// A fault captured by [`RecordingFaultReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedFault {
    pub context: String,
    pub message: String,
}

/// Keeps every reported fault in memory.
#[derive(Debug, Default)]
pub struct RecordingFaultReporter {
    faults: Mutex<Vec<ReportedFault>>,
}

impl RecordingFaultReporter {
    /// Creates an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every fault reported so far.
    pub fn faults(&self) -> Vec<ReportedFault> {
        self.faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the contexts of every fault reported so far.
    pub fn contexts(&self) -> Vec<String> {
        self.faults().into_iter().map(|f| f.context).collect()
    }

    /// Returns true if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.faults().is_empty()
    }
}

impl FaultReporter for RecordingFaultReporter {
    fn report(&self, error: &(dyn Error + 'static), context: &str) {
        self.faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(ReportedFault {
                context: context.to_string(),
                message: error.to_string(),
            });
    }
}
