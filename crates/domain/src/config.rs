//! Service configuration.

use crate::sequence::SequenceConfig;

/// Tunables for [`QuotationService`](crate::QuotationService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// How sequence numbers are issued and rendered.
    pub sequence: SequenceConfig,

    /// Number of records `get_recent` returns when no limit is given.
    pub recent_limit: usize,

    /// Key the full collection is published under. The original snapshot
    /// goes under `<mirror_key>_original`.
    pub mirror_key: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            sequence: SequenceConfig::default(),
            recent_limit: 10,
            mirror_key: "quotations".to_string(),
        }
    }
}
