use serde::{Deserialize, Serialize};

/// What a search returns when matches exist but no limit was given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingLimitPolicy {
    /// Return no songs and report [`EmptyReason::LimitNotSupplied`].
    ///
    /// This is the long-standing behavior and remains the default.
    ///
    /// [`EmptyReason::LimitNotSupplied`]: crate::EmptyReason::LimitNotSupplied
    #[default]
    Withhold,
    /// Return every match, uncapped.
    ReturnAll,
}

/// Per-call search options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results. `None` means no cap.
    pub limit: Option<usize>,
    pub missing_limit: MissingLimitPolicy,
}

impl SearchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_missing_limit(mut self, policy: MissingLimitPolicy) -> Self {
        self.missing_limit = policy;
        self
    }
}
