//! Client configuration.
//!
//! The defaults reproduce a plain blocking client: no deadline, the caller
//! waits for as long as the transport takes. A thread that calls `send` on a
//! transport that never completes stays blocked forever unless `timeout` is
//! set.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Upper bound on how long `send` waits for the transport to report.
    /// `None` waits without limit.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
