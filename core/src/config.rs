//! Explicit configuration for races and supervised runs.
//!
//! Nothing here is process-global; callers build a config and pass it in.

use std::time::Duration;

use deadline_types::InterruptKind;

/// Budget both programs run under unless told otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Name greeted when the user does not answer in time.
pub const DEFAULT_FALLBACK_NAME: &str = "Default Name";

/// Settings for the name prompt race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetConfig {
    pub timeout: Duration,
    pub fallback_name: String,
}

impl Default for GreetConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
        }
    }
}

impl GreetConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fallback_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_name = name.into();
        self
    }
}

/// Settings for a supervised command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperviseConfig {
    pub timeout: Duration,
    /// Interrupt kinds that cancel the run early.
    pub interrupts: Vec<InterruptKind>,
}

impl Default for SuperviseConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interrupts: InterruptKind::DEFAULT_SET.to_vec(),
        }
    }
}

impl SuperviseConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_interrupts(mut self, kinds: impl IntoIterator<Item = InterruptKind>) -> Self {
        self.interrupts = kinds.into_iter().collect();
        self
    }
}
