//! Governance parameters.

use serde::{Deserialize, Serialize};

/// Length of the voting window: one day.
pub const VOTING_PERIOD_SECS: u64 = 86_400;

/// What `execute_proposal` does with a proposal that was already executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionPolicy {
    /// Refuse with `ALREADY_EXECUTED`.
    #[default]
    RejectRepeat,
    /// Recompute and announce the winner again.
    AllowRepeat,
}

/// Tunables fixed at deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Seconds after creation during which votes are accepted.
    #[serde(default = "default_voting_period")]
    pub voting_period_secs: u64,

    #[serde(default)]
    pub execution_policy: ExecutionPolicy,
}

fn default_voting_period() -> u64 {
    VOTING_PERIOD_SECS
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            voting_period_secs: default_voting_period(),
            execution_policy: ExecutionPolicy::default(),
        }
    }
}
