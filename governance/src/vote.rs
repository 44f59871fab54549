//! Vote choices and per-voter records.

use crate::error::GovernanceError;
use dao_types::{Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three ways a holder can vote. Discriminants match the wire encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Accept = 0,
    Reject = 1,
    Abstain = 2,
}

impl VoteChoice {
    pub const ALL: [Self; 3] = [Self::Accept, Self::Reject, Self::Abstain];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Abstain => "abstain",
        }
    }
}

impl TryFrom<u8> for VoteChoice {
    type Error = GovernanceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Accept),
            1 => Ok(Self::Reject),
            2 => Ok(Self::Abstain),
            other => Err(GovernanceError::InvalidChoice(other.to_string())),
        }
    }
}

/// Accepts either the name (`"accept"`, case-insensitive) or the code (`"0"`).
impl FromStr for VoteChoice {
    type Err = GovernanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<u8>() {
            return Self::try_from(code);
        }
        match s.to_ascii_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            "abstain" => Ok(Self::Abstain),
            _ => Err(GovernanceError::InvalidChoice(s.to_string())),
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recorded vote. At most one exists per (proposal, voter).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub choice: VoteChoice,
    /// Voter's balance when the vote was cast.
    pub weight: TokenAmount,
    pub cast_at: Timestamp,
}
