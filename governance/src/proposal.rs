//! Governance proposals and their lifecycle.

use crate::tally::Tally;
use dao_types::{Address, Timestamp, Title, TokenAmount};
use serde::{Deserialize, Serialize};

/// Zero-based position of a proposal in the registry. Never reused.
pub type ProposalId = u64;

/// Where a proposal is in its lifecycle. Derived from the clock, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Voting window open; execution refused.
    Active,
    /// Window elapsed; votes refused, execution allowed.
    VotingClosed,
    /// Executed at least once.
    Executed,
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub title: Title,
    /// Holder that created it.
    pub proposer: Address,
    pub created_at: Timestamp,
    /// Weighted totals. Only grow until execution.
    pub accept: TokenAmount,
    pub reject: TokenAmount,
    pub abstain: TokenAmount,
    pub executed: bool,
}

impl Proposal {
    pub(crate) fn new(title: Title, proposer: Address, created_at: Timestamp) -> Self {
        Self {
            title,
            proposer,
            created_at,
            accept: TokenAmount::ZERO,
            reject: TokenAmount::ZERO,
            abstain: TokenAmount::ZERO,
            executed: false,
        }
    }

    pub fn tally(&self) -> Tally {
        Tally {
            accept: self.accept,
            reject: self.reject,
            abstain: self.abstain,
        }
    }

    pub(crate) fn set_tally(&mut self, tally: Tally) {
        self.accept = tally.accept;
        self.reject = tally.reject;
        self.abstain = tally.abstain;
    }

    /// First instant at which votes are refused.
    pub fn voting_ends_at(&self, voting_period_secs: u64) -> Timestamp {
        self.created_at.saturating_add_secs(voting_period_secs)
    }

    pub fn is_voting_open(&self, voting_period_secs: u64, now: Timestamp) -> bool {
        !self.created_at.has_expired(voting_period_secs, now)
    }

    pub fn status(&self, voting_period_secs: u64, now: Timestamp) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if self.is_voting_open(voting_period_secs, now) {
            ProposalStatus::Active
        } else {
            ProposalStatus::VotingClosed
        }
    }
}
