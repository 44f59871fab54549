//! Weighted vote totals and winner selection.

use crate::vote::VoteChoice;
use dao_types::TokenAmount;
use serde::{Deserialize, Serialize};

/// The three weighted totals of one proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub accept: TokenAmount,
    pub reject: TokenAmount,
    pub abstain: TokenAmount,
}

impl Tally {
    pub fn get(&self, choice: VoteChoice) -> TokenAmount {
        match choice {
            VoteChoice::Accept => self.accept,
            VoteChoice::Reject => self.reject,
            VoteChoice::Abstain => self.abstain,
        }
    }

    /// This tally with `weight` added to `choice`, or `None` on overflow.
    pub fn with_vote(&self, choice: VoteChoice, weight: TokenAmount) -> Option<Self> {
        let mut next = *self;
        let bucket = match choice {
            VoteChoice::Accept => &mut next.accept,
            VoteChoice::Reject => &mut next.reject,
            VoteChoice::Abstain => &mut next.abstain,
        };
        *bucket = bucket.checked_add(weight)?;
        Some(next)
    }

    pub fn total(&self) -> Option<TokenAmount> {
        self.accept
            .checked_add(self.reject)?
            .checked_add(self.abstain)
    }

    /// The winning choice.
    ///
    /// Ties resolve toward the later choice: abstain beats an equal reject or
    /// accept, and reject beats an equal accept. An empty tally therefore
    /// resolves to abstain.
    pub fn winner(&self) -> VoteChoice {
        if self.abstain >= self.reject && self.abstain >= self.accept {
            VoteChoice::Abstain
        } else if self.reject >= self.accept {
            VoteChoice::Reject
        } else {
            VoteChoice::Accept
        }
    }
}
