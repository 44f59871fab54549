use dao_types::Address;
use thiserror::Error;

use crate::proposal::ProposalId;

/// Rejections raised by the governance registry.
///
/// Every variant renders as `CODE: detail`, where `CODE` is the stable tag
/// returned by [`GovernanceError::code`].
#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("NOT_A_TOKEN_HOLDER: {0} holds no tokens")]
    NotATokenHolder(Address),

    #[error("ALREADY_VOTED: {voter} has already voted on proposal {proposal}")]
    AlreadyVoted { proposal: ProposalId, voter: Address },

    #[error("INACTIVE_PROPOSAL: voting on proposal {0} has closed")]
    InactiveProposal(ProposalId),

    #[error("ACTIVE_PROPOSAL: proposal {0} is still open for voting")]
    ActiveProposal(ProposalId),

    #[error("ALREADY_EXECUTED: proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("PROPOSAL_NOT_FOUND: no proposal at index {0}")]
    ProposalNotFound(ProposalId),

    #[error("INVALID_CHOICE: {0:?} is not accept (0), reject (1) or abstain (2)")]
    InvalidChoice(String),

    #[error("TALLY_OVERFLOW: vote weight overflows the tally of proposal {0}")]
    TallyOverflow(ProposalId),

    #[error("SNAPSHOT: {0}")]
    Snapshot(String),
}

impl GovernanceError {
    /// Stable machine-readable tag for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotATokenHolder(_) => "NOT_A_TOKEN_HOLDER",
            Self::AlreadyVoted { .. } => "ALREADY_VOTED",
            Self::InactiveProposal(_) => "INACTIVE_PROPOSAL",
            Self::ActiveProposal(_) => "ACTIVE_PROPOSAL",
            Self::AlreadyExecuted(_) => "ALREADY_EXECUTED",
            Self::ProposalNotFound(_) => "PROPOSAL_NOT_FOUND",
            Self::InvalidChoice(_) => "INVALID_CHOICE",
            Self::TallyOverflow(_) => "TALLY_OVERFLOW",
            Self::Snapshot(_) => "SNAPSHOT",
        }
    }
}
