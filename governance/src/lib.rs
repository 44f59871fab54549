//! Token-weighted governance.
//!
//! Holders of a fungible token create proposals and vote accept, reject or
//! abstain, weighted by their balance at the moment they vote. Once the
//! voting window of a proposal has elapsed anyone may execute it, which
//! yields the winning choice as a [`WinnerEvent`].
//!
//! One holder, one vote per proposal. No delegation, no quorum.

pub mod engine;
pub mod error;
pub mod event;
pub mod params;
pub mod proposal;
pub mod snapshot;
pub mod tally;
pub mod vote;

pub use engine::GovernanceRegistry;
pub use error::GovernanceError;
pub use event::WinnerEvent;
pub use params::{ExecutionPolicy, GovernanceParams, VOTING_PERIOD_SECS};
pub use proposal::{Proposal, ProposalId, ProposalStatus};
pub use snapshot::RegistrySnapshot;
pub use tally::Tally;
pub use vote::{VoteChoice, VoteRecord};
