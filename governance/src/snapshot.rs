//! Registry persistence.
//!
//! The registry's whole state is a proposal list, a vote map and the
//! parameters. The token binding is not persisted; a restored registry is
//! re-bound to whatever ledger the caller supplies.

use crate::engine::GovernanceRegistry;
use crate::error::GovernanceError;
use crate::params::GovernanceParams;
use crate::proposal::{Proposal, ProposalId};
use crate::tally::Tally;
use crate::vote::VoteRecord;
use dao_token::TokenLedger;
use dao_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Serializable image of a [`GovernanceRegistry`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Ledger the registry was bound to when saved.
    pub token: Address,
    pub params: GovernanceParams,
    pub proposals: Vec<Proposal>,
    pub votes: Vec<(ProposalId, Address, VoteRecord)>,
}

impl<L: TokenLedger> GovernanceRegistry<L> {
    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut votes: Vec<(ProposalId, Address, VoteRecord)> = self
            .vote_entries()
            .iter()
            .map(|((proposal, voter), record)| (*proposal, *voter, record.clone()))
            .collect();
        votes.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        RegistrySnapshot {
            token: *self.token(),
            params: self.params().clone(),
            proposals: self.proposals().to_vec(),
            votes,
        }
    }

    /// Serialize the registry to bytes.
    pub fn save_state(&self) -> Result<Vec<u8>, GovernanceError> {
        bincode::serialize(&self.snapshot()).map_err(|e| GovernanceError::Snapshot(e.to_string()))
    }

    /// Rebuild a registry from [`save_state`](Self::save_state) output.
    ///
    /// The snapshot must have been taken against the same ledger address.
    pub fn restore(ledger: Arc<L>, data: &[u8]) -> Result<Self, GovernanceError> {
        let snapshot: RegistrySnapshot =
            bincode::deserialize(data).map_err(|e| GovernanceError::Snapshot(e.to_string()))?;
        Self::from_snapshot(ledger, snapshot)
    }

    /// Rebuild a registry from a decoded snapshot.
    ///
    /// Rejects votes on missing proposals, duplicate votes, and any proposal
    /// whose stored tally differs from the sum of its recorded votes.
    pub fn from_snapshot(
        ledger: Arc<L>,
        snapshot: RegistrySnapshot,
    ) -> Result<Self, GovernanceError> {
        if snapshot.token != *ledger.address() {
            return Err(GovernanceError::Snapshot(format!(
                "snapshot is bound to token {}, not {}",
                snapshot.token,
                ledger.address()
            )));
        }
        let proposal_count = snapshot.proposals.len() as ProposalId;
        let mut votes = HashMap::with_capacity(snapshot.votes.len());
        let mut recounted = vec![Tally::default(); snapshot.proposals.len()];
        for (proposal, voter, record) in snapshot.votes {
            let slot = usize::try_from(proposal)
                .ok()
                .and_then(|i| recounted.get_mut(i))
                .ok_or_else(|| {
                    GovernanceError::Snapshot(format!(
                        "vote by {voter} references missing proposal {proposal}"
                    ))
                })?;
            *slot = slot
                .with_vote(record.choice, record.weight)
                .ok_or(GovernanceError::TallyOverflow(proposal))?;
            if votes.insert((proposal, voter), record).is_some() {
                return Err(GovernanceError::Snapshot(format!(
                    "duplicate vote by {voter} on proposal {proposal}"
                )));
            }
        }
        for (index, (proposal, counted)) in snapshot.proposals.iter().zip(&recounted).enumerate() {
            if proposal.tally() != *counted {
                return Err(GovernanceError::Snapshot(format!(
                    "proposal {index} tally does not match its recorded votes"
                )));
            }
        }
        info!(
            proposals = proposal_count,
            votes = votes.len(),
            "governance registry restored"
        );
        Ok(Self::from_parts(
            ledger,
            snapshot.params,
            snapshot.proposals,
            votes,
        ))
    }
}
