//! Governance registry — proposals, weighted votes, execution.

use crate::error::GovernanceError;
use crate::event::WinnerEvent;
use crate::params::{ExecutionPolicy, GovernanceParams};
use crate::proposal::{Proposal, ProposalId, ProposalStatus};
use crate::vote::{VoteChoice, VoteRecord};
use dao_token::TokenLedger;
use dao_types::{Address, Timestamp, Title, TokenAmount};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry bound to one token ledger for its whole life.
///
/// Every mutating call validates first and mutates last, so a rejected call
/// leaves no trace. Callers pass the current time explicitly.
pub struct GovernanceRegistry<L: TokenLedger> {
    ledger: Arc<L>,
    token: Address,
    params: GovernanceParams,
    proposals: Vec<Proposal>,
    /// (proposal, voter) → the single vote that voter cast.
    votes: HashMap<(ProposalId, Address), VoteRecord>,
}

impl<L: TokenLedger> fmt::Debug for GovernanceRegistry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GovernanceRegistry")
            .field("token", &self.token)
            .field("params", &self.params)
            .field("proposals", &self.proposals.len())
            .field("votes", &self.votes.len())
            .finish_non_exhaustive()
    }
}

impl<L: TokenLedger> GovernanceRegistry<L> {
    /// Bind a fresh registry to `ledger`.
    pub fn deploy(ledger: Arc<L>, params: GovernanceParams) -> Self {
        let token = *ledger.address();
        info!(%token, voting_period_secs = params.voting_period_secs, "governance registry deployed");
        Self::from_parts(ledger, params, Vec::new(), HashMap::new())
    }

    pub(crate) fn from_parts(
        ledger: Arc<L>,
        params: GovernanceParams,
        proposals: Vec<Proposal>,
        votes: HashMap<(ProposalId, Address), VoteRecord>,
    ) -> Self {
        Self {
            token: *ledger.address(),
            ledger,
            params,
            proposals,
            votes,
        }
    }

    /// Address of the bound token ledger.
    pub fn token(&self) -> &Address {
        &self.token
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// Append a proposal. Only token holders may create one.
    pub fn create_proposal(
        &mut self,
        caller: &Address,
        title: Title,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        self.holder_balance(caller)?;
        let id = self.proposals.len() as ProposalId;
        self.proposals.push(Proposal::new(title, *caller, now));
        info!(proposal = id, %title, proposer = %caller, created_at = %now, "proposal created");
        Ok(id)
    }

    /// Add the caller's current balance to `choice` on proposal `index`.
    ///
    /// Checks run in a fixed order: holder, proposal exists, window open,
    /// not yet voted.
    pub fn vote_on_proposal(
        &mut self,
        caller: &Address,
        index: ProposalId,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<VoteRecord, GovernanceError> {
        let weight = self.holder_balance(caller)?;
        let voting_period = self.params.voting_period_secs;
        let proposal = self.proposal(index)?;
        if !proposal.is_voting_open(voting_period, now) {
            return Err(GovernanceError::InactiveProposal(index));
        }
        if self.votes.contains_key(&(index, *caller)) {
            return Err(GovernanceError::AlreadyVoted {
                proposal: index,
                voter: *caller,
            });
        }
        let tally = proposal
            .tally()
            .with_vote(choice, weight)
            .ok_or(GovernanceError::TallyOverflow(index))?;

        self.proposal_mut(index)?.set_tally(tally);
        let record = VoteRecord {
            choice,
            weight,
            cast_at: now,
        };
        self.votes.insert((index, *caller), record.clone());
        info!(proposal = index, voter = %caller, %choice, %weight, "vote recorded");
        Ok(record)
    }

    /// Close out proposal `index` and announce the winning choice.
    ///
    /// Anyone may execute once the voting window has elapsed.
    pub fn execute_proposal(
        &mut self,
        caller: &Address,
        index: ProposalId,
        now: Timestamp,
    ) -> Result<WinnerEvent, GovernanceError> {
        let GovernanceParams {
            voting_period_secs,
            execution_policy,
        } = self.params;
        let proposal = self.proposal_mut(index)?;
        if proposal.is_voting_open(voting_period_secs, now) {
            return Err(GovernanceError::ActiveProposal(index));
        }
        if proposal.executed {
            match execution_policy {
                ExecutionPolicy::RejectRepeat => {
                    return Err(GovernanceError::AlreadyExecuted(index))
                }
                ExecutionPolicy::AllowRepeat => {
                    debug!(proposal = index, "re-executing proposal");
                }
            }
        }

        let tally = proposal.tally();
        let choice = tally.winner();
        proposal.executed = true;
        let event = WinnerEvent {
            proposal: index,
            title: proposal.title,
            choice,
        };
        info!(
            proposal = index,
            title = %event.title,
            winner = %choice,
            accept = %tally.accept,
            reject = %tally.reject,
            abstain = %tally.abstain,
            executor = %caller,
            "proposal executed"
        );
        Ok(event)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Proposal at `index`, or `PROPOSAL_NOT_FOUND`.
    pub fn proposal(&self, index: ProposalId) -> Result<&Proposal, GovernanceError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.proposals.get(i))
            .ok_or(GovernanceError::ProposalNotFound(index))
    }

    /// Every proposal, indexed by creation order.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Lifecycle stage of proposal `index` at `now`.
    pub fn status(
        &self,
        index: ProposalId,
        now: Timestamp,
    ) -> Result<ProposalStatus, GovernanceError> {
        Ok(self
            .proposal(index)?
            .status(self.params.voting_period_secs, now))
    }

    /// Whether `voter` has already voted on `index`.
    pub fn has_voted(&self, index: ProposalId, voter: &Address) -> bool {
        self.votes.contains_key(&(index, *voter))
    }

    pub fn vote_of(&self, index: ProposalId, voter: &Address) -> Option<&VoteRecord> {
        self.votes.get(&(index, *voter))
    }

    /// All votes cast on `index`, in no particular order.
    pub fn votes_on(&self, index: ProposalId) -> Vec<(Address, &VoteRecord)> {
        self.votes
            .iter()
            .filter(|((p, _), _)| *p == index)
            .map(|((_, voter), record)| (*voter, record))
            .collect()
    }

    pub(crate) fn vote_entries(&self) -> &HashMap<(ProposalId, Address), VoteRecord> {
        &self.votes
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn proposal_mut(&mut self, index: ProposalId) -> Result<&mut Proposal, GovernanceError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.proposals.get_mut(i))
            .ok_or(GovernanceError::ProposalNotFound(index))
    }

    /// Caller's current balance, which must be nonzero.
    fn holder_balance(&self, caller: &Address) -> Result<TokenAmount, GovernanceError> {
        let balance = self.ledger.balance_of(caller);
        if balance.is_zero() {
            return Err(GovernanceError::NotATokenHolder(*caller));
        }
        Ok(balance)
    }
}
