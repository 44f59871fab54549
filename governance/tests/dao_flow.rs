//! End-to-end governance flows against the real fixed-supply token.
//!
//! Fixture: a 1 000 000 token supply minted to the deployer, the registry
//! deployed against it, 13 000 and 32 300 tokens handed to two holders, and
//! "first proposal" created by the deployer.

use std::sync::Arc;

use dao_governance::{
    GovernanceError, GovernanceParams, GovernanceRegistry, ProposalStatus, VoteChoice,
    WinnerEvent, VOTING_PERIOD_SECS,
};
use dao_nullables::NullClock;
use dao_token::{Token, TokenLedger, DEFAULT_SUPPLY};
use dao_types::{Address, Title, TokenAmount};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    accounts: Vec<Address>,
    token: Arc<Token>,
    dao: GovernanceRegistry<Token>,
    clock: NullClock,
}

fn title(label: &str) -> Title {
    Title::from_label(label).expect("label fits")
}

fn fixture() -> Fixture {
    let accounts: Vec<Address> = (0..5).map(Address::from_seed).collect();
    let clock = NullClock::new(1_700_000_000);
    let token = Arc::new(Token::deploy(
        Address::derive(b"token"),
        accounts[0],
        TokenAmount::from(DEFAULT_SUPPLY),
    ));
    let mut dao = GovernanceRegistry::deploy(Arc::clone(&token), GovernanceParams::default());

    token
        .transfer(&accounts[0], &accounts[1], TokenAmount::new(13_000))
        .expect("deployer funds holder 1");
    token
        .transfer(&accounts[0], &accounts[2], TokenAmount::new(32_300))
        .expect("deployer funds holder 2");

    dao.create_proposal(&accounts[0], title("first proposal"), clock.now())
        .expect("deployer is a holder");

    Fixture {
        accounts,
        token,
        dao,
        clock,
    }
}

impl Fixture {
    fn vote(&mut self, who: usize, choice: VoteChoice) -> Result<(), GovernanceError> {
        self.dao
            .vote_on_proposal(&self.accounts[who], 0, choice, self.clock.now())
            .map(|_| ())
    }

    fn execute(&mut self, who: usize) -> Result<WinnerEvent, GovernanceError> {
        self.dao
            .execute_proposal(&self.accounts[who], 0, self.clock.now())
    }

    fn winner_after_window(&mut self) -> VoteChoice {
        self.clock.advance_days(1);
        let event = self.execute(0).expect("window has closed");
        assert_eq!(event.proposal, 0);
        assert_eq!(event.title, title("first proposal"));
        event.choice
    }
}

// ---------------------------------------------------------------------------
// Deployment and creation
// ---------------------------------------------------------------------------

#[test]
fn registry_is_bound_to_token() {
    let f = fixture();
    assert_eq!(f.dao.token(), f.token.address());
    assert_eq!(f.token.total_supply(), TokenAmount::new(1_000_000));
}

#[test]
fn first_proposal_is_stored_with_empty_tally() {
    let f = fixture();
    let proposal = f.dao.proposal(0).unwrap();
    assert_eq!(proposal.title, title("first proposal"));
    assert_eq!(proposal.proposer, f.accounts[0]);
    assert_eq!(proposal.created_at, f.clock.now());
    assert_eq!(proposal.accept, TokenAmount::ZERO);
    assert_eq!(proposal.reject, TokenAmount::ZERO);
    assert_eq!(proposal.abstain, TokenAmount::ZERO);
    assert!(!proposal.executed);
    assert_eq!(f.dao.proposal_count(), 1);
}

#[test]
fn any_holder_can_create() {
    let mut f = fixture();
    let id = f
        .dao
        .create_proposal(&f.accounts[1], title("second proposal"), f.clock.now())
        .unwrap();
    assert_eq!(id, 1);
    assert_eq!(f.dao.proposal(1).unwrap().title.label(), "second proposal");
}

// ---------------------------------------------------------------------------
// Tallies
// ---------------------------------------------------------------------------

#[test]
fn accept_votes_are_weighted_by_balance() {
    let mut f = fixture();
    f.vote(1, VoteChoice::Accept).unwrap();
    f.vote(2, VoteChoice::Accept).unwrap();
    let proposal = f.dao.proposal(0).unwrap();
    assert_eq!(proposal.accept, TokenAmount::new(45_300));
    assert_eq!(proposal.reject, TokenAmount::ZERO);
    assert_eq!(proposal.abstain, TokenAmount::ZERO);
}

#[test]
fn reject_votes_are_weighted_by_balance() {
    let mut f = fixture();
    f.vote(1, VoteChoice::Reject).unwrap();
    f.vote(2, VoteChoice::Reject).unwrap();
    let proposal = f.dao.proposal(0).unwrap();
    assert_eq!(proposal.reject, TokenAmount::new(45_300));
    assert_eq!(proposal.accept, TokenAmount::ZERO);
}

#[test]
fn abstain_votes_are_weighted_by_balance() {
    let mut f = fixture();
    f.vote(1, VoteChoice::Abstain).unwrap();
    f.vote(2, VoteChoice::Abstain).unwrap();
    let proposal = f.dao.proposal(0).unwrap();
    assert_eq!(proposal.abstain, TokenAmount::new(45_300));
    assert_eq!(proposal.accept, TokenAmount::ZERO);
}

#[test]
fn raw_choice_codes_map_to_buckets() {
    let mut f = fixture();
    f.vote(1, VoteChoice::try_from(0).unwrap()).unwrap();
    f.vote(2, VoteChoice::try_from(2).unwrap()).unwrap();
    let tally = f.dao.proposal(0).unwrap().tally();
    assert_eq!(tally.accept, TokenAmount::new(13_000));
    assert_eq!(tally.abstain, TokenAmount::new(32_300));
    assert!(VoteChoice::try_from(3).is_err());
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[test]
fn non_holder_cannot_vote_or_create() {
    let mut f = fixture();
    let err = f.vote(3, VoteChoice::Accept).unwrap_err();
    assert_eq!(err.code(), "NOT_A_TOKEN_HOLDER");

    let err = f
        .dao
        .create_proposal(&f.accounts[3], title("second proposal"), f.clock.now())
        .unwrap_err();
    assert!(matches!(err, GovernanceError::NotATokenHolder(a) if a == f.accounts[3]));
    assert_eq!(f.dao.proposal_count(), 1);
}

#[test]
fn second_vote_is_rejected_whatever_the_choice() {
    let mut f = fixture();
    f.vote(0, VoteChoice::Accept).unwrap();
    for choice in VoteChoice::ALL {
        let err = f.vote(0, choice).unwrap_err();
        assert_eq!(err.code(), "ALREADY_VOTED");
    }
    assert_eq!(f.dao.proposal(0).unwrap().accept, TokenAmount::new(954_700));
}

#[test]
fn vote_after_one_day_is_inactive() {
    let mut f = fixture();
    f.clock.advance_days(1);
    let err = f.vote(1, VoteChoice::Accept).unwrap_err();
    assert_eq!(err.code(), "INACTIVE_PROPOSAL");
}

#[test]
fn vote_one_second_before_close_is_accepted() {
    let mut f = fixture();
    f.clock.advance(VOTING_PERIOD_SECS - 1);
    f.vote(1, VoteChoice::Accept).unwrap();
}

#[test]
fn execute_before_one_day_is_active() {
    let mut f = fixture();
    let err = f.execute(1).unwrap_err();
    assert_eq!(err.code(), "ACTIVE_PROPOSAL");

    f.clock.advance(VOTING_PERIOD_SECS - 1);
    let err = f.execute(1).unwrap_err();
    assert_eq!(err.code(), "ACTIVE_PROPOSAL");
    assert!(!f.dao.proposal(0).unwrap().executed);
}

// ---------------------------------------------------------------------------
// Winners
// ---------------------------------------------------------------------------

#[test]
fn deployer_accept_wins() {
    let mut f = fixture();
    f.vote(0, VoteChoice::Accept).unwrap();
    assert_eq!(f.winner_after_window(), VoteChoice::Accept);
    assert_eq!(VoteChoice::Accept.as_u8(), 0);
}

#[test]
fn abstain_beats_smaller_accept() {
    let mut f = fixture();
    f.vote(1, VoteChoice::Accept).unwrap();
    f.vote(2, VoteChoice::Abstain).unwrap();
    assert_eq!(f.winner_after_window(), VoteChoice::Abstain);
}

#[test]
fn abstain_beats_smaller_reject() {
    let mut f = fixture();
    f.vote(1, VoteChoice::Reject).unwrap();
    f.vote(2, VoteChoice::Abstain).unwrap();
    assert_eq!(f.winner_after_window(), VoteChoice::Abstain);
}

#[test]
fn deployer_reject_wins() {
    let mut f = fixture();
    f.vote(0, VoteChoice::Reject).unwrap();
    let winner = f.winner_after_window();
    assert_eq!(winner, VoteChoice::Reject);
    assert_eq!(winner.as_u8(), 1);
}

#[test]
fn deployer_abstain_wins() {
    let mut f = fixture();
    f.vote(0, VoteChoice::Abstain).unwrap();
    let winner = f.winner_after_window();
    assert_eq!(winner, VoteChoice::Abstain);
    assert_eq!(winner.as_u8(), 2);
}

#[test]
fn any_account_may_execute() {
    let mut f = fixture();
    f.vote(2, VoteChoice::Reject).unwrap();
    f.clock.advance_days(1);
    let event = f.execute(3).unwrap();
    assert_eq!(event.choice, VoteChoice::Reject);
}

#[test]
fn execution_is_terminal() {
    let mut f = fixture();
    assert_eq!(
        f.dao.status(0, f.clock.now()).unwrap(),
        ProposalStatus::Active
    );
    f.clock.advance_days(1);
    assert_eq!(
        f.dao.status(0, f.clock.now()).unwrap(),
        ProposalStatus::VotingClosed
    );
    f.execute(0).unwrap();
    assert_eq!(
        f.dao.status(0, f.clock.now()).unwrap(),
        ProposalStatus::Executed
    );
    assert!(f.dao.proposal(0).unwrap().executed);
    assert_eq!(f.execute(0).unwrap_err().code(), "ALREADY_EXECUTED");
}

#[test]
fn transfers_after_voting_do_not_change_tally() {
    let mut f = fixture();
    f.vote(1, VoteChoice::Accept).unwrap();
    f.token
        .transfer(&f.accounts[1], &f.accounts[4], TokenAmount::new(13_000))
        .unwrap();
    // The recipient is a fresh voter with the moved balance.
    f.vote(4, VoteChoice::Accept).unwrap();
    assert_eq!(f.dao.proposal(0).unwrap().accept, TokenAmount::new(26_000));
    // The sender now holds nothing.
    let err = f
        .dao
        .create_proposal(&f.accounts[1], title("late"), f.clock.now())
        .unwrap_err();
    assert_eq!(err.code(), "NOT_A_TOKEN_HOLDER");
}
