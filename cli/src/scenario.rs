//! Scenario files and the runner that replays them.
//!
//! A scenario is a TOML list of `[[step]]` tables tagged by `op`. The runner
//! deploys a fresh token (whole supply to `seed:0`) and a registry bound to
//! it, then applies each step in order with a simulated clock, writing one
//! JSON report line per step.

use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use dao_governance::{
    GovernanceError, GovernanceRegistry, ProposalId, ProposalStatus, VoteChoice,
};
use dao_token::{Token, TokenError, TokenLedger};
use dao_types::{Address, DaoError, Timestamp, Title, TokenAmount};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::CliConfig;

/// An account in a scenario: `0x…` hex or `seed:<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Account(pub Address);

impl FromStr for Account {
    type Err = DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("seed:") {
            Some(n) => n
                .parse::<u8>()
                .map(|seed| Self(Address::from_seed(seed)))
                .map_err(|e| DaoError::InvalidAddress(format!("{s}: {e}"))),
            None => s.parse().map(Self),
        }
    }
}

impl TryFrom<String> for Account {
    type Error = DaoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A vote choice as written in a scenario: `"accept"` or `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ChoiceText")]
pub struct Choice(pub VoteChoice);

#[derive(Deserialize)]
#[serde(untagged)]
enum ChoiceText {
    Code(u8),
    Name(String),
}

impl TryFrom<ChoiceText> for Choice {
    type Error = GovernanceError;

    fn try_from(raw: ChoiceText) -> Result<Self, Self::Error> {
        match raw {
            ChoiceText::Code(code) => VoteChoice::try_from(code).map(Self),
            ChoiceText::Name(name) => name.parse().map(Self),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Transfer {
        from: Account,
        to: Account,
        amount: u64,
    },
    Create {
        caller: Account,
        title: String,
    },
    Vote {
        caller: Account,
        proposal: ProposalId,
        choice: Choice,
    },
    Advance {
        secs: u64,
    },
    Execute {
        caller: Account,
        proposal: ProposalId,
    },
    Show {
        proposal: ProposalId,
    },
    Balance {
        account: Account,
    },
}

impl Step {
    fn op(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::Create { .. } => "create",
            Self::Vote { .. } => "vote",
            Self::Advance { .. } => "advance",
            Self::Execute { .. } => "execute",
            Self::Show { .. } => "show",
            Self::Balance { .. } => "balance",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// A step that was rejected.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Label(#[from] DaoError),
}

impl StepError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Governance(e) => e.code(),
            Self::Token(e) => e.code(),
            Self::Label(_) => "INVALID_TITLE",
        }
    }
}

/// What a successful step produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Transferred {
        from: Address,
        to: Address,
        amount: TokenAmount,
    },
    Created {
        proposal: ProposalId,
        title: String,
        proposer: Address,
    },
    Voted {
        proposal: ProposalId,
        voter: Address,
        choice: VoteChoice,
        weight: TokenAmount,
    },
    Advanced {
        now: Timestamp,
    },
    Winner {
        proposal: ProposalId,
        title: String,
        winner: VoteChoice,
        code: u8,
    },
    Shown {
        proposal: ProposalId,
        title: String,
        created_at: Timestamp,
        accept: TokenAmount,
        reject: TokenAmount,
        abstain: TokenAmount,
        executed: bool,
        status: ProposalStatus,
    },
    Balance {
        account: Address,
        balance: TokenAmount,
    },
}

/// One line of runner output.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub op: &'static str,
    pub ok: bool,
    #[serde(flatten)]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Replays steps against a token and registry it owns.
pub struct Runner {
    token: Arc<Token>,
    registry: GovernanceRegistry<Token>,
    now: Timestamp,
}

impl Runner {
    pub fn new(config: &CliConfig) -> Self {
        let token = Arc::new(Token::deploy(
            Address::derive(b"token"),
            Address::from_seed(0),
            TokenAmount::from(config.token_supply),
        ));
        let registry = GovernanceRegistry::deploy(Arc::clone(&token), config.governance.clone());
        Self {
            token,
            registry,
            now: Timestamp::new(config.genesis_time),
        }
    }

    pub fn registry(&self) -> &GovernanceRegistry<Token> {
        &self.registry
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn apply(&mut self, step: &Step) -> Result<Outcome, StepError> {
        let now = self.now;
        let outcome = match *step {
            Step::Transfer { from, to, amount } => {
                let amount = TokenAmount::from(amount);
                self.token.transfer(&from.0, &to.0, amount)?;
                Outcome::Transferred {
                    from: from.0,
                    to: to.0,
                    amount,
                }
            }
            Step::Create { caller, ref title } => {
                let label = Title::from_label(title)?;
                let proposal = self.registry.create_proposal(&caller.0, label, now)?;
                Outcome::Created {
                    proposal,
                    title: label.label(),
                    proposer: caller.0,
                }
            }
            Step::Vote {
                caller,
                proposal,
                choice,
            } => {
                let record = self
                    .registry
                    .vote_on_proposal(&caller.0, proposal, choice.0, now)?;
                Outcome::Voted {
                    proposal,
                    voter: caller.0,
                    choice: record.choice,
                    weight: record.weight,
                }
            }
            Step::Advance { secs } => {
                self.now = now.saturating_add_secs(secs);
                Outcome::Advanced { now: self.now }
            }
            Step::Execute { caller, proposal } => {
                let event = self.registry.execute_proposal(&caller.0, proposal, now)?;
                Outcome::Winner {
                    proposal: event.proposal,
                    title: event.title.label(),
                    winner: event.choice,
                    code: event.choice.as_u8(),
                }
            }
            Step::Show { proposal } => {
                let status = self.registry.status(proposal, now)?;
                let p = self.registry.proposal(proposal)?;
                Outcome::Shown {
                    proposal,
                    title: p.title.label(),
                    created_at: p.created_at,
                    accept: p.accept,
                    reject: p.reject,
                    abstain: p.abstain,
                    executed: p.executed,
                    status,
                }
            }
            Step::Balance { account } => Outcome::Balance {
                account: account.0,
                balance: self.token.balance_of(&account.0),
            },
        };
        Ok(outcome)
    }

    /// Apply every step, writing a report line for each.
    ///
    /// Returns the number of rejected steps. With `fail_fast`, stops at the
    /// first rejection.
    pub fn run<W: Write>(
        &mut self,
        scenario: &Scenario,
        out: &mut W,
        fail_fast: bool,
    ) -> anyhow::Result<usize> {
        let mut failures = 0;
        for (index, step) in scenario.steps.iter().enumerate() {
            let report = match self.apply(step) {
                Ok(outcome) => StepReport {
                    step: index,
                    op: step.op(),
                    ok: true,
                    outcome: Some(outcome),
                    error: None,
                    message: None,
                },
                Err(e) => {
                    warn!(step = index, op = step.op(), code = e.code(), "step rejected: {e}");
                    failures += 1;
                    StepReport {
                        step: index,
                        op: step.op(),
                        ok: false,
                        outcome: None,
                        error: Some(e.code()),
                        message: Some(e.to_string()),
                    }
                }
            };
            serde_json::to_writer(&mut *out, &report).context("writing step report")?;
            writeln!(out).context("writing step report")?;
            if fail_fast && !report.ok {
                break;
            }
        }
        info!(steps = scenario.steps.len(), failures, "scenario finished");
        Ok(failures)
    }
}
