//! Values announced by the registry.

use crate::proposal::ProposalId;
use crate::vote::VoteChoice;
use dao_types::Title;
use serde::{Deserialize, Serialize};

/// The `winner` announcement produced by a successful execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerEvent {
    pub proposal: ProposalId,
    pub title: Title,
    pub choice: VoteChoice,
}
