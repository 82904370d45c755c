//! Expression-of-interest aggregate and its state machine vocabulary.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{ProjectId, UserId};

/// Stable expression-of-interest identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterestId(Uuid);

impl InterestId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for InterestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Status of an expression of interest.
///
/// `Pending` transitions exactly once to `Accepted` or `Rejected`; both are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InterestStatus {
    /// Awaiting a decision by the project creator.
    Pending,
    /// Accepted; the user joined the collaborator set.
    Accepted,
    /// Rejected; terminal, the user may express interest again.
    Rejected,
}

impl InterestStatus {
    /// Stable storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parse the storage representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for InterestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision a project creator can take on a pending interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionAction {
    /// Add the user to the collaborator set.
    Accept,
    /// Mark the interest rejected, leaving membership untouched.
    Reject,
}

impl DecisionAction {
    /// Parse the wire representation; anything else is an invalid action.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "accept" => Some(Self::Accept),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// A user's request to join a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionOfInterest {
    /// Stable identifier.
    pub id: InterestId,
    /// The interested user.
    pub user_id: UserId,
    /// The target project.
    pub project_id: ProjectId,
    /// State-machine position.
    pub status: InterestStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
