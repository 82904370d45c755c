//! Open-source project aggregate and value types.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Maximum accepted project name length.
pub const PROJECT_NAME_MAX: usize = 100;

/// Validation errors returned when constructing project value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    /// Project name is empty after trimming whitespace.
    #[error("project name must not be empty")]
    EmptyName,
    /// Project name exceeds the storage limit.
    #[error("project name must be at most {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The collaborator ceiling is zero or negative.
    #[error("maximum_collaborators must be a positive integer")]
    NonPositiveCapacity,
}

/// Stable project identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(Uuid);

impl ProjectId {
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

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique name of an open-source project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate and construct a [`ProjectName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        if value.chars().count() > PROJECT_NAME_MAX {
            return Err(ProjectValidationError::NameTooLong {
                max: PROJECT_NAME_MAX,
            });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ProjectName> for String {
    fn from(value: ProjectName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = ProjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Ceiling on concurrent collaborators, immutable after creation.
///
/// # Examples
/// ```
/// use backend::domain::Capacity;
///
/// let cap = Capacity::new(5).expect("positive capacity");
/// assert_eq!(cap.get(), 5);
/// assert!(Capacity::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Capacity(i32);

impl Capacity {
    /// Validate and construct a [`Capacity`].
    pub fn new(value: i32) -> Result<Self, ProjectValidationError> {
        if value < 1 {
            return Err(ProjectValidationError::NonPositiveCapacity);
        }
        Ok(Self(value))
    }

    /// Access the underlying value.
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl From<Capacity> for i32 {
    fn from(value: Capacity) -> Self {
        value.0
    }
}

impl TryFrom<i32> for Capacity {
    type Error = ProjectValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle status of a project.
///
/// `Draft` until the first accepted interest, then `Active`; `Closed` only by
/// an explicit creator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Newly created, no accepted collaborators yet.
    Draft,
    /// At least one interest has been accepted.
    Active,
    /// Closed by the creator.
    Closed,
}

impl ProjectStatus {
    /// Stable storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }

    /// Parse the storage representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open-source project aggregate.
///
/// ## Invariants
/// - `current_collaborators` equals the size of the collaborator set after
///   every accept/reject transaction.
/// - `current_collaborators` never exceeds `maximum_collaborators.get()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Stable identifier.
    pub id: ProjectId,
    /// Unique project name.
    pub name: ProjectName,
    /// Free-form description.
    pub description: String,
    /// Collaborator ceiling.
    pub maximum_collaborators: Capacity,
    /// Denormalized collaborator counter, maintained transactionally.
    pub current_collaborators: i32,
    /// Creator, set at creation and immutable.
    pub creator_id: UserId,
    /// Lifecycle status.
    pub status: ProjectStatus,
}

impl Project {
    /// Whether the collaborator set has reached its ceiling.
    pub fn is_full(&self) -> bool {
        self.current_collaborators >= self.maximum_collaborators.get()
    }
}
