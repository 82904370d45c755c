//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to interact with the
//! relational store and the credential hasher. Driving ports are the
//! use-cases the HTTP adapter calls into. Each driven trait exposes strongly
//! typed errors so adapters map their failures into predictable variants.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

use super::{
    Capacity, Email, Error, ExpressionOfInterest, InterestId, InterestStatus, Project, ProjectId,
    ProjectName, ProjectStatus, SkillId, SkillName, User, UserId, Username,
};

/// Failures shared by every store-backed port.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StoreError {
    /// Store connection could not be established or was lost.
    #[error("store connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or transaction failed during execution.
    #[error("store query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl StoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Map store failures to the opaque internal error services hand to
/// adapters; details reach the logs, never the caller.
pub(crate) fn map_store_error(error: StoreError) -> Error {
    match error {
        StoreError::Connection { message } => {
            Error::internal(format!("store unavailable: {message}"))
        }
        StoreError::Query { message } => Error::internal(format!("store query failed: {message}")),
    }
}

/// Insert-time failures for user records.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum UserInsertError {
    /// Another user already holds this username.
    #[error("username already exists")]
    DuplicateUsername,
    /// Another user already registered this email.
    #[error("email already exists")]
    DuplicateEmail,
    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of the transactional count-check-attach skill operation.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SkillAttachError {
    /// The user already holds the maximum number of skills.
    #[error("skill limit reached")]
    LimitExceeded,
    /// The user already holds a skill of this name.
    #[error("skill already held")]
    AlreadyHeld,
    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Insert-time failures for projects.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ProjectInsertError {
    /// A project with the same name already exists, whatever its status.
    #[error("project name already exists")]
    DuplicateName,
    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Insert-time failures for expressions of interest.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum InterestInsertError {
    /// A pending or accepted interest already exists for (user, project).
    #[error("active interest already exists")]
    AlreadyExpressed,
    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of the transactional accept/reject transition.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum DecisionError {
    /// The interest (or its project) disappeared before the transaction.
    #[error("expression of interest not found")]
    NotFound,
    /// The interest left the pending state under a concurrent decision.
    #[error("expression of interest is no longer pending")]
    NotPending,
    /// Accepting would exceed the collaborator ceiling.
    #[error("project is at capacity")]
    ProjectFull,
    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A user record ready for insertion; the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    /// Unique login name.
    pub username: Username,
    /// Unique contact address.
    pub email: Email,
    /// Opaque password hash produced by the [`PasswordHasher`] port.
    pub password_hash: String,
    /// Optional age.
    pub age: Option<i32>,
    /// Optional country.
    pub country: Option<String>,
    /// Optional city of residence.
    pub residence: Option<String>,
}

/// Credential material fetched for verification; never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Owner of the credentials.
    pub user_id: UserId,
    /// Opaque password hash.
    pub password_hash: String,
}

/// A project record ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectRecord {
    /// Unique project name.
    pub name: ProjectName,
    /// Free-form description.
    pub description: String,
    /// Collaborator ceiling.
    pub maximum_collaborators: Capacity,
    /// Creator, immutable after creation.
    pub creator_id: UserId,
}

/// Listing entry for projects with free collaborator seats.
///
/// `current_collaborators` is the live association count computed at query
/// time, not the denormalized counter, so the listing cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AvailableProject {
    /// Stable identifier.
    #[schema(value_type = String)]
    pub id: ProjectId,
    /// Unique project name.
    pub project_name: String,
    /// Free-form description.
    pub description: String,
    /// Collaborator ceiling.
    pub maximum_collaborators: i32,
    /// Live collaborator count.
    pub current_collaborators: i64,
    /// Username of the creator.
    pub creator: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
}

/// Public details of an interested user, embedded in interest listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InterestedUser {
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Names of the skills the user holds.
    pub programming_skills: Vec<String>,
}

/// Listing entry for a project's expressions of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InterestDetails {
    /// Stable identifier of the expression of interest.
    #[schema(value_type = String)]
    pub id: InterestId,
    /// Details of the interested user.
    pub user_details: InterestedUser,
    /// State-machine position.
    pub status: InterestStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Read-only aggregation of a user's footprint across the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserAnalytics {
    /// Number of projects the user created.
    pub user_projects_as_creator: usize,
    /// Number of projects the user collaborates on.
    pub user_collaborations: usize,
    /// Number of expressions of interest, any status.
    pub user_interests: usize,
    /// Names of the skills the user holds.
    pub user_skills: Vec<String>,
    /// Names of the projects the user created.
    pub projects_name: Vec<String>,
    /// Names of the projects the user collaborates on.
    pub collaborations_name: Vec<String>,
    /// Names of the projects the user expressed interest in.
    pub interests_project_name: Vec<String>,
}

/// Opaque bearer token key issued to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenKey(String);

impl TokenKey {
    /// Wrap an existing key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the underlying key.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TokenKey> for String {
    fn from(value: TokenKey) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// Driven ports
// ---------------------------------------------------------------------------

/// Persistence port for user accounts.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; uniqueness of username and email is enforced by
    /// the store's constraints.
    async fn insert(&self, user: NewUserRecord) -> Result<UserId, UserInsertError>;

    /// Fetch a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Fetch credential material for verification.
    async fn credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, StoreError>;

    /// Replace the stored password hash.
    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<(), StoreError>;
}

/// Persistence port for skills and user-skill associations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Attach a skill to a user inside one transaction: lock the user row,
    /// enforce the skill limit and per-user uniqueness, get-or-create the
    /// skill row against its name constraint, and insert the association.
    async fn add_to_user(&self, user_id: &UserId, name: &SkillName)
    -> Result<(), SkillAttachError>;

    /// Look up a skill row by name, whoever holds it.
    async fn find_by_name(&self, name: &SkillName) -> Result<Option<SkillId>, StoreError>;

    /// Remove a user's association with a skill, keeping the skill row.
    /// Returns whether the user actually held it.
    async fn remove_from_user(
        &self,
        user_id: &UserId,
        skill_id: &SkillId,
    ) -> Result<bool, StoreError>;

    /// Names of the skills a user holds, in the order they were added.
    async fn names_for_user(&self, user_id: &UserId) -> Result<Vec<String>, StoreError>;
}

/// Persistence port for project aggregates.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a new project; name uniqueness is enforced by the store.
    async fn insert(&self, project: NewProjectRecord) -> Result<Project, ProjectInsertError>;

    /// Fetch a project by identifier.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, StoreError>;

    /// Delete a project, cascading its interests and collaborator rows.
    async fn delete(&self, id: &ProjectId) -> Result<(), StoreError>;

    /// Mark a project closed, whatever its remaining capacity.
    async fn close(&self, id: &ProjectId) -> Result<(), StoreError>;

    /// Projects whose live collaborator count is strictly below the ceiling,
    /// regardless of status.
    async fn list_available(&self) -> Result<Vec<AvailableProject>, StoreError>;

    /// Names of the projects a user created, oldest first.
    async fn created_project_names(&self, user_id: &UserId) -> Result<Vec<String>, StoreError>;

    /// Names of the projects a user collaborates on, oldest first.
    async fn collaboration_names(&self, user_id: &UserId) -> Result<Vec<String>, StoreError>;
}

/// Persistence port for expressions of interest, including the transactional
/// accept/reject transition.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InterestRepository: Send + Sync {
    /// Insert a pending interest; the active-interest uniqueness constraint
    /// (one pending-or-accepted row per user and project) backs the race.
    async fn insert_pending(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<ExpressionOfInterest, InterestInsertError>;

    /// Fetch an interest scoped to a project, together with that project.
    async fn find_with_project(
        &self,
        project_id: &ProjectId,
        eoi_id: &InterestId,
    ) -> Result<Option<(ExpressionOfInterest, Project)>, StoreError>;

    /// Accept a pending interest in one transaction: lock the project row,
    /// re-check the capacity, mark the interest accepted, add the user to
    /// the collaborator set, bump the counter, and activate the project when
    /// the counter reaches one.
    async fn accept(&self, eoi_id: &InterestId) -> Result<(), DecisionError>;

    /// Reject a pending interest in one transaction. Membership and counter
    /// are only touched when the user actually is a collaborator.
    async fn reject(&self, eoi_id: &InterestId) -> Result<(), DecisionError>;

    /// All interests for a project with the interested users' details,
    /// oldest first.
    async fn details_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<InterestDetails>, StoreError>;

    /// Names of the projects a user expressed interest in, any status,
    /// oldest first.
    async fn interest_project_names(&self, user_id: &UserId) -> Result<Vec<String>, StoreError>;
}

/// Persistence port for bearer token keys.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Return the user's token, creating one lazily.
    async fn get_or_create(&self, user_id: &UserId) -> Result<TokenKey, StoreError>;

    /// Resolve a token key to its owner.
    async fn find_user(&self, key: &str) -> Result<Option<UserId>, StoreError>;
}

/// Credential hashing port. The hash format is opaque to the domain.
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce an opaque hash for storage.
    fn hash(&self, password: &str) -> String;

    /// Check a password against a stored hash.
    fn verify(&self, password: &str, stored: &str) -> bool;
}

// ---------------------------------------------------------------------------
// Driving ports
// ---------------------------------------------------------------------------

/// A validated registration request; the password is still plaintext and is
/// hashed by the accounts service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Unique login name.
    pub username: Username,
    /// Unique contact address.
    pub email: Email,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Optional age.
    pub age: Option<i32>,
    /// Optional country.
    pub country: Option<String>,
    /// Optional city of residence.
    pub residence: Option<String>,
}

/// Account lifecycle use-cases.
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Register a new user.
    async fn register(&self, account: NewAccount) -> Result<UserId, Error>;

    /// Replace a user's password credential.
    async fn reset_password(&self, username: &Username, password: &str) -> Result<(), Error>;

    /// Verify credentials and return the user's bearer token, creating one
    /// lazily.
    async fn issue_token(&self, username: &str, password: &str) -> Result<TokenKey, Error>;
}

/// Resolution of bearer tokens presented by HTTP callers.
#[async_trait]
pub trait TokenAuth: Send + Sync {
    /// Resolve a token key to the authenticated user.
    async fn authenticate(&self, key: &str) -> Result<UserId, Error>;
}

/// Skill assignment use-cases.
#[async_trait]
pub trait SkillsCommand: Send + Sync {
    /// Attach a skill to the user, creating the skill row lazily.
    async fn add_skill(&self, user_id: &UserId, name: &SkillName) -> Result<(), Error>;

    /// Detach a skill from the user, keeping the skill row for others.
    async fn remove_skill(&self, user_id: &UserId, name: &SkillName) -> Result<(), Error>;
}

/// Project lifecycle use-cases.
#[async_trait]
pub trait ProjectsCommand: Send + Sync {
    /// Create a project in draft status with an empty collaborator set.
    async fn create(&self, project: NewProjectRecord) -> Result<Project, Error>;

    /// Delete a project; creator only.
    async fn delete(&self, requester: &UserId, project_id: &ProjectId) -> Result<(), Error>;

    /// Close a project unconditionally; creator only.
    async fn close(&self, requester: &UserId, project_id: &ProjectId) -> Result<(), Error>;
}

/// Project listing use-cases.
#[async_trait]
pub trait ProjectsQuery: Send + Sync {
    /// Projects with free collaborator seats.
    async fn available(&self) -> Result<Vec<AvailableProject>, Error>;
}

/// Interest lifecycle use-cases: expression and the accept/reject decision.
#[async_trait]
pub trait InterestsCommand: Send + Sync {
    /// Express interest in a project, creating a pending record.
    async fn express(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<ExpressionOfInterest, Error>;

    /// Decide a pending interest. `action` is the raw wire value; it is
    /// validated after the existence, authorization, and already-decided
    /// checks, matching the public contract's failure ordering.
    async fn decide(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
        eoi_id: &InterestId,
        action: Option<&str>,
    ) -> Result<super::DecisionAction, Error>;
}

/// Interest listing use-cases.
#[async_trait]
pub trait InterestsQuery: Send + Sync {
    /// All interests for a project. Answers not-found for both an absent
    /// project and a non-creator caller, so existence does not leak.
    async fn list_for_project(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
    ) -> Result<Vec<InterestDetails>, Error>;
}

/// Read-only per-user aggregation.
#[async_trait]
pub trait AnalyticsQuery: Send + Sync {
    /// Aggregate a user's created projects, collaborations, interests, and
    /// skills. Unknown users yield empty aggregates.
    async fn for_user(&self, user_id: &UserId) -> Result<UserAnalytics, Error>;
}
