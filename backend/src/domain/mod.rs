//! Domain entities, value types, ports, and services.
//!
//! Everything in this module is transport- and storage-agnostic. Inbound
//! adapters call the driving ports in [`ports`]; outbound adapters implement
//! the driven ports there.

pub mod accounts_service;
pub mod analytics_service;
pub mod error;
pub mod interest;
pub mod interests_service;
pub mod ports;
pub mod project;
pub mod projects_service;
pub mod skill;
pub mod skills_service;
pub mod user;

pub use self::accounts_service::AccountsService;
pub use self::analytics_service::AnalyticsService;
pub use self::error::{Error, ErrorCode};
pub use self::interest::{
    DecisionAction, ExpressionOfInterest, InterestId, InterestStatus,
};
pub use self::interests_service::InterestsService;
pub use self::project::{
    Capacity, Project, ProjectId, ProjectName, ProjectStatus, ProjectValidationError,
};
pub use self::projects_service::ProjectsService;
pub use self::skill::{SKILL_LIMIT, SkillId, SkillName, SkillValidationError};
pub use self::skills_service::SkillsService;
pub use self::user::{AccountValidationError, Email, User, UserId, Username};

/// Convenient result alias for domain use-cases.
pub type ApiResult<T> = Result<T, Error>;
