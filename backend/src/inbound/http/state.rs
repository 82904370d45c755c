//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsCommand, AnalyticsQuery, InterestsCommand, InterestsQuery, ProjectsCommand,
    ProjectsQuery, SkillsCommand, TokenAuth,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account lifecycle use-cases.
    pub accounts: Arc<dyn AccountsCommand>,
    /// Bearer-token resolution for the auth extractor.
    pub token_auth: Arc<dyn TokenAuth>,
    /// Skill assignment use-cases.
    pub skills: Arc<dyn SkillsCommand>,
    /// Project lifecycle use-cases.
    pub projects: Arc<dyn ProjectsCommand>,
    /// Project listing use-cases.
    pub projects_query: Arc<dyn ProjectsQuery>,
    /// Interest lifecycle use-cases.
    pub interests: Arc<dyn InterestsCommand>,
    /// Interest listing use-cases.
    pub interests_query: Arc<dyn InterestsQuery>,
    /// Per-user analytics.
    pub analytics: Arc<dyn AnalyticsQuery>,
}
