//! Read-only per-user analytics aggregation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AnalyticsQuery, InterestRepository, ProjectRepository, SkillRepository, UserAnalytics,
    map_store_error,
};
use crate::domain::{Error, UserId};

/// Analytics service implementing the [`AnalyticsQuery`] port.
///
/// Pure aggregation: no side effects, and an unknown user id simply yields
/// empty aggregates.
#[derive(Clone)]
pub struct AnalyticsService<P, I, S> {
    projects: Arc<P>,
    interests: Arc<I>,
    skills: Arc<S>,
}

impl<P, I, S> AnalyticsService<P, I, S> {
    /// Create a new service backed by the given repositories.
    pub fn new(projects: Arc<P>, interests: Arc<I>, skills: Arc<S>) -> Self {
        Self {
            projects,
            interests,
            skills,
        }
    }
}

#[async_trait]
impl<P, I, S> AnalyticsQuery for AnalyticsService<P, I, S>
where
    P: ProjectRepository,
    I: InterestRepository,
    S: SkillRepository,
{
    async fn for_user(&self, user_id: &UserId) -> Result<UserAnalytics, Error> {
        let projects_name = self
            .projects
            .created_project_names(user_id)
            .await
            .map_err(map_store_error)?;
        let collaborations_name = self
            .projects
            .collaboration_names(user_id)
            .await
            .map_err(map_store_error)?;
        let interests_project_name = self
            .interests
            .interest_project_names(user_id)
            .await
            .map_err(map_store_error)?;
        let user_skills = self
            .skills
            .names_for_user(user_id)
            .await
            .map_err(map_store_error)?;

        Ok(UserAnalytics {
            user_projects_as_creator: projects_name.len(),
            user_collaborations: collaborations_name.len(),
            user_interests: interests_project_name.len(),
            user_skills,
            projects_name,
            collaborations_name,
            interests_project_name,
        })
    }
}

#[cfg(test)]
#[path = "analytics_service_tests.rs"]
mod tests;
