//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    auth_tokens, expressions_of_interest, programming_skills, project_collaborators, projects,
    user_skills, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub age: Option<i32>,
    pub country: Option<String>,
    pub residence: Option<String>,
    #[expect(dead_code, reason = "schema field for audit purposes")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub age: Option<i32>,
    pub country: Option<&'a str>,
    pub residence: Option<&'a str>,
}

/// Insertable struct for the lazy skill upsert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = programming_skills)]
pub(crate) struct NewSkillRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

/// Insertable struct for user-skill associations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_skills)]
pub(crate) struct NewUserSkillRow {
    pub user_id: Uuid,
    pub skill_id: Uuid,
}

/// Row struct for reading from the projects table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub project_name: String,
    pub description: String,
    pub maximum_collaborators: i32,
    pub current_collaborators: i32,
    pub creator_id: Uuid,
    pub status: String,
    #[expect(dead_code, reason = "schema field for audit purposes")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new projects.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub id: Uuid,
    pub project_name: &'a str,
    pub description: &'a str,
    pub maximum_collaborators: i32,
    pub current_collaborators: i32,
    pub creator_id: Uuid,
    pub status: &'a str,
}

/// Insertable struct for project-collaborator associations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = project_collaborators)]
pub(crate) struct NewCollaboratorRow {
    pub project_id: Uuid,
    pub user_id: Uuid,
}

/// Row struct for reading expressions of interest.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = expressions_of_interest)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InterestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating pending interests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = expressions_of_interest)]
pub(crate) struct NewInterestRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub status: &'a str,
}

/// Insertable struct for bearer tokens.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = auth_tokens)]
pub(crate) struct NewTokenRow<'a> {
    pub key: &'a str,
    pub user_id: Uuid,
}
