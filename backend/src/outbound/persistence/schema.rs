//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. Regenerate
//! with `diesel print-schema` when migrations change.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Unique contact address.
        email -> Varchar,
        /// Opaque salted password digest.
        password_hash -> Varchar,
        /// Optional age.
        age -> Nullable<Int4>,
        /// Optional country.
        country -> Nullable<Varchar>,
        /// Optional city of residence.
        residence -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Programming skills, created lazily and never deleted.
    programming_skills (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique skill name backing the get-or-create upsert.
        name -> Varchar,
    }
}

diesel::table! {
    /// User-to-skill associations, capped at three per user.
    user_skills (user_id, skill_id) {
        /// Owning user.
        user_id -> Uuid,
        /// Held skill.
        skill_id -> Uuid,
        /// Association timestamp; orders listings.
        added_at -> Timestamptz,
    }
}

diesel::table! {
    /// Open-source projects.
    projects (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique project name.
        project_name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Collaborator ceiling; positive.
        maximum_collaborators -> Int4,
        /// Denormalized collaborator counter, maintained transactionally.
        current_collaborators -> Int4,
        /// Creator, immutable after creation.
        creator_id -> Uuid,
        /// Lifecycle status: draft, active, or closed.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project-to-collaborator associations.
    project_collaborators (project_id, user_id) {
        /// Project side of the association.
        project_id -> Uuid,
        /// Collaborating user.
        user_id -> Uuid,
        /// Association timestamp; orders listings.
        added_at -> Timestamptz,
    }
}

diesel::table! {
    /// Expressions of interest linking users to projects.
    expressions_of_interest (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Interested user.
        user_id -> Uuid,
        /// Target project.
        project_id -> Uuid,
        /// State-machine position: pending, accepted, or rejected. A partial
        /// unique index on (user_id, project_id) covers the pending and
        /// accepted rows.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bearer token keys, one per user, issued lazily.
    auth_tokens (key) {
        /// Primary key: 40-character hex token.
        #[max_length = 40]
        key -> Varchar,
        /// Owning user; unique.
        user_id -> Uuid,
        /// Issuance timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_skills -> users (user_id));
diesel::joinable!(user_skills -> programming_skills (skill_id));
diesel::joinable!(projects -> users (creator_id));
diesel::joinable!(project_collaborators -> projects (project_id));
diesel::joinable!(project_collaborators -> users (user_id));
diesel::joinable!(expressions_of_interest -> projects (project_id));
diesel::joinable!(expressions_of_interest -> users (user_id));
diesel::joinable!(auth_tokens -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    programming_skills,
    user_skills,
    projects,
    project_collaborators,
    expressions_of_interest,
    auth_tokens,
);
