//! Shared response shapes for the HTTP adapter.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Simple acknowledgement body carried by most mutations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome description.
    #[schema(example = "Skill added successfully")]
    pub message: String,
}

impl MessageResponse {
    /// Build an acknowledgement with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
