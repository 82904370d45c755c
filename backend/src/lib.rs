//! Project-collaboration backend library modules.
//!
//! Users register and list programming skills, create open-source projects
//! with a collaborator cap, express interest in joining projects, and
//! project creators accept or reject those expressions of interest.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(test)]
pub(crate) mod test_support;

pub use doc::ApiDoc;
