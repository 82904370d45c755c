//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business policy;
//! the conditional mutations they perform (capacity re-check under a row
//! lock, count-then-attach in one transaction) are the storage-side halves
//! of contracts stated on the domain ports.

pub mod auth;
pub mod persistence;
