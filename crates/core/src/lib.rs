//! # Vantrack Core
//!
//! Core domain types for the fleet complaint tracker:
//! - Complaint record, drafts, and the closed status/category/reaction enums
//! - Identity and Role (who may invoke which operation)
//! - ComplaintFilter for predicate-based retrieval
//! - Domain errors
//!
//! This crate is pure data + validation. Persistence lives in
//! `vantrack-persistence`, workflow rules in `vantrack-business`.

pub mod complaint;
pub mod error;
pub mod filter;
pub mod identity;

pub use complaint::{Category, Complaint, ComplaintDraft, ComplaintStatus, Reaction};
pub use error::{CoreError, CoreResult};
pub use filter::ComplaintFilter;
pub use identity::{Identity, Role};
