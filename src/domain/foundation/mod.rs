//! Foundation types shared across the domain.
//!
//! Strongly-typed identifiers, timestamps, and the closed error taxonomy
//! every layer of the crate speaks.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{SessionId, UserId, WorkItemId};
pub use timestamp::Timestamp;
