//! Session domain module.
//!
//! An estimation session gathers participants around a list of work items
//! and runs one voting round per item. This module owns the aggregate and
//! its consistency rules: at least one leader at all times, coherent
//! voting state (locked whenever no item is active), and the
//! active/abandoned presence flags per participant.

mod aggregate;
mod errors;
mod participant;
mod rounding;
mod work_item;

pub use aggregate::{Session, MAX_NAME_LENGTH};
pub(crate) use aggregate::validate_name;
pub use errors::SessionError;
pub use participant::{JoinCandidate, Participant};
pub use rounding::RoundingMode;
pub use work_item::{NewWorkItem, WorkItem};
