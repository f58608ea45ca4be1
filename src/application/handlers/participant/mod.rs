//! Participant presence handlers.

mod abandon_session;
mod join_session;
mod retreat_from_session;

pub use abandon_session::{AbandonSessionCommand, AbandonSessionHandler};
pub use join_session::{JoinSessionCommand, JoinSessionHandler};
pub use retreat_from_session::{RetreatFromSessionCommand, RetreatFromSessionHandler};
