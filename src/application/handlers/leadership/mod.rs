//! Leadership rotation handlers.

mod demote_leader;
mod promote_leader;

pub use demote_leader::{DemoteLeaderCommand, DemoteLeaderHandler};
pub use promote_leader::{PromoteLeaderCommand, PromoteLeaderHandler};
