//! Participant presence within a session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// A user's presence in one session, joined with their display profile.
///
/// `active` flips false on retreat or abandon; `abandoned` is set only by
/// an explicit abandon and cleared only by a subsequent rejoin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub name: String,
    pub avatar: Option<String>,
    pub active: bool,
    pub abandoned: bool,
}

/// Result of the pre-join lookup: the user's profile, confirmed not to be
/// currently active in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCandidate {
    pub user_id: UserId,
    pub name: String,
    pub avatar: Option<String>,
}
