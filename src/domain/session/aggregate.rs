//! Session aggregate entity.
//!
//! A session is the top-level container for one estimation activity: its
//! card deck, leaders, participants, work items, and the voting state for
//! the item currently on the table.
//!
//! # Invariants
//!
//! - `voting_locked` is true whenever `active_item_id` is `None`
//! - the leader set is never empty after creation

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, Timestamp, UserId, ValidationError, WorkItemId,
};
use crate::domain::session::{Participant, RoundingMode, WorkItem};

/// Maximum length for a session name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Session aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Display name.
    name: String,

    /// Ordered card-deck labels participants may vote with.
    point_values_allowed: Vec<String>,

    /// True while voting is closed.
    voting_locked: bool,

    /// Item currently being voted, if any.
    active_item_id: Option<WorkItemId>,

    /// Whether voting finishes automatically once every active participant
    /// has voted.
    auto_finish_voting: bool,

    /// Rounding applied to the vote average.
    point_average_rounding: RoundingMode,

    /// Users authorized to mutate this session. Never empty.
    leaders: Vec<UserId>,

    /// Presence records, ordered by display name.
    participants: Vec<Participant>,

    /// Items queued for estimation.
    work_items: Vec<WorkItem>,

    /// When the session was created.
    created_at: Timestamp,
}

impl Session {
    /// Creates a new session led by its creator.
    ///
    /// Voting starts locked with no active item.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank or too long
    pub fn new(
        id: SessionId,
        creator: UserId,
        name: String,
        point_values_allowed: Vec<String>,
        auto_finish_voting: bool,
        point_average_rounding: RoundingMode,
    ) -> Result<Self, DomainError> {
        validate_name(&name)?;

        Ok(Self {
            id,
            name,
            point_values_allowed,
            voting_locked: true,
            active_item_id: None,
            auto_finish_voting,
            point_average_rounding,
            leaders: vec![creator],
            participants: Vec::new(),
            work_items: Vec::new(),
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        name: String,
        point_values_allowed: Vec<String>,
        voting_locked: bool,
        active_item_id: Option<WorkItemId>,
        auto_finish_voting: bool,
        point_average_rounding: RoundingMode,
        leaders: Vec<UserId>,
        participants: Vec<Participant>,
        work_items: Vec<WorkItem>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            point_values_allowed,
            voting_locked,
            active_item_id,
            auto_finish_voting,
            point_average_rounding,
            leaders,
            participants,
            work_items,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the allowed card values, in deck order.
    pub fn point_values_allowed(&self) -> &[String] {
        &self.point_values_allowed
    }

    /// True while voting is closed.
    pub fn voting_locked(&self) -> bool {
        self.voting_locked
    }

    /// Returns the item currently being voted, if any.
    pub fn active_item_id(&self) -> Option<&WorkItemId> {
        self.active_item_id.as_ref()
    }

    /// Whether voting auto-finishes once all active participants voted.
    pub fn auto_finish_voting(&self) -> bool {
        self.auto_finish_voting
    }

    /// Returns the configured rounding mode.
    pub fn point_average_rounding(&self) -> RoundingMode {
        self.point_average_rounding
    }

    /// Returns the current leader set.
    pub fn leaders(&self) -> &[UserId] {
        &self.leaders
    }

    /// Returns the participant records.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Returns the work items queued for estimation.
    pub fn work_items(&self) -> &[WorkItem] {
        &self.work_items
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Checks if the given user is a current leader.
    pub fn is_leader(&self, user_id: &UserId) -> bool {
        self.leaders.contains(user_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attachment (query composition)
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the work item listing.
    pub fn with_work_items(mut self, work_items: Vec<WorkItem>) -> Self {
        self.work_items = work_items;
        self
    }

    /// Replaces the participant listing.
    pub fn with_participants(mut self, participants: Vec<Participant>) -> Self {
        self.participants = participants;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Leadership
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a leader. Promoting an existing leader is a no-op.
    ///
    /// Returns whether the set changed.
    pub fn add_leader(&mut self, user_id: UserId) -> bool {
        if self.leaders.contains(&user_id) {
            return false;
        }
        self.leaders.push(user_id);
        true
    }

    /// Removes a leader.
    ///
    /// Removing a user who is not a leader is a no-op (`Ok(false)`).
    ///
    /// # Errors
    ///
    /// - `LastLeader` if the removal would empty the leader set
    pub fn remove_leader(&mut self, user_id: &UserId) -> Result<bool, DomainError> {
        if !self.leaders.contains(user_id) {
            return Ok(false);
        }
        if self.leaders.len() == 1 {
            return Err(DomainError::new(
                ErrorCode::LastLeader,
                "Cannot demote the only remaining leader",
            ));
        }
        self.leaders.retain(|l| l != user_id);
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Voting state
    // ─────────────────────────────────────────────────────────────────────────

    /// Opens voting on one of the session's work items.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the item does not belong to this session
    pub fn start_voting(&mut self, item_id: WorkItemId) -> Result<(), DomainError> {
        if !self.work_items.iter().any(|item| item.id == item_id) {
            return Err(DomainError::validation(
                "active_item_id",
                format!("work item {} is not part of this session", item_id),
            ));
        }
        self.active_item_id = Some(item_id);
        self.voting_locked = false;
        Ok(())
    }

    /// Closes voting on the active item. The item stays on the table for
    /// result display until cleared.
    pub fn finish_voting(&mut self) {
        self.voting_locked = true;
    }

    /// Takes the active item off the table, locking voting with it.
    pub fn clear_active_item(&mut self) {
        self.active_item_id = None;
        self.voting_locked = true;
    }
}

/// Validates a session name.
pub(crate) fn validate_name(name: &str) -> Result<(), DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name").into());
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::too_long("name", MAX_NAME_LENGTH, trimmed.len()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::session::NewWorkItem;
    use proptest::prelude::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn test_session() -> Session {
        Session::new(
            SessionId::new(),
            user("leader-1"),
            "Sprint 12 grooming".to_string(),
            vec!["1".into(), "2".into(), "3".into(), "5".into()],
            true,
            RoundingMode::Ceil,
        )
        .unwrap()
    }

    fn session_with_items(count: usize) -> Session {
        let items = (0..count)
            .map(|i| {
                NewWorkItem::new(format!("Item {}", i))
                    .unwrap()
                    .into_work_item(WorkItemId::new())
            })
            .collect();
        test_session().with_work_items(items)
    }

    // Construction tests

    #[test]
    fn new_session_starts_locked_with_no_active_item() {
        let session = test_session();
        assert!(session.voting_locked());
        assert!(session.active_item_id().is_none());
    }

    #[test]
    fn new_session_has_creator_as_sole_leader() {
        let session = test_session();
        assert_eq!(session.leaders(), &[user("leader-1")]);
        assert!(session.is_leader(&user("leader-1")));
        assert!(!session.is_leader(&user("someone-else")));
    }

    #[test]
    fn new_session_rejects_blank_name() {
        let result = Session::new(
            SessionId::new(),
            user("leader-1"),
            "   ".to_string(),
            vec![],
            false,
            RoundingMode::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_session_rejects_too_long_name() {
        let result = Session::new(
            SessionId::new(),
            user("leader-1"),
            "x".repeat(MAX_NAME_LENGTH + 1),
            vec![],
            false,
            RoundingMode::default(),
        );
        assert!(result.is_err());
    }

    // Leadership tests

    #[test]
    fn add_leader_is_idempotent() {
        let mut session = test_session();
        assert!(session.add_leader(user("leader-2")));
        assert!(!session.add_leader(user("leader-2")));
        assert_eq!(session.leaders().len(), 2);
    }

    #[test]
    fn remove_leader_rejects_last_leader() {
        let mut session = test_session();
        let err = session.remove_leader(&user("leader-1")).unwrap_err();
        assert_eq!(err.code, ErrorCode::LastLeader);
        assert_eq!(session.leaders(), &[user("leader-1")]);
    }

    #[test]
    fn remove_leader_succeeds_with_two_leaders() {
        let mut session = test_session();
        session.add_leader(user("leader-2"));
        assert!(session.remove_leader(&user("leader-1")).unwrap());
        assert_eq!(session.leaders(), &[user("leader-2")]);
    }

    #[test]
    fn remove_non_leader_is_noop() {
        let mut session = test_session();
        assert!(!session.remove_leader(&user("bystander")).unwrap());
        assert_eq!(session.leaders().len(), 1);
    }

    // Voting state tests

    #[test]
    fn start_voting_unlocks_on_known_item() {
        let mut session = session_with_items(2);
        let item_id = session.work_items()[0].id;
        session.start_voting(item_id).unwrap();
        assert!(!session.voting_locked());
        assert_eq!(session.active_item_id(), Some(&item_id));
    }

    #[test]
    fn start_voting_rejects_foreign_item() {
        let mut session = session_with_items(1);
        let result = session.start_voting(WorkItemId::new());
        assert!(result.is_err());
        assert!(session.voting_locked());
        assert!(session.active_item_id().is_none());
    }

    #[test]
    fn finish_voting_locks_but_keeps_item() {
        let mut session = session_with_items(1);
        let item_id = session.work_items()[0].id;
        session.start_voting(item_id).unwrap();
        session.finish_voting();
        assert!(session.voting_locked());
        assert_eq!(session.active_item_id(), Some(&item_id));
    }

    #[test]
    fn clear_active_item_locks_voting() {
        let mut session = session_with_items(1);
        let item_id = session.work_items()[0].id;
        session.start_voting(item_id).unwrap();
        session.clear_active_item();
        assert!(session.voting_locked());
        assert!(session.active_item_id().is_none());
    }

    // Invariant: locked whenever no item is active, under any op sequence.

    #[derive(Debug, Clone)]
    enum VotingOp {
        Start(usize),
        Finish,
        Clear,
    }

    fn voting_op() -> impl Strategy<Value = VotingOp> {
        prop_oneof![
            (0..4usize).prop_map(VotingOp::Start),
            Just(VotingOp::Finish),
            Just(VotingOp::Clear),
        ]
    }

    proptest! {
        #[test]
        fn voting_lock_coherent_under_any_sequence(ops in proptest::collection::vec(voting_op(), 0..40)) {
            let mut session = session_with_items(4);
            let item_ids: Vec<WorkItemId> = session.work_items().iter().map(|i| i.id).collect();

            for op in ops {
                match op {
                    VotingOp::Start(i) => {
                        session.start_voting(item_ids[i]).unwrap();
                    }
                    VotingOp::Finish => session.finish_voting(),
                    VotingOp::Clear => session.clear_active_item(),
                }
                prop_assert!(session.active_item_id().is_some() || session.voting_locked());
            }
        }
    }
}
