//! Work items queued for estimation within a session.
//!
//! Items belong to exactly one session and are never reassigned. Votes and
//! point averaging live outside this crate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ValidationError, WorkItemId};

/// A unit of work to be estimated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub name: String,
    pub reference_id: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub acceptance_criteria: Option<String>,
}

/// Input for a work item not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkItem {
    pub name: String,
    pub reference_id: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub acceptance_criteria: Option<String>,
}

impl NewWorkItem {
    /// Creates a new work item input, rejecting blank names.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            name,
            reference_id: None,
            link: None,
            description: None,
            acceptance_criteria: None,
        })
    }

    /// Assigns an id, producing the persisted form.
    pub fn into_work_item(self, id: WorkItemId) -> WorkItem {
        WorkItem {
            id,
            name: self.name,
            reference_id: self.reference_id,
            link: self.link,
            description: self.description,
            acceptance_criteria: self.acceptance_criteria,
        }
    }
}
