//! Serializable point-in-time view of a group, for export or reporting.

use serde::{Deserialize, Serialize};

use crate::group::FaultGroup;

/// Serializable view of a [`FaultGroup`]'s members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub message: String,
    pub faults: Vec<FaultSnapshot>,
}

/// One captured member: its rendering, payload type, and provenance label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultSnapshot {
    pub rendered: String,
    pub kind: String,
    pub source: String,
}

impl FaultGroup {
    /// Capture a serializable view of the group's current members.
    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            message: self.message().to_string(),
            faults: self
                .iter()
                .map(|(fault, source)| FaultSnapshot {
                    rendered: fault.to_string(),
                    kind: fault.kind_name().to_string(),
                    source: source.to_string(),
                })
                .collect(),
        }
    }
}
