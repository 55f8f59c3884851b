//! Allocation error taxonomy.
//!
//! Every variant is an expected, caller-recoverable outcome of an invalid
//! placement attempt. When an operation returns an error the assignment
//! store has not been modified.

use crate::models::{Partition, PersonId, Position, SlotKey};

/// Result type for allocation operations.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Reasons a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// The slot has no free seat for a new occupant.
    #[error("{slot} is full ({capacity} seats), cannot seat anyone at {position}")]
    CapacityExceeded {
        slot: SlotKey,
        position: Position,
        capacity: usize,
    },

    /// The person already holds a mutually exclusive seat on this surface.
    #[error("{person} cannot be placed: {reason}")]
    SchedulingConflict {
        person: PersonId,
        /// Slot holding the clashing commitment.
        clashing: SlotKey,
        reason: String,
    },

    /// The slot or position does not exist in the catalog for this surface.
    #[error("unknown slot: {0}")]
    UnknownSlot(String),

    /// The person is not known to the membership system.
    #[error("unknown person: {0}")]
    UnknownPerson(PersonId),

    /// The incoming person's partition does not match the slot's filter.
    #[error("{person} ({}) may not be placed in {slot}, reserved for {required}", describe(.actual))]
    PartitionMismatch {
        person: PersonId,
        slot: SlotKey,
        required: Partition,
        actual: Option<Partition>,
    },
}

fn describe(partition: &Option<Partition>) -> &'static str {
    partition.map_or("unknown", Partition::label)
}

impl AllocationError {
    /// Short machine-friendly code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AllocationError::CapacityExceeded { .. } => "capacity_exceeded",
            AllocationError::SchedulingConflict { .. } => "scheduling_conflict",
            AllocationError::UnknownSlot(_) => "unknown_slot",
            AllocationError::UnknownPerson(_) => "unknown_person",
            AllocationError::PartitionMismatch { .. } => "partition_mismatch",
        }
    }
}
