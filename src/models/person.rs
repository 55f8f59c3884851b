//! Person and group models.
//!
//! People are owned by the surrounding membership system. The engine reads
//! only their identity and the partition tag inherited from their group.
//!
//! # Partition
//! A person's partition is never stored on the person itself: it is derived
//! from the group they belong to. Moving a person to another group is the
//! only way to change it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable person identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub String);

/// Stable group ("cell") identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Gender partition used to restrict eligible occupants of some slots.
///
/// An unresolvable partition is represented as `None` wherever a
/// partition is looked up; it matches no partition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Partition {
    Male,
    Female,
}

impl Partition {
    /// Whether a candidate partition passes an optional filter.
    ///
    /// No filter admits everyone, including unknown candidates.
    /// A filter admits only an identical, known partition.
    pub fn admits(filter: Option<Partition>, candidate: Option<Partition>) -> bool {
        match filter {
            None => true,
            Some(required) => candidate == Some(required),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Partition::Male => "male",
            Partition::Female => "female",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Role of a person at the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonKind {
    /// Staff serving for the whole event.
    #[default]
    Worker,
    /// Short-term attendee.
    Passer,
}

/// A person known to the membership system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique person identifier.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Group the person belongs to (source of their partition).
    pub group_id: GroupId,
    /// Worker or passer.
    pub kind: PersonKind,
    /// Domain-specific metadata.
    pub attributes: HashMap<String, String>,
}

impl Person {
    /// Creates a worker in the given group.
    pub fn new(id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(id),
            name: String::new(),
            group_id: GroupId::new(group_id),
            kind: PersonKind::Worker,
            attributes: HashMap::new(),
        }
    }

    /// Creates a passer in the given group.
    pub fn passer(id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self::new(id, group_id).with_kind(PersonKind::Passer)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the person kind.
    pub fn with_kind(mut self, kind: PersonKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Display name, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// A named collection of people sharing one partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    pub id: GroupId,
    /// Human-readable name.
    pub name: String,
    /// Partition inherited by every member.
    pub partition: Partition,
}

impl Group {
    pub fn new(id: impl Into<String>, partition: Partition) -> Self {
        Self {
            id: GroupId::new(id),
            name: String::new(),
            partition,
        }
    }

    pub fn male(id: impl Into<String>) -> Self {
        Self::new(id, Partition::Male)
    }

    pub fn female(id: impl Into<String>) -> Self {
        Self::new(id, Partition::Female)
    }

    /// Sets the group name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
