//! Identity and partition provider.
//!
//! The engine reads people and groups from an external membership system
//! through [`MembershipProvider`]. [`Roster`] is an in-memory provider for
//! embedding and tests.
//!
//! # Partition Resolution
//! `person → group → partition`. Any broken link resolves to `None`
//! (unknown); resolution never fails.

use std::collections::HashMap;

use crate::models::{Group, GroupId, Partition, Person, PersonId};

/// Read-only access to people and groups.
pub trait MembershipProvider: Send + Sync {
    /// Looks up a person by identifier.
    fn lookup_person(&self, id: &PersonId) -> Option<Person>;

    /// Looks up a group by identifier.
    fn lookup_group(&self, id: &GroupId) -> Option<Group>;

    /// Resolves a person's partition through their group.
    ///
    /// Returns `None` if the person or their group is unknown.
    fn partition_of(&self, id: &PersonId) -> Option<Partition> {
        let person = self.lookup_person(id)?;
        self.lookup_group(&person.group_id).map(|g| g.partition)
    }
}

/// In-memory membership provider.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    groups: HashMap<GroupId, Group>,
    people: HashMap<PersonId, Person>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: adds a group.
    pub fn with_group(mut self, group: Group) -> Self {
        self.add_group(group);
        self
    }

    /// Builder: adds a person.
    pub fn with_person(mut self, person: Person) -> Self {
        self.add_person(person);
        self
    }

    /// Adds (or replaces) a group.
    pub fn add_group(&mut self, group: Group) {
        self.groups.insert(group.id.clone(), group);
    }

    /// Adds (or replaces) a person.
    pub fn add_person(&mut self, person: Person) {
        self.people.insert(person.id.clone(), person);
    }

    /// Moves a person to another group, changing their partition.
    ///
    /// Returns `false` if the person is unknown.
    pub fn move_person(&mut self, id: &PersonId, group_id: GroupId) -> bool {
        match self.people.get_mut(id) {
            Some(person) => {
                person.group_id = group_id;
                true
            }
            None => false,
        }
    }

    /// Members of a group, sorted by identifier.
    pub fn members_of(&self, group_id: &GroupId) -> Vec<&Person> {
        let mut members: Vec<&Person> = self
            .people
            .values()
            .filter(|p| &p.group_id == group_id)
            .collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));
        members
    }

    /// All groups, sorted by identifier.
    pub fn groups(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.groups.values().collect();
        groups.sort_by(|a, b| a.id.cmp(&b.id));
        groups
    }

    /// All people, sorted by identifier.
    pub fn people(&self) -> Vec<&Person> {
        let mut people: Vec<&Person> = self.people.values().collect();
        people.sort_by(|a, b| a.id.cmp(&b.id));
        people
    }

    /// Identifiers of every person whose partition resolves to `partition`.
    pub fn ids_in_partition(&self, partition: Partition) -> Vec<PersonId> {
        self.people()
            .into_iter()
            .filter(|p| self.partition_of(&p.id) == Some(partition))
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }
}

impl MembershipProvider for Roster {
    fn lookup_person(&self, id: &PersonId) -> Option<Person> {
        self.people.get(id).cloned()
    }

    fn lookup_group(&self, id: &GroupId) -> Option<Group> {
        self.groups.get(id).cloned()
    }
}
