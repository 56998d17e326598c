//! Print selection set.
//!
//! # Responsibility
//! - Track which students are marked for printing.
//!
//! # Invariants
//! - Selection only holds ids; it never owns student data.
//! - An empty selection means "print the whole roster" to callers
//!   resolving print targets.

use crate::model::student::StudentId;
use std::collections::BTreeSet;

/// Set of student ids marked for printing.
///
/// Lives in caller state (the UI shell), not in persistent storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<StudentId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership for one student id.
    ///
    /// Returns `true` when the id is selected after the call.
    pub fn toggle(&mut self, id: StudentId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Removes one id. Idempotent; used when a student is deleted.
    pub fn remove(&mut self, id: StudentId) {
        self.ids.remove(&id);
    }

    /// Drops every selected id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates selected ids in stable (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<StudentId> for Selection {
    fn from_iter<T: IntoIterator<Item = StudentId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
