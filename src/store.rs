// Client-side bug list model
//
// An ordered collection of bugs keyed by id. This is the only client state
// the table is rendered from; it changes exclusively through the
// reconciliation functions below, each applied after a server confirmation.

use crate::model::{Bug, BugId};

/// Ordered bug collection holding at most one entry per id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BugList {
    bugs: Vec<Bug>,
}

impl BugList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a server response (same rules as [`BugList::replace_all`])
    pub fn from_server(bugs: Vec<Bug>) -> Self {
        let mut list = Self::new();
        list.replace_all(bugs);
        list
    }

    /// Replace the whole collection, keeping server order.
    ///
    /// A repeated id keeps its first position and takes the data of its last
    /// occurrence.
    pub fn replace_all(&mut self, bugs: Vec<Bug>) {
        self.bugs.clear();
        self.bugs.reserve(bugs.len());
        for bug in bugs {
            self.upsert(bug);
        }
    }

    /// Replace the bug with the same id in place, or append it
    pub fn upsert(&mut self, bug: Bug) {
        match self.position(bug.id) {
            Some(idx) => self.bugs[idx] = bug,
            None => self.bugs.push(bug),
        }
    }

    /// Remove exactly the bug with this id
    pub fn remove(&mut self, id: BugId) -> Option<Bug> {
        let idx = self.position(id)?;
        Some(self.bugs.remove(idx))
    }

    pub fn get(&self, id: BugId) -> Option<&Bug> {
        self.bugs.iter().find(|b| b.id == id)
    }

    pub fn position(&self, id: BugId) -> Option<usize> {
        self.bugs.iter().position(|b| b.id == id)
    }

    #[cfg(test)]
    pub fn contains(&self, id: BugId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bug> {
        self.bugs.iter()
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<BugId> {
        self.bugs.iter().map(|b| b.id).collect()
    }

    pub fn as_slice(&self) -> &[Bug] {
        &self.bugs
    }

    pub fn len(&self) -> usize {
        self.bugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bugs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::bug;

    #[test]
    fn test_replace_all_keeps_server_order() {
        let mut list = BugList::from_server(vec![bug(5, "e"), bug(1, "a"), bug(3, "c")]);
        assert_eq!(list.ids(), vec![BugId(5), BugId(1), BugId(3)]);

        list.replace_all(vec![bug(2, "b")]);
        assert_eq!(list.ids(), vec![BugId(2)]);
    }

    #[test]
    fn test_replace_all_collapses_duplicate_ids() {
        let list = BugList::from_server(vec![bug(1, "first"), bug(2, "b"), bug(1, "second")]);
        assert_eq!(list.ids(), vec![BugId(1), BugId(2)]);
        assert_eq!(list.get(BugId(1)).unwrap().title, "second");
    }

    #[test]
    fn test_upsert_in_place() {
        let mut list = BugList::from_server(vec![bug(1, "a"), bug(2, "b")]);
        list.upsert(bug(1, "renamed"));
        list.upsert(bug(9, "new"));
        assert_eq!(list.ids(), vec![BugId(1), BugId(2), BugId(9)]);
        assert_eq!(list.get(BugId(1)).unwrap().title, "renamed");
    }

    #[test]
    fn test_remove_only_matching_id() {
        let mut list = BugList::from_server(vec![bug(1, "a"), bug(2, "b"), bug(3, "c")]);
        let removed = list.remove(BugId(2)).unwrap();
        assert_eq!(removed.title, "b");
        assert_eq!(list.ids(), vec![BugId(1), BugId(3)]);

        assert!(list.remove(BugId(2)).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_empty() {
        let list = BugList::new();
        assert!(list.is_empty());
        assert!(!list.contains(BugId(1)));
        assert_eq!(list.iter().count(), 0);
    }
}
