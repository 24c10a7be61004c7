//! Parent to children hierarchy index.
//!
//! Built from `is_a` lines while terms are parsed. Children are recorded
//! as positions into the term list that owns them, so the index never
//! borrows the terms themselves.

use std::collections::HashMap;

/// Maps a parent identifier to the positions of the terms declaring it
/// with `is_a`.
///
/// Parent identifiers are plain strings and need not correspond to a term
/// in the same list. Positions for one parent keep declaration order.
///
/// # Examples
///
/// ```
/// use obo_loader::HierarchyIndex;
///
/// let mut index = HierarchyIndex::new();
/// index.add("SYMP:0000461", 1);
/// index.add("SYMP:0000461", 2);
///
/// assert_eq!(index.children("SYMP:0000461"), &[1, 2]);
/// assert!(index.children("SYMP:0000999").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyIndex {
    children_by_parent: HashMap<String, Vec<usize>>,
}

impl HierarchyIndex {
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the term at `child` declares `parent` as an `is_a` parent.
    pub fn add(&mut self, parent: &str, child: usize) {
        match self.children_by_parent.get_mut(parent) {
            Some(children) => children.push(child),
            None => {
                self.children_by_parent
                    .insert(parent.to_string(), vec![child]);
            }
        }
    }

    /// Returns the child positions recorded for `parent`.
    pub fn children(&self, parent: &str) -> &[usize] {
        self.children_by_parent
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if at least one child names `parent`.
    pub fn contains_parent(&self, parent: &str) -> bool {
        self.children_by_parent.contains_key(parent)
    }

    /// Returns the number of distinct parents with children.
    pub fn parent_count(&self) -> usize {
        self.children_by_parent.len()
    }

    /// Returns the total number of parent to child links.
    pub fn len(&self) -> usize {
        self.children_by_parent.values().map(Vec::len).sum()
    }

    /// Returns true if no link has been recorded.
    pub fn is_empty(&self) -> bool {
        self.children_by_parent.is_empty()
    }

    /// Iterates over parent identifiers in arbitrary order.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.children_by_parent.keys().map(String::as_str)
    }

    /// Iterates over `(parent, children)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.children_by_parent
            .iter()
            .map(|(parent, children)| (parent.as_str(), children.as_slice()))
    }

    /// Drops every link to a position at or beyond `len`.
    ///
    /// Used to roll back a failed load into a shared term list.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.children_by_parent.retain(|_, children| {
            children.retain(|&child| child < len);
            !children.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let mut index = HierarchyIndex::new();
        index.add("A", 3);
        index.add("A", 1);
        index.add("B", 2);

        assert_eq!(index.children("A"), &[3, 1]);
        assert_eq!(index.children("B"), &[2]);
        assert_eq!(index.parent_count(), 2);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_empty_index() {
        let index = HierarchyIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(!index.contains_parent("A"));
        assert!(index.children("A").is_empty());
    }

    #[test]
    fn test_truncate_drops_late_children() {
        let mut index = HierarchyIndex::new();
        index.add("A", 0);
        index.add("A", 5);
        index.add("B", 6);

        index.truncate(5);

        assert_eq!(index.children("A"), &[0]);
        assert!(!index.contains_parent("B"));
        assert_eq!(index.parent_count(), 1);
    }

    #[test]
    fn test_iter_lists_all_parents() {
        let mut index = HierarchyIndex::new();
        index.add("A", 0);
        index.add("B", 1);

        let mut parents: Vec<&str> = index.parents().collect();
        parents.sort_unstable();
        assert_eq!(parents, vec!["A", "B"]);

        let total: usize = index.iter().map(|(_, children)| children.len()).sum();
        assert_eq!(total, 2);
    }
}
