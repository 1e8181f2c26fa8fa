//! Red-black tree set
//!
//! Nodes live in an arena and link to each other by index, so parent links
//! need no shared ownership. Nodes are only ever appended; there is no
//! per-element removal, and `clear` empties the whole arena.
//!
//! Unlike [`HashSet`](super::HashSet), inserting an element equal to one
//! already present is a no-op.

use super::descriptor::TypeDescriptor;
use crate::error::CollectionError;
use std::cmp::Ordering;
use std::fmt;

type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

struct Node<T> {
    data: T,
    color: Color,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Ordered set of unique elements, iterated in ascending order.
pub struct OrderedSet<T> {
    nodes: Vec<Node<T>>,
    root: Option<NodeId>,
    descriptor: TypeDescriptor,
}

impl<T> OrderedSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            descriptor: TypeDescriptor::of::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Smallest element
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.leftmost(root)].data)
    }

    /// Ascending iterator
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            set: self,
            next: self.root.map(|root| self.leftmost(root)),
            remaining: self.nodes.len(),
        }
    }

    /// Drop every element, children before parents
    pub fn clear(&mut self) {
        self.drain_post_order();
    }

    fn drain_post_order(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };
        let mut slots: Vec<Option<Node<T>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();

        let mut stack = vec![(root, false)];
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                drop(slots[id].take());
                continue;
            }
            stack.push((id, true));
            if let Some(node) = &slots[id] {
                if let Some(right) = node.right {
                    stack.push((right, false));
                }
                if let Some(left) = node.left {
                    stack.push((left, false));
                }
            }
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes[id].right {
            return Some(self.leftmost(right));
        }
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].right != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    fn color(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.nodes[id].color)
    }

    /// Point `parent`'s link to `old` at `new` instead, or the root if
    /// `old` had no parent
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = Some(new),
            Some(p) if self.nodes[p].left == Some(old) => self.nodes[p].left = Some(new),
            Some(p) => self.nodes[p].right = Some(new),
        }
    }

    fn rotate_left(&mut self, x: NodeId) {
        let Some(y) = self.nodes[x].right else {
            return;
        };
        let inner = self.nodes[y].left;
        self.nodes[x].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }
        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, y);
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn rotate_right(&mut self, x: NodeId) {
        let Some(y) = self.nodes[x].left else {
            return;
        };
        let inner = self.nodes[y].right;
        self.nodes[x].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }
        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, y);
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
    }

    /// Restore the red-black properties after attaching the red leaf `node`
    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[parent].color == Color::Black {
                break;
            }
            // a red parent is never the root
            let Some(grand) = self.nodes[parent].parent else {
                break;
            };
            let parent_is_left = self.nodes[grand].left == Some(parent);
            let uncle = if parent_is_left {
                self.nodes[grand].right
            } else {
                self.nodes[grand].left
            };

            if self.color(uncle) == Color::Red {
                self.nodes[parent].color = Color::Black;
                if let Some(uncle) = uncle {
                    self.nodes[uncle].color = Color::Black;
                }
                self.nodes[grand].color = Color::Red;
                node = grand;
                continue;
            }

            let is_inner = if parent_is_left {
                self.nodes[parent].right == Some(node)
            } else {
                self.nodes[parent].left == Some(node)
            };
            let (child, parent) = if is_inner {
                if parent_is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                (parent, node)
            } else {
                (node, parent)
            };

            self.nodes[parent].color = Color::Black;
            self.nodes[grand].color = Color::Red;
            if parent_is_left {
                self.rotate_right(grand);
            } else {
                self.rotate_left(grand);
            }
            node = child;
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }
}

impl<T: Ord> OrderedSet<T> {
    /// Insert `value` unless an equal element is present
    ///
    /// Returns whether the value was inserted.
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = None;
        let mut went_left = false;
        let mut current = self.root;
        while let Some(id) = current {
            parent = Some(id);
            match value.cmp(&self.nodes[id].data) {
                Ordering::Less => {
                    went_left = true;
                    current = self.nodes[id].left;
                }
                Ordering::Greater => {
                    went_left = false;
                    current = self.nodes[id].right;
                }
                Ordering::Equal => return false,
            }
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            data: value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(id),
            Some(p) if went_left => self.nodes[p].left = Some(id),
            Some(p) => self.nodes[p].right = Some(id),
        }

        self.insert_fixup(id);
        true
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// The stored element equal to `value`
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.find(value).map(|id| &self.nodes[id].data)
    }

    /// In-order successor of `prev`, or the minimum when `prev` is `None`
    ///
    /// # Errors
    /// Returns [`CollectionError::InvalidArgument`] if `prev` is not in the
    /// set.
    pub fn get_next(&self, prev: Option<&T>) -> Result<Option<&T>, CollectionError> {
        let next = match prev {
            None => self.root.map(|root| self.leftmost(root)),
            Some(value) => {
                let id = self.find(value).ok_or_else(|| CollectionError::InvalidArgument {
                    container: "OrderedSet",
                    reason: "element passed to get_next is not in the set".to_string(),
                })?;
                self.successor(id)
            }
        };
        Ok(next.map(|id| &self.nodes[id].data))
    }

    /// Check the red-black properties, parent links and element order
    ///
    /// # Errors
    /// Returns [`CollectionError::InvariantViolated`] describing the first
    /// broken property found.
    pub fn check_invariants(&self) -> Result<(), CollectionError> {
        let Some(root) = self.root else {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(violation(format!("no root but {} nodes", self.nodes.len())))
            };
        };
        if self.nodes[root].parent.is_some() {
            return Err(violation("root has a parent".to_string()));
        }
        if self.nodes[root].color != Color::Black {
            return Err(violation("root is red".to_string()));
        }

        let mut reached = 0;
        self.check_subtree(root, &mut reached)?;
        if reached != self.nodes.len() {
            return Err(violation(format!(
                "{reached} nodes reachable from the root, {} allocated",
                self.nodes.len()
            )));
        }
        Ok(())
    }

    /// Black height of the subtree at `id`
    fn check_subtree(&self, id: NodeId, reached: &mut usize) -> Result<usize, CollectionError> {
        *reached += 1;
        let node = &self.nodes[id];
        let mut heights = [1, 1];

        let children = [
            (0, node.left, Ordering::Less),
            (1, node.right, Ordering::Greater),
        ];
        for (slot, child, expected) in children {
            let Some(child) = child else {
                continue;
            };
            let child_node = &self.nodes[child];
            if child_node.parent != Some(id) {
                return Err(violation(format!(
                    "node {child} does not link back to its parent {id}"
                )));
            }
            if child_node.data.cmp(&node.data) != expected {
                return Err(violation(format!("node {child} is on the wrong side of node {id}")));
            }
            if node.color == Color::Red && child_node.color == Color::Red {
                return Err(violation(format!("red node {id} has red child {child}")));
            }
            heights[slot] = self.check_subtree(child, reached)?;
        }

        if heights[0] != heights[1] {
            return Err(violation(format!(
                "black heights differ below node {id}: {} vs {}",
                heights[0], heights[1]
            )));
        }
        Ok(heights[0] + usize::from(node.color == Color::Black))
    }

    fn find(&self, value: &T) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            current = match value.cmp(&self.nodes[id].data) {
                Ordering::Less => self.nodes[id].left,
                Ordering::Greater => self.nodes[id].right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }
}

impl<T: Ord + Clone> OrderedSet<T> {
    #[must_use]
    pub fn from_slice(elems: &[T]) -> Self {
        let mut set = Self::new();
        for elem in elems {
            set.insert(elem.clone());
        }
        set
    }
}

fn violation(reason: String) -> CollectionError {
    CollectionError::InvariantViolated {
        container: "OrderedSet",
        reason,
    }
}

impl<T> Drop for OrderedSet<T> {
    fn drop(&mut self) {
        self.drain_post_order();
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Clone for OrderedSet<T> {
    fn clone(&self) -> Self {
        let mut set = Self::new();
        for value in self {
            set.insert(value.clone());
        }
        set
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Ascending iterator over an [`OrderedSet`].
pub struct Iter<'a, T> {
    set: &'a OrderedSet<T>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.set.successor(id);
        self.remaining -= 1;
        Some(&self.set.nodes[id].data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::DynamicString;
    use std::cell::RefCell;
    use std::rc::Rc;

    const WORDS: [&str; 11] = [
        "ben", "user", "trace", "insert", "crate", "funny", "fudge", "grace", "humorous", "lame",
        "pours",
    ];

    /// Logs its id to a shared list when dropped
    struct Logged(u32, Rc<RefCell<Vec<u32>>>);

    impl PartialEq for Logged {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl Eq for Logged {}

    impl PartialOrd for Logged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Logged {
        fn cmp(&self, other: &Self) -> Ordering {
            self.0.cmp(&other.0)
        }
    }

    impl Drop for Logged {
        fn drop(&mut self) {
            self.1.borrow_mut().push(self.0);
        }
    }

    fn word_set() -> OrderedSet<DynamicString> {
        WORDS.iter().map(|&w| DynamicString::from(w)).collect()
    }

    #[test]
    fn iterates_words_in_ascending_order() {
        let set = word_set();
        let order: Vec<String> = set.iter().map(ToString::to_string).collect();
        assert_eq!(
            order,
            [
                "ben", "crate", "fudge", "funny", "grace", "humorous", "insert", "lame", "pours",
                "trace", "user"
            ]
        );
        set.check_invariants().unwrap();
    }

    #[test]
    fn every_inserted_word_stays_contained() {
        let mut set = OrderedSet::new();
        for (i, word) in WORDS.iter().enumerate() {
            assert!(set.insert(DynamicString::from(*word)));
            for earlier in &WORDS[..=i] {
                assert!(set.contains(&DynamicString::from(*earlier)), "{earlier} lost");
            }
        }
        assert!(!set.contains(&DynamicString::from("zebra")));
    }

    #[test]
    fn reinsert_is_a_no_op() {
        let mut set = word_set();
        let before: Vec<DynamicString> = set.iter().cloned().collect();
        assert!(!set.insert(DynamicString::from("grace")));
        assert_eq!(set.len(), 11);
        let after: Vec<DynamicString> = set.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn get_next_walks_in_order() {
        let set = word_set();
        let mut walked = Vec::new();
        let mut prev = None;
        while let Some(word) = set.get_next(prev).unwrap() {
            walked.push(word.to_string());
            prev = Some(word);
        }
        assert_eq!(walked.len(), 11);
        assert!(walked.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn get_next_rejects_unknown_element() {
        let set = word_set();
        let missing = DynamicString::from("zebra");
        assert!(matches!(
            set.get_next(Some(&missing)),
            Err(CollectionError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn get_next_past_the_maximum() {
        let set = word_set();
        let last = DynamicString::from("user");
        assert!(set.get_next(Some(&last)).unwrap().is_none());
        assert_eq!(set.first().map(ToString::to_string).as_deref(), Some("ben"));
    }

    #[test]
    fn empty_set() {
        let set: OrderedSet<u32> = OrderedSet::new();
        assert!(set.is_empty());
        assert!(set.first().is_none());
        assert!(set.get_next(None).unwrap().is_none());
        assert_eq!(set.iter().count(), 0);
        set.check_invariants().unwrap();
    }

    #[test]
    fn sorted_inserts_stay_balanced() {
        let mut set = OrderedSet::new();
        for i in 0..1024u32 {
            set.insert(i);
        }
        set.check_invariants().unwrap();
        assert!(set.iter().copied().eq(0..1024));
    }

    #[test]
    fn shuffled_inserts_keep_red_black_properties() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut values: Vec<u32> = (0..2000).map(|_| rng.u32(0..500)).collect();
        rng.shuffle(&mut values);

        let mut set = OrderedSet::new();
        for (i, &value) in values.iter().enumerate() {
            set.insert(value);
            if i % 100 == 0 {
                set.check_invariants().unwrap();
            }
        }
        set.check_invariants().unwrap();

        let mut expected = values.clone();
        expected.sort_unstable();
        expected.dedup();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), expected);
        assert_eq!(set.iter().len(), expected.len());
    }

    #[test]
    fn check_invariants_catches_red_root() {
        let mut set = OrderedSet::from_slice(&[2u32, 1, 3]);
        let root = set.root.unwrap();
        set.nodes[root].color = Color::Red;
        assert!(matches!(
            set.check_invariants(),
            Err(CollectionError::InvariantViolated { .. })
        ));
    }

    #[test]
    fn check_invariants_catches_black_height_mismatch() {
        let mut set = OrderedSet::from_slice(&[2u32, 1, 3]);
        let left = set.nodes[set.root.unwrap()].left.unwrap();
        set.nodes[left].color = Color::Black;
        assert!(set.check_invariants().is_err());
    }

    #[test]
    fn clear_drops_children_before_parents() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = OrderedSet::new();
        for id in [2, 1, 3] {
            set.insert(Logged(id, Rc::clone(&log)));
        }
        set.clear();
        assert_eq!(*log.borrow(), vec![1, 3, 2]);
        assert!(set.is_empty());
        set.check_invariants().unwrap();
    }

    #[test]
    fn drop_releases_every_node_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut set = OrderedSet::new();
            for id in 0..50 {
                set.insert(Logged(id, Rc::clone(&log)));
            }
            // duplicate is rejected and dropped immediately
            assert!(!set.insert(Logged(10, Rc::clone(&log))));
            assert_eq!(log.borrow().len(), 1);
        }
        let mut dropped = log.borrow().clone();
        assert_eq!(dropped.len(), 51);
        dropped.sort_unstable();
        dropped.dedup();
        assert_eq!(dropped.len(), 50);
    }

    #[test]
    fn clear_then_reuse() {
        let mut set = word_set();
        set.clear();
        assert!(set.is_empty());
        assert!(set.insert(DynamicString::from("lame")));
        assert_eq!(set.len(), 1);
        set.check_invariants().unwrap();
    }

    #[test]
    fn clone_is_independent() {
        let original = word_set();
        let mut copy = original.clone();
        copy.insert(DynamicString::from("zebra"));
        assert_eq!(copy.len(), 12);
        copy.clear();

        assert_eq!(original.len(), 11);
        assert!(original.contains(&DynamicString::from("trace")));
        assert!(!original.contains(&DynamicString::from("zebra")));
        original.check_invariants().unwrap();
    }

    #[test]
    fn get_returns_stored_element() {
        let set = word_set();
        let stored = set.get(&DynamicString::from("pours")).unwrap();
        assert_eq!(stored, "pours");
        assert!(set.get(&DynamicString::from("poUrs")).is_none());
    }
}
