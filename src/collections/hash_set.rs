//! Open-addressing hash set with linear probing
//!
//! Elements live directly in a slot table; an occupancy bitmap marks which
//! slots hold a live element. There is no per-element removal, so a slot is
//! either live or has never been filled since the last clear, and the probe
//! sequence of every live element is unbroken.
//!
//! `insert` does not check for an equal element already in the set: inserting
//! the same value twice stores it twice and counts it twice. The ordered set
//! in this crate rejects duplicates instead. Callers that need uniqueness check
//! `contains` first.

use super::descriptor::{TypeDescriptor, grown_capacity, hash_one};
use crate::error::CollectionError;
use fixedbitset::FixedBitSet;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::atomic::{AtomicU64, Ordering};

const DEFAULT_CAP: usize = 16;

/// Source of set ids; a clone takes a fresh one
static NEXT_SET_ID: AtomicU64 = AtomicU64::new(0);

fn next_set_id() -> u64 {
    NEXT_SET_ID.fetch_add(1, Ordering::Relaxed)
}

/// Position of a live element, valid until the set is resized or cleared.
///
/// A cursor only works with the set that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    set: u64,
    index: usize,
    generation: u64,
}

impl Cursor {
    /// Slot index this cursor points at
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Linear-probing hash set that owns its elements.
pub struct HashSet<T, S = FxBuildHasher> {
    id: u64,
    len: usize,
    slots: Vec<Option<T>>,
    occupancy: FixedBitSet,
    descriptor: TypeDescriptor,
    generation: u64,
    build_hasher: S,
}

impl<T> HashSet<T, FxBuildHasher> {
    /// Create an empty set with 16 slots
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAP)
    }

    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        Self::with_capacity_and_hasher(cap, FxBuildHasher)
    }
}

impl<T, S> HashSet<T, S> {
    #[must_use]
    pub fn with_hasher(build_hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAP, build_hasher)
    }

    #[must_use]
    pub fn with_capacity_and_hasher(cap: usize, build_hasher: S) -> Self {
        Self {
            id: next_set_id(),
            len: 0,
            slots: empty_slots(cap),
            occupancy: FixedBitSet::with_capacity(cap),
            descriptor: TypeDescriptor::of::<T>(),
            generation: 0,
            build_hasher,
        }
    }

    #[inline]
    #[must_use]
    pub const fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    /// Number of stored elements, duplicates included
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Number of slots in the table
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every element and empty the table, keeping its capacity
    ///
    /// Outstanding cursors are invalidated.
    pub fn clear(&mut self) {
        for index in self.occupancy.ones() {
            self.slots[index] = None;
        }
        self.occupancy.clear();
        self.len = 0;
        self.generation += 1;
    }

    /// Step to the live element after `prev`, in slot order
    ///
    /// `None` starts from the first slot. Returns `Ok(None)` once every
    /// occupied slot has been visited.
    ///
    /// # Errors
    /// - [`CollectionError::InvariantViolated`] if `prev` was taken before
    ///   the set was resized or cleared
    /// - [`CollectionError::InvalidArgument`] if `prev` came from another set
    ///   or does not point at a live element of this set
    pub fn get_next(
        &self,
        prev: Option<Cursor>,
    ) -> Result<Option<(Cursor, &T)>, CollectionError> {
        let start = match prev {
            None => 0,
            Some(cursor) => {
                self.check_cursor(cursor)?;
                cursor.index + 1
            }
        };

        let Some(index) = (start..self.slots.len()).find(|&i| self.occupancy.contains(i)) else {
            return Ok(None);
        };
        let cursor = Cursor {
            set: self.id,
            index,
            generation: self.generation,
        };
        Ok(Some((cursor, self.slot(index)?)))
    }

    /// The element a cursor points at
    ///
    /// # Errors
    /// Same conditions as [`get_next`](Self::get_next).
    pub fn get(&self, cursor: Cursor) -> Result<&T, CollectionError> {
        self.check_cursor(cursor)?;
        self.slot(cursor.index)
    }

    /// Iterate live elements in slot order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.occupancy
            .ones()
            .filter_map(move |index| self.slots[index].as_ref())
    }

    /// The `n`-th live element in slot order
    #[must_use]
    pub fn nth(&self, n: usize) -> Option<&T> {
        self.iter().nth(n)
    }

    fn check_cursor(&self, cursor: Cursor) -> Result<(), CollectionError> {
        if cursor.set != self.id {
            return Err(CollectionError::InvalidArgument {
                container: "HashSet",
                reason: "cursor belongs to a different set".to_string(),
            });
        }
        if cursor.generation != self.generation {
            return Err(CollectionError::InvariantViolated {
                container: "HashSet",
                reason: "cursor used after the set was resized or cleared".to_string(),
            });
        }
        if cursor.index >= self.slots.len() || !self.occupancy.contains(cursor.index) {
            return Err(CollectionError::InvalidArgument {
                container: "HashSet",
                reason: format!("slot {} holds no element", cursor.index),
            });
        }
        Ok(())
    }

    fn slot(&self, index: usize) -> Result<&T, CollectionError> {
        self.slots[index]
            .as_ref()
            .ok_or_else(|| CollectionError::InvariantViolated {
                container: "HashSet",
                reason: format!("slot {index} is marked occupied but empty"),
            })
    }
}

impl<T: Hash + Eq + Clone> HashSet<T, FxBuildHasher> {
    /// Create a set holding clones of `elems`
    ///
    /// Equal elements are not merged.
    #[must_use]
    pub fn from_slice(elems: &[T]) -> Self {
        let mut set = Self::with_capacity(elems.len().max(DEFAULT_CAP));
        for elem in elems {
            set.insert(elem.clone());
        }
        set
    }
}

impl<T: Hash + Eq, S: BuildHasher> HashSet<T, S> {
    /// Make room for `additional` more elements
    ///
    /// Growing rehashes every live element into a fresh table and
    /// invalidates outstanding cursors.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len + additional;
        if required <= self.slots.len() {
            return;
        }

        let new_cap = grown_capacity(self.slots.len(), required);
        tracing::debug!(
            element = self.descriptor.type_name(),
            len = self.len,
            from = self.slots.len(),
            to = new_cap,
            "rehashing hash set"
        );

        let mut old_slots = std::mem::replace(&mut self.slots, empty_slots(new_cap));
        let old_occupancy =
            std::mem::replace(&mut self.occupancy, FixedBitSet::with_capacity(new_cap));
        for index in old_occupancy.ones() {
            if let Some(value) = old_slots[index].take() {
                self.place(value);
            }
        }
        self.generation += 1;
    }

    /// Store `value`, taking ownership of it
    ///
    /// No equality check is made; see the module docs.
    pub fn insert(&mut self, value: T) {
        self.reserve(1);
        self.place(value);
        self.len += 1;
    }

    /// Whether an element equal to `value` is stored
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        let cap = self.slots.len();
        if cap == 0 {
            return false;
        }

        let start = self.probe_start(value);
        for step in 0..cap {
            let index = (start + step) % cap;
            if !self.occupancy.contains(index) {
                return false;
            }
            if self.slots[index].as_ref() == Some(value) {
                return true;
            }
        }
        false
    }

    fn probe_start(&self, value: &T) -> usize {
        (hash_one(&self.build_hasher, value) % self.slots.len() as u64) as usize
    }

    /// Put `value` in the first free slot of its probe sequence
    ///
    /// The table must have at least one free slot.
    fn place(&mut self, value: T) -> usize {
        let cap = self.slots.len();
        let mut index = self.probe_start(&value);
        while self.occupancy.contains(index) {
            index = (index + 1) % cap;
        }
        self.slots[index] = Some(value);
        self.occupancy.insert(index);
        index
    }
}

fn empty_slots<T>(cap: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(cap).collect()
}

impl<T> Default for HashSet<T, FxBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, S: Clone> Clone for HashSet<T, S> {
    /// Deep copy with the same slot layout, under a new id
    fn clone(&self) -> Self {
        Self {
            id: next_set_id(),
            len: self.len,
            slots: self.slots.clone(),
            occupancy: self.occupancy.clone(),
            descriptor: self.descriptor,
            generation: self.generation,
            build_hasher: self.build_hasher.clone(),
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for HashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Hash + Eq, S: BuildHasher> Extend<T> for HashSet<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq> FromIterator<T> for HashSet<T, FxBuildHasher> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::DynamicString;
    use std::cell::Cell;
    use std::hash::{BuildHasherDefault, Hasher};
    use std::rc::Rc;

    /// Sends every value to the same bucket
    #[derive(Default)]
    struct ConstHasher;

    impl Hasher for ConstHasher {
        fn finish(&self) -> u64 {
            7
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    type Colliding = BuildHasherDefault<ConstHasher>;

    /// Counts drops; equality and hashing look at the id only
    struct Tracked(u32, Rc<Cell<usize>>);

    impl PartialEq for Tracked {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl Eq for Tracked {}

    impl Hash for Tracked {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.0.hash(state);
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.1.set(self.1.get() + 1);
        }
    }

    /// Every live element is reachable from its home slot without crossing
    /// an empty slot
    fn assert_probe_invariant<T: Hash + Eq, S: BuildHasher>(set: &HashSet<T, S>) {
        let cap = set.capacity();
        let mut live = 0;
        for index in set.occupancy.ones() {
            live += 1;
            let value = set.slots[index].as_ref().unwrap();
            let mut probe = set.probe_start(value);
            while probe != index {
                assert!(set.occupancy.contains(probe), "gap before slot {index}");
                probe = (probe + 1) % cap;
            }
        }
        assert_eq!(live, set.len());
    }

    fn words(n: usize) -> Vec<DynamicString> {
        (0..n)
            .map(|i| DynamicString::from(format!("W{i:04}").as_str()))
            .collect()
    }

    #[test]
    fn new_set_is_empty() {
        let set: HashSet<u32> = HashSet::new();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 16);
        assert!(!set.contains(&1));
    }

    #[test]
    fn inserted_elements_are_contained() {
        let mut set = HashSet::new();
        for word in ["CRANE", "SLATE", "TRACE", "AUDIO"] {
            set.insert(DynamicString::from(word));
            assert!(set.contains(&DynamicString::from(word)));
        }
        assert_eq!(set.len(), 4);
        assert!(!set.contains(&DynamicString::from("ZZZZZ")));
        assert_probe_invariant(&set);
    }

    #[test]
    fn growth_preserves_membership() {
        let mut set = HashSet::new();
        let all = words(100);
        for word in &all {
            set.insert(word.clone());
        }
        assert!(set.capacity() >= 100);
        assert_eq!(set.len(), 100);
        for word in &all {
            assert!(set.contains(word), "lost {word} after rehash");
        }
        assert_probe_invariant(&set);
    }

    #[test]
    fn growth_doubles_capacity() {
        let mut set: HashSet<u32> = HashSet::with_capacity(16);
        for i in 0..16 {
            set.insert(i);
        }
        assert_eq!(set.capacity(), 16);
        set.insert(16);
        assert_eq!(set.capacity(), 32);
        set.reserve(100);
        assert_eq!(set.capacity(), 117);
    }

    #[test]
    fn zero_capacity_set_grows_on_insert() {
        let mut set: HashSet<u32> = HashSet::with_capacity(0);
        assert!(!set.contains(&3));
        set.insert(3);
        assert_eq!(set.capacity(), 1);
        assert!(set.contains(&3));
    }

    #[test]
    fn duplicate_insert_is_stored_twice() {
        let mut set = HashSet::new();
        let word = DynamicString::from("TRACE");
        set.insert(word.clone());
        set.insert(word.clone());

        assert_eq!(set.len(), 2);
        let matching = set.iter().filter(|&stored| *stored == word).count();
        assert_eq!(matching, 2);
        assert_probe_invariant(&set);
    }

    #[test]
    fn from_slice_keeps_duplicates() {
        let set = HashSet::from_slice(&[1u32, 2, 2, 3]);
        assert_eq!(set.len(), 4);
        assert_eq!(set.capacity(), 16);
    }

    #[test]
    fn colliding_hashes_probe_and_wrap() {
        let mut set: HashSet<u32, Colliding> =
            HashSet::with_capacity_and_hasher(10, Colliding::default());
        for i in 0..10 {
            set.insert(i);
        }
        assert_eq!(set.capacity(), 10);
        for i in 0..10 {
            assert!(set.contains(&i));
        }
        assert_probe_invariant(&set);
    }

    #[test]
    fn full_table_lookup_of_missing_element_terminates() {
        let mut set: HashSet<u32, Colliding> =
            HashSet::with_capacity_and_hasher(4, Colliding::default());
        for i in 0..4 {
            set.insert(i);
        }
        assert_eq!(set.len(), set.capacity());
        assert!(!set.contains(&99));
    }

    #[test]
    fn get_next_visits_every_element_once() {
        let all = words(40);
        let set = HashSet::from_slice(&all);

        let mut seen = Vec::new();
        let mut cursor = None;
        while let Some((next, value)) = set.get_next(cursor).unwrap() {
            seen.push(value.clone());
            cursor = Some(next);
        }
        seen.sort();
        let mut expected = all;
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn nth_follows_slot_order() {
        let set = HashSet::from_slice(&[3u32, 1, 2]);
        let in_order: Vec<u32> = set.iter().copied().collect();
        for (n, value) in in_order.iter().enumerate() {
            assert_eq!(set.nth(n), Some(value));
        }
        assert_eq!(set.nth(3), None);
    }

    #[test]
    fn get_next_on_empty_set() {
        let set: HashSet<u32> = HashSet::new();
        assert!(set.get_next(None).unwrap().is_none());
    }

    #[test]
    fn cursor_is_invalidated_by_resize() {
        let mut set: HashSet<u32> = HashSet::with_capacity(2);
        set.insert(1);
        let (cursor, _) = set.get_next(None).unwrap().unwrap();
        set.insert(2);
        set.insert(3);
        assert!(matches!(
            set.get_next(Some(cursor)),
            Err(CollectionError::InvariantViolated { .. })
        ));
        assert!(set.get(cursor).is_err());
    }

    #[test]
    fn cursor_survives_insert_without_resize() {
        let mut set: HashSet<u32> = HashSet::new();
        set.insert(1);
        let (cursor, value) = set.get_next(None).unwrap().unwrap();
        assert_eq!(*value, 1);
        set.insert(2);
        assert_eq!(*set.get(cursor).unwrap(), 1);
    }

    #[test]
    fn cursor_from_another_set_is_rejected() {
        let small = HashSet::from_slice(&[7u32]);
        let (cursor, _) = small.get_next(None).unwrap().unwrap();

        let full: HashSet<u32> = (0..16).collect();
        assert!(full.occupancy.contains(cursor.index()));
        assert!(matches!(
            full.get(cursor),
            Err(CollectionError::InvalidArgument { .. })
        ));
        assert!(matches!(
            full.get_next(Some(cursor)),
            Err(CollectionError::InvalidArgument { .. })
        ));
        assert_eq!(*small.get(cursor).unwrap(), 7);
    }

    #[test]
    fn cursor_does_not_carry_over_to_a_clone() {
        let set = HashSet::from_slice(&[1u32, 2, 3]);
        let (cursor, _) = set.get_next(None).unwrap().unwrap();
        let copy = set.clone();
        assert!(copy.get(cursor).is_err());

        let (copy_cursor, value) = copy.get_next(None).unwrap().unwrap();
        assert_eq!(copy_cursor.index(), cursor.index());
        assert_eq!(set.get(cursor).unwrap(), value);
    }

    #[test]
    fn clear_drops_every_element_and_keeps_capacity() {
        let drops = Rc::new(Cell::new(0));
        let mut set = HashSet::new();
        for i in 0..20 {
            set.insert(Tracked(i, Rc::clone(&drops)));
        }
        let cap = set.capacity();
        set.clear();

        assert_eq!(drops.get(), 20);
        assert!(set.is_empty());
        assert_eq!(set.capacity(), cap);
        assert!(set.iter().next().is_none());
        assert!(!set.contains(&Tracked(3, Rc::clone(&drops))));

        // the probe value above is the only extra drop
        drop(set);
        assert_eq!(drops.get(), 21);
    }

    #[test]
    fn clear_then_reuse() {
        let mut set = HashSet::from_slice(&[5u32, 6, 7]);
        set.clear();
        set.insert(6);
        assert!(set.contains(&6));
        assert!(!set.contains(&5));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn clone_is_independent() {
        let original = HashSet::from_slice(&words(5));
        let mut copy = original.clone();
        copy.insert(DynamicString::from("EXTRA"));
        copy.clear();

        assert_eq!(original.len(), 5);
        for word in words(5) {
            assert!(original.contains(&word));
        }
        assert!(!original.contains(&DynamicString::from("EXTRA")));
    }

    #[test]
    fn shuffled_inserts_keep_probe_invariant() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut values: Vec<u32> = (0..500).collect();
        rng.shuffle(&mut values);

        let mut set = HashSet::with_capacity(3);
        for &value in &values {
            set.insert(value);
        }
        assert_probe_invariant(&set);
        assert!(values.iter().all(|v| set.contains(v)));
        assert!(!set.contains(&500));
    }
}
