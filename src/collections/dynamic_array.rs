//! Growable typed array
//!
//! Same growth discipline as [`DynamicString`](super::DynamicString): the
//! array tracks its own logical capacity and only grows when a push would
//! exceed it, doubling with a floor of the exact requirement.

use super::descriptor::{TypeDescriptor, grown_capacity};
use crate::error::CollectionError;
use std::fmt;

const DEFAULT_CAP: usize = 16;

/// A growable array that owns its elements.
pub struct DynamicArray<T> {
    items: Vec<T>,
    capacity: usize,
    descriptor: TypeDescriptor,
}

impl<T> DynamicArray<T> {
    /// Create an empty array with the default capacity of 16
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAP)
    }

    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            capacity: cap,
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
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Make room for `additional` more elements
    pub fn reserve(&mut self, additional: usize) {
        let required = self.items.len() + additional;
        if required <= self.capacity {
            return;
        }
        let new_cap = grown_capacity(self.capacity, required);
        self.items.reserve_exact(new_cap - self.items.len());
        tracing::trace!(
            element = self.descriptor.type_name(),
            from = self.capacity,
            to = new_cap,
            "growing dynamic array"
        );
        self.capacity = new_cap;
    }

    /// Append one element, taking ownership of it
    pub fn push(&mut self, elem: T) {
        self.reserve(1);
        self.items.push(elem);
    }

    /// Drop every element, keeping the capacity
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Step to the element after `prev`
    ///
    /// `None` starts at the first element. Returns the element's index
    /// alongside it so the caller can continue from there, and `Ok(None)`
    /// once the end is reached.
    ///
    /// # Errors
    /// Returns [`CollectionError::InvalidArgument`] if `prev` is not the
    /// index of a live element.
    pub fn get_next(&self, prev: Option<usize>) -> Result<Option<(usize, &T)>, CollectionError> {
        let next = match prev {
            None => 0,
            Some(index) if index < self.items.len() => index + 1,
            Some(index) => {
                return Err(CollectionError::InvalidArgument {
                    container: "DynamicArray",
                    reason: format!("index {index} out of bounds (len {})", self.items.len()),
                });
            }
        };
        Ok(self.items.get(next).map(|elem| (next, elem)))
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Create an array holding clones of `elems`
    #[must_use]
    pub fn from_slice(elems: &[T]) -> Self {
        let mut array = Self::with_capacity(elems.len().max(DEFAULT_CAP));
        array.push_all(elems);
        array
    }

    /// Append clones of every element of `elems`
    pub fn push_all(&mut self, elems: &[T]) {
        self.reserve(elems.len());
        self.items.extend_from_slice(elems);
    }
}

impl<T: PartialEq> DynamicArray<T> {
    /// Linear scan for an equal element
    #[must_use]
    pub fn contains(&self, elem: &T) -> bool {
        self.items.iter().any(|item| item == elem)
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.capacity);
        items.extend_from_slice(&self.items);
        Self {
            items,
            capacity: self.capacity,
            descriptor: self.descriptor,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push(elem);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
